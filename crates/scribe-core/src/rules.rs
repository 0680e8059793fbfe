//! Level rule grammar
//!
//! A rule string is a comma separated list of `selector:level` entries, where
//! `selector` is either a glob over fully-qualified logger names or one of the
//! reserved output tokens `out:binary`, `out:text`, `out:console` and
//! `out:diagnostics`. Malformed entries are collected as problems rather than
//! failing the whole string.

use crate::{ScribeError, ScribeResult, Severity};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The configurable outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// Compact binary event file
    Binary,
    /// Human-readable log file
    Text,
    /// Human-readable standard error
    Console,
    /// Structured diagnostics channel
    Diagnostics,
}

impl OutputKind {
    pub const ALL: [OutputKind; 4] = [
        OutputKind::Binary,
        OutputKind::Text,
        OutputKind::Console,
        OutputKind::Diagnostics,
    ];

    /// Name used after `out:` in rule strings
    pub const fn name(self) -> &'static str {
        match self {
            OutputKind::Binary => "binary",
            OutputKind::Text => "text",
            OutputKind::Console => "console",
            OutputKind::Diagnostics => "diagnostics",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Level an output starts with before any rule applies
    ///
    /// File-backed outputs are further disabled when no log directory is set.
    pub const fn default_level(self) -> Severity {
        match self {
            OutputKind::Binary => Severity::NoLogs,
            OutputKind::Text => Severity::Info,
            OutputKind::Console => Severity::Warning,
            OutputKind::Diagnostics => Severity::Error,
        }
    }

    /// Whether the output writes below the log directory
    pub const fn is_file_backed(self) -> bool {
        !matches!(self, OutputKind::Console)
    }
}

impl std::fmt::Display for OutputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "out:{}", self.name())
    }
}

/// Glob over fully-qualified logger names
///
/// Made of alphanumerics, `/`, `.`, `_`, `-` and `*`; `*` matches any run of
/// characters (including `/`) and the pattern must match the whole name.
#[derive(Debug, Clone)]
pub struct NamePattern {
    glob: String,
    regex: Regex,
}

impl NamePattern {
    pub fn parse(glob: &str) -> ScribeResult<Self> {
        let valid = !glob.is_empty()
            && glob
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '*' | '.' | '_' | '-'));
        if !valid {
            return Err(ScribeError::InvalidPattern(glob.to_string()));
        }

        let anchored = format!("^{}$", regex::escape(glob).replace(r"\*", ".*"));
        let regex =
            Regex::new(&anchored).map_err(|_| ScribeError::InvalidPattern(glob.to_string()))?;
        Ok(Self {
            glob: glob.to_string(),
            regex,
        })
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    pub fn as_str(&self) -> &str {
        &self.glob
    }
}

impl PartialEq for NamePattern {
    fn eq(&self, other: &Self) -> bool {
        self.glob == other.glob
    }
}

impl Eq for NamePattern {}

/// A logger name pattern mapped to a threshold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRule {
    pub pattern: NamePattern,
    pub level: Severity,
}

/// One parsed rule entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelRule {
    /// `out:<name>:<level>` sets an output's minimum severity
    Output(OutputKind, Severity),
    /// `<glob>:<level>` sets the threshold of matching loggers
    Name(NameRule),
}

impl LevelRule {
    /// Parse a single `selector:level` entry
    pub fn parse(entry: &str) -> ScribeResult<Self> {
        let Some((selector, level)) = entry.rsplit_once(':') else {
            return Err(ScribeError::malformed(entry, "expected `pattern:level`"));
        };
        let level: Severity = level
            .parse()
            .map_err(|err| ScribeError::malformed(entry, err))?;

        if let Some(output) = selector.strip_prefix("out:") {
            let kind = OutputKind::from_name(output).ok_or_else(|| {
                ScribeError::malformed(entry, ScribeError::UnknownOutput(selector.to_string()))
            })?;
            return Ok(LevelRule::Output(kind, level));
        }

        let pattern =
            NamePattern::parse(selector).map_err(|err| ScribeError::malformed(entry, err))?;
        Ok(LevelRule::Name(NameRule { pattern, level }))
    }
}

impl std::fmt::Display for LevelRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelRule::Output(kind, level) => write!(f, "{kind}:{level}"),
            LevelRule::Name(rule) => write!(f, "{}:{}", rule.pattern.as_str(), rule.level),
        }
    }
}

/// Result of parsing a rule string
#[derive(Debug, Default)]
pub struct LevelRules {
    /// Output level settings, in parse order
    pub outputs: Vec<(OutputKind, Severity)>,
    /// Logger name rules, in parse order
    pub names: Vec<NameRule>,
    /// Entries that could not be parsed
    pub problems: Vec<ScribeError>,
}

impl LevelRules {
    /// Parse a `selector:level,...` string, skipping empty entries
    pub fn parse(text: &str) -> Self {
        let mut rules = Self::default();
        for entry in text.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            match LevelRule::parse(entry) {
                Ok(LevelRule::Output(kind, level)) => rules.outputs.push((kind, level)),
                Ok(LevelRule::Name(rule)) => rules.names.push(rule),
                Err(err) => rules.problems.push(err),
            }
        }
        rules
    }

    /// Threshold of the first name rule matching `qualified_name`
    pub fn resolve(&self, qualified_name: &str) -> Option<Severity> {
        self.names
            .iter()
            .find(|rule| rule.pattern.matches(qualified_name))
            .map(|rule| rule.level)
    }

    /// Level configured for an output; the last entry for it wins
    pub fn output_level(&self, kind: OutputKind) -> Option<Severity> {
        self.outputs
            .iter()
            .rev()
            .find(|(k, _)| *k == kind)
            .map(|(_, level)| *level)
    }

    pub fn has_problems(&self) -> bool {
        !self.problems.is_empty()
    }
}
