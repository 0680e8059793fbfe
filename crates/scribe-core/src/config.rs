//! Logging configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable selecting the directory for file-backed outputs
pub const DEFAULT_LOG_DIR_VAR: &str = "SCRIBE_LOG_DIR";

/// Environment variable holding the `pattern:level,...` rule string
pub const DEFAULT_LOG_LEVELS_VAR: &str = "SCRIBE_LOG_LEVELS";

/// Configuration read once when a registry is configured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Root name of every logger; also names the output subdirectory
    pub program_name: String,

    /// Directory for file-backed outputs (binary, text, diagnostics)
    ///
    /// Files go to `<log_dir>/<program_name>/`. When unset, those outputs
    /// are disabled.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Level rules in the form `pattern:level,pattern:level,...`
    #[serde(default)]
    pub level_rules: String,
}

impl LogConfig {
    /// Create a configuration with no directory and no rules
    pub fn new(program_name: impl Into<String>) -> Self {
        Self {
            program_name: program_name.into(),
            log_dir: None,
            level_rules: String::new(),
        }
    }

    /// Read `SCRIBE_LOG_DIR` and `SCRIBE_LOG_LEVELS` from the process environment
    pub fn from_env(program_name: impl Into<String>) -> Self {
        Self::from_env_vars(program_name, DEFAULT_LOG_DIR_VAR, DEFAULT_LOG_LEVELS_VAR)
    }

    /// Read the given environment variables from the process environment
    pub fn from_env_vars(program_name: impl Into<String>, dir_var: &str, levels_var: &str) -> Self {
        Self::from_lookup(program_name, dir_var, levels_var, |key| {
            std::env::var(key).ok()
        })
    }

    /// Build a configuration from an arbitrary variable lookup
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(
        program_name: impl Into<String>,
        dir_var: &str,
        levels_var: &str,
        lookup: F,
    ) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            program_name: program_name.into(),
            log_dir: non_empty(dir_var).map(PathBuf::from),
            level_rules: non_empty(levels_var).unwrap_or_default(),
        }
    }

    /// Create configuration from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Set the output directory
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// Set the level rule string
    pub fn with_level_rules(mut self, rules: impl Into<String>) -> Self {
        self.level_rules = rules.into();
        self
    }

    /// Directory file-backed outputs are written to, if any
    pub fn output_dir(&self) -> Option<PathBuf> {
        self.log_dir
            .as_ref()
            .map(|dir| dir.join(&self.program_name))
    }

    /// Fully-qualified logger name: `<program_name>/<name>`
    pub fn qualify(&self, name: &str) -> String {
        format!("{}/{}", self.program_name, name)
    }
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;
