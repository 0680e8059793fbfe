//! scribe-core - Severity levels, configuration, and level rules
//!
//! This crate provides the foundational types shared by the scribe crates:
//! - [`Severity`] for ordering and filtering log events
//! - [`OutputKind`] naming the configurable outputs
//! - [`LevelRules`] parsed from a `pattern:level,...` rule string
//! - [`LogConfig`] for environment or JSON driven configuration
//! - [`ScribeError`] for error handling

mod config;
mod error;
mod rules;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use config::{DEFAULT_LOG_DIR_VAR, DEFAULT_LOG_LEVELS_VAR, LogConfig};
pub use error::{ScribeError, ScribeResult};
pub use rules::{LevelRule, LevelRules, NamePattern, NameRule, OutputKind};

/// Ordered log severity
///
/// `NoLogs` is a sentinel strictly greater than every real level: an output or
/// logger configured with it never emits.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warning = 3,
    Error = 4,
    Critical = 5,
    NoLogs = 6,
}

impl Severity {
    /// Every severity, in ascending order
    pub const ALL: [Severity; 7] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
        Severity::NoLogs,
    ];

    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Severity::Trace,
            1 => Severity::Debug,
            2 => Severity::Info,
            3 => Severity::Warning,
            4 => Severity::Error,
            5 => Severity::Critical,
            _ => Severity::NoLogs,
        }
    }

    /// Canonical lowercase name, as accepted in level rules
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Trace => "trace",
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
            Severity::NoLogs => "no_logs",
        }
    }

    /// Uppercase label used in human-readable output
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
            Severity::NoLogs => "NO_LOGS",
        }
    }

    /// Whether something configured at this level can ever emit
    pub const fn emits(self) -> bool {
        (self as u8) < (Severity::NoLogs as u8)
    }

    /// Whether an event at this level forces a synchronous flush
    pub const fn forces_flush(self) -> bool {
        (self as u8) >= (Severity::Error as u8)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ScribeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Severity::Trace),
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "critical" => Ok(Severity::Critical),
            "no_logs" | "off" => Ok(Severity::NoLogs),
            _ => Err(ScribeError::UnknownLevel(s.to_string())),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LevelRules, LogConfig, OutputKind, ScribeError, ScribeResult, Severity};
}
