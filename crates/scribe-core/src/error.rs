//! Error types for scribe

use thiserror::Error;

/// Result type alias for scribe operations
pub type ScribeResult<T> = Result<T, ScribeError>;

/// Error type for scribe operations
///
/// Rule problems are never fatal: they are collected while parsing and
/// configuration carries on with the valid entries.
#[derive(Error, Debug)]
pub enum ScribeError {
    /// A rule entry that does not have the `pattern:level` shape
    #[error("malformed level rule `{rule}`: {reason}")]
    MalformedRule { rule: String, reason: String },

    /// A level name that is not a known severity
    #[error("unknown log level `{0}`")]
    UnknownLevel(String),

    /// An `out:` token naming an output that does not exist
    #[error("unknown output `{0}`")]
    UnknownOutput(String),

    /// A logger glob containing unsupported characters
    #[error("invalid logger pattern `{0}`")]
    InvalidPattern(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScribeError {
    /// Wrap a problem found while parsing a single rule entry
    pub fn malformed(rule: &str, reason: impl std::fmt::Display) -> Self {
        ScribeError::MalformedRule {
            rule: rule.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for ScribeError {
    fn from(err: serde_json::Error) -> Self {
        ScribeError::SerializationError(err.to_string())
    }
}
