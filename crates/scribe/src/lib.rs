//! # scribe
//!
//! Leveled, multi-output logging with named loggers.
//!
//! scribe provides:
//! - Named loggers whose severity threshold is resolved once from rules
//! - Four outputs: binary, text, console and structured diagnostics
//! - Configuration from the environment (`SCRIBE_LOG_DIR`, `SCRIBE_LOG_LEVELS`)
//! - Logging macros that evaluate nothing below the threshold and flush at
//!   `Error` and above
//!
//! ## Quick Start
//!
//! ```no_run
//! use scribe::prelude::*;
//!
//! define_logger!(fn logger() => "server");
//!
//! fn main() {
//!     let _guard = scribe::init("my-server").expect("logging already initialized");
//!     log_info!("listening on {}", "0.0.0.0:8080");
//! }
//! ```
//!
//! The global registry is never dropped, so the guard returned by
//! [`init`] does the final flush when `main` returns.
//!
//! With `SCRIBE_LOG_DIR=/var/log` and
//! `SCRIBE_LOG_LEVELS=out:console:info,my-server/server:debug`, the program
//! above writes `/var/log/my-server/<stamp>.log` and echoes `info` and above
//! to standard error.
//!
//! ## Level rules
//!
//! `SCRIBE_LOG_LEVELS` is a comma separated list of `pattern:level` entries.
//! A pattern is either one of `out:binary`, `out:text`, `out:console`,
//! `out:diagnostics`, which sets that output's floor, or a glob over
//! fully-qualified logger names (`<program>/<name>`) where `*` matches any
//! run of characters. The first matching glob sets a logger's threshold;
//! without a match the threshold is the lowest floor of the enabled outputs.
//!
//! ## Diagnostics
//!
//! A call whose format starts with `"[{}] "` and whose first argument is a
//! [`DiagnosticSource`] also sends the rest of the message to the diagnostics
//! channel:
//!
//! ```
//! use scribe::prelude::*;
//! # use scribe::LogConfig;
//!
//! static MISSING_TOOLCHAIN: DiagnosticSource =
//!     DiagnosticSource::new("build/toolchain", "Missing toolchain", "Install swiftc");
//!
//! # let registry = LogRegistry::new(LogConfig::new("doc").with_level_rules("out:console:no_logs"));
//! let logger = registry.logger("build");
//! log_error!("[{}] {} not found in PATH", MISSING_TOOLCHAIN, "swiftc");
//! ```
//!
//! Passing a diagnostic source without the prefix does not compile:
//!
//! ```compile_fail
//! use scribe::prelude::*;
//! # use scribe::LogConfig;
//!
//! static MISSING_TOOLCHAIN: DiagnosticSource =
//!     DiagnosticSource::new("build/toolchain", "Missing toolchain", "Install swiftc");
//!
//! # let registry = LogRegistry::new(LogConfig::new("doc"));
//! let logger = registry.logger("build");
//! log_error!("{} not found", MISSING_TOOLCHAIN);
//! ```
//!
//! Neither does a format whose placeholders and arguments disagree:
//!
//! ```compile_fail
//! use scribe::prelude::*;
//! # use scribe::LogConfig;
//!
//! # let registry = LogRegistry::new(LogConfig::new("doc"));
//! let logger = registry.logger("build");
//! log_info!("copied {} of {}", 3);
//! ```
//!
//! or one that is not a string literal:
//!
//! ```compile_fail
//! use scribe::prelude::*;
//! # use scribe::LogConfig;
//!
//! # let registry = LogRegistry::new(LogConfig::new("doc"));
//! let logger = registry.logger("build");
//! let format = "copied {}";
//! log_info!(format, 3);
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`scribe_core`] - Severity, rule grammar, configuration and errors
//! - [`scribe_logging`] - Registry, outputs, loggers and macros

// Re-export core types
pub use scribe_core::{
    DEFAULT_LOG_DIR_VAR, DEFAULT_LOG_LEVELS_VAR, LevelRule, LevelRules, LogConfig, NamePattern,
    NameRule, OutputKind, ScribeError, ScribeResult, Severity,
};

// Re-export logging types
pub use scribe_logging::{
    BinaryReader, BinarySink, Diagnosable, DiagnosticLocation, DiagnosticRecord,
    DiagnosticSource, DiagnosticSourceWithLocation, DiagnosticsSink, Event, EventSink,
    EventWriter, FlushGuard, JsonLinesDiagnostics, LogRegistry, LogRegistryBuilder, Logger,
    LoggerConfiguration, LoggerProvider, Output, PeriodicFlush, ScribeLayer, SourceLocation,
    TextSink, init_tracing_bridge,
};

// Re-export macros
pub use scribe_logging::{
    define_logger, log_critical, log_debug, log_error, log_info, log_trace, log_warning,
    log_with_category,
};

// Re-export common dependencies that users need
pub use tracing;

/// Initialize the global registry for `program_name` from the environment
///
/// Fails if the global registry was already initialized, explicitly or by an
/// earlier logging call through the global registry. Hold the returned guard
/// until the end of `main`: dropping it flushes every output.
pub fn init(program_name: impl Into<String>) -> ScribeResult<FlushGuard> {
    scribe_logging::init(program_name)
}

/// Prelude module for convenient imports.
///
/// Use `use scribe::prelude::*;` to import commonly used types.
///
/// This includes:
/// - Types: `Severity`, `Logger`, `LogRegistry`, `DiagnosticSource`
/// - The `LoggerProvider` trait used by the macros
/// - Macros: `log_trace!` … `log_critical!`, `log_with_category!`, `define_logger!`
pub mod prelude {
    // Core types
    pub use crate::{DiagnosticSource, LogRegistry, Logger, LoggerProvider, Severity};

    // Macros
    pub use crate::{
        define_logger, log_critical, log_debug, log_error, log_info, log_trace, log_warning,
        log_with_category,
    };
}
