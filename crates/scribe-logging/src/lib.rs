//! scribe-logging - Leveled, multi-output logging with named loggers
//!
//! This crate provides:
//! - [`LogRegistry`] owning the outputs (binary, text, console, diagnostics)
//!   and the logger name rules, configured once on first use
//! - [`Logger`] handles with a severity threshold frozen at construction
//! - the `log_trace!` … `log_critical!` macros, which skip all argument work
//!   below the threshold and flush at `Error` and above
//! - a structured diagnostics channel fed by `"[{}] "` calls whose first
//!   argument is a [`DiagnosticSource`]
//! - [`ScribeLayer`] forwarding `tracing` events to loggers
//!
//! ```
//! use scribe_logging::{LogRegistry, log_info};
//! use scribe_core::LogConfig;
//!
//! let registry = LogRegistry::new(LogConfig::new("demo").with_level_rules("out:console:no_logs"));
//! let logger = registry.logger("startup");
//! log_info!("listening on port {}", 8080);
//! ```

mod binary;
mod diagnostics;
mod dispatch;
mod event;
mod flush;
mod layer;
mod logger;
mod macros;
mod output;
mod registry;

#[cfg(test)]
mod test_support;

pub use binary::{BinaryReader, BinarySink};
pub use diagnostics::{
    Diagnosable, DiagnosticLocation, DiagnosticRecord, DiagnosticSource,
    DiagnosticSourceWithLocation, DiagnosticsSink, JsonLinesDiagnostics,
};
pub use event::{Event, SourceLocation, format_timestamp, render_template};
pub use flush::{FLUSH_THREAD_NAME, PeriodicFlush};
pub use layer::{ScribeLayer, init_tracing_bridge};
pub use logger::{EventWriter, Logger, LoggerProvider};
pub use output::{EventSink, Output, TextSink};
pub use registry::{
    FlushGuard, LogRegistry, LogRegistryBuilder, LoggerConfiguration, REGISTRY_LOGGER_NAME, init,
};
pub use scribe_core::{LogConfig, OutputKind, Severity};

/// Items used by macro expansions
#[doc(hidden)]
pub mod __private {
    pub use crate::dispatch::*;
    pub use once_cell::sync::Lazy;
    pub use scribe_macros::log_event;
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        DiagnosticSource, LogRegistry, Logger, LoggerProvider, Severity, define_logger,
        log_critical, log_debug, log_error, log_info, log_trace, log_warning,
        log_with_category,
    };
}
