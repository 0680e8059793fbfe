//! Named loggers

use crate::diagnostics::Diagnosable;
use crate::event::{Event, SourceLocation};
use crate::registry::{LogRegistry, LoggerConfiguration, Session};
use scribe_core::Severity;
use std::borrow::Cow;
use std::sync::Arc;
use std::time::SystemTime;

/// Handle pushing events into a registry's outputs
#[derive(Clone)]
pub struct EventWriter {
    session: Arc<Session>,
    logger: Arc<str>,
}

impl EventWriter {
    /// Forward a raw event to every enabled output
    pub fn add_event(
        &self,
        severity: Severity,
        category: &'static str,
        timestamp: SystemTime,
        location: Option<SourceLocation>,
        format: &'static str,
        args: Vec<String>,
    ) {
        let event = Event {
            severity,
            category: Cow::Borrowed(category),
            logger: Arc::clone(&self.logger),
            timestamp,
            location,
            format: Cow::Borrowed(format),
            args,
        };
        self.session.write(&event);
    }

    /// Forward a diagnostic emitted at `severity` to the diagnostics channel
    pub fn diagnose(
        &self,
        severity: Severity,
        source: &dyn Diagnosable,
        time: SystemTime,
        message: &str,
    ) {
        self.session.diagnose_at(severity, source, time, message);
    }

    /// Flush every output of the registry this writer belongs to
    pub fn flush(&self) {
        self.session.flush();
    }
}

/// A named logger with a threshold frozen at construction
///
/// Calls below [`Logger::level`] are no-ops. The threshold is resolved from
/// the registry's rules once, so later rule changes never affect an existing
/// logger.
#[derive(Clone)]
pub struct Logger {
    level: Severity,
    writer: EventWriter,
}

impl Logger {
    /// Create a logger on the global registry
    pub fn new(name: &str) -> Self {
        LogRegistry::global().logger(name)
    }

    pub fn from_configuration(configuration: LoggerConfiguration) -> Self {
        Self {
            level: configuration.level,
            writer: EventWriter {
                session: configuration.session,
                logger: Arc::from(configuration.fully_qualified_name),
            },
        }
    }

    /// Fully-qualified name, `<program_name>/<name>`
    pub fn name(&self) -> &str {
        &self.writer.logger
    }

    pub fn level(&self) -> Severity {
        self.level
    }

    pub fn writer(&self) -> &EventWriter {
        &self.writer
    }

    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.level
    }

    /// Log an already formatted message, flushing at `error` and above
    pub fn log_message(&self, severity: Severity, category: &'static str, message: String) {
        self.log_message_at(severity, category, None, message);
    }

    /// Like [`Logger::log_message`], recording where the message came from
    pub fn log_message_at(
        &self,
        severity: Severity,
        category: &'static str,
        location: Option<SourceLocation>,
        message: String,
    ) {
        if self.enabled(severity) {
            // The message is pre-rendered, so it travels as the only argument.
            self.writer.add_event(
                severity,
                category,
                SystemTime::now(),
                location,
                "{}",
                vec![message],
            );
        }
        if severity.forces_flush() {
            self.writer.flush();
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name())
            .field("level", &self.level)
            .finish()
    }
}

/// Source of the logger picked up by the logging macros
///
/// Implemented by [`Logger`] itself (a local, a parameter, or a field passed
/// as `logger: self.logger`) and by any function or closure returning a
/// `&'static Logger`, such as the accessors made by
/// [`define_logger!`](crate::define_logger).
pub trait LoggerProvider {
    fn current(&self) -> &Logger;
}

impl LoggerProvider for Logger {
    fn current(&self) -> &Logger {
        self
    }
}

impl<F> LoggerProvider for F
where
    F: Fn() -> &'static Logger,
{
    fn current(&self) -> &Logger {
        self()
    }
}
