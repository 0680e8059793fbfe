//! Tracing layer that forwards `tracing` events to scribe loggers

use crate::event::SourceLocation;
use crate::logger::Logger;
use crate::registry::LogRegistry;
use parking_lot::RwLock;
use scribe_core::Severity;
use std::collections::HashMap;
use std::fmt::Write as _;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Tracing layer that logs each event through the scribe logger named after
/// its target
///
/// A target `my_crate::store` maps to the logger `my_crate/store`, so name
/// rules such as `prog/my_crate/*:debug` apply to tracing events too.
pub struct ScribeLayer {
    registry: &'static LogRegistry,
    loggers: RwLock<HashMap<String, Logger>>,
}

impl ScribeLayer {
    /// Create a layer on the global registry
    pub fn new() -> Self {
        Self::with_registry(LogRegistry::global())
    }

    /// Create a layer on a specific registry
    pub fn with_registry(registry: &'static LogRegistry) -> Self {
        Self {
            registry,
            loggers: RwLock::new(HashMap::new()),
        }
    }

    /// Convert tracing Level to our Severity
    fn convert_level(level: &Level) -> Severity {
        match *level {
            Level::TRACE => Severity::Trace,
            Level::DEBUG => Severity::Debug,
            Level::INFO => Severity::Info,
            Level::WARN => Severity::Warning,
            Level::ERROR => Severity::Error,
        }
    }

    fn logger_name(target: &str) -> String {
        target.replace("::", "/")
    }

    /// Run `f` with the logger for `target`, creating it on first use
    fn with_logger<R>(&self, target: &str, f: impl FnOnce(&Logger) -> R) -> R {
        // Fast path: logger already cached
        if let Some(logger) = self.loggers.read().get(target) {
            return f(logger);
        }

        // Slow path: resolve the threshold once and cache the logger
        let mut loggers = self.loggers.write();
        let logger = loggers
            .entry(target.to_string())
            .or_insert_with(|| self.registry.logger(&Self::logger_name(target)));
        f(logger)
    }
}

impl Default for ScribeLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for ScribeLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let severity = Self::convert_level(metadata.level());

        self.with_logger(metadata.target(), |logger| {
            if !logger.enabled(severity) {
                return;
            }
            let mut visitor = MessageVisitor::default();
            event.record(&mut visitor);
            // Only events from a known file carry a location.
            let location = metadata
                .file()
                .zip(metadata.line())
                .map(|(file, line)| SourceLocation::new(file, line));
            logger.log_message_at(severity, "", location, visitor.finish());
        });
    }

    fn enabled(&self, metadata: &tracing::Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        let severity = Self::convert_level(metadata.level());
        self.with_logger(metadata.target(), |logger| logger.enabled(severity))
    }
}

/// Collects the `message` field followed by the other fields as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        match self.message {
            Some(mut message) => {
                message.push_str(&self.fields);
                message
            }
            None => self.fields.trim_start().to_string(),
        }
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            let _ = write!(self.fields, " {}={value:?}", field.name());
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            let _ = write!(self.fields, " {}={value}", field.name());
        }
    }
}

/// Route `tracing` events through the global registry
///
/// Sets a global default subscriber made of a [`ScribeLayer`]; does nothing
/// if a global subscriber is already set.
pub fn init_tracing_bridge() {
    use tracing_subscriber::prelude::*;

    let subscriber = tracing_subscriber::registry().with(ScribeLayer::new());
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
#[path = "layer/layer_tests.rs"]
mod layer_tests;
