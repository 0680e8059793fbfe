//! Outputs: sinks gated by a minimum severity

use crate::event::Event;
use parking_lot::Mutex;
use scribe_core::{OutputKind, Severity};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

/// Destination for events that passed an output's filter
pub trait EventSink: Send {
    fn write_event(&mut self, event: &Event) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;
}

/// Human-readable sink writing one rendered line per event
pub struct TextSink<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> EventSink for TextSink<W> {
    fn write_event(&mut self, event: &Event) -> io::Result<()> {
        writeln!(self.writer, "{}", event.render_line())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// A sink paired with a minimum severity
///
/// An output configured with [`Severity::NoLogs`] is disabled and every call
/// on it returns before touching the sink. Writes are serialized per output,
/// so events from one thread keep their order.
pub struct Output {
    kind: OutputKind,
    level: Severity,
    sink: Option<Mutex<Box<dyn EventSink>>>,
    failed: AtomicBool,
}

impl Output {
    pub fn new(kind: OutputKind, level: Severity, sink: Box<dyn EventSink>) -> Self {
        Self {
            kind,
            level,
            sink: Some(Mutex::new(sink)),
            failed: AtomicBool::new(false),
        }
    }

    /// An output that never emits
    pub fn disabled(kind: OutputKind) -> Self {
        Self {
            kind,
            level: Severity::NoLogs,
            sink: None,
            failed: AtomicBool::new(false),
        }
    }

    pub fn kind(&self) -> OutputKind {
        self.kind
    }

    pub fn level(&self) -> Severity {
        self.level
    }

    pub fn is_enabled(&self) -> bool {
        self.level.emits() && self.sink.is_some()
    }

    /// Event filter: does an event at `severity` reach the sink
    pub fn accepts(&self, severity: Severity) -> bool {
        self.is_enabled() && severity >= self.level
    }

    pub fn write(&self, event: &Event) {
        if !self.is_enabled() {
            return;
        }
        // Event filter
        if let Some(sink) = self.sink.as_ref().filter(|_| self.accepts(event.severity)) {
            let result = sink.lock().write_event(event);
            self.report(result);
        }
    }

    pub fn flush(&self) {
        if let Some(sink) = self.sink.as_ref().filter(|_| self.is_enabled()) {
            let result = sink.lock().flush();
            self.report(result);
        }
    }

    fn report(&self, result: io::Result<()>) {
        report_failure(&self.failed, self.kind, result);
    }
}

/// Report a failed write or flush of an output to stderr
///
/// Only the first failure per `failed` flag is printed, later ones are
/// dropped. Returns whether this call printed. Never goes through a registry,
/// so a broken output cannot log about itself.
pub(crate) fn report_failure(
    failed: &AtomicBool,
    output: impl std::fmt::Display,
    result: io::Result<()>,
) -> bool {
    let Err(err) = result else {
        return false;
    };
    if failed.swap(true, Ordering::SeqCst) {
        return false;
    }
    let _ = writeln!(io::stderr(), "scribe: {output} output failed: {err}");
    true
}

impl std::fmt::Debug for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Output")
            .field("kind", &self.kind)
            .field("level", &self.level)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
