//! Structured diagnostics side-channel
//!
//! A log call whose first argument is a [`Diagnosable`] value (a
//! [`DiagnosticSource`] or [`DiagnosticSourceWithLocation`]) is additionally
//! forwarded to the registry's [`DiagnosticsSink`], with the message formatted
//! from the part of the format string that follows the `"[{}] "` prefix.

use crate::event::format_timestamp;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::time::SystemTime;

/// Describes a class of user-facing problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticSource {
    pub id: &'static str,
    pub name: &'static str,
    pub action: &'static str,
    pub help_links: &'static [&'static str],
}

impl DiagnosticSource {
    pub const fn new(id: &'static str, name: &'static str, action: &'static str) -> Self {
        Self {
            id,
            name,
            action,
            help_links: &[],
        }
    }

    pub const fn with_help_links(mut self, links: &'static [&'static str]) -> Self {
        self.help_links = links;
        self
    }

    /// Attach a source location
    pub fn at(&'static self, file: impl Into<String>, line: u32) -> DiagnosticSourceWithLocation {
        DiagnosticSourceWithLocation {
            source: self,
            file: file.into(),
            line,
        }
    }
}

impl std::fmt::Display for DiagnosticSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id)
    }
}

/// A [`DiagnosticSource`] pinned to a file and line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticSourceWithLocation {
    pub source: &'static DiagnosticSource,
    pub file: String,
    pub line: u32,
}

impl std::fmt::Display for DiagnosticSourceWithLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}:{}", self.source.id, self.file, self.line)
    }
}

/// File position of a diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticLocation {
    pub file: String,
    pub line: u32,
}

/// Values that route a log call to the diagnostics channel
pub trait Diagnosable {
    fn diagnostic_source(&self) -> &DiagnosticSource;

    fn location(&self) -> Option<DiagnosticLocation> {
        None
    }
}

impl Diagnosable for DiagnosticSource {
    fn diagnostic_source(&self) -> &DiagnosticSource {
        self
    }
}

impl Diagnosable for DiagnosticSourceWithLocation {
    fn diagnostic_source(&self) -> &DiagnosticSource {
        self.source
    }

    fn location(&self) -> Option<DiagnosticLocation> {
        Some(DiagnosticLocation {
            file: self.file.clone(),
            line: self.line,
        })
    }
}

impl<T: Diagnosable + ?Sized> Diagnosable for &T {
    fn diagnostic_source(&self) -> &DiagnosticSource {
        (**self).diagnostic_source()
    }

    fn location(&self) -> Option<DiagnosticLocation> {
        (**self).location()
    }
}

/// Receiver of (source, timestamp, message) triples
pub trait DiagnosticsSink: Send + Sync {
    fn write(&self, source: &dyn Diagnosable, time: SystemTime, message: &str) -> io::Result<()>;

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}

/// One diagnostic as emitted by [`JsonLinesDiagnostics`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    pub source_id: String,
    pub name: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub help_links: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<DiagnosticLocation>,
    pub timestamp: String,
    pub message: String,
}

impl DiagnosticRecord {
    pub fn new(source: &dyn Diagnosable, time: SystemTime, message: &str) -> Self {
        let descriptor = source.diagnostic_source();
        Self {
            source_id: descriptor.id.to_string(),
            name: descriptor.name.to_string(),
            action: descriptor.action.to_string(),
            help_links: descriptor
                .help_links
                .iter()
                .map(|link| link.to_string())
                .collect(),
            location: source.location(),
            timestamp: format_timestamp(time),
            message: message.to_string(),
        }
    }
}

/// Writes one JSON object per diagnostic, one per line
pub struct JsonLinesDiagnostics<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesDiagnostics<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> DiagnosticsSink for JsonLinesDiagnostics<W> {
    fn write(&self, source: &dyn Diagnosable, time: SystemTime, message: &str) -> io::Result<()> {
        let record = DiagnosticRecord::new(source, time, message);
        let mut line = serde_json::to_vec(&record)?;
        line.push(b'\n');
        // Encoded before locking; the lock only covers the write
        self.writer.lock().write_all(&line)
    }

    fn flush(&self) -> io::Result<()> {
        self.writer.lock().flush()
    }
}
