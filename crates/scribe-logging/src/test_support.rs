//! Capturing writers shared by the unit tests

use crate::diagnostics::{Diagnosable, DiagnosticsSink};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::SystemTime;

/// Cloneable in-memory writer
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// One captured diagnostic
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Captured {
    pub(crate) source_id: &'static str,
    pub(crate) time: SystemTime,
    pub(crate) message: String,
}

#[derive(Clone, Default)]
pub(crate) struct CaptureDiagnostics(Arc<Mutex<Vec<Captured>>>);

impl CaptureDiagnostics {
    pub(crate) fn captured(&self) -> Vec<Captured> {
        self.0.lock().clone()
    }
}

impl DiagnosticsSink for CaptureDiagnostics {
    fn write(&self, source: &dyn Diagnosable, time: SystemTime, message: &str) -> io::Result<()> {
        self.0.lock().push(Captured {
            source_id: source.diagnostic_source().id,
            time,
            message: message.to_string(),
        });
        Ok(())
    }
}
