//! Call-site support for the logging macros
//!
//! Only the expansion of `log_event!` should name anything here.

use crate::diagnostics::Diagnosable;
use crate::logger::EventWriter;
use scribe_core::Severity;
use std::time::SystemTime;

/// Format prefix that marks a call whose first argument may be diagnosable
pub const DIAGNOSTICS_FORMAT_PREFIX: &str = "[{}] ";

/// Timestamp shared by an event and the diagnostic it produces
#[inline]
pub fn now() -> SystemTime {
    SystemTime::now()
}

/// First argument of a `"[{}] "` call, wrapped for method resolution
///
/// `(&DiagnosticRoute(arg)).route(..)` picks [`RouteToSink`] when the
/// argument is [`Diagnosable`] and falls back to the auto-referenced
/// [`RouteNowhere`] otherwise.
pub struct DiagnosticRoute<'a, T>(pub &'a T);

pub trait RouteToSink {
    fn route<F: FnOnce() -> String>(
        &self,
        writer: &EventWriter,
        severity: Severity,
        time: SystemTime,
        message: F,
    );
}

impl<T: Diagnosable> RouteToSink for DiagnosticRoute<'_, T> {
    #[inline]
    fn route<F: FnOnce() -> String>(
        &self,
        writer: &EventWriter,
        severity: Severity,
        time: SystemTime,
        message: F,
    ) {
        writer.diagnose(severity, self.0, time, &message());
    }
}

pub trait RouteNowhere {
    #[inline]
    fn route<F: FnOnce() -> String>(
        &self,
        _writer: &EventWriter,
        _severity: Severity,
        _time: SystemTime,
        _message: F,
    ) {
    }
}

impl<T> RouteNowhere for &DiagnosticRoute<'_, T> {}

/// Selects an impl by whether `T` is [`Diagnosable`]
///
/// Every type implements `NotDiagnosable<()>`; diagnosable types also
/// implement `NotDiagnosable<u8>`, which leaves the marker ambiguous.
pub trait NotDiagnosable<Marker> {}

impl<T: ?Sized> NotDiagnosable<()> for T {}

impl<T: ?Sized + Diagnosable> NotDiagnosable<u8> for T {}

/// Fails to compile when the first argument of a call without the
/// `"[{}] "` prefix is [`Diagnosable`]
#[inline(always)]
pub fn assert_not_diagnosable<T, Marker>(_: &T)
where
    T: ?Sized + NotDiagnosable<Marker>,
{
}
