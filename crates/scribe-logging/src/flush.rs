//! Background flushing of a registry's outputs

use crate::registry::LogRegistry;
use parking_lot::{Condvar, Mutex};
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Name of the background flush thread
pub const FLUSH_THREAD_NAME: &str = "scribe-flush";

#[derive(Default)]
struct StopSignal {
    stopped: Mutex<bool>,
    condvar: Condvar,
}

/// Handle to a thread flushing a registry every interval
///
/// Dropping the handle stops the thread, waits for it, then flushes one last
/// time.
pub struct PeriodicFlush {
    registry: &'static LogRegistry,
    signal: Arc<StopSignal>,
    thread: Option<JoinHandle<()>>,
}

impl PeriodicFlush {
    pub fn spawn(registry: &'static LogRegistry, interval: Duration) -> io::Result<Self> {
        let signal = Arc::new(StopSignal::default());
        let thread_signal = Arc::clone(&signal);
        let thread = thread::Builder::new()
            .name(FLUSH_THREAD_NAME.to_string())
            .spawn(move || flush_loop(registry, &thread_signal, interval))?;

        Ok(Self {
            registry,
            signal,
            thread: Some(thread),
        })
    }

    pub fn is_running(&self) -> bool {
        self.thread
            .as_ref()
            .is_some_and(|thread| !thread.is_finished())
    }
}

fn flush_loop(registry: &LogRegistry, signal: &StopSignal, interval: Duration) {
    let mut stopped = signal.stopped.lock();
    while !*stopped {
        // Wakes early only when the handle is dropped
        let timeout = signal.condvar.wait_for(&mut stopped, interval);
        if timeout.timed_out() && !*stopped {
            registry.flush();
        }
    }
}

impl Drop for PeriodicFlush {
    fn drop(&mut self) {
        // Stop the thread first so the last flush cannot race with it
        *self.signal.stopped.lock() = true;
        self.signal.condvar.notify_all();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
        self.registry.flush();
    }
}

impl std::fmt::Debug for PeriodicFlush {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeriodicFlush")
            .field("running", &self.is_running())
            .finish()
    }
}

#[cfg(test)]
#[path = "flush/flush_tests.rs"]
mod flush_tests;
