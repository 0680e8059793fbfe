//! Tests for flushing the global registry at process exit.
//!
//! The global registry is never dropped, so these tests re-run this test
//! binary as a child process that logs through `scribe::init` and exits,
//! then read what the child left on disk.

#![allow(non_snake_case)]

use scribe::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Set in the environment of the child process
const CHILD_VAR: &str = "SCRIBE_EXIT_FLUSH_CHILD";

define_logger!(fn logger() => "worker");

/// What `main` of a program using scribe looks like
fn child_main() {
    let _guard = scribe::init("exitflush").unwrap();

    log_info!("info line {}", 1);
    log_warning!("warning line {}", 2);
}

#[test]
fn init___child_process___logs_and_returns() {
    // Only does work when spawned by the test below.
    if std::env::var_os(CHILD_VAR).is_none() {
        return;
    }
    child_main();
}

fn text_logs(dir: &TempDir) -> Vec<PathBuf> {
    fs::read_dir(dir.path().join("exitflush"))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "log"))
        .collect()
}

#[test]
fn init___guard_held_until_exit___text_log_flushed() {
    let dir = TempDir::new().unwrap();

    let output = Command::new(std::env::current_exe().unwrap())
        .args(["init___child_process___logs_and_returns", "--exact", "--nocapture"])
        .env(CHILD_VAR, "1")
        .env("SCRIBE_LOG_DIR", dir.path())
        .env_remove("SCRIBE_LOG_LEVELS")
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "child failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let logs = text_logs(&dir);
    assert_eq!(logs.len(), 1);
    let text = fs::read_to_string(&logs[0]).unwrap();
    assert!(text.contains("INFO [exitflush/worker] info line 1"));
    assert!(text.contains("WARNING [exitflush/worker] warning line 2"));
}
