//! Integration tests for the scribe binary.
//!
//! Runs the compiled CLI against binary logs written by a real registry.

#![allow(non_snake_case)]

use scribe_core::{LogConfig, Severity};
use scribe_logging::LogRegistry;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn scribe(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_scribe"))
        .args(args)
        .env_remove("SCRIBE_LOG_LEVELS")
        .output()
        .unwrap()
}

/// Write a binary log with one info and one error event
fn write_binary_log(dir: &TempDir) -> PathBuf {
    let config = LogConfig::new("svc")
        .with_log_dir(dir.path())
        .with_level_rules("out:binary:trace,out:console:no_logs");
    let registry = LogRegistry::builder(config).file_stamp("run").build();
    let logger = registry.logger("worker");

    logger.log_message(Severity::Info, "", "started".to_string());
    logger.log_message(Severity::Error, "io", "disk failure".to_string());
    drop(logger);
    drop(registry);

    dir.path().join("svc").join("run.blog")
}

#[test]
fn read___binary_log___prints_text_lines() {
    let dir = TempDir::new().unwrap();
    let path = write_binary_log(&dir);

    let output = scribe(&["read", path.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("INFO [svc/worker] started"));
    assert!(stdout.contains("ERROR [svc/worker] disk failure (io)"));
}

#[test]
fn read___level_filter___hides_lower_events() {
    let dir = TempDir::new().unwrap();
    let path = write_binary_log(&dir);

    let output = scribe(&["read", "--level", "error", path.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("started"));
    assert!(stdout.contains("disk failure"));
}

#[test]
fn read___missing_file___fails() {
    let output = scribe(&["read", "/nonexistent/run.blog"]);

    assert!(!output.status.success());
}

#[test]
fn check___valid_rules___succeeds() {
    let output = scribe(&["check", "out:console:info,svc/*:debug", "-p", "svc", "-r", "worker"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("svc/worker -> debug"));
}

#[test]
fn check___malformed_rules___fails_with_problems() {
    let output = scribe(&["check", "a:b:c,,foo:bogus,out:nowhere:info,*:debug"]);

    assert!(!output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches('✗').count(), 3);
}

#[test]
fn check___no_rules_and_no_env___fails() {
    let output = scribe(&["check"]);

    assert!(!output.status.success());
}
