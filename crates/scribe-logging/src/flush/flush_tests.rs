#![allow(non_snake_case)]

use super::*;
use scribe_core::{LogConfig, Severity};
use std::fs;
use std::time::Instant;
use tempfile::TempDir;

fn file_registry() -> (&'static LogRegistry, TempDir) {
    let dir = TempDir::new().unwrap();
    let registry = LogRegistry::builder(LogConfig::new("svc").with_log_dir(dir.path()))
        .file_stamp("run")
        .build();
    (Box::leak(Box::new(registry)), dir)
}

fn text_log(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join("svc").join("run.log")).unwrap_or_default()
}

#[test]
fn PeriodicFlush___spawn___runs_named_thread() {
    let (registry, _dir) = file_registry();

    let flusher = PeriodicFlush::spawn(registry, Duration::from_secs(60)).unwrap();

    assert!(flusher.is_running());
}

#[test]
fn PeriodicFlush___interval_elapsed___flushes_buffered_events() {
    let (registry, dir) = file_registry();
    let logger = registry.logger("worker");
    let _flusher = PeriodicFlush::spawn(registry, Duration::from_millis(10)).unwrap();

    logger.log_message(Severity::Info, "", "eventually visible".to_string());

    let deadline = Instant::now() + Duration::from_secs(5);
    while !text_log(&dir).contains("eventually visible") && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(10));
    }
    assert!(text_log(&dir).contains("eventually visible"));
}

#[test]
fn PeriodicFlush___drop___stops_thread_and_flushes() {
    let (registry, dir) = file_registry();
    let logger = registry.logger("worker");
    let flusher = PeriodicFlush::spawn(registry, Duration::from_secs(3600)).unwrap();

    logger.log_message(Severity::Info, "", "flushed on drop".to_string());
    let started = Instant::now();
    drop(flusher);

    assert!(started.elapsed() < Duration::from_secs(60));
    assert!(text_log(&dir).contains("flushed on drop"));
}

#[test]
fn PeriodicFlush___debug___reports_running_state() {
    let (registry, _dir) = file_registry();
    let flusher = PeriodicFlush::spawn(registry, Duration::from_secs(60)).unwrap();

    assert!(format!("{flusher:?}").contains("running: true"));
}
