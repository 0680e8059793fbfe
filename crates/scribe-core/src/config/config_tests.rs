#![allow(non_snake_case)]

use super::*;
use std::collections::HashMap;
use std::path::Path;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn LogConfig___new___has_no_dir_and_no_rules() {
    let config = LogConfig::new("extractor");

    assert_eq!(config.program_name, "extractor");
    assert!(config.log_dir.is_none());
    assert!(config.level_rules.is_empty());
}

#[test]
fn LogConfig___from_lookup___reads_both_variables() {
    let lookup = lookup_from(&[
        ("SCRIBE_LOG_DIR", "/var/log/tools"),
        ("SCRIBE_LOG_LEVELS", "out:text:debug"),
    ]);

    let config = LogConfig::from_lookup(
        "extractor",
        DEFAULT_LOG_DIR_VAR,
        DEFAULT_LOG_LEVELS_VAR,
        lookup,
    );

    assert_eq!(config.log_dir.as_deref(), Some(Path::new("/var/log/tools")));
    assert_eq!(config.level_rules, "out:text:debug");
}

#[test]
fn LogConfig___from_lookup_missing_vars___degrades_to_defaults() {
    let config = LogConfig::from_lookup(
        "extractor",
        DEFAULT_LOG_DIR_VAR,
        DEFAULT_LOG_LEVELS_VAR,
        lookup_from(&[]),
    );

    assert!(config.log_dir.is_none());
    assert!(config.level_rules.is_empty());
}

#[test]
fn LogConfig___from_lookup_empty_dir___treated_as_unset() {
    let lookup = lookup_from(&[("SCRIBE_LOG_DIR", "  ")]);

    let config = LogConfig::from_lookup("x", DEFAULT_LOG_DIR_VAR, DEFAULT_LOG_LEVELS_VAR, lookup);

    assert!(config.log_dir.is_none());
}

#[test]
fn LogConfig___from_lookup_custom_names___uses_given_variables() {
    let lookup = lookup_from(&[("MY_DIR", "/tmp/logs"), ("SCRIBE_LOG_DIR", "/ignored")]);

    let config = LogConfig::from_lookup("x", "MY_DIR", "MY_LEVELS", lookup);

    assert_eq!(config.log_dir.as_deref(), Some(Path::new("/tmp/logs")));
}

#[test]
fn LogConfig___output_dir___is_subdirectory_named_after_program() {
    let config = LogConfig::new("extractor").with_log_dir("/var/log");

    assert_eq!(
        config.output_dir().as_deref(),
        Some(Path::new("/var/log/extractor"))
    );
}

#[test]
fn LogConfig___output_dir_without_log_dir___is_none() {
    assert!(LogConfig::new("extractor").output_dir().is_none());
}

#[test]
fn LogConfig___qualify___prefixes_program_name() {
    let config = LogConfig::new("svc");

    assert_eq!(config.qualify("worker"), "svc/worker");
}

#[test]
fn LogConfig___from_json_minimal___uses_defaults() {
    let config = LogConfig::from_json(br#"{"program_name": "svc"}"#).unwrap();

    assert_eq!(config, LogConfig::new("svc"));
}

#[test]
fn LogConfig___from_json_missing_program_name___fails() {
    assert!(LogConfig::from_json(b"{}").is_err());
}
