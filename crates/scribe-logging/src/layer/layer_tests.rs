#![allow(non_snake_case)]

use super::*;
use crate::test_support::SharedBuffer;
use scribe_core::LogConfig;
use test_case::test_case;
use tracing_subscriber::prelude::*;

fn leaked_registry(rules: &str) -> (&'static LogRegistry, SharedBuffer) {
    let console = SharedBuffer::default();
    let registry = LogRegistry::builder(LogConfig::new("svc").with_level_rules(rules))
        .console_writer(console.clone())
        .build();
    (Box::leak(Box::new(registry)), console)
}

fn with_layer(registry: &'static LogRegistry, f: impl FnOnce()) {
    let subscriber = tracing_subscriber::registry().with(ScribeLayer::with_registry(registry));
    tracing::subscriber::with_default(subscriber, f);
}

// ScribeLayer tests

#[test_case(Level::TRACE, Severity::Trace ; "trace")]
#[test_case(Level::DEBUG, Severity::Debug ; "debug")]
#[test_case(Level::INFO, Severity::Info ; "info")]
#[test_case(Level::WARN, Severity::Warning ; "warn")]
#[test_case(Level::ERROR, Severity::Error ; "error")]
fn ScribeLayer___convert_level___maps_to_severity(level: Level, expected: Severity) {
    assert_eq!(ScribeLayer::convert_level(&level), expected);
}

#[test]
fn ScribeLayer___logger_name___replaces_path_separators() {
    assert_eq!(ScribeLayer::logger_name("my_crate::net::peer"), "my_crate/net/peer");
    assert_eq!(ScribeLayer::logger_name("plain"), "plain");
}

#[test]
fn ScribeLayer___warn_event___reaches_console_with_fields() {
    let (registry, console) = leaked_registry("");

    with_layer(registry, || {
        tracing::warn!(target: "net::peer", peer = "db-1", attempts = 3, "slow response");
    });

    assert!(
        console
            .contents()
            .contains("WARNING [svc/net/peer] slow response peer=db-1 attempts=3")
    );
}

#[test]
fn ScribeLayer___event_below_threshold___dropped() {
    let (registry, console) = leaked_registry("");

    with_layer(registry, || {
        tracing::info!(target: "net::peer", "connected");
    });

    assert!(console.contents().is_empty());
}

#[test]
fn ScribeLayer___name_rule___applies_to_target() {
    let (registry, console) = leaked_registry("out:console:trace,svc/net/*:error");

    with_layer(registry, || {
        tracing::warn!(target: "net::peer", "filtered");
        tracing::warn!(target: "store", "kept");
    });

    let contents = console.contents();
    assert!(!contents.contains("filtered"));
    assert!(contents.contains("WARNING [svc/store] kept"));
}

#[test]
fn ScribeLayer___event___records_call_site() {
    let (registry, console) = leaked_registry("out:console:trace");

    with_layer(registry, || {
        tracing::info!(target: "store", "opened");
    });

    let contents = console.contents();
    assert!(contents.contains("INFO [svc/store] opened ("));
    assert!(contents.contains("layer_tests.rs:"));
}

#[test]
fn ScribeLayer___same_target___reuses_cached_logger() {
    let (registry, _console) = leaked_registry("");
    let layer = ScribeLayer::with_registry(registry);

    layer.with_logger("a::b", |_| ());
    layer.with_logger("a::b", |_| ());
    layer.with_logger("a::c", |_| ());

    assert_eq!(layer.loggers.read().len(), 2);
}

// MessageVisitor tests

#[test]
fn MessageVisitor___no_message_field___joins_fields() {
    let visitor = MessageVisitor {
        message: None,
        fields: " key=value other=1".to_string(),
    };

    assert_eq!(visitor.finish(), "key=value other=1");
}

#[test]
fn MessageVisitor___message_only___returns_message() {
    let visitor = MessageVisitor {
        message: Some("hello".to_string()),
        fields: String::new(),
    };

    assert_eq!(visitor.finish(), "hello");
}
