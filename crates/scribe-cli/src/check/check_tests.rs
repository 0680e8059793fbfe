#![allow(non_snake_case)]

use super::*;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|name| name.to_string()).collect()
}

#[test]
fn describe___output_rules___marks_defaults() {
    let rules = LevelRules::parse("out:console:info");

    let lines = describe(&rules, None, &[]);

    assert!(lines.iter().any(|l| l.contains("out:console") && l.ends_with("info")));
    assert!(lines.iter().any(|l| l.contains("out:binary") && l.ends_with("no_logs (default)")));
    assert!(lines.iter().any(|l| l.contains("out:diagnostics") && l.ends_with("error (default)")));
}

#[test]
fn describe___name_rules___listed_in_parse_order() {
    let rules = LevelRules::parse("svc/a/*:warning,svc/a/b:debug");

    let lines = describe(&rules, None, &[]);

    let first = lines.iter().position(|l| l.contains("1. svc/a/* -> warning"));
    let second = lines.iter().position(|l| l.contains("2. svc/a/b -> debug"));
    assert!(first.is_some());
    assert!(first < second);
}

#[test]
fn describe___no_name_rules___says_none() {
    let rules = LevelRules::parse("");

    let lines = describe(&rules, None, &[]);

    assert!(lines.iter().any(|l| l.trim() == "(none)"));
}

#[test]
fn describe___resolve_with_program___qualifies_names() {
    let rules = LevelRules::parse("svc/a/*:warning,svc/a/b:debug");

    let lines = describe(&rules, Some("svc"), &names(&["a/b", "other"]));

    assert!(lines.iter().any(|l| l.trim() == "svc/a/b -> warning"));
    assert!(lines.iter().any(|l| l.trim() == "svc/other -> lowest enabled output level"));
}

#[test]
fn describe___resolve_with_program___uses_registry_qualified_name() {
    let rules = LevelRules::parse("*:info");

    let lines = describe(&rules, Some("svc"), &names(&["net/peer"]));

    let qualified = LogConfig::new("svc").qualify("net/peer");
    assert!(lines.iter().any(|l| l.trim() == format!("{qualified} -> info")));
}

#[test]
fn describe___malformed_entries___listed_as_problems() {
    let rules = LevelRules::parse("a:b:c,foo:bogus,*:debug");

    let lines = describe(&rules, None, &[]);

    let start = lines.iter().position(|l| l == "Problems:").unwrap();
    assert_eq!(lines.len() - start - 1, 2);
}

#[test]
fn run___malformed_rules___returns_error() {
    let result = run(Some("foo:bogus".to_string()), None, &[]);

    assert!(result.is_err());
}

#[test]
fn run___valid_rules___succeeds() {
    let result = run(Some("out:text:debug,svc/*:info".to_string()), Some("svc".to_string()), &[]);

    assert!(result.is_ok());
}
