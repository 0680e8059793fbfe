//! Consistency checks for the taint fixture.
//!
//! The fixture is test data for an external analysis; these tests only keep
//! its `// BAD` / `// GOOD` annotations and its `.expected` results in sync.

#![allow(non_snake_case)]

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/taint")
}

fn annotated_lines(source: &str, marker: &str) -> BTreeSet<usize> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| line.trim_end().ends_with(marker))
        .map(|(index, _)| index + 1)
        .collect()
}

/// Line of the first location column in each `.expected` row
fn expected_lines(expected: &str) -> BTreeSet<usize> {
    expected
        .lines()
        .filter_map(|row| row.split('|').nth(1))
        .filter_map(|location| location.trim().split(':').nth(1))
        .map(|line| line.parse().unwrap())
        .collect()
}

#[test]
fn taint_fixture___bad_lines___all_expected() {
    let source = fs::read_to_string(fixture_dir().join("integer_conversion.cpp")).unwrap();
    let expected = fs::read_to_string(fixture_dir().join("integer_conversion.expected")).unwrap();

    assert_eq!(expected_lines(&expected), annotated_lines(&source, "// BAD"));
}

#[test]
fn taint_fixture___guarded_lines___not_expected() {
    let source = fs::read_to_string(fixture_dir().join("integer_conversion.cpp")).unwrap();
    let expected = fs::read_to_string(fixture_dir().join("integer_conversion.expected")).unwrap();

    let good = annotated_lines(&source, "// GOOD");

    assert!(!good.is_empty());
    assert!(good.is_disjoint(&expected_lines(&expected)));
}
