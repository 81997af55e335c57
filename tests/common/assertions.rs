//! Common assertion helpers for test output validation
//!
//! Provides predicates for validating policy-analyzer reports and error
//! messages. Commands run with `NO_COLOR` so output is plain text.

#![allow(dead_code)]

use predicates::prelude::*;

/// Creates a predicate that checks the reported reference version
pub fn has_reference_version(version: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("Reference version: {version}"))
}

/// Creates a predicate that checks a category heading and its count
pub fn has_category_count(description: &str, count: usize) -> impl Predicate<str> {
    predicates::str::contains(format!("{description}: {count}"))
}

/// Creates a predicate that checks for a tree entry line
pub fn has_entry(entry: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("── {entry}"))
}

/// Creates a predicate that checks for the invalid policy set message
pub fn not_a_policy_set() -> impl Predicate<str> {
    predicates::str::contains("is not a valid policy set")
}

/// Creates a predicate that checks for release information errors
pub fn release_information_unavailable() -> impl Predicate<str> {
    predicates::str::contains("Release information unavailable")
}
