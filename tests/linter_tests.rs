//! Integration tests for the annotation linter
//!
//! These tests run the linter over the Go fixture trees.

use brunogen::config::load_scan_config;
use brunogen::diagnostics::Severity;
use brunogen::linter::{has_errors, lint_directory};
use brunogen::ScanError;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_checks_api_findings() {
    let root = fixture("checks_api");
    let config = load_scan_config(None, &root).unwrap();
    let issues = lint_directory(&root, &config).unwrap();

    let kinds = |kind: &str| issues.iter().filter(|i| i.kind == kind).count();
    assert_eq!(kinds("body_type_not_found"), 1);
    // VoidCheck and GetUser have no description
    assert_eq!(kinds("missing_description"), 2);
    // created_at is a time.Time
    assert_eq!(kinds("opaque_field_type"), 1);
    assert_eq!(kinds("duplicate_route"), 0);

    assert!(!has_errors(&issues), "unexpected errors: {issues:?}");
    assert!(issues
        .iter()
        .filter(|i| i.kind == "missing_description")
        .all(|i| i.severity == Severity::Info));
}

#[test]
fn test_broken_tree_is_fatal() {
    let root = fixture("broken");
    let err = lint_directory(&root, &load_scan_config(None, &root).unwrap()).unwrap_err();
    assert!(matches!(err, ScanError::Parse { .. }));
}
