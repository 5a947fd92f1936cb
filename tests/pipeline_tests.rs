//! Integration tests for the scan pipeline against the Go fixtures in `tests/fixtures`

use brunogen::config::{load_scan_config, ScanConfig};
use brunogen::diagnostics::{CollectingSink, DiagnosticSink};
use brunogen::generator::build_descriptors;
use brunogen::scan::{discover_routes, scan_directory, RouteAssembler};
use brunogen::schema::{BodySchema, SemanticType, TreeResolver, TypeResolver};
use brunogen::source::SourceTree;
use brunogen::{Route, ScanError};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn checks_config() -> ScanConfig {
    load_scan_config(None, &fixture("checks_api")).unwrap()
}

fn scan_checks() -> (Vec<Route>, CollectingSink) {
    let sink = CollectingSink::new();
    let routes = scan_directory(&fixture("checks_api"), &checks_config(), &sink).unwrap();
    (routes, sink)
}

fn find<'a>(routes: &'a [Route], method: &str, path: &str) -> &'a Route {
    routes
        .iter()
        .find(|r| r.method == method && r.path == path)
        .unwrap_or_else(|| panic!("route {method} {path} not found"))
}

/// Wraps the tree resolver and records how often each type was requested
struct CountingResolver<'a> {
    inner: TreeResolver<'a>,
    calls: RefCell<BTreeMap<String, usize>>,
}

impl TypeResolver for CountingResolver<'_> {
    fn resolve(&self, type_name: &str, sink: &dyn DiagnosticSink) -> Option<BodySchema> {
        *self
            .calls
            .borrow_mut()
            .entry(type_name.to_string())
            .or_default() += 1;
        self.inner.resolve(type_name, sink)
    }
}

#[test]
fn test_routes_in_walk_order() {
    let (routes, _) = scan_checks();
    let endpoints: Vec<_> = routes
        .iter()
        .map(|r| format!("{} {}", r.method, r.path))
        .collect();
    assert_eq!(
        endpoints,
        vec![
            "POST /checks/issue",
            "GET /checks",
            "POST /checks/:id/void",
            "POST /users",
            "GET /users/:id",
            "PUT /users/:id",
        ]
    );
}

#[test]
fn test_excluded_directory_is_not_scanned() {
    let (routes, _) = scan_checks();
    assert!(routes.iter().all(|r| r.path != "/vendored"));

    let sink = CollectingSink::new();
    let all = scan_directory(&fixture("checks_api"), &ScanConfig::default(), &sink).unwrap();
    assert!(all.iter().any(|r| r.path == "/vendored"));
}

#[test]
fn test_issue_check_scenario() {
    let (routes, _) = scan_checks();
    let route = find(&routes, "POST", "/checks/issue");
    assert_eq!(route.handler_name, "IssueCheck");
    assert_eq!(route.description, "Issues a paper check for the given amount.");

    let body = route.request_body.as_ref().unwrap();
    assert_eq!(body.type_name, "IssueCheckRequest");
    assert_eq!(body.fields.len(), 2);
    assert_eq!(body.fields[0].wire_name, "Amount__c");
    assert!(!body.fields[0].required);
    assert_eq!(body.fields[1].wire_name, "Memo__c");
    assert!(!body.fields[1].required);
}

#[test]
fn test_field_kinds_and_required_flags() {
    let (routes, _) = scan_checks();
    let body = find(&routes, "POST", "/users").request_body.clone().unwrap();

    let summary: Vec<_> = body
        .fields
        .iter()
        .map(|f| (f.wire_name.as_str(), f.semantic_type, f.required))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("name", SemanticType::String, true),
            ("age", SemanticType::Integer, false),
            ("Admin", SemanticType::Boolean, false),
            ("tags", SemanticType::Array, false),
            ("attrs", SemanticType::Map, false),
            ("created_at", SemanticType::Unknown, false),
            ("score", SemanticType::Float, false),
        ]
    );
    assert_eq!(body.field("name").unwrap().description, "Display name shown in the UI");
    assert!(body.field("Name").is_none());
}

#[test]
fn test_route_without_body_never_calls_resolver() {
    let sink = CollectingSink::new();
    let tree = SourceTree::load(&fixture("checks_api"), &["vendor".to_string()], &sink).unwrap();
    let routes: Vec<_> = discover_routes(&tree, &sink)
        .into_iter()
        .filter(|r| r.body_type_name.is_none())
        .collect();
    assert_eq!(routes.len(), 2);

    let resolver = CountingResolver {
        inner: TreeResolver::new(&tree),
        calls: RefCell::new(BTreeMap::new()),
    };
    let assembled = RouteAssembler::new(&resolver).assemble(routes, &sink);
    assert!(resolver.calls.borrow().is_empty());
    assert!(assembled.iter().all(|r| r.request_body.is_none()));
}

#[test]
fn test_shared_body_type_resolved_once() {
    let sink = CollectingSink::new();
    let tree = SourceTree::load(&fixture("checks_api"), &["vendor".to_string()], &sink).unwrap();
    let resolver = CountingResolver {
        inner: TreeResolver::new(&tree),
        calls: RefCell::new(BTreeMap::new()),
    };
    let routes = RouteAssembler::new(&resolver).assemble(discover_routes(&tree, &sink), &sink);

    let calls = resolver.calls.borrow();
    assert_eq!(calls.get("IssueCheckRequest"), Some(&1));
    assert_eq!(calls.get("CreateUserRequest"), Some(&1));
    assert_eq!(calls.get("UpdateUserRequest"), Some(&1));
    assert_eq!(calls.len(), 3);

    let issue = find(&routes, "POST", "/checks/issue");
    let void = find(&routes, "POST", "/checks/:id/void");
    assert!(issue.request_body.is_some());
    assert_eq!(issue.request_body, void.request_body);
}

#[test]
fn test_missing_body_type_is_not_fatal() {
    let (routes, sink) = scan_checks();
    let update = find(&routes, "PUT", "/users/:id");
    assert_eq!(update.body_type_name.as_deref(), Some("UpdateUserRequest"));
    assert!(update.request_body.is_none());

    let missing = sink.of_kind("body_type_not_found");
    assert_eq!(missing.len(), 1);
    assert!(missing[0].message.contains("UpdateUserRequest"));

    let descriptors = build_descriptors(&routes, "{{baseUrl}}");
    assert!(!descriptors[5].has_body);
}

#[test]
fn test_pipeline_is_idempotent() {
    let (first, _) = scan_checks();
    let (second, _) = scan_checks();
    assert_eq!(first, second);
    assert_eq!(
        build_descriptors(&first, "{{baseUrl}}"),
        build_descriptors(&second, "{{baseUrl}}")
    );
}

#[test]
fn test_parse_error_aborts_scan() {
    let sink = CollectingSink::new();
    let err = scan_directory(&fixture("broken"), &ScanConfig::default(), &sink).unwrap_err();
    match err {
        ScanError::Parse { path, line, .. } => {
            assert!(path.ends_with("handlers.go"));
            assert!(line >= 3);
        }
        other => panic!("expected parse error, got {other}"),
    }
}

#[test]
fn test_missing_root_is_walk_error() {
    let sink = CollectingSink::new();
    let err = scan_directory(&fixture("does_not_exist"), &ScanConfig::default(), &sink).unwrap_err();
    assert!(matches!(err, ScanError::Walk { .. }));
}
