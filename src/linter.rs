//! # Annotation Linter Module
//!
//! Checks a Go source tree for annotation problems before a collection is generated.
//!
//! ## Checks Performed
//!
//! 1. **Malformed tags** - `@route` without an uppercase method and a path, empty `@body`
//! 2. **Unresolved bodies** - `@body` naming a struct that is not in the tree
//! 3. **Ambiguous types** - the same struct name declared more than once
//! 4. **Colliding wire names** - two fields of one body serializing to the same key
//! 5. **Duplicate routes** - the same method and path annotated twice
//! 6. **Colliding file names** - two routes mapping to the same `.bru` file
//! 7. **Missing descriptions** - routes without `@description`
//! 8. **Opaque field types** - body fields whose default value will be `null`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use brunogen::config::ScanConfig;
//! use brunogen::linter::{lint_directory, print_lint_issues};
//!
//! let issues = lint_directory("handlers".as_ref(), &ScanConfig::default())?;
//! print_lint_issues(&issues);
//! # Ok::<(), brunogen::ScanError>(())
//! ```

use std::collections::HashMap;
use std::path::Path;

use crate::config::ScanConfig;
use crate::diagnostics::{CollectingSink, Diagnostic, Severity};
use crate::error::ScanError;
use crate::generator::file_stem;
use crate::scan::{scan_directory, Route};
use crate::schema::SemanticType;


/// Progress diagnostics emitted by the pipeline that are not lint findings
const PROGRESS_KINDS: &[&str] = &["tree_loaded", "route_found", "type_resolved"];

/// Lint every Go file under `root`
///
/// # Errors
///
/// Returns [`ScanError`] if the tree cannot be walked or a file fails to parse.
pub fn lint_directory(root: &Path, config: &ScanConfig) -> Result<Vec<Diagnostic>, ScanError> {
    let sink = CollectingSink::new();
    let routes = scan_directory(root, config, &sink)?;

    let mut issues: Vec<Diagnostic> = sink
        .take()
        .into_iter()
        .filter(|d| !PROGRESS_KINDS.contains(&d.kind.as_str()))
        .collect();
    issues.extend(lint_routes(&routes));
    Ok(issues)
}

/// Route-level checks on an already assembled route list
pub fn lint_routes(routes: &[Route]) -> Vec<Diagnostic> {
    let mut issues = Vec::new();
    let mut by_endpoint: HashMap<(&str, &str), &Route> = HashMap::new();
    let mut by_stem: HashMap<String, &Route> = HashMap::new();

    for route in routes {
        let location = route.diagnostic_location();

        if let Some(first) = by_endpoint.insert((route.method.as_str(), route.path.as_str()), route) {
            issues.push(
                Diagnostic::new(
                    &location,
                    Severity::Error,
                    "duplicate_route",
                    format!(
                        "{} {} is handled by both {} and {}",
                        route.method, route.path, first.handler_name, route.handler_name
                    ),
                )
                .with_suggestion(format!("first declared at {}", first.diagnostic_location())),
            );
        } else {
            let stem = file_stem(&route.method, &route.path);
            if let Some(first) = by_stem.insert(stem.clone(), route) {
                issues.push(
                    Diagnostic::new(
                        &location,
                        Severity::Error,
                        "duplicate_file_name",
                        format!(
                            "{} {} and {} {} would both be written to {stem}.bru",
                            first.method, first.path, route.method, route.path
                        ),
                    )
                    .with_suggestion("paths differing only in '/' and ':' collide; rename one"),
                );
            }
        }

        if route.description.is_empty() {
            issues.push(
                Diagnostic::new(
                    &location,
                    Severity::Info,
                    "missing_description",
                    format!("{} has no @description", route.display_name()),
                )
                .with_suggestion("add `@description ...` so the request gets a docs block"),
            );
        }

        if let Some(body) = &route.request_body {
            for field in &body.fields {
                if field.semantic_type == SemanticType::Unknown {
                    issues.push(Diagnostic::new(
                        format!("type:{}", body.type_name),
                        Severity::Info,
                        "opaque_field_type",
                        format!(
                            "field {} ({}) has no scalar type; its default will be null",
                            field.declared_name, field.wire_name
                        ),
                    ));
                }
            }
        }
    }

    issues
}

/// Print lint issues in a human-readable format
pub fn print_lint_issues(issues: &[Diagnostic]) {
    if issues.is_empty() {
        println!("✅ No lint issues found!");
        return;
    }

    let count = |severity: Severity| issues.iter().filter(|i| i.severity == severity).count();
    println!("\n📋 Lint Results:");
    println!(
        "   {} error(s), {} warning(s), {} info(s)\n",
        count(Severity::Error),
        count(Severity::Warning),
        count(Severity::Info)
    );

    for (severity, heading) in [
        (Severity::Error, "❌ Errors (must fix):"),
        (Severity::Warning, "⚠️  Warnings (should fix):"),
        (Severity::Info, "ℹ️  Info (best practices):"),
    ] {
        let group: Vec<_> = issues.iter().filter(|i| i.severity == severity).collect();
        if group.is_empty() {
            continue;
        }
        println!("{heading}");
        for issue in group {
            println!("   [{}] {}", issue.kind, issue.location);
            println!("      {}", issue.message);
            if let Some(suggestion) = &issue.suggestion {
                println!("      💡 Suggestion: {}", suggestion);
            }
        }
        println!();
    }
}

/// True if any issue is an error
pub fn has_errors(issues: &[Diagnostic]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}
