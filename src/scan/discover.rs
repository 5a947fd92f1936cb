use std::collections::BTreeMap;

use super::types::Route;
use crate::annotations::{extract_annotations, Tag};
use crate::diagnostics::{Diagnostic, DiagnosticSink, Severity};
use crate::source::SourceTree;

/// Find every function whose doc comment carries a valid `@route`.
///
/// Routes come out in walk order (file path, then position in the file).
pub fn discover_routes(tree: &SourceTree, sink: &dyn DiagnosticSink) -> Vec<Route> {
    let mut routes = Vec::new();

    for file in &tree.files {
        for func in &file.functions {
            if func.doc.is_empty() {
                continue;
            }
            let location = file.location(func.line);
            let annotations = extract_annotations(func.doc.as_slice());

            for (tag, line) in &annotations.rejected {
                sink.emit(
                    Diagnostic::new(
                        location.to_string(),
                        Severity::Warning,
                        "malformed_annotation",
                        format!("ignoring {tag} line on {}: {line:?}", func.name),
                    )
                    .with_suggestion(match tag {
                        Tag::Route => "use `@route METHOD /path` with an uppercase method",
                        _ => "tag needs a value on the same line",
                    }),
                );
            }

            let Some(route) = annotations.route else {
                continue;
            };
            sink.info(
                &location.to_string(),
                "route_found",
                format!("found route {} {} in handler {}", route.method, route.path, func.name),
            );
            routes.push(Route {
                name: annotations.name,
                method: route.method,
                path: route.path,
                handler_name: func.name.clone(),
                description: annotations.description.unwrap_or_default(),
                body_type_name: annotations.body,
                request_body: None,
                tags: BTreeMap::new(),
                location: Some(location),
            });
        }
    }

    routes
}
