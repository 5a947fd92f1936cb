use std::collections::HashMap;

use super::types::Route;
use crate::diagnostics::{Diagnostic, DiagnosticSink, Severity};
use crate::schema::{BodySchema, TypeResolver};

/// Attaches resolved body schemas to discovered routes
///
/// Each distinct body type name is handed to the resolver at most once per
/// assembler; misses are cached too.
pub struct RouteAssembler<R> {
    resolver: R,
    cache: HashMap<String, Option<BodySchema>>,
}

impl<R: TypeResolver> RouteAssembler<R> {
    pub fn new(resolver: R) -> Self {
        RouteAssembler {
            resolver,
            cache: HashMap::new(),
        }
    }

    /// Attach `request_body` to every route that names a body type; order is kept.
    pub fn assemble(&mut self, routes: Vec<Route>, sink: &dyn DiagnosticSink) -> Vec<Route> {
        routes
            .into_iter()
            .map(|mut route| {
                let Some(type_name) = route.body_type_name.clone().filter(|n| !n.is_empty())
                else {
                    return route;
                };
                route.request_body = self.resolve_cached(&type_name, sink);
                if route.request_body.is_none() {
                    sink.emit(
                        Diagnostic::new(
                            route.diagnostic_location(),
                            Severity::Warning,
                            "body_type_not_found",
                            format!(
                                "body type {type_name} for {} {} was not found in the scanned tree",
                                route.method, route.path
                            ),
                        )
                        .with_suggestion("types imported from other modules are not resolved"),
                    );
                }
                route
            })
            .collect()
    }

    fn resolve_cached(&mut self, type_name: &str, sink: &dyn DiagnosticSink) -> Option<BodySchema> {
        if let Some(cached) = self.cache.get(type_name) {
            return cached.clone();
        }
        let resolved = self.resolver.resolve(type_name, sink);
        self.cache.insert(type_name.to_string(), resolved.clone());
        resolved
    }
}
