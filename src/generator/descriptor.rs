use anyhow::Context;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::dummy_value::body_defaults;
use crate::scan::Route;

/// Renderer-facing view of one route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDescriptor {
    /// Display name (`@name`, else `"METHOD path"`)
    pub name: String,
    /// Uppercase HTTP verb
    pub method: String,
    /// Base URL prefix followed by the route path
    pub url: String,
    /// True when the route's body type was resolved
    pub has_body: bool,
    /// Zero values keyed by wire name, in field order
    pub body_default_values: Map<String, Value>,
    pub description: String,
    /// Output file name without the `.bru` extension
    pub file_stem: String,
    /// Position in the collection, starting at 1
    pub seq: usize,
}

impl RequestDescriptor {
    /// Body as pretty JSON; `None` when the route has no body
    ///
    /// # Errors
    ///
    /// Returns an error if the default values fail to serialize
    pub fn body_json(&self) -> anyhow::Result<Option<String>> {
        if !self.has_body {
            return Ok(None);
        }
        let json = serde_json::to_string_pretty(&Value::Object(self.body_default_values.clone()))
            .with_context(|| format!("Failed to serialize body for {}", self.name))?;
        Ok(Some(json))
    }
}

/// Output file stem: lowercase method, `_`, then the path with `/` and `:` replaced by `_`
///
/// `POST /checks/issue` becomes `post__checks_issue`.
pub fn file_stem(method: &str, path: &str) -> String {
    format!(
        "{}_{}",
        method.to_lowercase(),
        path.replace(['/', ':'], "_")
    )
}

/// Map an assembled route to its descriptor
pub fn build_descriptor(route: &Route, base_url: &str, seq: usize) -> RequestDescriptor {
    let body_default_values = route
        .request_body
        .as_ref()
        .map(body_defaults)
        .unwrap_or_default();
    RequestDescriptor {
        name: route.display_name(),
        method: route.method.clone(),
        url: format!("{base_url}{}", route.path),
        has_body: route.request_body.is_some(),
        body_default_values,
        description: route.description.clone(),
        file_stem: file_stem(&route.method, &route.path),
        seq,
    }
}

/// Descriptors for every route, numbered in route order
pub fn build_descriptors(routes: &[Route], base_url: &str) -> Vec<RequestDescriptor> {
    routes
        .iter()
        .enumerate()
        .map(|(i, route)| build_descriptor(route, base_url, i + 1))
        .collect()
}
