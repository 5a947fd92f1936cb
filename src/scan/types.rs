use std::collections::BTreeMap;

use serde::Serialize;

use crate::schema::BodySchema;
use crate::source::SourceLocation;

/// One annotated handler
///
/// `method` and `path` are always both set. `request_body` is attached by the
/// assembler and stays `None` when there is no `@body` or the type was not found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Explicit `@name`, if any
    pub name: Option<String>,
    /// Uppercase HTTP verb
    pub method: String,
    /// URL path pattern, placeholders kept verbatim (`/users/:id`)
    pub path: String,
    /// Go function name
    pub handler_name: String,
    /// Single-line `@description`, empty when absent
    pub description: String,
    pub body_type_name: Option<String>,
    pub request_body: Option<BodySchema>,
    pub tags: BTreeMap<String, String>,
    #[serde(skip)]
    pub location: Option<SourceLocation>,
}

impl Route {
    /// `@name` if given, otherwise `"METHOD path"`
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{} {}", self.method, self.path),
        }
    }

    /// Location used in diagnostics
    pub fn diagnostic_location(&self) -> String {
        match &self.location {
            Some(location) => location.to_string(),
            None => format!("handler:{}", self.handler_name),
        }
    }
}
