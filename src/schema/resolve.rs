use super::{build_body_schema, duplicate_wire_names, BodySchema};
use crate::diagnostics::{Diagnostic, DiagnosticSink, Severity};
use crate::source::SourceTree;

/// Looks up a body type by name
///
/// `None` means the type does not exist in the scanned tree; that is not an error.
pub trait TypeResolver {
    fn resolve(&self, type_name: &str, sink: &dyn DiagnosticSink) -> Option<BodySchema>;
}

impl<T: TypeResolver + ?Sized> TypeResolver for &T {
    fn resolve(&self, type_name: &str, sink: &dyn DiagnosticSink) -> Option<BodySchema> {
        (**self).resolve(type_name, sink)
    }
}

/// Resolver over an in-memory [`SourceTree`]
///
/// Files are searched in walk order and the first struct with the requested name wins.
/// Every later struct with the same name is reported as `duplicate_type`.
#[derive(Debug, Clone, Copy)]
pub struct TreeResolver<'a> {
    tree: &'a SourceTree,
}

impl<'a> TreeResolver<'a> {
    pub fn new(tree: &'a SourceTree) -> Self {
        TreeResolver { tree }
    }
}

impl TypeResolver for TreeResolver<'_> {
    fn resolve(&self, type_name: &str, sink: &dyn DiagnosticSink) -> Option<BodySchema> {
        let mut matches = self.tree.files.iter().flat_map(move |file| {
            file.structs
                .iter()
                .filter(move |s| s.name == type_name)
                .map(move |s| (file.location(s.line), s))
        });

        let (first_location, decl) = matches.next()?;
        for (location, _) in matches {
            sink.emit(
                Diagnostic::new(
                    format!("type:{type_name}"),
                    Severity::Warning,
                    "duplicate_type",
                    format!("{type_name} is defined at {first_location} and again at {location}; using the first"),
                )
                .with_suggestion("rename one of the structs so the @body reference is unambiguous"),
            );
        }

        let schema = build_body_schema(decl);
        for wire in duplicate_wire_names(&schema) {
            sink.emit(
                Diagnostic::new(
                    format!("type:{type_name}"),
                    Severity::Warning,
                    "duplicate_wire_name",
                    format!("several fields of {type_name} serialize as \"{wire}\"; the last one wins"),
                )
                .with_suggestion("give each field a distinct json tag"),
            );
        }

        sink.info(
            &first_location.to_string(),
            "type_resolved",
            format!("resolved {type_name} with {} fields", schema.fields.len()),
        );
        Some(schema)
    }
}
