//! # Schema Module
//!
//! Turns a Go struct declaration into a [`BodySchema`]: one [`FieldSchema`] per named
//! field, with a coarse [`SemanticType`], the JSON wire name and the `required` flag taken
//! from the struct tag.
//!
//! ## Type mapping
//!
//! | Go type expression                              | SemanticType |
//! |-------------------------------------------------|--------------|
//! | `string`                                        | `string`     |
//! | `int`, `int8`..`int64`, `uint`.., `byte`, `rune`| `integer`    |
//! | `float32`, `float64`                            | `float`      |
//! | `bool`                                          | `boolean`    |
//! | `[]T`, `[N]T`                                   | `array`      |
//! | `map[K]V`                                       | `map`        |
//! | anything else (`*T`, `time.Time`, `Address`)    | `unknown`    |
//!
//! Types are classified by shape only; named types are never followed.

mod resolve;
mod tags;
mod types;

use std::collections::HashSet;

use crate::source::{StructDecl, TypeExpr};

pub use resolve::{TreeResolver, TypeResolver};
pub use tags::{is_required, parse_struct_tag, wire_name};
pub use types::{BodySchema, FieldSchema, SemanticType};

const INTEGER_TYPES: &[&str] = &[
    "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32", "uint64",
    "uintptr", "byte", "rune",
];
const FLOAT_TYPES: &[&str] = &["float32", "float64"];

/// Classify a field's type expression
pub fn semantic_type(ty: &TypeExpr) -> SemanticType {
    match ty {
        TypeExpr::Named(name) => {
            let name = name.to_lowercase();
            match name.as_str() {
                "string" => SemanticType::String,
                "bool" => SemanticType::Boolean,
                n if INTEGER_TYPES.contains(&n) => SemanticType::Integer,
                n if FLOAT_TYPES.contains(&n) => SemanticType::Float,
                _ => SemanticType::Unknown,
            }
        }
        TypeExpr::Slice | TypeExpr::Array => SemanticType::Array,
        TypeExpr::Map => SemanticType::Map,
        _ => SemanticType::Unknown,
    }
}

/// Build the schema of one struct declaration; embedded fields are skipped
pub fn build_body_schema(decl: &StructDecl) -> BodySchema {
    let mut fields = Vec::new();
    for field in &decl.fields {
        let tags = field
            .tag
            .as_deref()
            .map(parse_struct_tag)
            .unwrap_or_default();
        let semantic = semantic_type(&field.ty);
        let required = is_required(&tags);
        let description = field
            .doc
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        for name in &field.names {
            fields.push(FieldSchema {
                declared_name: name.clone(),
                semantic_type: semantic,
                wire_name: wire_name(name, &tags),
                required,
                description: description.clone(),
                tags: tags.clone(),
            });
        }
    }
    BodySchema {
        type_name: decl.name.clone(),
        fields,
    }
}

/// Wire names used by more than one field, in first-seen order
pub fn duplicate_wire_names(schema: &BodySchema) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for field in &schema.fields {
        if !seen.insert(field.wire_name.as_str()) && !duplicates.contains(&field.wire_name) {
            duplicates.push(field.wire_name.clone());
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FieldDecl;

    fn field(names: &[&str], ty: TypeExpr, tag: Option<&str>, doc: &[&str]) -> FieldDecl {
        FieldDecl {
            names: names.iter().map(|s| s.to_string()).collect(),
            ty,
            tag: tag.map(str::to_string),
            doc: doc.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn named(n: &str) -> TypeExpr {
        TypeExpr::Named(n.to_string())
    }

    #[test]
    fn test_semantic_type_table() {
        assert_eq!(semantic_type(&named("string")), SemanticType::String);
        assert_eq!(semantic_type(&named("int64")), SemanticType::Integer);
        assert_eq!(semantic_type(&named("uint8")), SemanticType::Integer);
        assert_eq!(semantic_type(&named("float32")), SemanticType::Float);
        assert_eq!(semantic_type(&named("bool")), SemanticType::Boolean);
        assert_eq!(semantic_type(&TypeExpr::Slice), SemanticType::Array);
        assert_eq!(semantic_type(&TypeExpr::Array), SemanticType::Array);
        assert_eq!(semantic_type(&TypeExpr::Map), SemanticType::Map);
        assert_eq!(semantic_type(&TypeExpr::Pointer), SemanticType::Unknown);
        assert_eq!(semantic_type(&named("Address")), SemanticType::Unknown);
        assert_eq!(
            semantic_type(&TypeExpr::Qualified {
                package: "time".into(),
                name: "Time".into()
            }),
            SemanticType::Unknown
        );
    }

    #[test]
    fn test_build_body_schema() {
        let decl = StructDecl {
            name: "IssueCheckRequest".to_string(),
            line: 3,
            fields: vec![
                field(&[], named("Base"), None, &[]),
                field(
                    &["Amount"],
                    named("string"),
                    Some(r#"json:"Amount__c" binding:"required""#),
                    &["Amount   in", "  dollars  "],
                ),
                field(&["Memo", "Note"], named("string"), Some(r#"json:",omitempty""#), &[]),
            ],
        };
        let schema = build_body_schema(&decl);
        assert_eq!(schema.type_name, "IssueCheckRequest");
        let names: Vec<_> = schema.fields.iter().map(|f| f.wire_name.as_str()).collect();
        assert_eq!(names, vec!["Amount__c", "Memo", "Note"]);

        let amount = &schema.fields[0];
        assert_eq!(amount.declared_name, "Amount");
        assert!(amount.required);
        assert_eq!(amount.description, "Amount   in dollars");
        assert_eq!(amount.tags.get("binding").map(String::as_str), Some("required"));
        assert!(!schema.fields[1].required);
    }

    #[test]
    fn test_duplicate_wire_names() {
        let decl = StructDecl {
            name: "Dup".to_string(),
            line: 1,
            fields: vec![
                field(&["A"], named("string"), Some(r#"json:"x""#), &[]),
                field(&["B"], named("int"), Some(r#"json:"x""#), &[]),
                field(&["C"], named("int"), Some(r#"json:"x""#), &[]),
            ],
        };
        assert_eq!(duplicate_wire_names(&build_body_schema(&decl)), vec!["x"]);
    }
}
