// dummy_value.rs

use serde_json::{Map, Value};

use crate::schema::{BodySchema, SemanticType};

/// Zero value written into the request body for a field of the given kind
pub fn dummy_value(ty: SemanticType) -> Value {
    match ty {
        SemanticType::String => Value::String(String::new()),
        SemanticType::Integer | SemanticType::Float => Value::from(0),
        SemanticType::Boolean => Value::Bool(false),
        SemanticType::Array => Value::Array(Vec::new()),
        SemanticType::Map => Value::Object(Map::new()),
        // Pointers, nested structs and qualified types are left for the user to fill in
        SemanticType::Unknown => Value::Null,
    }
}

/// Default JSON object for a body schema, keyed by wire name in field order.
///
/// When two fields share a wire name the later value replaces the earlier one but keeps
/// the earlier position.
pub fn body_defaults(schema: &BodySchema) -> Map<String, Value> {
    let mut body = Map::new();
    for field in &schema.fields {
        body.insert(field.wire_name.clone(), dummy_value(field.semantic_type));
    }
    body
}
