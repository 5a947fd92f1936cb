use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Closed set of field kinds used to pick a default JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    String,
    Integer,
    Float,
    Boolean,
    Array,
    Map,
    Unknown,
}

impl SemanticType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::String => "string",
            SemanticType::Integer => "integer",
            SemanticType::Float => "float",
            SemanticType::Boolean => "boolean",
            SemanticType::Array => "array",
            SemanticType::Map => "map",
            SemanticType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One field of a resolved body type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSchema {
    /// Go identifier of the field
    pub declared_name: String,
    pub semantic_type: SemanticType,
    /// Key used in the JSON body; never empty
    pub wire_name: String,
    /// Set by `binding:"required"`
    pub required: bool,
    /// Field doc comment joined into one line
    pub description: String,
    /// Every key/value pair found in the struct tag
    pub tags: BTreeMap<String, String>,
}

/// Resolved shape of a body type, fields in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BodySchema {
    pub type_name: String,
    pub fields: Vec<FieldSchema>,
}

impl BodySchema {
    pub fn field(&self, wire_name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.wire_name == wire_name)
    }
}
