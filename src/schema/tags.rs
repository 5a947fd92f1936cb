//! Struct tag sub-grammar.
//!
//! A tag is a space separated list of `key:"value"` pairs where the value is a
//! double-quoted string with backslash escapes, e.g. `` json:"amount,omitempty" binding:"required" ``.
//! Parsing stops at the first pair that does not follow this shape; pairs before it are kept.

use std::collections::BTreeMap;

use crate::annotations::FieldTagKey;

/// Parse a raw struct tag (quotes around the whole tag already removed).
///
/// When a key appears more than once the first value is kept.
pub fn parse_struct_tag(raw: &str) -> BTreeMap<String, String> {
    let mut tags = BTreeMap::new();
    let mut rest = raw;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        let key_len = rest
            .find(|c: char| c == ':' || c == '"' || c.is_whitespace() || c.is_control())
            .unwrap_or(rest.len());
        if key_len == 0 {
            break;
        }
        let key = &rest[..key_len];
        let Some(after_colon) = rest[key_len..].strip_prefix(':') else {
            break;
        };
        let Some(quoted) = after_colon.strip_prefix('"') else {
            break;
        };
        let Some((value, remainder)) = read_quoted(quoted) else {
            break;
        };

        tags.entry(key.to_string()).or_insert(value);
        rest = remainder;
    }

    tags
}

/// Read up to the closing quote, unescaping `\"` and `\\`
fn read_quoted(input: &str) -> Option<(String, &str)> {
    let mut value = String::new();
    let mut chars = input.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Some((value, &input[i + 1..])),
            '\\' => {
                let (_, escaped) = chars.next()?;
                value.push(escaped);
            }
            _ => value.push(c),
        }
    }
    None
}

/// JSON key of a field: first comma segment of the `json` tag, else the Go name
pub fn wire_name(declared_name: &str, tags: &BTreeMap<String, String>) -> String {
    tags.get(FieldTagKey::Json.as_str())
        .and_then(|json| json.split(',').next())
        .filter(|name| !name.is_empty())
        .unwrap_or(declared_name)
        .to_string()
}

/// Whether the `binding` tag lists the `required` rule
pub fn is_required(tags: &BTreeMap<String, String>) -> bool {
    tags.get(FieldTagKey::Binding.as_str())
        .is_some_and(|binding| binding.split(',').any(|rule| rule.trim() == "required"))
}
