//! tree-sitter front end for Go source files.
//!
//! Produces the declaration structures the rest of the crate interprets. Nothing here
//! knows about annotations; doc comments are handed over as plain lines.

use std::path::Path;

use tree_sitter::{Node, Parser};

use super::types::{FieldDecl, FuncDecl, ParsedFile, StructDecl, TypeExpr};
use crate::annotations::strip_comment_markers;
use crate::error::ScanError;

/// Parse one Go file into its function and struct declarations.
///
/// # Errors
///
/// Returns [`ScanError::Parse`] when the syntax tree contains an error or missing node.
pub fn parse_go_source(path: &Path, source: &str) -> Result<ParsedFile, ScanError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| ScanError::Grammar(e.to_string()))?;

    let tree = parser.parse(source, None).ok_or_else(|| ScanError::Parse {
        path: path.to_path_buf(),
        line: 1,
        column: 1,
    })?;
    let root = tree.root_node();
    if root.has_error() {
        let (line, column) = first_error(root)
            .map(|n| {
                let pos = n.start_position();
                (pos.row + 1, pos.column + 1)
            })
            .unwrap_or((1, 1));
        return Err(ScanError::Parse {
            path: path.to_path_buf(),
            line,
            column,
        });
    }

    let src = source.as_bytes();
    let mut functions = Vec::new();
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        if matches!(child.kind(), "function_declaration" | "method_declaration") {
            if let Some(func) = func_decl(child, src) {
                functions.push(func);
            }
        }
    }

    let mut structs = Vec::new();
    collect_structs(root, src, &mut structs);

    Ok(ParsedFile {
        path: path.to_path_buf(),
        functions,
        structs,
    })
}

fn text<'a>(node: Node<'_>, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or("")
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

/// Previous sibling that is actual code, skipping statement terminators
fn previous_code_sibling(node: Node<'_>) -> Option<Node<'_>> {
    let mut current = node.prev_sibling();
    while let Some(prev) = current {
        if matches!(prev.kind(), "\n" | ";") {
            current = prev.prev_sibling();
            continue;
        }
        return Some(prev);
    }
    None
}

/// Comment group directly above `node`: no blank line in between, and not trailing
/// on the line of earlier code.
fn lead_comments(node: Node<'_>, src: &[u8]) -> Vec<String> {
    let mut group = Vec::new();
    let mut next_start_row = node.start_position().row;
    let mut current = previous_code_sibling(node);

    while let Some(prev) = current {
        if prev.kind() != "comment" || prev.end_position().row + 1 != next_start_row {
            break;
        }
        let before = previous_code_sibling(prev);
        if let Some(before) = before {
            if before.kind() != "comment"
                && before.end_position().row == prev.start_position().row
            {
                break;
            }
        }
        group.push(prev);
        next_start_row = prev.start_position().row;
        current = before;
    }

    group.reverse();
    group
        .into_iter()
        .flat_map(|c| strip_comment_markers(text(c, src)))
        .collect()
}

fn func_decl(node: Node<'_>, src: &[u8]) -> Option<FuncDecl> {
    let name = node.child_by_field_name("name")?;
    let receiver = node.child_by_field_name("receiver").and_then(|r| {
        text(r, src)
            .trim_matches(|c| c == '(' || c == ')')
            .split_whitespace()
            .last()
            .map(str::to_string)
    });
    Some(FuncDecl {
        name: text(name, src).to_string(),
        receiver,
        doc: lead_comments(node, src),
        line: node.start_position().row + 1,
    })
}

fn collect_structs(node: Node<'_>, src: &[u8], out: &mut Vec<StructDecl>) {
    if matches!(node.kind(), "type_spec" | "type_alias") {
        if let (Some(name), Some(ty)) = (
            node.child_by_field_name("name"),
            node.child_by_field_name("type"),
        ) {
            if ty.kind() == "struct_type" {
                out.push(StructDecl {
                    name: text(name, src).to_string(),
                    fields: struct_fields(ty, src),
                    line: node.start_position().row + 1,
                });
            }
        }
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
    for child in children {
        collect_structs(child, src, out);
    }
}

fn struct_fields(struct_type: Node<'_>, src: &[u8]) -> Vec<FieldDecl> {
    let mut cursor = struct_type.walk();
    let Some(list) = struct_type
        .named_children(&mut cursor)
        .find(|n| n.kind() == "field_declaration_list")
    else {
        return Vec::new();
    };

    let mut fields = Vec::new();
    let mut list_cursor = list.walk();
    for decl in list.named_children(&mut list_cursor) {
        if decl.kind() != "field_declaration" {
            continue;
        }
        let mut name_cursor = decl.walk();
        let names = decl
            .children_by_field_name("name", &mut name_cursor)
            .map(|n| text(n, src).to_string())
            .collect();
        let ty = decl
            .child_by_field_name("type")
            .map(|t| type_expr(t, src))
            .unwrap_or_else(|| TypeExpr::Other("missing".to_string()));
        let tag = decl
            .child_by_field_name("tag")
            .map(|t| unquote_tag(text(t, src)));
        fields.push(FieldDecl {
            names,
            ty,
            tag,
            doc: lead_comments(decl, src),
        });
    }
    fields
}

fn type_expr(node: Node<'_>, src: &[u8]) -> TypeExpr {
    match node.kind() {
        "type_identifier" => TypeExpr::Named(text(node, src).to_string()),
        "qualified_type" => TypeExpr::Qualified {
            package: node
                .child_by_field_name("package")
                .map(|n| text(n, src).to_string())
                .unwrap_or_default(),
            name: node
                .child_by_field_name("name")
                .map(|n| text(n, src).to_string())
                .unwrap_or_default(),
        },
        "pointer_type" => TypeExpr::Pointer,
        "slice_type" => TypeExpr::Slice,
        "array_type" | "implicit_length_array_type" => TypeExpr::Array,
        "map_type" => TypeExpr::Map,
        "struct_type" => TypeExpr::Struct,
        "interface_type" => TypeExpr::Interface,
        "parenthesized_type" => match node.named_child(0) {
            Some(inner) => type_expr(inner, src),
            None => TypeExpr::Other(node.kind().to_string()),
        },
        other => TypeExpr::Other(other.to_string()),
    }
}

/// Strip the quotes of a raw (`` `...` ``) or interpreted (`"..."`) Go string literal
fn unquote_tag(literal: &str) -> String {
    if let Some(raw) = literal
        .strip_prefix('`')
        .and_then(|s| s.strip_suffix('`'))
    {
        return raw.to_string();
    }
    let inner = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(literal);
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> ParsedFile {
        parse_go_source(Path::new("test.go"), src).unwrap()
    }

    #[test]
    fn test_function_doc_comment() {
        let file = parse(
            r#"package checks

// IssueCheck issues a check.
// @route POST /checks/issue
func IssueCheck(c *gin.Context) {}
"#,
        );
        assert_eq!(file.functions.len(), 1);
        let f = &file.functions[0];
        assert_eq!(f.name, "IssueCheck");
        assert_eq!(f.line, 5);
        assert_eq!(
            f.doc,
            vec!["IssueCheck issues a check.", "@route POST /checks/issue"]
        );
    }

    #[test]
    fn test_blank_line_detaches_comment() {
        let file = parse(
            r#"package checks

// @route POST /checks/issue

func IssueCheck() {}
"#,
        );
        assert!(file.functions[0].doc.is_empty());
    }

    #[test]
    fn test_method_receiver() {
        let file = parse(
            r#"package checks

// @route GET /checks
func (h *Handler) List() {}
"#,
        );
        let f = &file.functions[0];
        assert_eq!(f.name, "List");
        assert_eq!(f.receiver.as_deref(), Some("*Handler"));
        assert_eq!(f.doc, vec!["@route GET /checks"]);
    }

    #[test]
    fn test_block_comment_doc() {
        let file = parse(
            r#"package checks

/*
 * @route DELETE /checks/:id
 */
func Void() {}
"#,
        );
        assert!(file.functions[0]
            .doc
            .iter()
            .any(|l| l == "@route DELETE /checks/:id"));
    }

    #[test]
    fn test_struct_fields() {
        let file = parse(
            r#"package checks

type Base struct{}

type IssueCheckRequest struct {
	Base
	// Amount in cents
	Amount int64 `json:"amount" binding:"required"`
	Memo, Note string
	Tags []string
	Meta map[string]string
	When time.Time
	Next *IssueCheckRequest
}
"#,
        );
        assert_eq!(file.structs.len(), 2);
        let s = &file.structs[1];
        assert_eq!(s.name, "IssueCheckRequest");
        assert_eq!(s.fields.len(), 7);
        assert!(s.fields[0].names.is_empty());
        assert_eq!(s.fields[1].names, vec!["Amount"]);
        assert_eq!(s.fields[1].ty, TypeExpr::Named("int64".to_string()));
        assert_eq!(
            s.fields[1].tag.as_deref(),
            Some(r#"json:"amount" binding:"required""#)
        );
        assert_eq!(s.fields[1].doc, vec!["Amount in cents"]);
        assert_eq!(s.fields[2].names, vec!["Memo", "Note"]);
        assert_eq!(s.fields[3].ty, TypeExpr::Slice);
        assert_eq!(s.fields[4].ty, TypeExpr::Map);
        assert_eq!(
            s.fields[5].ty,
            TypeExpr::Qualified {
                package: "time".to_string(),
                name: "Time".to_string()
            }
        );
        assert_eq!(s.fields[6].ty, TypeExpr::Pointer);
    }

    #[test]
    fn test_grouped_and_local_type_specs() {
        let file = parse(
            r#"package checks

type (
	A struct{ X int }
	B int
)

func f() {
	type C struct{ Y string }
}
"#,
        );
        let names: Vec<_> = file.structs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_struct_alias_is_collected() {
        let file = parse(
            r#"package checks

type VoidCheckRequest = struct {
	Reason string `json:"reason"`
}

type Other = VoidCheckRequest
"#,
        );
        assert_eq!(file.structs.len(), 1);
        let alias = &file.structs[0];
        assert_eq!(alias.name, "VoidCheckRequest");
        assert_eq!(alias.line, 3);
        assert_eq!(alias.fields[0].names, vec!["Reason"]);
        assert_eq!(alias.fields[0].tag.as_deref(), Some(r#"json:"reason""#));
    }

    #[test]
    fn test_syntax_error_is_fatal() {
        let err = parse_go_source(Path::new("bad.go"), "package x\n\nfunc {\n").unwrap_err();
        match err {
            ScanError::Parse { path, line, .. } => {
                assert_eq!(path, Path::new("bad.go"));
                assert!(line >= 1);
            }
            other => panic!("expected parse error, got {other}"),
        }
    }

    #[test]
    fn test_unquote_interpreted_tag() {
        assert_eq!(unquote_tag(r#""json:\"a,omitempty\"""#), r#"json:"a,omitempty""#);
        assert_eq!(unquote_tag("`json:\"a\"`"), r#"json:"a""#);
    }
}
