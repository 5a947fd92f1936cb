use std::fmt;
use std::path::PathBuf;

/// File and line a declaration came from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub path: PathBuf,
    /// 1-based line number
    pub line: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.line)
    }
}

/// Structural shape of a Go type expression
///
/// Only the outermost constructor matters to the schema builder, so element and key
/// types are not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `string`, `int64`, `Address`
    Named(String),
    /// `time.Time`
    Qualified { package: String, name: String },
    /// `*T`
    Pointer,
    /// `[]T`
    Slice,
    /// `[N]T`, `[...]T`
    Array,
    /// `map[K]V`
    Map,
    /// inline `struct { ... }`
    Struct,
    /// `interface{}`, `any` is a `Named`
    Interface,
    /// channels, funcs, generics; carries the tree-sitter node kind
    Other(String),
}

/// A top-level `func` or method declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: String,
    /// Receiver type text for methods, e.g. `*Handler`
    pub receiver: Option<String>,
    /// Lead doc comment lines with comment markers stripped
    pub doc: Vec<String>,
    pub line: usize,
}

/// One line of a struct body: `Amount, Fee int64 \`json:"amount"\``
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Declared identifiers; empty for embedded fields
    pub names: Vec<String>,
    pub ty: TypeExpr,
    /// Tag literal with the surrounding quotes removed
    pub tag: Option<String>,
    pub doc: Vec<String>,
}

/// A `type Name struct { ... }` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    pub name: String,
    pub fields: Vec<FieldDecl>,
    pub line: usize,
}

/// Declarations extracted from one Go file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub functions: Vec<FuncDecl>,
    pub structs: Vec<StructDecl>,
}

impl ParsedFile {
    pub fn location(&self, line: usize) -> SourceLocation {
        SourceLocation {
            path: self.path.clone(),
            line,
        }
    }
}
