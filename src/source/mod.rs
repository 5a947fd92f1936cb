//! # Source Module
//!
//! Loads a Go source tree into parsed declarations.
//!
//! The tree is walked once, in lexicographic path order, and every `.go` file is parsed
//! with tree-sitter. The first file that fails to parse aborts the load: a malformed
//! file usually means the tool was pointed at the wrong directory.

mod parse;
mod types;
mod walk;

use std::path::{Path, PathBuf};

use crate::diagnostics::DiagnosticSink;
use crate::error::ScanError;

pub use parse::parse_go_source;
pub use types::{FieldDecl, FuncDecl, ParsedFile, SourceLocation, StructDecl, TypeExpr};
pub use walk::collect_source_files;

/// Every parsed Go file under one root, in walk order
#[derive(Debug, Clone, Default)]
pub struct SourceTree {
    pub root: PathBuf,
    pub files: Vec<ParsedFile>,
}

impl SourceTree {
    /// Walk `root` and parse each Go file.
    ///
    /// # Errors
    ///
    /// Fails on the first unreadable or syntactically invalid file.
    pub fn load(
        root: &Path,
        exclude_dirs: &[String],
        sink: &dyn DiagnosticSink,
    ) -> Result<Self, ScanError> {
        let paths = collect_source_files(root, exclude_dirs)?;
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            let source = std::fs::read_to_string(&path).map_err(|source| ScanError::Io {
                path: path.clone(),
                source,
            })?;
            let parsed = parse_go_source(&path, &source)?;
            tracing::debug!(
                file = %path.display(),
                functions = parsed.functions.len(),
                structs = parsed.structs.len(),
                "parsed source file"
            );
            files.push(parsed);
        }
        sink.info(
            &root.display().to_string(),
            "tree_loaded",
            format!("parsed {} Go files", files.len()),
        );
        Ok(SourceTree {
            root: root.to_path_buf(),
            files,
        })
    }

    /// Build a tree from already parsed files (kept in the given order)
    pub fn from_files(root: impl Into<PathBuf>, files: Vec<ParsedFile>) -> Self {
        SourceTree {
            root: root.into(),
            files,
        }
    }
}
