//! # Scan Module
//!
//! The route pipeline: load the source tree, discover annotated handlers, then attach
//! resolved body schemas.
//!
//! ```text
//! SourceTree::load -> discover_routes -> RouteAssembler::assemble -> Vec<Route>
//! ```
//!
//! Only an unparseable file aborts the pipeline. Missing body types and malformed tag
//! lines are reported through the sink and scanning continues.

mod assemble;
mod discover;
mod types;

use std::path::Path;

use crate::config::ScanConfig;
use crate::diagnostics::DiagnosticSink;
use crate::error::ScanError;
use crate::schema::TreeResolver;
use crate::source::SourceTree;

pub use assemble::RouteAssembler;
pub use discover::discover_routes;
pub use types::Route;

/// Run the whole pipeline over `root`
///
/// # Errors
///
/// Returns [`ScanError`] when the tree cannot be walked or a file fails to parse.
pub fn scan_directory(
    root: &Path,
    config: &ScanConfig,
    sink: &dyn DiagnosticSink,
) -> Result<Vec<Route>, ScanError> {
    let tree = SourceTree::load(root, &config.exclude_dirs, sink)?;
    Ok(scan_tree(&tree, sink))
}

/// Discover and assemble routes of an already loaded tree
pub fn scan_tree(tree: &SourceTree, sink: &dyn DiagnosticSink) -> Vec<Route> {
    let routes = discover_routes(tree, sink);
    tracing::debug!(routes = routes.len(), "discovered routes");
    RouteAssembler::new(TreeResolver::new(tree)).assemble(routes, sink)
}
