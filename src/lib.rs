//! # brunogen
//!
//! **brunogen** scans Go HTTP handler code for doc-comment annotations and writes a
//! [Bruno](https://www.usebruno.com/) collection with one `.bru` request per handler.
//!
//! ## Annotations
//!
//! ```go
//! // @route POST /checks/issue
//! // @body IssueCheckRequest
//! // @name Issue check
//! // @description Issues a check for the given amount.
//! //   Continuation lines are joined with single spaces.
//! func (h *Handler) IssueCheck(c *gin.Context) { ... }
//!
//! type IssueCheckRequest struct {
//!     // Amount in dollars
//!     Amount string `json:"Amount__c" binding:"required"`
//!     Memo   string `json:"Memo__c,omitempty"`
//! }
//! ```
//!
//! Only functions with a valid `@route METHOD /path` become requests. The `@body` struct is
//! looked up by name anywhere in the scanned tree and its fields become the default JSON body.
//!
//! ## Architecture
//!
//! - **[`source`]** - walks the tree and parses Go files into declarations
//! - **[`annotations`]** - reads `@tag` lines out of a doc comment
//! - **[`schema`]** - turns a struct declaration into a body schema
//! - **[`scan`]** - discovers routes and attaches their resolved bodies
//! - **[`dummy_value`]** - default JSON value per field kind
//! - **[`generator`]** - builds request descriptors and writes `.bru` files
//! - **[`linter`]** - reports annotation problems without writing anything
//! - **[`diagnostics`]** - sink through which every component reports
//! - **[`config`]** - `brunogen.toml` and environment overrides
//! - **[`logging`]** - `tracing` subscriber setup for the binary
//! - **[`cli`]** - the `brunogen` command line
//!
//! ## Pipeline
//!
//! ```text
//! walk → parse → discover routes → resolve bodies (cached per type) → descriptors → .bru
//! ```
//!
//! A file that fails to parse aborts the run before anything is written. A missing body
//! type only leaves that request without a body.
//!
//! ## Usage from Code
//!
//! ```rust,no_run
//! use brunogen::config::ScanConfig;
//! use brunogen::diagnostics::TracingSink;
//! use brunogen::generator::{build_descriptors, write_collection, OutputOptions};
//! use brunogen::scan::scan_directory;
//! use std::path::Path;
//!
//! let config = ScanConfig::default();
//! let routes = scan_directory(Path::new("./handlers"), &config, &TracingSink)?;
//! let descriptors = build_descriptors(&routes, &config.base_url);
//! let options = OutputOptions::from_config("./bruno", &config, false);
//! write_collection(&descriptors, &options, &TracingSink)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod annotations;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod dummy_value;
mod error;
pub mod generator;
pub mod linter;
pub mod logging;
pub mod scan;
pub mod schema;
pub mod source;

pub use error::ScanError;
pub use scan::{scan_directory, Route};
