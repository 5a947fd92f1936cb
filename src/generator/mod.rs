//! # Generator Module
//!
//! Turns assembled routes into a Bruno collection on disk.
//!
//! ## Architecture
//!
//! ```text
//! Vec<Route> → build_descriptors → Vec<RequestDescriptor> → askama → *.bru files
//! ```
//!
//! 1. **Descriptor** - one [`RequestDescriptor`] per route: display name, full URL,
//!    default body values and the output file stem
//! 2. **Templates** - Askama templates render each descriptor as a `.bru` request
//! 3. **Writer** - [`write_collection`] writes the requests, `bruno.json` and an optional
//!    environment file
//!
//! ## Generated Structure
//!
//! ```text
//! bruno/
//! ├── bruno.json               # Collection manifest (only created if missing)
//! ├── environments/
//! │   └── local.bru            # When an environment is configured
//! ├── post__checks_issue.bru
//! └── get__users__id.bru
//! ```
//!
//! ## Request file
//!
//! ```text
//! meta {
//!   name: POST /checks/issue
//!   type: http
//!   seq: 1
//! }
//!
//! post {
//!   url: {{baseUrl}}/checks/issue
//!   body: json
//!   auth: none
//! }
//!
//! body:json {
//!   {
//!     "Amount__c": "",
//!     "Memo__c": ""
//!   }
//! }
//!
//! docs {
//!   Issues a check
//! }
//! ```
//!
//! `body:json` is only written for routes with a resolved body, `docs` only for routes
//! with a description.

mod descriptor;
mod project;
mod templates;

pub use descriptor::{build_descriptor, build_descriptors, file_stem, RequestDescriptor};
pub use project::{write_collection, GenerationReport, OutputOptions};
pub use templates::{
    render_collection_manifest, render_environment, render_request, EnvironmentTemplateData,
    RequestTemplateData,
};
