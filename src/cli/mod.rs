//! # CLI Module
//!
//! Command-line interface for the `brunogen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Scan a Go tree and write a Bruno collection:
//!
//! ```bash
//! brunogen generate --input ./handlers --output ./bruno
//! ```
//!
//! Options:
//! - `--input <DIR>` - Directory containing Go handler code (default: `.`)
//! - `--output <DIR>` - Directory for Bruno files (default: `./bruno`)
//! - `--config <FILE>` - Path to `brunogen.toml` (default: auto-detected in the input directory)
//! - `--base-url <URL>` - URL prefix for every request (default: `{{baseUrl}}`)
//! - `--dry-run` - List the files that would be written
//!
//! ### `inspect`
//!
//! Print discovered routes and their resolved bodies:
//!
//! ```bash
//! brunogen inspect --input ./handlers --json
//! ```
//!
//! ### `lint`
//!
//! Check annotations without writing anything:
//!
//! ```bash
//! brunogen lint --input ./handlers --fail-on-error
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use brunogen::cli::{Cli, run_cli};
//! use clap::Parser;
//!
//! run_cli(Cli::parse())?;
//! ```

mod commands;


pub use commands::{run_cli, Cli, Commands};
