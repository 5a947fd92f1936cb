use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{load_scan_config, ScanConfig};
use crate::diagnostics::{Severity, TracingSink};
use crate::generator::{build_descriptors, write_collection, OutputOptions};
use crate::linter::{has_errors, lint_directory, print_lint_issues};
use crate::scan::{scan_directory, Route};

/// Command-line interface for brunogen
///
/// Scans annotated Go handlers and writes Bruno request files.
#[derive(Parser)]
#[command(name = "brunogen", version)]
#[command(about = "Generate Bruno collections from annotated Go handlers", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Write one .bru request per annotated handler
    Generate {
        /// Directory containing Go handler code
        #[arg(short, long, default_value = ".")]
        input: PathBuf,

        /// Directory for Bruno files
        #[arg(short, long, default_value = "./bruno")]
        output: PathBuf,

        /// Path to brunogen.toml
        /// If not provided, will auto-detect in the input directory
        #[arg(long)]
        config: Option<PathBuf>,

        /// URL prefix for every request (overrides config and BRUNOGEN_BASE_URL)
        #[arg(long)]
        base_url: Option<String>,

        /// Perform a dry run: show what would be written without writing files
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Print discovered routes and their resolved bodies
    Inspect {
        /// Directory containing Go handler code
        #[arg(short, long, default_value = ".")]
        input: PathBuf,

        /// Path to brunogen.toml
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print routes as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Lint handler annotations
    ///
    /// Reports malformed tags, unresolved or ambiguous body types, colliding wire
    /// names, duplicate routes and colliding output file names.
    Lint {
        /// Directory containing Go handler code
        #[arg(short, long, default_value = ".")]
        input: PathBuf,

        /// Path to brunogen.toml
        #[arg(long)]
        config: Option<PathBuf>,

        /// Exit with error code if any errors are found
        #[arg(long, default_value_t = false)]
        fail_on_error: bool,

        /// Show only errors (hide warnings and info)
        #[arg(long, default_value_t = false)]
        errors_only: bool,
    },
}

/// Execute a parsed command line
///
/// # Errors
///
/// Returns an error on a fatal scan error, an invalid config, a failed request write, or
/// lint errors with `--fail-on-error`.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            input,
            output,
            config,
            base_url,
            dry_run,
        } => {
            let mut scan_config = load_config(config.as_deref(), &input)?;
            if let Some(base_url) = base_url {
                scan_config.base_url = base_url;
            }
            generate(&input, &output, &scan_config, dry_run)
        }
        Commands::Inspect {
            input,
            config,
            json,
        } => {
            let scan_config = load_config(config.as_deref(), &input)?;
            let routes = scan(&input, &scan_config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&routes)?);
            } else {
                print_routes(&routes);
            }
            Ok(())
        }
        Commands::Lint {
            input,
            config,
            fail_on_error,
            errors_only,
        } => {
            let scan_config = load_config(config.as_deref(), &input)?;
            let mut issues = lint_directory(&input, &scan_config)
                .with_context(|| format!("Failed to lint {}", input.display()))?;
            if errors_only {
                issues.retain(|i| i.severity == Severity::Error);
            }
            print_lint_issues(&issues);
            if fail_on_error && has_errors(&issues) {
                anyhow::bail!("lint found errors in {}", input.display());
            }
            Ok(())
        }
    }
}

fn load_config(explicit: Option<&Path>, input: &Path) -> anyhow::Result<ScanConfig> {
    load_scan_config(explicit, input)
}

fn scan(input: &Path, config: &ScanConfig) -> anyhow::Result<Vec<Route>> {
    scan_directory(input, config, &TracingSink)
        .with_context(|| format!("Failed to scan {}", input.display()))
}

fn generate(input: &Path, output: &Path, config: &ScanConfig, dry_run: bool) -> anyhow::Result<()> {
    println!("🔍 Scanning {} for annotated handlers...", input.display());
    let routes = scan(input, config)?;
    println!("Found {} handlers with route annotations", routes.len());

    let descriptors = build_descriptors(&routes, &config.base_url);
    let options = OutputOptions::from_config(output, config, dry_run);
    let report = write_collection(&descriptors, &options, &TracingSink)?;

    if report.dry_run {
        println!(
            "\n📝 Dry run: {} request(s) would be written to {}",
            report.requests.len(),
            output.display()
        );
    } else {
        println!(
            "\n✅ Done! Generated {} Bruno file(s) in {}",
            report.requests.len(),
            output.display()
        );
    }

    if !report.is_complete() {
        anyhow::bail!(
            "{} request(s) could not be written: {}",
            report.failed.len(),
            report.failed.join(", ")
        );
    }
    Ok(())
}

fn print_routes(routes: &[Route]) {
    if routes.is_empty() {
        println!("No annotated handlers found");
        return;
    }
    for route in routes {
        println!("{} {} → {}", route.method, route.path, route.handler_name);
        if let Some(name) = &route.name {
            println!("   name: {name}");
        }
        if !route.description.is_empty() {
            println!("   description: {}", route.description);
        }
        match (&route.body_type_name, &route.request_body) {
            (Some(_), Some(body)) => {
                println!("   body: {}", body.type_name);
                for field in &body.fields {
                    let required = if field.required { " (required)" } else { "" };
                    println!(
                        "      {} → {}: {}{required}",
                        field.declared_name, field.wire_name, field.semantic_type
                    );
                }
            }
            (Some(type_name), None) => println!("   body: {type_name} (not found)"),
            (None, _) => {}
        }
    }
}
