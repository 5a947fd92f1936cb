use anyhow::Context;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::descriptor::RequestDescriptor;
use super::templates::{render_collection_manifest, render_environment, render_request};
use crate::config::{EnvironmentConfig, ScanConfig};
use crate::diagnostics::{Diagnostic, DiagnosticSink, Severity};

/// Where and how a collection is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputOptions {
    pub output_dir: PathBuf,
    /// Report planned files without touching the filesystem
    pub dry_run: bool,
    /// Value of `auth` in each request block
    pub auth: String,
    /// Name used when `bruno.json` has to be created
    pub collection_name: String,
    pub environment: Option<EnvironmentConfig>,
}

impl OutputOptions {
    pub fn from_config(output_dir: impl Into<PathBuf>, config: &ScanConfig, dry_run: bool) -> Self {
        OutputOptions {
            output_dir: output_dir.into(),
            dry_run,
            auth: config.auth.clone(),
            collection_name: config.collection_name.clone(),
            environment: config.environment.clone(),
        }
    }
}

/// Outcome of [`write_collection`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Request files written (or planned, on a dry run), in route order
    pub requests: Vec<PathBuf>,
    /// Names of routes whose file could not be rendered or written
    pub failed: Vec<String>,
    /// `bruno.json` when it was created by this run
    pub manifest: Option<PathBuf>,
    pub environment: Option<PathBuf>,
    pub dry_run: bool,
}

impl GenerationReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Write one `.bru` file per descriptor, plus the collection scaffolding
///
/// A failure on one request is reported as `render_failed` and the remaining requests
/// are still written. Existing request files are overwritten; an existing `bruno.json`
/// is left alone.
///
/// # Errors
///
/// Returns an error only if the output directory itself cannot be created.
pub fn write_collection(
    descriptors: &[RequestDescriptor],
    options: &OutputOptions,
    sink: &dyn DiagnosticSink,
) -> anyhow::Result<GenerationReport> {
    let dir = &options.output_dir;
    let mut report = GenerationReport {
        dry_run: options.dry_run,
        ..GenerationReport::default()
    };

    if !options.dry_run {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }

    let mut stems = HashSet::new();
    for descriptor in descriptors {
        let path = dir.join(format!("{}.bru", descriptor.file_stem));
        if !stems.insert(descriptor.file_stem.as_str()) {
            sink.emit(
                Diagnostic::new(
                    path.display().to_string(),
                    Severity::Warning,
                    "duplicate_file_name",
                    format!("{} overwrites an earlier request with the same file name", descriptor.name),
                )
                .with_suggestion("routes differing only in '/' vs ':' map to the same file"),
            );
        }

        if options.dry_run {
            println!("📝 Would write {} → {}", descriptor.name, path.display());
            report.requests.push(path);
            continue;
        }

        match write_request(&path, descriptor, &options.auth) {
            Ok(()) => {
                println!("✅ Generated request: {}", path.display());
                report.requests.push(path);
            }
            Err(err) => {
                sink.emit(Diagnostic::new(
                    path.display().to_string(),
                    Severity::Error,
                    "render_failed",
                    format!("skipping {}: {err:#}", descriptor.name),
                ));
                report.failed.push(descriptor.name.clone());
            }
        }
    }

    report.manifest = write_manifest_if_missing(dir, options)?;
    report.environment = write_environment(dir, options)?;
    Ok(report)
}

fn write_request(path: &Path, descriptor: &RequestDescriptor, auth: &str) -> anyhow::Result<()> {
    let rendered = render_request(descriptor, auth)?;
    fs::write(path, rendered).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn write_manifest_if_missing(dir: &Path, options: &OutputOptions) -> anyhow::Result<Option<PathBuf>> {
    let path = dir.join("bruno.json");
    if path.exists() {
        return Ok(None);
    }
    if options.dry_run {
        println!("📝 Would write collection manifest → {}", path.display());
        return Ok(Some(path));
    }
    let rendered = render_collection_manifest(&options.collection_name)?;
    fs::write(&path, rendered).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("✅ Wrote collection manifest → {}", path.display());
    Ok(Some(path))
}

fn write_environment(dir: &Path, options: &OutputOptions) -> anyhow::Result<Option<PathBuf>> {
    let Some(env) = &options.environment else {
        return Ok(None);
    };
    let env_dir = dir.join("environments");
    let path = env_dir.join(format!("{}.bru", env.name));
    if options.dry_run {
        println!("📝 Would write environment {} → {}", env.name, path.display());
        return Ok(Some(path));
    }
    fs::create_dir_all(&env_dir)
        .with_context(|| format!("Failed to create {}", env_dir.display()))?;
    let rendered = render_environment(&env.base_url)?;
    fs::write(&path, rendered).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("✅ Wrote environment {} → {}", env.name, path.display());
    Ok(Some(path))
}
