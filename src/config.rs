//! Scan and output configuration
//!
//! Projects can drop a `brunogen.toml` next to their Go handlers:
//!
//! ```toml
//! base_url = "{{baseUrl}}"
//! collection_name = "Checks API"
//! exclude_dirs = ["vendor", "testdata"]
//! auth = "none"
//!
//! [environment]
//! name = "local"
//! base_url = "http://localhost:8080"
//! ```
//!
//! Every key is optional. Precedence, lowest first: defaults, file,
//! `BRUNOGEN_BASE_URL`, command line flags.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the input directory
pub const CONFIG_FILE_NAME: &str = "brunogen.toml";

/// Environment variable overriding `base_url`
pub const BASE_URL_ENV: &str = "BRUNOGEN_BASE_URL";

/// Base URL placeholder resolved by Bruno from the active environment
pub const DEFAULT_BASE_URL: &str = "{{baseUrl}}";

/// Configuration for one scan/generate run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScanConfig {
    /// Prefix for every request URL
    pub base_url: String,
    /// Directory names skipped during the walk
    pub exclude_dirs: Vec<String>,
    /// Name written to `bruno.json`
    pub collection_name: String,
    /// Value of the `auth` key in each request block
    pub auth: String,
    /// Optional environment file written under `environments/`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<EnvironmentConfig>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            exclude_dirs: Vec::new(),
            collection_name: "API".to_string(),
            auth: "none".to_string(),
            environment: None,
        }
    }
}

/// Bruno environment written alongside the requests
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnvironmentConfig {
    /// Environment name, also the file stem
    pub name: String,
    /// Value of the `baseUrl` variable
    pub base_url: String,
}

impl ScanConfig {
    /// Apply `BRUNOGEN_BASE_URL` if it is set and non-empty
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                self.base_url = base_url;
            }
        }
        self
    }
}

/// Load a configuration file
///
/// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but fails to parse.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<ScanConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

    let config: ScanConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;

    Ok(Some(config))
}

/// Resolve the config path
///
/// Priority:
/// 1. Explicitly provided path (via CLI); it must exist
/// 2. `brunogen.toml` in the input directory
/// 3. None (defaults)
pub fn resolve_config_path(
    explicit_path: Option<&Path>,
    input_dir: &Path,
) -> anyhow::Result<Option<PathBuf>> {
    if let Some(path) = explicit_path {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        return Ok(Some(path.to_path_buf()));
    }

    let detected = input_dir.join(CONFIG_FILE_NAME);
    Ok(detected.exists().then_some(detected))
}

/// Resolve, load and apply env overrides in one step
pub fn load_scan_config(
    explicit_path: Option<&Path>,
    input_dir: &Path,
) -> anyhow::Result<ScanConfig> {
    let config = match resolve_config_path(explicit_path, input_dir)? {
        Some(path) => {
            tracing::debug!(config = %path.display(), "loading config");
            load_config(&path)?.unwrap_or_default()
        }
        None => ScanConfig::default(),
    };
    Ok(config.with_env_overrides())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.base_url, "{{baseUrl}}");
        assert!(config.exclude_dirs.is_empty());
        assert_eq!(config.collection_name, "API");
        assert_eq!(config.auth, "none");
        assert!(config.environment.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"
collection_name = "Checks"
exclude_dirs = ["vendor"]

[environment]
name = "local"
base_url = "http://localhost:8080"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap().unwrap();
        assert_eq!(config.collection_name, "Checks");
        assert_eq!(config.exclude_dirs, vec!["vendor".to_string()]);
        assert_eq!(config.base_url, "{{baseUrl}}");
        let env = config.environment.unwrap();
        assert_eq!(env.name, "local");
        assert_eq!(env.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempdir().unwrap();
        assert!(load_config(&dir.path().join("nope.toml")).unwrap().is_none());
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "exclude_dirs = \"not a list\"").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_resolve_config_path() {
        let dir = tempdir().unwrap();
        assert!(resolve_config_path(None, dir.path()).unwrap().is_none());

        let detected = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&detected, "").unwrap();
        assert_eq!(
            resolve_config_path(None, dir.path()).unwrap(),
            Some(detected.clone())
        );

        let missing = dir.path().join("other.toml");
        assert!(resolve_config_path(Some(missing.as_path()), dir.path()).is_err());
    }
}
