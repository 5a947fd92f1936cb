use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ScanError;

const GO_EXTENSION: &str = "go";

/// Collect every `.go` file under `root`, skipping directories named in `exclude_dirs`.
///
/// The result is sorted by path so repeated runs visit files in the same order.
pub fn collect_source_files(root: &Path, exclude_dirs: &[String]) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !exclude_dirs
                    .iter()
                    .any(|d| entry.file_name().to_string_lossy() == d.as_str())
        });

    for entry in walker {
        let entry = entry.map_err(|e| ScanError::Walk {
            path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf()),
            message: e.to_string(),
        })?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == GO_EXTENSION) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}
