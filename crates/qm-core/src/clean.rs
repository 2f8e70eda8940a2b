//! Removal of Python cache artifacts from a project tree

use std::path::{Path, PathBuf};

use qm_fs::io;
use serde::Serialize;
use walkdir::WalkDir;

use crate::Result;
use crate::package::walk_error;

/// What [`clean_artifacts`] removed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    /// `__pycache__` directories
    pub directories_removed: Vec<PathBuf>,
    /// Stray `*.pyc` files outside cache directories
    pub files_removed: Vec<PathBuf>,
}

/// Delete every `__pycache__` directory and `*.pyc` file under `root`.
pub fn clean_artifacts(root: &Path) -> Result<CleanReport> {
    tracing::info!(root = %root.display(), "Cleaning artifacts");
    let mut report = CleanReport::default();

    let mut walker = WalkDir::new(root).min_depth(1).into_iter();
    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|e| walk_error(root, e))?;
        let file_type = entry.file_type();

        if file_type.is_dir() && entry.file_name() == "__pycache__" {
            walker.skip_current_dir();
            io::remove_entry(entry.path())?;
            tracing::debug!(path = %entry.path().display(), "Removed cache directory");
            report.directories_removed.push(entry.into_path());
        } else if file_type.is_file() && entry.path().extension().is_some_and(|ext| ext == "pyc") {
            io::remove_entry(entry.path())?;
            tracing::debug!(path = %entry.path().display(), "Removed bytecode file");
            report.files_removed.push(entry.into_path());
        }
    }

    tracing::info!(
        directories = report.directories_removed.len(),
        files = report.files_removed.len(),
        "Clean complete"
    );
    Ok(report)
}
