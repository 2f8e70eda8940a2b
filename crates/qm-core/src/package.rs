//! Archive membership for distributable packages
//!
//! Writing the ZIP itself is left to the caller; this module decides which
//! files go in and under which archive names.

use std::path::{Path, PathBuf};

use qm_fs::{NormalizedPath, io};
use walkdir::WalkDir;

use crate::filter::PathFilter;
use crate::{Error, Result};

/// A file selected for the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    /// File on disk
    pub source: PathBuf,
    /// Name inside the archive, `{slug}/{relative path}`
    pub archive_name: String,
}

/// File name of the package archive for a plugin version.
pub fn archive_file_name(slug: &str, version: &str) -> String {
    format!("{slug}.{version}.zip")
}

/// Walk `project_root` and list the files that belong in the package.
///
/// Excluded directories are pruned without being descended into. Symlinked
/// directories are not followed. Entries come back sorted by archive name.
pub fn collect_entries(
    project_root: &Path,
    slug: &str,
    filter: &PathFilter,
) -> Result<Vec<PackageEntry>> {
    let root = NormalizedPath::new(project_root);
    let mut entries = Vec::new();

    let walker = WalkDir::new(project_root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| !filter.should_exclude(entry.path()));

    for entry in walker {
        let entry = entry.map_err(|e| walk_error(project_root, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(rel) = NormalizedPath::new(path).relative_to(&root) else {
            continue;
        };
        entries.push(PackageEntry {
            source: path.to_path_buf(),
            archive_name: format!("{slug}/{rel}"),
        });
    }

    entries.sort_by(|a, b| a.archive_name.cmp(&b.archive_name));
    tracing::debug!(files = entries.len(), "Collected package entries");
    Ok(entries)
}

pub(crate) fn walk_error(root: &Path, err: walkdir::Error) -> Error {
    io::walk_error(root, err).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_file_name_format() {
        assert_eq!(archive_file_name("my_plugin", "0.1.0"), "my_plugin.0.1.0.zip");
    }
}
