//! Plugin project discovery and naming

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use qm_fs::{ProjectFile, io};
use regex::Regex;

use crate::{Error, Result};

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("slug character pattern is valid"));
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s-]+").expect("slug separator pattern is valid"));

/// Find the plugin project containing `start`.
///
/// Walks from `start` up to the filesystem root and returns the first
/// directory holding a `metadata.txt`.
pub fn find_project_root(start: &Path) -> Result<PathBuf> {
    let start = io::canonicalize(start)?;
    start
        .ancestors()
        .find(|dir| dir.join(ProjectFile::Metadata).is_file())
        .map(Path::to_path_buf)
        .ok_or(Error::ProjectRootNotFound { start })
}

/// Convert a human-readable name into a filesystem-safe slug.
///
/// Lowercases, drops everything except word characters, whitespace and
/// hyphens, then joins the remaining words with `_`.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let kept = DISALLOWED.replace_all(&lowered, "");
    SEPARATORS
        .replace_all(&kept, "_")
        .trim_matches('_')
        .to_string()
}

/// Like [`slugify`], but rejects names that leave nothing behind.
pub fn slug_for(name: &str) -> Result<String> {
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(Error::InvalidSlug {
            name: name.to_string(),
        });
    }
    Ok(slug)
}
