//! Filesystem primitives used by synchronization and backups
//!
//! Every failure is reported as [`Error::Io`] carrying the path that failed,
//! so callers can abort with a descriptive message.

use std::fs;
use std::path::Path;

use filetime::FileTime;
use walkdir::WalkDir;

use crate::{Error, Result};

/// Create `path` (and any missing parents) if it does not exist yet.
///
/// Returns `true` when the directory had to be created.
pub fn ensure_dir(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))?;
    Ok(true)
}

/// Copy a file's content, permissions and timestamps.
///
/// The destination's access and modification times are set to the
/// source's, so a later size+mtime comparison sees the two as identical.
pub fn copy_file(source: &Path, destination: &Path) -> Result<u64> {
    let bytes = fs::copy(source, destination).map_err(|e| Error::io(source, e))?;
    let metadata = fs::metadata(source).map_err(|e| Error::io(source, e))?;
    let accessed = FileTime::from_last_access_time(&metadata);
    let modified = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_times(destination, accessed, modified)
        .map_err(|e| Error::io(destination, e))?;
    Ok(bytes)
}

/// Remove a file, symlink or directory tree.
pub fn remove_entry(path: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| Error::io(path, e))?;
    if metadata.is_dir() {
        fs::remove_dir_all(path).map_err(|e| Error::io(path, e))
    } else {
        fs::remove_file(path).map_err(|e| Error::io(path, e))
    }
}

/// Recursively copy `source` into `destination`, preserving file timestamps.
///
/// Symlinked directories are not descended into and are left out of the
/// copy; symlinked files are copied as regular files. Returns the number of
/// files copied.
pub fn copy_tree(source: &Path, destination: &Path) -> Result<usize> {
    ensure_dir(destination)?;
    let mut copied = 0;
    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| walk_error(source, e))?;
        let rel = entry
            .path()
            .strip_prefix(source)
            .map_err(|_| Error::io(entry.path(), std::io::ErrorKind::InvalidInput.into()))?;
        let to = destination.join(rel);
        if entry.file_type().is_dir() {
            ensure_dir(&to)?;
        } else if entry.path().is_file() {
            copy_file(entry.path(), &to)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Convert a `walkdir` failure into [`Error::Io`], tagged with the entry it
/// failed on (or `root` when walkdir reports none).
pub fn walk_error(root: &Path, err: walkdir::Error) -> Error {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    Error::io(path, std::io::Error::from(err))
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Modification time of a file, as recorded by the filesystem.
pub fn modified_time(metadata: &fs::Metadata) -> FileTime {
    FileTime::from_last_modification_time(metadata)
}

/// Resolve symlinks and relative components of an existing path.
///
/// Uses `dunce` so Windows paths come back without the `\\?\` prefix and
/// stay comparable with the paths callers construct.
pub fn canonicalize(path: &Path) -> Result<std::path::PathBuf> {
    dunce::canonicalize(path).map_err(|e| Error::io(path, e))
}
