//! DirectorySynchronizer implementation

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};

use qm_fs::io;

use crate::filter::PathFilter;
use crate::progress::{Operation, ProgressEvent, ProgressFn, ignore_progress};
use crate::{Error, Result};

use super::report::{SyncOptions, SyncReport};

/// One-way, incremental, filtered mirror of a source tree.
///
/// Each directory level is handled depth-first in two passes: every source
/// child is created, updated or recursed into first, and only then are
/// destination entries without a source counterpart removed. Any I/O error
/// aborts the whole run; the destination is left as far as the run got.
///
/// Synchronization assumes a single writer. Concurrent runs against the same
/// destination must be serialized by the caller.
pub struct DirectorySynchronizer<'a> {
    filter: &'a PathFilter,
    options: SyncOptions,
}

impl<'a> DirectorySynchronizer<'a> {
    /// Create a synchronizer that skips whatever `filter` excludes.
    pub fn new(filter: &'a PathFilter) -> Self {
        Self {
            filter,
            options: SyncOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    /// Mirror `source` into `destination`.
    ///
    /// # Errors
    ///
    /// Returns the first filesystem error encountered while reading,
    /// copying, creating or deleting.
    pub fn sync(&self, source: &Path, destination: &Path) -> Result<SyncReport> {
        self.sync_with_progress(source, destination, &mut ignore_progress)
    }

    /// Mirror `source` into `destination`, reporting each copied, updated or
    /// removed entry to `progress`.
    pub fn sync_with_progress(
        &self,
        source: &Path,
        destination: &Path,
        progress: &mut ProgressFn<'_>,
    ) -> Result<SyncReport> {
        progress(ProgressEvent::Started {
            operation: Operation::Sync,
            total: None,
        });
        tracing::info!(
            source = %source.display(),
            destination = %destination.display(),
            dry_run = self.options.dry_run,
            "Synchronizing"
        );

        let mut report = SyncReport {
            dry_run: self.options.dry_run,
            ..SyncReport::default()
        };

        let present = if destination.is_dir() {
            true
        } else {
            self.create_dir(destination, &mut report)?
        };

        let guard = Guard::new(source, destination)?;
        self.sync_dir(source, destination, present, &guard, &mut report, progress)?;

        progress(ProgressEvent::Finished {
            operation: Operation::Sync,
        });
        tracing::info!(
            copied = report.files_copied,
            updated = report.files_updated,
            unchanged = report.files_unchanged,
            removed = report.entries_removed,
            "Synchronization complete"
        );
        Ok(report)
    }

    /// Synchronize one directory level. `present` is false when the
    /// destination directory does not exist (only possible in a dry run).
    fn sync_dir(
        &self,
        source: &Path,
        destination: &Path,
        present: bool,
        guard: &Guard,
        report: &mut SyncReport,
        progress: &mut ProgressFn<'_>,
    ) -> Result<()> {
        let children = read_children(source)?;
        let mut source_names: HashSet<OsString> = HashSet::with_capacity(children.len());

        for (name, src_path) in children {
            let dst_path = destination.join(&name);
            source_names.insert(name);

            if self.filter.should_exclude(&src_path) {
                tracing::trace!(path = %src_path.display(), "Excluded");
                continue;
            }

            let src_meta = fs::metadata(&src_path).map_err(|e| Error::io(&src_path, e))?;
            let dst_meta = if present {
                existing_metadata(&dst_path)?
            } else {
                None
            };

            if src_meta.is_dir() {
                if guard.contains_destination(&src_path)? {
                    tracing::debug!(path = %src_path.display(), "Skipping source directory holding the destination");
                    report.entries_skipped += 1;
                    continue;
                }
                self.sync_child_dir(&src_path, &dst_path, dst_meta.as_ref(), guard, report, progress)?;
            } else {
                self.sync_file(&src_path, &src_meta, &dst_path, dst_meta.as_ref(), report, progress)?;
            }
        }

        if present {
            self.remove_stale(source, destination, &source_names, guard, report, progress)?;
        }
        Ok(())
    }

    fn sync_child_dir(
        &self,
        source: &Path,
        destination: &Path,
        dst_meta: Option<&Metadata>,
        guard: &Guard,
        report: &mut SyncReport,
        progress: &mut ProgressFn<'_>,
    ) -> Result<()> {
        let present = match dst_meta {
            Some(meta) if meta.is_dir() => true,
            Some(_) => {
                tracing::debug!(path = %destination.display(), "Replacing file with directory");
                self.remove(destination, report)?;
                self.create_dir(destination, report)?
            }
            None => self.create_dir(destination, report)?,
        };
        self.sync_dir(source, destination, present, guard, report, progress)
    }

    fn sync_file(
        &self,
        source: &Path,
        src_meta: &Metadata,
        destination: &Path,
        dst_meta: Option<&Metadata>,
        report: &mut SyncReport,
        progress: &mut ProgressFn<'_>,
    ) -> Result<()> {
        match dst_meta {
            Some(meta) if meta.is_file() => {
                // Exact timestamp equality: on filesystems coarser than the
                // source (FAT keeps 2 s) files are recopied on every run.
                if meta.len() == src_meta.len()
                    && io::modified_time(meta) == io::modified_time(src_meta)
                {
                    report.files_unchanged += 1;
                    return Ok(());
                }
                tracing::debug!(path = %destination.display(), "Updating");
                self.copy(source, destination)?;
                report.files_updated += 1;
            }
            Some(_) => {
                tracing::debug!(path = %destination.display(), "Replacing directory with file");
                self.remove(destination, report)?;
                self.copy(source, destination)?;
                report.files_copied += 1;
            }
            None => {
                tracing::debug!(path = %destination.display(), "Copying");
                self.copy(source, destination)?;
                report.files_copied += 1;
            }
        }
        progress(ProgressEvent::Completed { path: destination });
        Ok(())
    }

    /// Delete destination entries that have no source counterpart, unless
    /// the counterpart would be excluded or the entry holds the source tree.
    fn remove_stale(
        &self,
        source: &Path,
        destination: &Path,
        source_names: &HashSet<OsString>,
        guard: &Guard,
        report: &mut SyncReport,
        progress: &mut ProgressFn<'_>,
    ) -> Result<()> {
        for (name, dst_path) in read_children(destination)? {
            if source_names.contains(&name) {
                continue;
            }
            if self.filter.should_exclude(source.join(&name)) {
                tracing::trace!(path = %dst_path.display(), "Keeping excluded destination entry");
                report.entries_protected += 1;
                continue;
            }
            if dst_path.is_dir() && guard.holds_source(&dst_path)? {
                tracing::debug!(path = %dst_path.display(), "Keeping destination entry that holds the source");
                report.entries_protected += 1;
                continue;
            }

            tracing::debug!(path = %dst_path.display(), "Removing stale entry");
            self.remove(&dst_path, report)?;
            progress(ProgressEvent::Completed { path: &dst_path });
        }
        Ok(())
    }

    fn create_dir(&self, path: &Path, report: &mut SyncReport) -> Result<bool> {
        report.directories_created += 1;
        if self.options.dry_run {
            return Ok(false);
        }
        io::ensure_dir(path)?;
        Ok(true)
    }

    fn copy(&self, source: &Path, destination: &Path) -> Result<()> {
        if !self.options.dry_run {
            io::copy_file(source, destination)?;
        }
        Ok(())
    }

    fn remove(&self, path: &Path, report: &mut SyncReport) -> Result<()> {
        report.entries_removed += 1;
        if !self.options.dry_run {
            io::remove_entry(path)?;
        }
        Ok(())
    }
}

/// Canonical source and destination roots.
struct Guard {
    source: PathBuf,
    destination: PathBuf,
}

impl Guard {
    fn new(source: &Path, destination: &Path) -> Result<Self> {
        Ok(Self {
            source: resolve(source)?,
            destination: resolve(destination)?,
        })
    }

    /// Whether a source directory is the destination root or one of its
    /// ancestors.
    fn contains_destination(&self, path: &Path) -> Result<bool> {
        Ok(self.destination.starts_with(io::canonicalize(path)?))
    }

    /// Whether a destination directory is the source root or one of its
    /// ancestors.
    fn holds_source(&self, path: &Path) -> Result<bool> {
        Ok(self.source.starts_with(io::canonicalize(path)?))
    }
}

/// Canonicalize a path whose tail may not exist yet.
fn resolve(path: &Path) -> Result<PathBuf> {
    let mut existing = path;
    let mut tail = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }

    let base = if existing.as_os_str().is_empty() {
        Path::new(".")
    } else {
        existing
    };
    let mut resolved = io::canonicalize(base)?;
    resolved.extend(tail.iter().rev());
    Ok(resolved)
}

/// Directory children sorted by name.
fn read_children(dir: &Path) -> Result<Vec<(OsString, PathBuf)>> {
    let mut children = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        children.push((entry.file_name(), entry.path()));
    }
    children.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(children)
}

/// Metadata of a destination entry without following symlinks, or `None`
/// when nothing exists there.
fn existing_metadata(path: &Path) -> Result<Option<Metadata>> {
    match fs::symlink_metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}
