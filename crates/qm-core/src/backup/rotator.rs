//! Backup creation, listing and rotation

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use qm_fs::io;

use crate::{Error, Result};

/// `chrono` format of the timestamp suffix.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

const TIMESTAMP_LEN: usize = 14;

/// A backup directory found next to a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupEntry {
    /// Slug of the backed-up plugin
    pub slug: String,
    /// Fixed-width `YYYYMMDDHHMMSS` suffix
    pub timestamp: String,
    /// Path to the backup directory
    pub path: PathBuf,
}

impl BackupEntry {
    /// Directory name of a backup taken at `timestamp`.
    pub fn name_for(slug: &str, timestamp: &NaiveDateTime) -> String {
        format!("{}.bak.{}", slug, timestamp.format(TIMESTAMP_FORMAT))
    }

    /// Extract the timestamp from a directory name if it is a backup of
    /// `slug`. Anything but exactly 14 digits after `.bak.` is rejected.
    pub fn parse_name<'n>(slug: &str, name: &'n str) -> Option<&'n str> {
        let timestamp = name.strip_prefix(slug)?.strip_prefix(".bak.")?;
        (timestamp.len() == TIMESTAMP_LEN && timestamp.bytes().all(|b| b.is_ascii_digit()))
            .then_some(timestamp)
    }

    /// The directory name of this backup.
    pub fn name(&self) -> String {
        format!("{}.bak.{}", self.slug, self.timestamp)
    }

    /// When the backup was taken, if the timestamp is a valid date.
    pub fn created(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }
}

/// Manages the backups of one plugin inside a plugins directory.
///
/// Rotation and purging are not transactional: if interrupted, backups
/// already deleted stay deleted.
pub struct BackupRotator {
    /// Directory holding the deployment and its backups
    parent: PathBuf,
    /// Plugin slug
    slug: String,
}

impl BackupRotator {
    pub fn new(parent: impl Into<PathBuf>, slug: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            slug: slug.into(),
        }
    }

    /// The deployment these backups belong to.
    pub fn target(&self) -> PathBuf {
        self.parent.join(&self.slug)
    }

    /// All backups of this plugin, newest first.
    ///
    /// A missing parent directory has no backups.
    pub fn list(&self) -> Result<Vec<BackupEntry>> {
        if !self.parent.is_dir() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();
        for entry in fs::read_dir(&self.parent).map_err(|e| Error::io(&self.parent, e))? {
            let entry = entry.map_err(|e| Error::io(&self.parent, e))?;
            let path = entry.path();
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if let Some(timestamp) = BackupEntry::parse_name(&self.slug, &name)
                && path.is_dir()
            {
                backups.push(BackupEntry {
                    slug: self.slug.clone(),
                    timestamp: timestamp.to_string(),
                    path,
                });
            }
        }

        backups.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(backups)
    }

    /// Copy the current deployment into a backup stamped with the local time.
    pub fn create(&self) -> Result<BackupEntry> {
        self.create_at(&Local::now().naive_local())
    }

    /// Copy the current deployment into a backup stamped with `timestamp`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::BackupExists`] if a backup with that name is
    /// already present, and with a filesystem error if copying fails.
    pub fn create_at(&self, timestamp: &NaiveDateTime) -> Result<BackupEntry> {
        let name = BackupEntry::name_for(&self.slug, timestamp);
        let path = self.parent.join(&name);
        if path.exists() {
            return Err(Error::BackupExists { path });
        }

        let target = self.target();
        tracing::info!(backup = %path.display(), "Creating backup");
        let files = io::copy_tree(&target, &path)?;
        tracing::debug!(files, "Backup complete");

        Ok(BackupEntry {
            slug: self.slug.clone(),
            timestamp: timestamp.format(TIMESTAMP_FORMAT).to_string(),
            path,
        })
    }

    /// Keep the `limit` most recent backups and delete the rest.
    ///
    /// `limit == 0` disables rotation and deletes nothing; use
    /// [`purge`](Self::purge) to delete every backup. Returns the deleted
    /// entries.
    pub fn rotate(&self, limit: usize) -> Result<Vec<BackupEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let stale: Vec<BackupEntry> = self.list()?.into_iter().skip(limit).collect();
        for backup in &stale {
            tracing::info!(backup = %backup.path.display(), "Removing old backup");
            io::remove_entry(&backup.path)?;
        }
        Ok(stale)
    }

    /// Delete every backup of this plugin. Returns the deleted entries.
    pub fn purge(&self) -> Result<Vec<BackupEntry>> {
        let backups = self.list()?;
        for backup in &backups {
            tracing::info!(backup = %backup.path.display(), "Purging backup");
            io::remove_entry(&backup.path)?;
        }
        Ok(backups)
    }
}

/// Keep the `limit` most recent `{slug}.bak.*` directories under `parent`.
///
/// See [`BackupRotator::rotate`].
pub fn rotate_backups(parent: &Path, slug: &str, limit: usize) -> Result<Vec<BackupEntry>> {
    BackupRotator::new(parent, slug).rotate(limit)
}
