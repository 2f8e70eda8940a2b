//! Error types for qm-core

use std::path::PathBuf;

/// Result type for qm-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in qm-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No `metadata.txt` was found in the start directory or its ancestors
    #[error("Could not find a QGIS plugin project root above {start} (missing metadata.txt)")]
    ProjectRootNotFound { start: PathBuf },

    /// The platform data directory could not be determined
    #[error("Could not determine the user data directory for QGIS profiles")]
    DataDirUnavailable,

    /// A backup with the same timestamp already exists
    #[error("Backup already exists at {path}")]
    BackupExists { path: PathBuf },

    /// A name produced an empty slug
    #[error("Cannot derive a directory slug from {name:?}")]
    InvalidSlug { name: String },

    /// Filesystem error from qm-fs
    #[error(transparent)]
    Fs(#[from] qm_fs::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Fs(qm_fs::Error::io(path, source))
    }
}
