//! Core engine for managing QGIS plugin projects
//!
//! - [`filter`]: gitignore-style exclusion of project paths
//! - [`sync`]: filtered one-way directory mirroring
//! - [`backup`]: timestamped backups with rotation
//! - [`deploy`]: backup, rotate and sync into a QGIS profile
//! - [`package`]: archive membership for distribution
//!
//! Everything here is synchronous and assumes a single writer per
//! destination.

pub mod backup;
pub mod clean;
pub mod config;
pub mod deploy;
pub mod error;
pub mod filter;
pub mod logging;
pub mod package;
pub mod progress;
pub mod project;
pub mod sync;

pub use backup::{BackupEntry, BackupRotator, rotate_backups};
pub use clean::{CleanReport, clean_artifacts};
pub use config::Settings;
pub use deploy::{DeployOptions, DeployReport, deploy, deploy_with_progress, plugin_dir};
pub use error::{Error, Result};
pub use filter::{PathFilter, Pattern, PatternSet};
pub use package::{PackageEntry, archive_file_name, collect_entries};
pub use progress::{Operation, ProgressEvent, ProgressFn};
pub use project::{find_project_root, slug_for, slugify};
pub use sync::{DirectorySynchronizer, SyncOptions, SyncReport};
