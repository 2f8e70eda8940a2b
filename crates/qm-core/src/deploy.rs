//! Deployment of a plugin project into a QGIS profile

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::backup::BackupRotator;
use crate::config::Settings;
use crate::filter::PathFilter;
use crate::progress::{Operation, ProgressEvent, ProgressFn, ignore_progress};
use crate::sync::{DirectorySynchronizer, SyncOptions, SyncReport};
use crate::{Error, Result};

/// Inputs for [`deploy`]
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Plugin project to deploy
    pub project_root: PathBuf,
    /// Profile `python/plugins` directory
    pub plugins_dir: PathBuf,
    /// Directory name of the deployed plugin
    pub slug: String,
    /// Back up an existing deployment before syncing over it
    pub backup: bool,
    /// Backups kept after rotation; 0 keeps all
    pub max_backups: usize,
    /// Deploy development directories too
    pub include_dev: bool,
    /// Report what would change without writing anything
    pub dry_run: bool,
}

impl DeployOptions {
    pub fn new(
        project_root: impl Into<PathBuf>,
        plugins_dir: impl Into<PathBuf>,
        slug: impl Into<String>,
    ) -> Self {
        Self::from_settings(project_root, plugins_dir, slug, &Settings::default())
    }

    /// Options seeded from resolved [`Settings`].
    pub fn from_settings(
        project_root: impl Into<PathBuf>,
        plugins_dir: impl Into<PathBuf>,
        slug: impl Into<String>,
        settings: &Settings,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            plugins_dir: plugins_dir.into(),
            slug: slug.into(),
            backup: settings.backup,
            max_backups: settings.max_backups,
            include_dev: false,
            dry_run: false,
        }
    }

    /// Where the plugin ends up.
    pub fn target(&self) -> PathBuf {
        self.plugins_dir.join(&self.slug)
    }
}

/// Outcome of a deployment
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeployReport {
    /// Deployed plugin directory
    pub target: PathBuf,
    /// Backup taken of the previous deployment, if any
    pub backup: Option<PathBuf>,
    /// Old backups deleted by rotation
    pub rotated: Vec<PathBuf>,
    pub sync: SyncReport,
}

/// Deploy a project, backing up and rotating the previous deployment first.
pub fn deploy(options: &DeployOptions) -> Result<DeployReport> {
    deploy_with_progress(options, &mut ignore_progress)
}

pub fn deploy_with_progress(
    options: &DeployOptions,
    progress: &mut ProgressFn<'_>,
) -> Result<DeployReport> {
    progress(ProgressEvent::Started {
        operation: Operation::Deploy,
        total: None,
    });

    let rotator = BackupRotator::new(&options.plugins_dir, &options.slug);
    let mut report = DeployReport {
        target: rotator.target(),
        ..DeployReport::default()
    };
    tracing::info!(
        project = %options.project_root.display(),
        target = %report.target.display(),
        "Deploying plugin"
    );

    if options.backup && report.target.is_dir() {
        if options.dry_run {
            tracing::info!("Dry run, skipping backup");
        } else {
            let backup = rotator.create()?;
            report.backup = Some(backup.path);
            report.rotated = rotator
                .rotate(options.max_backups)?
                .into_iter()
                .map(|entry| entry.path)
                .collect();
        }
    }

    let filter = PathFilter::for_project(&options.project_root, options.include_dev);
    report.sync = DirectorySynchronizer::new(&filter)
        .with_options(SyncOptions {
            dry_run: options.dry_run,
        })
        .sync_with_progress(&options.project_root, &report.target, progress)?;

    progress(ProgressEvent::Finished {
        operation: Operation::Deploy,
    });
    tracing::info!(changes = report.sync.changes(), "Deploy complete");
    Ok(report)
}

/// The `python/plugins` directory of a QGIS 3 profile.
pub fn plugin_dir(profile: &str) -> Result<PathBuf> {
    let data = dirs::data_dir().ok_or(Error::DataDirUnavailable)?;
    Ok(plugin_dir_in(&data, profile))
}

pub(crate) fn plugin_dir_in(data_dir: &Path, profile: &str) -> PathBuf {
    data_dir
        .join("QGIS")
        .join("QGIS3")
        .join("profiles")
        .join(profile)
        .join("python")
        .join("plugins")
}
