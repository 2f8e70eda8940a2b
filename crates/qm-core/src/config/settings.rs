//! Settings resolution

use std::path::{Path, PathBuf};

use qm_fs::{ConfigStore, ProjectFile};
use serde::{Deserialize, Serialize};

use crate::filter::TOOL_SECTION;

fn default_profile() -> String {
    "default".to_string()
}

/// Resolved tool settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// QGIS profile deployments go to
    pub profile: String,
    /// Whether to back up an existing deployment before overwriting it
    pub backup: bool,
    /// Whether resources are compiled before deploying
    pub auto_compile: bool,
    /// How many backups to keep; 0 disables rotation
    pub max_backups: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            backup: true,
            auto_compile: true,
            max_backups: 3,
        }
    }
}

/// One layer of optional overrides
#[derive(Debug, Default, Deserialize)]
struct SettingsLayer {
    profile: Option<String>,
    backup: Option<bool>,
    auto_compile: Option<bool>,
    max_backups: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct UserConfig {
    #[serde(default)]
    defaults: SettingsLayer,
}

#[derive(Debug, Deserialize)]
struct PyProject {
    #[serde(default)]
    tool: ToolTable,
}

#[derive(Debug, Default, Deserialize)]
struct ToolTable {
    #[serde(rename = "qgis-manager", default)]
    qgis_manager: SettingsLayer,
}

/// Location of the per-user config file.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join(TOOL_SECTION).join("config.toml"))
}

impl Settings {
    /// Resolve settings for a project, reading the user config from its
    /// standard location.
    pub fn load(project_root: Option<&Path>) -> Self {
        Self::load_from(user_config_path().as_deref(), project_root)
    }

    /// Resolve settings from an explicit user config path.
    ///
    /// Missing files are skipped silently; unreadable or malformed ones are
    /// logged and skipped.
    pub fn load_from(user_config: Option<&Path>, project_root: Option<&Path>) -> Self {
        let store = ConfigStore::new();
        let mut settings = Self::default();

        if let Some(path) = user_config {
            match store.load_optional::<UserConfig>(path) {
                Ok(Some(config)) => {
                    tracing::debug!(path = %path.display(), "Loading user config");
                    settings.apply(config.defaults);
                }
                Ok(None) => {}
                Err(e) => tracing::warn!("Ignoring user config: {}", e),
            }
        }

        if let Some(root) = project_root {
            let path = root.join(ProjectFile::PyProject);
            match store.load_optional::<PyProject>(&path) {
                Ok(Some(project)) => {
                    tracing::debug!(path = %path.display(), "Loading project config");
                    settings.apply(project.tool.qgis_manager);
                }
                Ok(None) => {}
                Err(e) => tracing::warn!("Ignoring project config: {}", e),
            }
        }

        settings
    }

    fn apply(&mut self, layer: SettingsLayer) {
        if let Some(profile) = layer.profile {
            self.profile = profile;
        }
        if let Some(backup) = layer.backup {
            self.backup = backup;
        }
        if let Some(auto_compile) = layer.auto_compile {
            self.auto_compile = auto_compile;
        }
        if let Some(max_backups) = layer.max_backups {
            self.max_backups = usize::try_from(max_backups).unwrap_or(0);
        }
    }
}
