//! Tool settings
//!
//! Settings are resolved from three layers, later layers overriding only the
//! keys they set:
//!
//! 1. built-in defaults
//! 2. `[defaults]` in the user config (`~/.config/qgis-manager/config.toml`)
//! 3. `[tool.qgis-manager]` in the project's `pyproject.toml`

mod settings;

pub use settings::{Settings, user_config_path};
