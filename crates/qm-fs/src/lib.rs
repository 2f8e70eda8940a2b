//! Filesystem layer for QGIS Plugin Manager
//!
//! Provides normalized path handling, metadata-preserving copy and removal
//! primitives, and format-detecting configuration loading.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::ProjectFile;
pub use error::{Error, Result};
pub use path::NormalizedPath;
