//! Shared test utilities for the qgis-manager workspace.
//!
//! This crate provides standardised plugin-project fixtures so crate test
//! suites do not each hand-roll temporary trees. It is a dev-dependency only,
//! never published.
//!
//! # Modules
//!
//! - [`project`]: [`TestProject`](project::TestProject) builder for plugin
//!   project trees and deployment targets

pub mod project;

pub use project::{TestProject, list_files};
