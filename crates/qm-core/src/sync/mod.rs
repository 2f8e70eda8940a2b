//! One-way incremental directory synchronization
//!
//! Mirrors a filtered source tree into a destination tree, copying only
//! files whose size or modification time differ and removing stale
//! destination entries the filter does not protect.

mod engine;
mod report;

pub use engine::DirectorySynchronizer;
pub use report::{SyncOptions, SyncReport};
