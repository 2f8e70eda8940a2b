//! Sync options and reporting

use serde::Serialize;

/// Options for a synchronization run
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// If true, inspect both trees and report what would change without
    /// writing anything.
    pub dry_run: bool,
}

/// Counts of what a synchronization run did (or would do, for a dry run)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Directories created at the destination, including the destination itself
    pub directories_created: usize,
    /// Files that were absent at the destination and got copied
    pub files_copied: usize,
    /// Files whose size or modification time differed and got overwritten
    pub files_updated: usize,
    /// Files already identical by size and modification time. Times must
    /// match exactly, so a destination filesystem with coarser timestamps
    /// than the source never counts a file here.
    pub files_unchanged: usize,
    /// Stale destination entries deleted during cleanup
    pub entries_removed: usize,
    /// Destination-only entries kept because the filter excludes them
    pub entries_protected: usize,
    /// Source directories skipped because they are, or contain, the
    /// destination
    pub entries_skipped: usize,
    /// Whether this report describes a dry run
    pub dry_run: bool,
}

impl SyncReport {
    /// Number of filesystem writes the run performed.
    pub fn changes(&self) -> usize {
        self.directories_created + self.files_copied + self.files_updated + self.entries_removed
    }

    /// Whether the destination was already in sync.
    pub fn is_noop(&self) -> bool {
        self.changes() == 0
    }
}
