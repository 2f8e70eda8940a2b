//! Coarse-grained progress reporting
//!
//! Long operations call back at fixed points: once when they start, once per
//! completed file, and once when they finish. Events are delivered on the
//! calling thread after the corresponding work is done.

use std::path::Path;

/// A unit of reportable progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent<'a> {
    /// An operation began. `total` is known for operations that enumerate
    /// their work up front.
    Started {
        operation: Operation,
        total: Option<usize>,
    },
    /// A destination entry was copied, updated or removed.
    Completed { path: &'a Path },
    /// The operation finished successfully.
    Finished { operation: Operation },
}

/// Operations that report progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Deploy,
    Sync,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Deploy => "deploy",
            Self::Sync => "sync",
        };
        f.write_str(name)
    }
}

/// Callback type accepted by operations that report progress.
pub type ProgressFn<'f> = dyn for<'e> FnMut(ProgressEvent<'e>) + 'f;

/// A callback that discards every event.
pub fn ignore_progress(_: ProgressEvent<'_>) {}
