//! Timestamped backups of deployed plugins
//!
//! Before an existing deployment is overwritten it can be copied to a sibling
//! directory named `{slug}.bak.{YYYYMMDDHHMMSS}`. The fixed-width timestamp
//! makes name order equal creation order, so retention only needs a reverse
//! sort by name.

mod rotator;

pub use rotator::{BackupEntry, BackupRotator, TIMESTAMP_FORMAT, rotate_backups};
