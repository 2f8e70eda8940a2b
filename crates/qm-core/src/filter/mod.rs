//! Path filtering
//!
//! Builds the list of exclusion patterns for a project and decides, for every
//! path in the project tree, whether it belongs in a deployment or package.
//!
//! Matching rules, applied to the path relative to the project root:
//!
//! - `/pattern` matches only from the root: `/build` excludes `build/x` but
//!   not `src/build/x`.
//! - `pattern` without a separator matches any single segment at any depth:
//!   `build` excludes `build`, `a/build` and `a/b/build/x.txt`.
//! - `dir/sub/file` with an embedded separator matches that sub-path only.
//! - Once a path is excluded, everything beneath it is too.
//! - A trailing `/` is accepted and stripped.

mod defaults;
mod path_filter;
mod pattern;
mod set;
mod sources;

pub use defaults::{DEFAULT_EXCLUDE_PATTERNS, DEV_DIRECTORIES};
pub use path_filter::PathFilter;
pub use pattern::{Pattern, PatternKind};
pub use set::PatternSet;
pub use sources::{config_patterns, ignore_file_patterns, parse_ignore_lines};

pub(crate) use sources::TOOL_SECTION;
