//! Exclusion decisions for paths inside a project

use std::path::Path;

use qm_fs::NormalizedPath;

use super::set::PatternSet;

/// Decides whether a path under a project root is excluded.
///
/// Decisions are pure: they depend only on the path text, the root and the
/// patterns, never on the filesystem, and nothing is cached.
#[derive(Debug, Clone)]
pub struct PathFilter {
    root: NormalizedPath,
    patterns: PatternSet,
}

impl PathFilter {
    pub fn new(root: impl AsRef<Path>, patterns: PatternSet) -> Self {
        Self {
            root: NormalizedPath::new(root),
            patterns,
        }
    }

    /// Filter for a project, with patterns from [`PatternSet::collect`].
    pub fn for_project(root: impl AsRef<Path>, include_dev: bool) -> Self {
        let root = root.as_ref();
        Self::new(root, PatternSet::collect(root, include_dev))
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// Whether `path` is excluded.
    ///
    /// Paths outside the root, and the root itself, are never excluded.
    pub fn should_exclude(&self, path: impl AsRef<Path>) -> bool {
        match NormalizedPath::new(path).relative_to(&self.root) {
            Some(rel) => self.patterns.matches(&rel),
            None => false,
        }
    }

    /// Whether a root-relative path such as `src/tests/fixture.py` is
    /// excluded.
    pub fn is_excluded_relative(&self, rel: &str) -> bool {
        self.patterns.matches(&NormalizedPath::new(rel))
    }
}
