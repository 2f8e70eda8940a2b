//! Ordered collection of exclusion patterns

use std::path::Path;

use qm_fs::NormalizedPath;

use super::defaults::{DEFAULT_EXCLUDE_PATTERNS, DEV_DIRECTORIES};
use super::pattern::Pattern;
use super::sources;

/// An ordered list of [`Pattern`]s with union semantics: a path is excluded
/// as soon as any one pattern matches. There is no negation, so order and
/// duplicates do not affect the outcome.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Create an empty set, which excludes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from pattern strings, dropping unusable ones.
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        set.extend(patterns);
        set
    }

    /// Collect the patterns that apply to a project.
    ///
    /// Sources, in order:
    /// 1. built-in defaults
    /// 2. dev-only directories, anchored to the root, unless `include_dev`
    /// 3. the first ignore file found (`.qgisignore`, else `.gitignore`)
    /// 4. `tool.qgis-manager.ignore` from `pyproject.toml`
    ///
    /// Unreadable or malformed files contribute nothing.
    pub fn collect(project_root: &Path, include_dev: bool) -> Self {
        let mut set = Self::from_patterns(DEFAULT_EXCLUDE_PATTERNS);

        if !include_dev {
            set.extend(DEV_DIRECTORIES.iter().map(|dir| format!("/{dir}")));
        }

        if let Some(lines) = sources::ignore_file_patterns(project_root) {
            set.extend(lines);
        }
        set.extend(sources::config_patterns(project_root));

        tracing::debug!(
            root = %project_root.display(),
            include_dev,
            patterns = set.len(),
            "Collected exclusion patterns"
        );
        set
    }

    /// Add one pattern. Returns `false` if it was dropped as unusable.
    pub fn push(&mut self, text: &str) -> bool {
        match Pattern::parse(text) {
            Some(pattern) => {
                self.patterns.push(pattern);
                true
            }
            None => false,
        }
    }

    /// Add several patterns.
    pub fn extend<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            self.push(pattern.as_ref());
        }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    /// Whether any pattern matches the root-relative path.
    pub fn matches(&self, rel: &NormalizedPath) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(rel))
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}
