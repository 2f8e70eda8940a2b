//! Normalized path handling for cross-platform compatibility

use std::path::Path;

/// A path normalized to use forward slashes internally.
///
/// Paths are cleaned lexically on construction: duplicate separators and `.`
/// components are dropped, `..` pops the previous component (and never climbs
/// above the start of the path), and trailing separators are removed. No
/// filesystem access takes place, so symlinks are not resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: clean(&path_str.replace('\\', "/")),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Whether this path is empty (the result of relating a root to itself).
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// The individual `/`-separated components, in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.inner.split('/').filter(|s| !s.is_empty())
    }

    /// Express this path relative to `root`.
    ///
    /// Returns `None` when the path does not lie under `root`. Relating the
    /// root to itself yields an empty path. The comparison is component-wise,
    /// so `/a/bc` is not considered to be under `/a/b`.
    pub fn relative_to(&self, root: &NormalizedPath) -> Option<NormalizedPath> {
        if self.inner == root.inner {
            return Some(Self {
                inner: String::new(),
            });
        }
        let rest = if root.inner == "/" {
            self.inner.strip_prefix('/')
        } else if root.inner.is_empty() {
            (!self.inner.starts_with('/')).then_some(self.inner.as_str())
        } else {
            self.inner
                .strip_prefix(root.inner.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
        }?;
        Some(Self {
            inner: rest.to_string(),
        })
    }
}

/// Lexically clean a forward-slash path.
fn clean(path: &str) -> String {
    let (prefix, rest) = if path.starts_with("//") && !path.starts_with("///") {
        ("//", &path[2..])
    } else if let Some(rest) = path.strip_prefix('/') {
        ("/", rest)
    } else {
        ("", path)
    };

    let mut components: Vec<&str> = Vec::new();
    for component in rest.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                components.pop();
            }
            other => components.push(other),
        }
    }

    format!("{}{}", prefix, components.join("/"))
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}
