//! Well-known file names inside a plugin project.

use std::path::Path;

/// Standard plugin project markers and configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFile {
    /// The `metadata.txt` file marking a plugin project root
    Metadata,
    /// The `.qgisignore` file (tool-specific ignore file)
    QgisIgnore,
    /// The `.gitignore` file (generic ignore file)
    GitIgnore,
    /// The `pyproject.toml` file (project configuration)
    PyProject,
}

impl ProjectFile {
    /// Ignore files in the order they are looked up. Only the first one
    /// present is ever loaded.
    pub const IGNORE_CANDIDATES: [ProjectFile; 2] = [Self::QgisIgnore, Self::GitIgnore];

    /// Get the string representation of the file name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metadata => "metadata.txt",
            Self::QgisIgnore => ".qgisignore",
            Self::GitIgnore => ".gitignore",
            Self::PyProject => "pyproject.toml",
        }
    }
}

impl AsRef<Path> for ProjectFile {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ProjectFile {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ProjectFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
