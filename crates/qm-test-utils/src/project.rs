//! [`TestProject`] builder for plugin project scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use tempfile::TempDir;

/// A temporary directory holding a plugin project (under `project/`) next to
/// a scratch area for deployment targets (under `plugins/`).
///
/// # Example
///
/// ```rust,no_run
/// use qm_test_utils::TestProject;
///
/// let project = TestProject::new();
/// project.with_metadata("My Plugin", "0.1");
/// project.write("src/plugin.py", "print('hi')");
/// project.assert_file_exists("src/plugin.py");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
    root: PathBuf,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty project directory inside a fresh temporary directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("project");
        fs::create_dir_all(&root).unwrap();
        Self { temp_dir, root }
    }

    /// Return the project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Return a directory next to the project, suitable as a deployment
    /// target. It is created on first use.
    pub fn plugins_dir(&self) -> PathBuf {
        let dir = self.temp_dir.path().join("plugins");
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Absolute path of `rel` inside the project.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Write a file (creating parent directories) and return its path.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TestProject::write: failed to write {rel}: {e}"));
        path
    }

    /// Create a directory (and parents) and return its path.
    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Write a minimal `metadata.txt` marking this directory as a plugin root.
    pub fn with_metadata(&self, name: &str, version: &str) -> PathBuf {
        self.write(
            "metadata.txt",
            &format!("[general]\nname={name}\nversion={version}\nqgisMinimumVersion=3.0\n"),
        )
    }

    /// Pin the modification time of a project file to a Unix timestamp.
    pub fn set_mtime(&self, rel: &str, unix_seconds: i64) {
        filetime::set_file_mtime(self.path(rel), FileTime::from_unix_time(unix_seconds, 0))
            .unwrap_or_else(|e| panic!("TestProject::set_mtime: {rel}: {e}"));
    }

    /// Assert that a file or directory exists inside the project.
    pub fn assert_file_exists(&self, rel: &str) {
        assert!(
            self.path(rel).exists(),
            "Expected {rel} to exist under {}",
            self.root.display()
        );
    }

    /// Assert that nothing exists at `rel` inside the project.
    pub fn assert_file_absent(&self, rel: &str) {
        assert!(
            !self.path(rel).exists(),
            "Expected {rel} to be absent under {}",
            self.root.display()
        );
    }
}

/// Collect every file under `dir` as a sorted list of `/`-separated
/// relative paths.
pub fn list_files(dir: &Path) -> Vec<String> {
    fn walk(base: &Path, dir: &Path, out: &mut Vec<String>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(base, &path, out);
            } else {
                let rel = path.strip_prefix(base).unwrap();
                let rel: Vec<String> = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                out.push(rel.join("/"));
            }
        }
    }

    let mut files = Vec::new();
    if dir.exists() {
        walk(dir, dir, &mut files);
    }
    files.sort();
    files
}
