//! Built-in exclusion lists

/// Patterns excluded from every deployment and package.
///
/// Cache and build directories, version-control metadata, editor and IDE
/// files, and package-manager lock files.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    // Python
    "__pycache__",
    "*.pyc",
    "*.pyo",
    "*.pyd",
    "*.egg-info",
    ".venv",
    "venv",
    "env",
    // Version control
    ".git",
    ".gitignore",
    ".gitattributes",
    // IDEs / editors
    ".vscode",
    ".idea",
    ".vs",
    ".settings",
    ".project",
    ".classpath",
    "*.sublime-project",
    "*.sublime-workspace",
    ".DS_Store",
    // Tools / linters
    ".mypy_cache",
    ".pytest_cache",
    ".ruff_cache",
    ".pre-commit-config.yaml",
    // Package managers
    "poetry.lock",
    "uv.lock",
    "Pipfile",
    "Pipfile.lock",
    // Build artifacts
    "build",
    "dist",
    "*.bak*",
    "*.log",
    // Manager internals
    ".agent",
    ".ai-context",
    "debug_package_list.py",
    "analysis_results",
    "generator_export",
];

/// Directories that only matter while developing the plugin.
///
/// Excluded at the project root only, unless a dev build is requested.
pub const DEV_DIRECTORIES: &[&str] = &[
    "tests", "test", "docs", "scripts", "tools", "research", ".github",
];
