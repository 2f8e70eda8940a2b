//! Pattern sources read from the project directory
//!
//! Failures here are configuration problems: they are logged and the source
//! is treated as empty.

use std::path::Path;

use qm_fs::{ConfigStore, ProjectFile, io};

/// Section of `pyproject.toml` holding this tool's settings.
pub(crate) const TOOL_SECTION: &str = "qgis-manager";

/// Read patterns from the highest-priority ignore file present.
///
/// Returns `None` when no candidate exists. Once a candidate is found the
/// lower-priority ones are never consulted, even if reading it fails.
pub fn ignore_file_patterns(project_root: &Path) -> Option<Vec<String>> {
    let path = ProjectFile::IGNORE_CANDIDATES
        .iter()
        .map(|candidate| project_root.join(candidate))
        .find(|path| path.is_file())?;

    match io::read_text(&path) {
        Ok(content) => {
            let patterns = parse_ignore_lines(&content);
            tracing::debug!(file = %path.display(), count = patterns.len(), "Loaded ignore file");
            Some(patterns)
        }
        Err(e) => {
            tracing::warn!("Ignoring unreadable ignore file: {}", e);
            Some(Vec::new())
        }
    }
}

/// Split ignore-file content into patterns, skipping blanks and comments.
pub fn parse_ignore_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Read custom patterns from `pyproject.toml`.
///
/// Accepts `[tool.qgis-manager] ignore = [...]` as well as
/// `[tool.qgis-manager.ignore] ignore = [...]`. Entries are used verbatim;
/// non-string entries are skipped.
pub fn config_patterns(project_root: &Path) -> Vec<String> {
    let path = project_root.join(ProjectFile::PyProject);
    let document: toml::Value = match ConfigStore::new().load_optional(&path) {
        Ok(Some(document)) => document,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("Ignoring project config patterns: {}", e);
            return Vec::new();
        }
    };

    let Some(ignore) = document
        .get("tool")
        .and_then(|tool| tool.get(TOOL_SECTION))
        .and_then(|section| section.get("ignore"))
    else {
        return Vec::new();
    };

    let items = match ignore {
        toml::Value::Array(items) => items,
        toml::Value::Table(table) => match table.get("ignore") {
            Some(toml::Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => {
            tracing::warn!(file = %path.display(), "tool.{}.ignore is not a list", TOOL_SECTION);
            return Vec::new();
        }
    };

    items
        .iter()
        .filter_map(|item| item.as_str().map(str::to_string))
        .collect()
}
