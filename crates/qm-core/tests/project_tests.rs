//! Tests for project discovery, naming and cleanup

use pretty_assertions::assert_eq;
use qm_core::clean::clean_artifacts;
use qm_core::project::{find_project_root, slugify};
use qm_core::{Error, Settings};
use qm_test_utils::TestProject;

#[test]
fn test_find_project_root_from_nested_dir() {
    let project = TestProject::new();
    project.with_metadata("Demo", "1.0");
    let nested = project.mkdir("gui/widgets");

    let root = find_project_root(&nested).unwrap();

    assert!(root.join("metadata.txt").is_file());
    assert_eq!(root.file_name(), project.root().file_name());
}

#[test]
fn test_find_project_root_missing_metadata() {
    let project = TestProject::new();
    let nested = project.mkdir("gui");

    // A metadata.txt further up (outside the temp dir) would be found too
    if let Err(e) = find_project_root(&nested) {
        assert!(matches!(e, Error::ProjectRootNotFound { .. }));
    }
}

#[test]
fn test_slug_from_metadata_name() {
    assert_eq!(slugify("QGIS Plugin Manager"), "qgis_plugin_manager");
}

#[test]
fn test_clean_artifacts_keeps_sources() {
    let project = TestProject::new();
    project.write("plugin.py", "");
    project.write("__pycache__/plugin.cpython-312.pyc", "");
    project.write("gui/__pycache__/dialog.cpython-312.pyc", "");
    project.write("gui/old.pyc", "");

    let report = clean_artifacts(project.root()).unwrap();

    assert_eq!(report.directories_removed.len(), 2);
    assert_eq!(report.files_removed.len(), 1);
    project.assert_file_exists("plugin.py");
    project.assert_file_absent("__pycache__");
    project.assert_file_absent("gui/__pycache__");
    project.assert_file_absent("gui/old.pyc");
}

#[test]
fn test_settings_from_project_pyproject() {
    let project = TestProject::new();
    project.write(
        "pyproject.toml",
        "[tool.qgis-manager]\nprofile = \"work\"\nmax_backups = 5\nignore = [\"x\"]\n",
    );

    let settings = Settings::load_from(None, Some(project.root()));

    assert_eq!(settings.profile, "work");
    assert_eq!(settings.max_backups, 5);
    assert!(settings.backup);
}
