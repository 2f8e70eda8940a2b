//! Tests for the DirectorySynchronizer

use std::fs;

use filetime::FileTime;
use pretty_assertions::assert_eq;
use qm_core::Error;
use qm_core::filter::{PathFilter, PatternSet};
use qm_core::progress::ProgressEvent;
use qm_core::sync::{DirectorySynchronizer, SyncOptions};
use qm_test_utils::{TestProject, list_files};

fn sample_project() -> TestProject {
    let project = TestProject::new();
    project.with_metadata("Sample", "1.0");
    project.write("plugin.py", "def classFactory(iface): pass\n");
    project.write("gui/dialog.py", "class Dialog: pass\n");
    project.write("pkg/__pycache__/plugin.cpython-312.pyc", "bytecode");
    project.write("tests/test_plugin.py", "def test(): pass\n");
    project
}

#[test]
fn test_initial_sync_copies_included_files() {
    let project = sample_project();
    let target = project.plugins_dir().join("sample");
    let filter = PathFilter::for_project(project.root(), false);

    let report = DirectorySynchronizer::new(&filter)
        .sync(project.root(), &target)
        .unwrap();

    assert_eq!(
        list_files(&target),
        vec!["gui/dialog.py", "metadata.txt", "plugin.py"]
    );
    assert_eq!(report.files_copied, 3);
    assert!(!report.dry_run);
}

#[test]
fn test_copy_preserves_modification_time() {
    let project = sample_project();
    project.set_mtime("plugin.py", 1_600_000_000);
    let target = project.plugins_dir().join("sample");
    let filter = PathFilter::for_project(project.root(), false);

    DirectorySynchronizer::new(&filter)
        .sync(project.root(), &target)
        .unwrap();

    let meta = fs::metadata(target.join("plugin.py")).unwrap();
    assert_eq!(
        FileTime::from_last_modification_time(&meta),
        FileTime::from_unix_time(1_600_000_000, 0)
    );
}

#[test]
fn test_second_sync_is_noop() {
    let project = sample_project();
    let target = project.plugins_dir().join("sample");
    let filter = PathFilter::for_project(project.root(), false);
    let sync = DirectorySynchronizer::new(&filter);

    sync.sync(project.root(), &target).unwrap();
    let before = fs::metadata(target.join("plugin.py")).unwrap().modified().unwrap();
    let report = sync.sync(project.root(), &target).unwrap();
    let after = fs::metadata(target.join("plugin.py")).unwrap().modified().unwrap();

    assert!(report.is_noop(), "unexpected changes: {report:?}");
    assert_eq!(report.files_unchanged, 3);
    assert_eq!(before, after);
}

#[test]
fn test_changed_file_is_updated() {
    let project = sample_project();
    project.set_mtime("plugin.py", 1_600_000_000);
    let target = project.plugins_dir().join("sample");
    let filter = PathFilter::for_project(project.root(), false);
    let sync = DirectorySynchronizer::new(&filter);
    sync.sync(project.root(), &target).unwrap();

    project.write("plugin.py", "def classFactory(iface): return None\n");
    project.set_mtime("plugin.py", 1_700_000_000);
    let report = sync.sync(project.root(), &target).unwrap();

    assert_eq!(report.files_updated, 1);
    assert_eq!(
        fs::read_to_string(target.join("plugin.py")).unwrap(),
        "def classFactory(iface): return None\n"
    );
}

#[test]
fn test_same_size_different_mtime_is_updated() {
    let project = sample_project();
    project.set_mtime("plugin.py", 1_600_000_000);
    let target = project.plugins_dir().join("sample");
    let filter = PathFilter::for_project(project.root(), false);
    let sync = DirectorySynchronizer::new(&filter);
    sync.sync(project.root(), &target).unwrap();

    project.set_mtime("plugin.py", 1_600_000_100);
    let report = sync.sync(project.root(), &target).unwrap();

    assert_eq!(report.files_updated, 1);
}

#[test]
fn test_stale_entries_are_removed() {
    let project = sample_project();
    let target = project.plugins_dir().join("sample");
    let filter = PathFilter::for_project(project.root(), false);
    let sync = DirectorySynchronizer::new(&filter);
    sync.sync(project.root(), &target).unwrap();

    fs::remove_dir_all(project.path("gui")).unwrap();
    fs::write(target.join("leftover.py"), "old").unwrap();
    let report = sync.sync(project.root(), &target).unwrap();

    assert_eq!(list_files(&target), vec!["metadata.txt", "plugin.py"]);
    assert_eq!(report.entries_removed, 2);
}

#[test]
fn test_excluded_destination_entries_are_protected() {
    // Content the filter excludes is never treated as stale
    let project = sample_project();
    let target = project.plugins_dir().join("sample");
    fs::create_dir_all(target.join(".git")).unwrap();
    fs::write(target.join(".git/HEAD"), "ref: refs/heads/main").unwrap();
    fs::write(target.join("notes.log"), "kept").unwrap();
    let filter = PathFilter::for_project(project.root(), false);

    let report = DirectorySynchronizer::new(&filter)
        .sync(project.root(), &target)
        .unwrap();

    assert!(target.join(".git/HEAD").exists());
    assert!(target.join("notes.log").exists());
    assert_eq!(report.entries_protected, 2);
    assert_eq!(report.entries_removed, 0);
}

#[test]
fn test_type_mismatch_is_replaced() {
    let project = sample_project();
    let target = project.plugins_dir().join("sample");
    fs::create_dir_all(target.join("plugin.py")).unwrap();
    fs::write(target.join("gui"), "not a directory").unwrap();
    let filter = PathFilter::for_project(project.root(), false);

    DirectorySynchronizer::new(&filter)
        .sync(project.root(), &target)
        .unwrap();

    assert!(target.join("plugin.py").is_file());
    assert!(target.join("gui/dialog.py").is_file());
}

#[test]
fn test_destination_nested_in_source_is_skipped() {
    // The whole source branch holding the destination stays out of it
    let project = TestProject::new();
    project.write("plugin.py", "x");
    project.write("lib/util.py", "y");
    project.write("deploy/notes.txt", "n");
    let target = project.path("deploy/out");
    let filter = PathFilter::new(project.root(), PatternSet::new());
    let sync = DirectorySynchronizer::new(&filter);

    let first = sync.sync(project.root(), &target).unwrap();
    let second = sync.sync(project.root(), &target).unwrap();

    assert!(!target.join("deploy").exists());
    assert_eq!(list_files(&target), vec!["lib/util.py", "plugin.py"]);
    assert_eq!(first.files_copied, 2);
    assert_eq!(first.entries_skipped, 1);
    assert!(second.is_noop(), "unexpected changes: {second:?}");
    assert_eq!(second.entries_skipped, 1);
}

#[test]
fn test_destination_directly_inside_source() {
    let project = TestProject::new();
    project.write("plugin.py", "x");
    let target = project.path("out");
    let filter = PathFilter::new(project.root(), PatternSet::new());

    let report = DirectorySynchronizer::new(&filter)
        .sync(project.root(), &target)
        .unwrap();

    assert_eq!(list_files(&target), vec!["plugin.py"]);
    assert_eq!(report.entries_skipped, 1);
}

#[test]
fn test_source_nested_in_destination_is_not_deleted() {
    let project = TestProject::new();
    project.write("plugin.py", "x");
    let outer = project.plugins_dir();
    let source = outer.join("work/src");
    fs::create_dir_all(&source).unwrap();
    fs::write(source.join("module.py"), "m").unwrap();
    let filter = PathFilter::new(&source, PatternSet::new());

    DirectorySynchronizer::new(&filter)
        .sync(&source, &outer)
        .unwrap();

    assert!(source.join("module.py").is_file());
    assert!(outer.join("module.py").is_file());
}

#[test]
fn test_dry_run_reports_without_writing() {
    let project = sample_project();
    let target = project.plugins_dir().join("sample");
    fs::create_dir_all(&target).unwrap();
    fs::write(target.join("stale.py"), "old").unwrap();
    let filter = PathFilter::for_project(project.root(), false);

    let report = DirectorySynchronizer::new(&filter)
        .with_options(SyncOptions { dry_run: true })
        .sync(project.root(), &target)
        .unwrap();

    assert_eq!(list_files(&target), vec!["stale.py"]);
    assert_eq!(report.files_copied, 3);
    assert_eq!(report.entries_removed, 1);
}

#[test]
fn test_progress_reports_each_write() {
    let project = sample_project();
    let target = project.plugins_dir().join("sample");
    let filter = PathFilter::for_project(project.root(), false);
    let mut started = 0;
    let mut completed = Vec::new();
    let mut finished = 0;

    DirectorySynchronizer::new(&filter)
        .sync_with_progress(project.root(), &target, &mut |event| match event {
            ProgressEvent::Started { .. } => started += 1,
            ProgressEvent::Completed { path } => completed.push(path.to_path_buf()),
            ProgressEvent::Finished { .. } => finished += 1,
        })
        .unwrap();

    assert_eq!(started, 1);
    assert_eq!(finished, 1);
    assert_eq!(completed.len(), 3);
    assert!(completed.iter().all(|path| path.starts_with(&target)));
}

#[test]
fn test_unwritable_destination_aborts() {
    let project = sample_project();
    let target = project.plugins_dir().join("sample");
    fs::write(&target, "a file where the plugin directory should be").unwrap();
    let filter = PathFilter::for_project(project.root(), false);

    let result = DirectorySynchronizer::new(&filter).sync(project.root(), &target);

    assert!(matches!(result, Err(Error::Fs(qm_fs::Error::Io { .. }))));
    assert!(target.is_file());
}

#[cfg(unix)]
#[test]
fn test_failure_mid_run_stops_later_work() {
    // Children are visited by name: a.txt, then the broken b.txt
    let project = TestProject::new();
    project.write("a.txt", "a");
    project.write("c.txt", "c");
    std::os::unix::fs::symlink(project.path("missing"), project.path("b.txt")).unwrap();
    let target = project.plugins_dir().join("out");
    fs::create_dir_all(&target).unwrap();
    fs::write(target.join("stale.txt"), "old").unwrap();
    let filter = PathFilter::new(project.root(), PatternSet::new());

    let result = DirectorySynchronizer::new(&filter).sync(project.root(), &target);

    match result {
        Err(Error::Fs(qm_fs::Error::Io { path, .. })) => {
            assert_eq!(path, project.path("b.txt"));
        }
        other => panic!("expected an I/O error, got {other:?}"),
    }
    assert_eq!(list_files(&target), vec!["a.txt", "stale.txt"]);
}
