use filetime::FileTime;
use qm_fs::{Error, io};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_ensure_dir_creates_nested_directories() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("a/b/c");

    assert!(io::ensure_dir(&target).unwrap());
    assert!(target.is_dir());
    assert!(!io::ensure_dir(&target).unwrap());
}

#[test]
fn test_copy_file_preserves_mtime() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src.txt");
    let dst = temp.path().join("dst.txt");
    fs::write(&src, "payload").unwrap();
    let pinned = FileTime::from_unix_time(1_700_000_000, 0);
    filetime::set_file_mtime(&src, pinned).unwrap();

    let bytes = io::copy_file(&src, &dst).unwrap();

    assert_eq!(bytes, 7);
    assert_eq!(fs::read_to_string(&dst).unwrap(), "payload");
    let dst_mtime = FileTime::from_last_modification_time(&fs::metadata(&dst).unwrap());
    assert_eq!(dst_mtime, pinned);
}

#[test]
fn test_copy_file_missing_source_reports_path() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("missing.txt");
    let err = io::copy_file(&src, &temp.path().join("out.txt")).unwrap_err();

    match &err {
        Error::Io { path, .. } => assert_eq!(path, &src),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_not_found());
}

#[test]
fn test_remove_entry_handles_files_and_trees() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("file.txt");
    let tree = temp.path().join("tree");
    fs::write(&file, "x").unwrap();
    fs::create_dir_all(tree.join("nested")).unwrap();
    fs::write(tree.join("nested/deep.txt"), "y").unwrap();

    io::remove_entry(&file).unwrap();
    io::remove_entry(&tree).unwrap();

    assert!(!file.exists());
    assert!(!tree.exists());
}

#[test]
fn test_copy_tree_counts_files() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    fs::create_dir_all(src.join("sub")).unwrap();
    fs::write(src.join("a.txt"), "a").unwrap();
    fs::write(src.join("sub/b.txt"), "b").unwrap();

    let copied = io::copy_tree(&src, &temp.path().join("dst")).unwrap();

    assert_eq!(copied, 2);
    assert_eq!(
        fs::read_to_string(temp.path().join("dst/sub/b.txt")).unwrap(),
        "b"
    );
}

#[test]
fn test_read_text_nonexistent_file() {
    let result = io::read_text(std::path::Path::new("/nonexistent/file.txt"));
    assert!(result.is_err());
}

#[test]
fn test_copy_tree_keeps_empty_directories_and_mtimes() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    fs::create_dir_all(src.join("empty")).unwrap();
    fs::create_dir_all(src.join("gui")).unwrap();
    fs::write(src.join("gui/dialog.py"), "d").unwrap();
    let pinned = FileTime::from_unix_time(1_650_000_000, 0);
    filetime::set_file_mtime(src.join("gui/dialog.py"), pinned).unwrap();
    let dst = temp.path().join("dst");

    io::copy_tree(&src, &dst).unwrap();

    assert!(dst.join("empty").is_dir());
    let meta = fs::metadata(dst.join("gui/dialog.py")).unwrap();
    assert_eq!(FileTime::from_last_modification_time(&meta), pinned);
}

#[cfg(unix)]
#[test]
fn test_copy_tree_does_not_follow_directory_symlinks() {
    let temp = TempDir::new().unwrap();
    let outside = temp.path().join("outside");
    fs::create_dir_all(&outside).unwrap();
    fs::write(outside.join("big.bin"), "data").unwrap();
    let src = temp.path().join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("a.txt"), "a").unwrap();
    std::os::unix::fs::symlink(&outside, src.join("linked")).unwrap();
    let dst = temp.path().join("dst");

    let copied = io::copy_tree(&src, &dst).unwrap();

    assert_eq!(copied, 1);
    assert!(!dst.join("linked").exists());
}

#[test]
fn test_copy_tree_missing_source_fails() {
    let temp = TempDir::new().unwrap();
    let err = io::copy_tree(&temp.path().join("absent"), &temp.path().join("dst")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}
