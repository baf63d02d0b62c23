use std::fs;
use std::path::Path;

use super::super::*;

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "MODULE M;\nEND MODULE.").unwrap();
}

fn skipped() -> Vec<String> {
    vec!["node_modules".to_string(), "build".to_string()]
}

#[test]
fn test_collects_matching_files_recursively() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "b.mod");
    touch(dir.path(), "a.mod");
    touch(dir.path(), "nested/deeper/c.mod");
    touch(dir.path(), "notes.txt");

    let paths = collect_file_paths(dir.path(), "mod", &skipped());
    let names: Vec<_> = paths
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(names, vec!["a.mod", "b.mod", "nested/deeper/c.mod"]);
}

#[test]
fn test_hidden_and_cache_directories_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "main.mod");
    touch(dir.path(), ".git/objects/x.mod");
    touch(dir.path(), "node_modules/pkg/y.mod");
    touch(dir.path(), "build/z.mod");
    touch(dir.path(), "src/build_tools.mod");

    let paths = collect_file_paths(dir.path(), "mod", &skipped());
    assert_eq!(paths.len(), 2);
    assert!(paths.iter().all(|p| !p.to_string_lossy().contains("node_modules")));
}

#[test]
fn test_hidden_root_is_still_walked() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), ".project/a.mod");

    let paths = collect_file_paths(&dir.path().join(".project"), "mod", &skipped());
    assert_eq!(paths.len(), 1);
}

#[test]
fn test_extension_is_configurable() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "a.mod");
    touch(dir.path(), "b.sim");

    let paths = collect_file_paths(dir.path(), "sim", &[]);
    assert_eq!(paths.len(), 1);
    assert!(paths[0].ends_with("b.sim"));
}

#[test]
fn test_missing_root_yields_nothing() {
    let paths = collect_file_paths(Path::new("/nonexistent/simlang/root"), "mod", &[]);
    assert!(paths.is_empty());
}
