use std::fs;
use std::path::Path;

use simlang::project::WorkspaceLoader;
use simlang::semantic::{WorkspaceConfig, WorkspaceError, WorkspaceState};

fn write(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn sample_project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "lib/queues.mod",
        "DEFINITION MODULE Queues;\nTYPE Queue = RECORD size : INTEGER; END RECORD;\nEND MODULE.",
    );
    write(
        dir.path(),
        "app/main.mod",
        "MAIN MODULE App;\nFROM Queues IMPORT Queue;\nVAR q : Queue;\nBEGIN\n  q.size := 0;\nEND MODULE.",
    );
    write(dir.path(), "build/stale.mod", "MODULE Stale;\nEND MODULE.");
    dir
}

#[test]
fn test_load_directory_indexes_sources() {
    let dir = sample_project();
    let workspace = WorkspaceLoader::new().load_directory(dir.path()).unwrap();

    assert_eq!(workspace.state(), WorkspaceState::Ready);
    assert_eq!(workspace.document_count(), 2);
    assert!(workspace.document_for_module("Stale").is_none());

    let main = dir.path().join("app/main.mod");
    let diagnostics = workspace.diagnostics(&main);
    assert!(diagnostics.iter().all(|d| !d.is_error()), "{:?}", diagnostics);
    assert_eq!(
        workspace.dependencies(&main),
        vec![dir.path().join("lib/queues.mod").as_path()]
    );
}

#[test]
fn test_loader_uses_its_config() {
    let dir = sample_project();
    write(dir.path(), "extra/other.sim", "MODULE Other;\nEND MODULE.");

    let config = WorkspaceConfig::new([dir.path()]).with_extension("sim").sequential();
    let loader = WorkspaceLoader::with_config(config);
    let workspace = loader.load().unwrap();
    assert_eq!(workspace.document_count(), 1);
    assert!(workspace.document_for_module("Other").is_some());
    assert!(!loader.config().parallel);
}

#[test]
fn test_load_shared() {
    let dir = sample_project();
    let loader = WorkspaceLoader::with_config(WorkspaceConfig::new([dir.path()]));
    let shared = loader.load_shared().unwrap();
    assert_eq!(shared.read().document_count(), 2);
}

#[test]
fn test_load_file_into_existing_workspace() {
    let dir = sample_project();
    let loader = WorkspaceLoader::new();
    let mut workspace = loader.load_directory(dir.path().join("app")).unwrap();
    assert_eq!(workspace.document_count(), 1);

    loader
        .load_file_into(&dir.path().join("lib/queues.mod"), &mut workspace)
        .unwrap();
    assert_eq!(workspace.document_count(), 2);
    assert_eq!(
        workspace.dependencies(&dir.path().join("app/main.mod")),
        vec![dir.path().join("lib/queues.mod").as_path()]
    );
}

#[test]
fn test_missing_directory_is_an_error() {
    let err = WorkspaceLoader::new()
        .load_directory("/nonexistent/simlang/loader")
        .unwrap_err();
    assert!(matches!(err, WorkspaceError::RootNotFound(_)));
    assert!(err.to_string().contains("/nonexistent/simlang/loader"));
}
