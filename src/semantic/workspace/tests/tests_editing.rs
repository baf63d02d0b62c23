use super::{REPORT, STATS_DEF, STATS_IMPL, assert_edges_symmetric, indexed, path, project};
use crate::semantic::diagnostics::codes::*;
use crate::semantic::workspace::{DocumentState, Workspace, WorkspaceError};

#[test]
fn test_update_reanalyzes_only_the_edited_document() {
    let dir = project(&[("stats.mod", STATS_DEF), ("report.mod", REPORT)]);
    let mut workspace = indexed(&dir);
    let report = path(&dir, "report.mod");

    workspace
        .update_document(
            &report,
            "MAIN MODULE Report;
FROM Stats IMPORT Sample;
VAR s : Sampel;
END MODULE.",
        )
        .unwrap();

    let document = workspace.document(&report).unwrap();
    assert_eq!(document.version(), 1);
    assert_eq!(document.state(), DocumentState::Ready);
    let codes: Vec<_> = document.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![UNKNOWN_TYPE]);
    assert_eq!(workspace.document(&path(&dir, "stats.mod")).unwrap().version(), 0);
    assert_edges_symmetric(&workspace);
}

#[test]
fn test_update_drops_removed_imports() {
    let dir = project(&[("stats.mod", STATS_DEF), ("report.mod", REPORT)]);
    let mut workspace = indexed(&dir);
    let report = path(&dir, "report.mod");

    workspace
        .update_document(&report, "MAIN MODULE Report;\nEND MODULE.")
        .unwrap();
    assert!(workspace.dependencies(&report).is_empty());
    assert!(workspace.dependents(&path(&dir, "stats.mod")).is_empty());
    assert_edges_symmetric(&workspace);
}

#[test]
fn test_update_unknown_document_fails() {
    let mut workspace = Workspace::default();
    let err = workspace
        .update_document(std::path::Path::new("ghost.mod"), "MODULE Ghost;\nEND MODULE.")
        .unwrap_err();
    assert!(matches!(err, WorkspaceError::UnknownDocument(_)));
}

#[test]
fn test_open_links_waiting_importers() {
    let dir = project(&[("report.mod", REPORT)]);
    let mut workspace = indexed(&dir);
    let report = path(&dir, "report.mod");
    assert!(workspace.dependencies(&report).is_empty());

    let stats = path(&dir, "stats.mod");
    workspace.open_document(stats.clone(), STATS_DEF);
    assert_eq!(workspace.document(&stats).unwrap().version(), 0);
    assert_eq!(workspace.dependencies(&report), vec![stats.as_path()]);
    assert_edges_symmetric(&workspace);
    assert!(workspace.lookup_global("Sample").is_some());
}

#[test]
fn test_open_existing_document_updates_it() {
    let dir = project(&[("stats.mod", STATS_DEF)]);
    let mut workspace = indexed(&dir);
    let stats = path(&dir, "stats.mod");
    workspace.open_document(stats.clone(), STATS_DEF);
    workspace.open_document(stats.clone(), STATS_DEF);
    assert_eq!(workspace.document_count(), 1);
    assert_eq!(workspace.document(&stats).unwrap().version(), 2);
}

#[test]
fn test_open_file_reads_from_disk() {
    let dir = project(&[("stats.mod", STATS_DEF)]);
    let mut workspace = Workspace::default();
    workspace.open_file(&path(&dir, "stats.mod")).unwrap();
    assert!(workspace.document_for_module("Stats").is_some());

    let err = workspace.open_file(&path(&dir, "missing.mod")).unwrap_err();
    assert!(matches!(err, WorkspaceError::Io { .. }));
}

#[test]
fn test_open_file_rejects_other_extensions() {
    let dir = project(&[("notes.txt", "MODULE Notes;\nEND MODULE.")]);
    let mut workspace = Workspace::default();
    let err = workspace.open_file(&path(&dir, "notes.txt")).unwrap_err();
    assert!(matches!(
        &err,
        WorkspaceError::UnsupportedExtension { expected, .. } if expected.as_str() == "mod"
    ));
    assert_eq!(workspace.document_count(), 0);
}

#[test]
fn test_opened_document_sees_indexed_modules() {
    let dir = project(&[("stats.mod", STATS_DEF)]);
    let mut workspace = indexed(&dir);
    let main = path(&dir, "main.mod");
    workspace.open_document(
        main.clone(),
        "MODULE Main;\nFROM Stats IMPORT Median;\nEND MODULE.",
    );
    let codes: Vec<_> = workspace.diagnostics(&main).iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![UNRESOLVED_IMPORT]);
}

#[test]
fn test_remove_imported_document() {
    let dir = project(&[
        ("stats.mod", STATS_DEF),
        ("stats_impl.mod", STATS_IMPL),
        ("report.mod", REPORT),
    ]);
    let mut workspace = indexed(&dir);
    let stats = path(&dir, "stats.mod");

    let removed = workspace.remove_document(&stats).unwrap();
    assert_eq!(removed.state(), DocumentState::Removed);
    assert!(removed.dependents().is_empty());

    assert!(workspace.document(&stats).is_none());
    assert!(workspace.document_for_module("Stats").is_some_and(|d| d.id() == path(&dir, "stats_impl.mod")));
    assert!(workspace.dependencies(&path(&dir, "report.mod")).is_empty());
    assert!(workspace.dependencies(&path(&dir, "stats_impl.mod")).is_empty());
    assert!(workspace.lookup_global("Sample").is_none());
    assert_edges_symmetric(&workspace);

    assert!(matches!(
        workspace.remove_document(&stats),
        Err(WorkspaceError::UnknownDocument(_))
    ));
}

#[test]
fn test_remove_promotes_another_declaration() {
    let dir = project(&[
        ("a/stats.mod", STATS_DEF),
        ("b/stats.mod", STATS_DEF),
        ("report.mod", REPORT),
    ]);
    let mut workspace = indexed(&dir);
    workspace.remove_document(&path(&dir, "a/stats.mod")).unwrap();

    let b = path(&dir, "b/stats.mod");
    assert_eq!(workspace.document_for_module("Stats").unwrap().id(), b);
    assert_eq!(workspace.dependencies(&path(&dir, "report.mod")), vec![b.as_path()]);
    assert_edges_symmetric(&workspace);
}

#[test]
fn test_renaming_a_module_moves_its_importers() {
    let dir = project(&[("stats.mod", STATS_DEF), ("report.mod", REPORT)]);
    let mut workspace = indexed(&dir);
    let stats = path(&dir, "stats.mod");

    workspace
        .update_document(&stats, "DEFINITION MODULE Numbers;\nEND MODULE.")
        .unwrap();
    assert!(workspace.document_for_module("Stats").is_none());
    assert!(workspace.document_for_module("Numbers").is_some());
    assert!(workspace.dependents(&stats).is_empty());
    assert_edges_symmetric(&workspace);
}

#[test]
fn test_edit_creating_a_cycle_is_detected() {
    let dir = project(&[
        ("left.mod", "DEFINITION MODULE Left;\nIMPORT Right;\nEND MODULE."),
        ("right.mod", "DEFINITION MODULE Right;\nEND MODULE."),
    ]);
    let mut workspace = indexed(&dir);
    assert!(!workspace.has_cycles());

    workspace
        .update_document(
            &path(&dir, "right.mod"),
            "DEFINITION MODULE Right;\nIMPORT Left;\nEND MODULE.",
        )
        .unwrap();
    assert!(workspace.has_cycles());

    workspace.remove_document(&path(&dir, "left.mod")).unwrap();
    assert!(!workspace.has_cycles());
}
