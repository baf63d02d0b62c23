use super::{REPORT, STATS_DEF, STATS_IMPL, assert_edges_symmetric, indexed, path, project};
use crate::semantic::diagnostics::codes::SELF_IMPORT;

#[test]
fn test_edges_are_recorded_on_both_ends() {
    let dir = project(&[
        ("stats.mod", STATS_DEF),
        ("stats_impl.mod", STATS_IMPL),
        ("report.mod", REPORT),
    ]);
    let workspace = indexed(&dir);
    assert_edges_symmetric(&workspace);

    let stats = path(&dir, "stats.mod");
    assert_eq!(
        workspace.dependents(&stats),
        vec![path(&dir, "report.mod").as_path(), path(&dir, "stats_impl.mod").as_path()]
    );
    assert!(workspace.dependencies(&stats).is_empty());
}

#[test]
fn test_implementation_depends_on_its_definition() {
    let dir = project(&[("stats.mod", STATS_DEF), ("stats_impl.mod", STATS_IMPL)]);
    let workspace = indexed(&dir);
    assert_eq!(
        workspace.dependencies(&path(&dir, "stats_impl.mod")),
        vec![path(&dir, "stats.mod").as_path()]
    );
    assert!(workspace.diagnostics(&path(&dir, "stats_impl.mod")).is_empty());
}

#[test]
fn test_implementation_is_not_importable() {
    let dir = project(&[
        ("stats_impl.mod", STATS_IMPL),
        ("main.mod", "MODULE Main;\nIMPORT Stats;\nEND MODULE."),
    ]);
    let workspace = indexed(&dir);
    assert!(workspace.dependencies(&path(&dir, "main.mod")).is_empty());
    // still findable by name
    assert_eq!(
        workspace.document_for_module("Stats").unwrap().id(),
        path(&dir, "stats_impl.mod")
    );
}

#[test]
fn test_cycles_are_recorded_not_rejected() {
    let dir = project(&[
        ("a.mod", "DEFINITION MODULE A;\nIMPORT B;\nEND MODULE."),
        ("b.mod", "DEFINITION MODULE B;\nIMPORT C;\nEND MODULE."),
        ("c.mod", "DEFINITION MODULE C;\nIMPORT A;\nEND MODULE."),
        ("d.mod", "DEFINITION MODULE D;\nIMPORT A;\nEND MODULE."),
    ]);
    let workspace = indexed(&dir);
    assert_eq!(workspace.document_count(), 4);
    assert!(workspace.has_cycles());
    assert_eq!(
        workspace.cycles(),
        [vec![path(&dir, "a.mod"), path(&dir, "b.mod"), path(&dir, "c.mod")]]
    );
    assert_edges_symmetric(&workspace);
}

#[test]
fn test_two_module_cycle() {
    let dir = project(&[
        ("left.mod", "DEFINITION MODULE Left;\nIMPORT Right;\nEND MODULE."),
        ("right.mod", "DEFINITION MODULE Right;\nIMPORT Left;\nEND MODULE."),
    ]);
    let workspace = indexed(&dir);
    assert_eq!(workspace.cycles().len(), 1);
    assert_eq!(workspace.cycles()[0].len(), 2);
}

#[test]
fn test_acyclic_graph_has_no_cycles() {
    let dir = project(&[
        ("stats.mod", STATS_DEF),
        ("stats_impl.mod", STATS_IMPL),
        ("report.mod", REPORT),
    ]);
    assert!(!indexed(&dir).has_cycles());
}

#[test]
fn test_self_import_adds_no_edge() {
    let dir = project(&[("loop.mod", "MODULE Loop;\nIMPORT Loop;\nEND MODULE.")]);
    let workspace = indexed(&dir);
    let id = path(&dir, "loop.mod");
    assert!(workspace.dependencies(&id).is_empty());
    assert!(!workspace.has_cycles());
    let codes: Vec<_> = workspace.diagnostics(&id).iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![SELF_IMPORT]);
}

#[test]
fn test_duplicate_module_name_keeps_the_first_path() {
    let dir = project(&[
        ("a/stats.mod", STATS_DEF),
        ("b/stats.mod", STATS_DEF),
        ("report.mod", REPORT),
    ]);
    let workspace = indexed(&dir);
    assert_eq!(
        workspace.document_for_module("Stats").unwrap().id(),
        path(&dir, "a/stats.mod")
    );
    assert_eq!(
        workspace.dependencies(&path(&dir, "report.mod")),
        vec![path(&dir, "a/stats.mod").as_path()]
    );
    assert!(workspace.dependents(&path(&dir, "b/stats.mod")).is_empty());
}

#[test]
fn test_unknown_document_has_no_edges() {
    let dir = project(&[("stats.mod", STATS_DEF)]);
    let workspace = indexed(&dir);
    let unknown = path(&dir, "nowhere.mod");
    assert!(workspace.dependencies(&unknown).is_empty());
    assert!(workspace.dependents(&unknown).is_empty());
    assert!(workspace.diagnostics(&unknown).is_empty());
}
