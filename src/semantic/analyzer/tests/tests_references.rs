use super::analyze_source;
use crate::base::Position;
use crate::semantic::symbol_table::{ScopeKind, SymbolKind};

const SHADOWED: &str = "MODULE M;
VAR count : INTEGER;
PROCEDURE First;
VAR count : INTEGER;
BEGIN
  count := 1;
  OUTPUT(count);
END PROCEDURE;
PROCEDURE Second;
BEGIN
  count := count + 2;
END PROCEDURE;
END MODULE.";

#[test]
fn test_references_follow_scopes() {
    let result = analyze_source(SHADOWED);
    let table = &result.symbols;
    let counts: Vec<_> = table
        .all_symbols()
        .filter(|(_, s)| s.name == "count")
        .map(|(id, s)| (id, s.span.start.line))
        .collect();
    assert_eq!(counts.len(), 2);
    let (module_count, _) = counts.iter().find(|(_, line)| *line == 2).copied().unwrap();
    let (local_count, _) = counts.iter().find(|(_, line)| *line == 4).copied().unwrap();

    let lines = |id| {
        table
            .references_to(id)
            .iter()
            .map(|r| r.span.start.line)
            .collect::<Vec<_>>()
    };
    assert_eq!(lines(local_count), vec![6, 7]);
    assert_eq!(lines(module_count), vec![11, 11]);
}

#[test]
fn test_rename_spans_cover_only_one_declaration() {
    let result = analyze_source(SHADOWED);
    let table = &result.symbols;
    let local = table
        .all_symbols()
        .find(|(_, s)| s.name == "count" && s.span.start.line == 4)
        .map(|(id, _)| id)
        .unwrap();
    let spans = table.rename_spans(local);
    assert_eq!(spans.len(), 3);
    assert!(spans.iter().all(|s| (4..=7).contains(&s.start.line)));
    assert!(spans.iter().all(|s| s.end.column - s.start.column == 5));
}

#[test]
fn test_symbol_at_resolves_uses() {
    let result = analyze_source(SHADOWED);
    let table = &result.symbols;
    // `count` in `OUTPUT(count)` on line 7
    let id = table.symbol_at(Position::new(7, 11, 0)).unwrap();
    assert_eq!(table.symbol(id).span.start.line, 4);
    // the declaration itself
    let id = table.symbol_at(Position::new(2, 6, 0)).unwrap();
    assert_eq!(table.symbol(id).kind, SymbolKind::Var);
    assert_eq!(table.symbol(id).scope, table.root());
}

#[test]
fn test_scope_tree_mirrors_the_source() {
    let result = analyze_source(SHADOWED);
    let table = &result.symbols;
    let children = table.children(table.root());
    assert_eq!(children.len(), 2);
    assert!(
        children
            .iter()
            .all(|&c| table.scope(c).kind == ScopeKind::Procedure)
    );
    let inner = table.scope_at(Position::new(6, 3, 0));
    assert_eq!(inner, children[0]);
    assert_eq!(table.scope_at(Position::new(1, 1, 0)), table.root());
}

#[test]
fn test_type_names_are_references() {
    let result = analyze_source(
        "MODULE M;
TYPE Id = INTEGER;
VAR a : Id;
PROCEDURE P(IN x : Id) : Id;
BEGIN
  RETURN x;
END PROCEDURE;
END MODULE.",
    );
    let table = &result.symbols;
    let id = table.lookup_id("Id").unwrap();
    let lines: Vec<_> = table
        .references_to(id)
        .iter()
        .map(|r| r.span.start.line)
        .collect();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|&line| line == 3 || line == 4));
}

#[test]
fn test_module_kinds_are_recorded() {
    let result = analyze_source("MAIN MODULE Run;\nBEGIN\nEND MODULE.");
    let module = result.symbols.lookup("Run").unwrap();
    assert_eq!(module.kind, SymbolKind::Module);
    assert!(result.diagnostics.is_empty());
}
