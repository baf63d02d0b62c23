//! Cross-layer guarantees: lexing edge cases, scope lookup, forward
//! procedures and the workspace dependency graph.

use std::fs;
use std::path::Path;

use rstest::rstest;
use simlang::parser::{SyntaxKind, tokenize};
use simlang::semantic::{ScopeKind, SymbolKind, analyze};
use simlang::{ParseMode, Workspace, WorkspaceConfig, parse_source};

fn kinds(source: &str) -> Vec<SyntaxKind> {
    tokenize(source).iter().map(|t| t.kind).collect()
}

#[rstest]
#[case("BEGIN { outer { inner } outer } END")]
#[case("BEGIN (* outer (* inner *) outer *) END")]
#[case("BEGIN {} END")]
fn test_nested_comments_are_fully_consumed(#[case] source: &str) {
    assert_eq!(
        kinds(source),
        vec![SyntaxKind::BEGIN_KW, SyntaxKind::END_KW, SyntaxKind::EOF]
    );
}

#[test]
fn test_doubled_quotes_in_string() {
    let tokens = tokenize(r#""Say ""Hello""""#);
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, SyntaxKind::STRING);
    assert_eq!(tokens[0].string_value(), Some(r#"Say "Hello""#));
}

#[test]
fn test_four_quote_char_literal() {
    let tokens = tokenize("''''");
    assert_eq!(tokens[0].kind, SyntaxKind::CHAR);
    assert_eq!(tokens[0].char_value(), Some('\''));
    assert_eq!(tokens[1].kind, SyntaxKind::EOF);
}

#[rstest]
#[case("1..10", &["1", "..", "10"])]
#[case("0..N", &["0", "..", "N"])]
#[case("1.5..2", &["1.5", "..", "2"])]
fn test_range_is_not_a_decimal_point(#[case] source: &str, #[case] texts: &[&str]) {
    let tokens = tokenize(source);
    let found: Vec<&str> = tokens
        .iter()
        .filter(|t| t.kind != SyntaxKind::EOF)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(found, texts);
    assert_eq!(tokens[1].kind, SyntaxKind::RANGE);
}

const SHADOWING: &str = "MODULE Shadow;
VAR level : INTEGER;
PROCEDURE Outer(IN level : REAL);
VAR depth : INTEGER;
BEGIN
  depth := TRUNC(level);
END PROCEDURE;
BEGIN
  level := 1;
END MODULE.";

#[test]
fn test_lookup_finds_the_innermost_definition() {
    let parse = parse_source(SHADOWING, ParseMode::Strict).unwrap();
    let result = analyze(&parse.module);
    let table = &result.symbols;

    for index in 0..table.scope_count() {
        let scope = table.scope(simlang::semantic::ScopeId::new(index));
        for (name, &id) in &scope.symbols {
            assert_eq!(
                table.lookup_from(scope.id, name),
                Some(id),
                "'{}' in scope {:?}",
                name,
                scope.id
            );
        }
    }

    let procedure = table
        .children(table.root())
        .iter()
        .copied()
        .find(|&child| table.scope(child).kind == ScopeKind::Procedure)
        .unwrap();
    let inner = table.lookup_from(procedure, "level").unwrap();
    let outer = table.lookup_from(table.root(), "level").unwrap();
    assert_ne!(inner, outer);
    assert_eq!(table.symbol(inner).kind, SymbolKind::Parameter);
    assert_eq!(table.symbol(outer).kind, SymbolKind::Var);
}

#[test]
fn test_forward_procedure_parses_and_completes() {
    let source = "MODULE Forward;
PROCEDURE Step(IN dt : REAL);
VAR t : REAL;
PROCEDURE Step(IN dt : REAL);
BEGIN
  t := t + dt;
END PROCEDURE;
BEGIN
  Step(1.0);
END MODULE.";
    let parse = parse_source(source, ParseMode::Strict).unwrap();
    assert!(parse.errors.is_empty());

    let result = analyze(&parse.module);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    let steps = result
        .symbols
        .root_symbols()
        .into_iter()
        .filter(|(_, symbol)| symbol.name.as_str() == "Step")
        .count();
    assert_eq!(steps, 1);
}

fn write(root: &Path, name: &str, text: &str) {
    fs::write(root.join(name), text).unwrap();
}

fn assert_symmetric(workspace: &Workspace) {
    for document in workspace.documents() {
        for dependency in workspace.dependencies(document.id()) {
            assert!(workspace.dependents(dependency).contains(&document.id()));
        }
        for dependent in workspace.dependents(document.id()) {
            assert!(workspace.dependencies(dependent).contains(&document.id()));
        }
    }
}

#[test]
fn test_edges_stay_symmetric_through_edits() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "a.mod", "DEFINITION MODULE A;\nCONST One = 1;\nEND MODULE.");
    write(root, "b.mod", "MODULE B;\nFROM A IMPORT One;\nEND MODULE.");
    write(root, "c.mod", "MODULE C;\nIMPORT A, B;\nEND MODULE.");

    let mut workspace = Workspace::new(WorkspaceConfig::new([root]));
    workspace.index().unwrap();
    assert_symmetric(&workspace);

    workspace
        .update_document(&root.join("c.mod"), "MODULE C;\nIMPORT B;\nEND MODULE.")
        .unwrap();
    assert_symmetric(&workspace);

    workspace.open_document(root.join("d.mod"), "MODULE D;\nIMPORT A, C;\nEND MODULE.");
    assert_symmetric(&workspace);

    workspace.remove_document(&root.join("b.mod")).unwrap();
    assert_symmetric(&workspace);

    workspace.index().unwrap();
    assert_symmetric(&workspace);
}

#[test]
fn test_removing_an_imported_file() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "a.mod", "DEFINITION MODULE A;\nCONST One = 1;\nEND MODULE.");
    write(root, "b.mod", "MODULE B;\nFROM A IMPORT One;\nVAR x : INTEGER;\nBEGIN\n  x := One;\nEND MODULE.");

    let mut workspace = Workspace::new(WorkspaceConfig::new([root]));
    workspace.index().unwrap();
    let a = root.join("a.mod");
    let b = root.join("b.mod");
    assert_eq!(workspace.dependencies(&b), vec![a.as_path()]);

    workspace.remove_document(&a).unwrap();
    assert!(workspace.dependencies(&b).is_empty());
    // B still names A in its import clause
    let imports: Vec<_> = workspace
        .document(&b)
        .unwrap()
        .imports()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(imports, vec!["A"]);
    assert!(workspace.global_symbols().lookup("One").is_none());
}
