use super::{lines, span};
use crate::base::Position;
use crate::semantic::symbol_table::{ScopeKind, Symbol, SymbolKind, SymbolTable};
use crate::semantic::types::Type;

/// Root defines `shared`; a procedure scope defines `shared` and `local`;
/// a sibling object scope defines `field`.
fn nested_table() -> SymbolTable {
    let mut table = SymbolTable::new("M", lines(1, 40));
    table
        .define(Symbol::new("shared", SymbolKind::Var, span(2, 5, 11)).with_type(Type::Integer))
        .unwrap();
    table.enter_scope(ScopeKind::Procedure, lines(4, 12));
    table
        .define(Symbol::new("shared", SymbolKind::Var, span(5, 5, 11)).with_type(Type::Real))
        .unwrap();
    table
        .define(Symbol::new("local", SymbolKind::Var, span(6, 5, 10)))
        .unwrap();
    table.exit_scope();
    table.enter_scope(ScopeKind::Object, lines(14, 20));
    table
        .define(Symbol::new("field", SymbolKind::Field, span(15, 5, 10)).with_owner("Queue"))
        .unwrap();
    table.exit_scope();
    table
}

#[test]
fn test_lookup_from_walks_parents() {
    let table = nested_table();
    let proc_scope = table.children(table.root())[0];
    let object_scope = table.children(table.root())[1];

    let id = table.lookup_from(proc_scope, "shared").unwrap();
    assert_eq!(table.symbol(id).ty, Type::Real);
    let id = table.lookup_from(object_scope, "shared").unwrap();
    assert_eq!(table.symbol(id).ty, Type::Integer);
    assert!(table.lookup_from(object_scope, "local").is_none());
    assert!(table.lookup_from(table.root(), "field").is_none());
}

#[test]
fn test_lookup_local_ignores_parents() {
    let mut table = nested_table();
    table.enter_scope(ScopeKind::Procedure, lines(22, 30));
    assert!(table.lookup_local("shared").is_none());
    assert!(table.lookup("shared").is_some());
}

#[test]
fn test_lookup_global_prefers_shallowest() {
    let table = nested_table();
    assert_eq!(table.lookup_global("shared").unwrap().ty, Type::Integer);
    assert_eq!(
        table.lookup_global("field").unwrap().owner.as_deref(),
        Some("Queue")
    );
    assert!(table.lookup_global("missing").is_none());
}

#[test]
fn test_scope_at_finds_innermost() {
    let table = nested_table();
    let proc_scope = table.children(table.root())[0];
    assert_eq!(table.scope_at(Position::new(6, 3, 502)), proc_scope);
    assert_eq!(table.scope_at(Position::new(13, 1, 1200)), table.root());
}

#[test]
fn test_symbol_at_finds_declaration_and_reference() {
    let mut table = nested_table();
    let local = table.lookup_from(table.children(table.root())[0], "local").unwrap();
    table.record_reference(local, span(9, 7, 12));

    assert_eq!(table.symbol_at(Position::new(6, 6, 505)), Some(local));
    assert_eq!(table.symbol_at(Position::new(9, 8, 807)), Some(local));
    assert_eq!(table.symbol_at(Position::new(30, 1, 2900)), None);
}
