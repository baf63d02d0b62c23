use std::cell::RefCell;

use super::{analyze_source, analyze_with, codes, parse_module, tables_of};
use crate::semantic::analyzer::{Analyzer, ModuleResolver};
use crate::semantic::diagnostics::codes::*;
use crate::semantic::symbol_table::SymbolKind;
use crate::semantic::types::Type;

const STATS: &str = "DEFINITION MODULE Stats;
TYPE Sample = RECORD
  total : REAL;
  n : INTEGER;
END RECORD;
CONST MaxSamples = 50;
PROCEDURE Mean(IN s : Sample) : REAL;
END MODULE.";

const COLORS: &str = "DEFINITION MODULE Colors;
TYPE Color = (Red, Green, Blue);
END MODULE.";

#[test]
fn test_from_import_brings_names_in() {
    let result = analyze_with(
        "MODULE Main;
FROM Stats IMPORT Sample, Mean;
VAR s : Sample;
    m : REAL;
BEGIN
  s.n := 1;
  m := Mean(s);
END MODULE.",
        &[STATS],
    );
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    let mean = result.symbols.lookup("Mean").unwrap();
    assert_eq!(mean.kind, SymbolKind::Procedure);
    assert_eq!(mean.origin.as_deref(), Some("Stats"));
    assert!(mean.is_imported());
}

#[test]
fn test_import_alias_defines_the_local_name() {
    let result = analyze_with(
        "MODULE Main;
FROM Stats IMPORT MaxSamples AS Limit;
VAR n : INTEGER;
BEGIN
  n := Limit;
END MODULE.",
        &[STATS],
    );
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    assert!(result.symbols.lookup("Limit").is_some());
    assert!(result.symbols.lookup("MaxSamples").is_none());
}

#[test]
fn test_import_all_brings_enum_values() {
    let result = analyze_with(
        "MODULE Main;
FROM Colors IMPORT ALL Color;
VAR c : Color;
BEGIN
  c := Blue;
END MODULE.",
        &[COLORS],
    );
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    let blue = result.symbols.lookup("Blue").unwrap();
    assert_eq!(blue.kind, SymbolKind::Const);
    assert_eq!(blue.origin.as_deref(), Some("Colors"));
}

#[test]
fn test_missing_imported_name_is_a_warning() {
    let result = analyze_with(
        "MODULE Main;
FROM Stats IMPORT Median;
VAR x : REAL;
BEGIN
  x := Median;
END MODULE.",
        &[STATS],
    );
    // The placeholder keeps the use from cascading into an undefined-name error
    assert_eq!(codes(&result), vec![UNRESOLVED_IMPORT]);
    assert!(result.diagnostics[0].message.contains("Median"));
}

#[test]
fn test_unresolvable_module_is_a_warning() {
    let result = analyze_with(
        "MODULE Main;
IMPORT Missing;
VAR x : INTEGER;
BEGIN
  x := Missing.Anything;
END MODULE.",
        &[],
    );
    assert_eq!(codes(&result), vec![UNRESOLVED_IMPORT]);
}

#[test]
fn test_unresolvable_module_is_reported_once() {
    let result = analyze_with(
        "MODULE Main;
IMPORT Other;
FROM Other IMPORT Queue;
IMPORT Other;
VAR q : Queue;
END MODULE.",
        &[],
    );
    assert_eq!(codes(&result), vec![UNRESOLVED_IMPORT]);
    assert!(result.diagnostics[0].message.contains("'Other'"));
}

#[test]
fn test_missing_import_does_not_hide_unrelated_names() {
    let result = analyze_with(
        "MODULE Main;
IMPORT Other;
FROM Other IMPORT Queue;
VAR a : Unknown1;
    p : Other.Plot;
    q : Queue;
    x : INTEGER;
BEGIN
  x := y;
  x := Other.Count;
  q := w;
END MODULE.",
        &[],
    );
    assert_eq!(
        codes(&result),
        vec![UNRESOLVED_IMPORT, UNKNOWN_TYPE, UNDEFINED_REFERENCE, UNDEFINED_REFERENCE]
    );
    assert!(result.diagnostics[1].message.contains("Unknown1"));
    assert!(result.diagnostics[2].message.contains("'y'"));
    assert!(result.diagnostics[3].message.contains("'w'"));
}

#[test]
fn test_whole_import_without_resolver_is_unknowable() {
    let result = analyze_source(
        "MODULE Main;
IMPORT Util;
VAR x : INTEGER;
    h : Helper;
BEGIN
  x := Scale;
END MODULE.",
    );
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
}

#[test]
fn test_no_resolver_means_no_import_warnings() {
    let result = analyze_source(
        "MODULE Main;
FROM Stats IMPORT Mean;
IMPORT Util;
END MODULE.",
    );
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
}

#[test]
fn test_self_import_is_a_warning() {
    let result = analyze_with(
        "MODULE Main;
IMPORT Main;
END MODULE.",
        &[],
    );
    assert_eq!(codes(&result), vec![SELF_IMPORT]);
}

#[test]
fn test_qualified_access_through_imported_module() {
    let result = analyze_with(
        "MODULE Main;
IMPORT Stats;
VAR s : Stats.Sample;
    n : INTEGER;
BEGIN
  n := Stats.MaxSamples;
  n := Stats.Nothing;
END MODULE.",
        &[STATS],
    );
    assert_eq!(codes(&result), vec![UNDEFINED_REFERENCE]);
    assert!(result.diagnostics[0].message.contains("Nothing"));
}

#[test]
fn test_whole_import_serves_unqualified_names() {
    let result = analyze_with(
        "MODULE Main;
IMPORT Stats;
VAR s : Sample;
BEGIN
  s.total := 0.0;
END MODULE.",
        &[STATS],
    );
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
}

#[test]
fn test_unknown_type_with_imports_resolved() {
    let result = analyze_with(
        "MODULE Main;
IMPORT Stats;
VAR h : Histogram;
END MODULE.",
        &[STATS],
    );
    assert_eq!(codes(&result), vec![UNKNOWN_TYPE]);
}

#[test]
fn test_qualified_type_from_an_unresolved_module_is_not_reported() {
    let result = analyze_with(
        "MODULE Main;
IMPORT Plots;
VAR h : Plots.Histogram;
    g : Histogram;
END MODULE.",
        &[],
    );
    assert_eq!(codes(&result), vec![UNRESOLVED_IMPORT, UNKNOWN_TYPE]);
    assert!(result.diagnostics[1].message.contains("'Histogram'"));
}

#[test]
fn test_implementation_sees_its_definition_module() {
    let result = analyze_with(
        "IMPLEMENTATION MODULE Stats;
PROCEDURE Mean(IN s : Sample) : REAL;
BEGIN
  RETURN s.total / FLOAT(s.n);
END PROCEDURE;
VAR last : Sample;
BEGIN
  last.n := MaxSamples;
END MODULE.",
        &[STATS],
    );
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
}

#[test]
fn test_imported_types_are_qualified_by_their_module() {
    let result = analyze_with(
        "MODULE Main;
FROM Stats IMPORT Mean;
END MODULE.",
        &[STATS],
    );
    let Type::Procedure(signature) = &result.symbols.lookup("Mean").unwrap().ty else {
        panic!("Mean is not a procedure");
    };
    assert_eq!(
        signature.params[0].ty,
        Type::Named {
            module: Some("Stats".into()),
            name: "Sample".into(),
        }
    );
}

#[test]
fn test_resolver_is_asked_once_per_module() {
    let tables = tables_of(&[STATS]);
    let asked = RefCell::new(Vec::new());
    let resolver = |name: &str| {
        asked.borrow_mut().push(name.to_string());
        tables.get(name).cloned()
    };
    let resolver: &dyn ModuleResolver = &resolver;
    let module = parse_module(
        "MODULE Main;
FROM Stats IMPORT Sample;
IMPORT Stats, Plots;
VAR s : Sample;
    a : Unknown1;
    b : Unknown2;
BEGIN
  s.n := Stats.MaxSamples + Missing1 + Missing2;
END MODULE.",
    );
    Analyzer::new(Some(resolver)).analyze(&module);

    let mut asked = asked.into_inner();
    asked.sort();
    assert_eq!(asked, vec!["Plots", "Stats"]);
}
