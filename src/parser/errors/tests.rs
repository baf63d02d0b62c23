//! Error codes and messages produced by whole-module parses

use super::*;
use crate::parser::{ParseMode, SyntaxKind, parse_source};

fn recovery_errors(text: &str) -> Vec<SyntaxError> {
    parse_source(text, ParseMode::Recovery).unwrap().errors
}

fn strict_error(text: &str) -> SyntaxError {
    parse_source(text, ParseMode::Strict).unwrap_err()
}

#[test]
fn test_missing_semicolon_after_header() {
    let err = strict_error("MODULE M\nEND MODULE.");
    assert_eq!(err.code, ErrorCode::E0201);
    assert_eq!(err.found, Some(SyntaxKind::END_KW));
    assert_eq!(err.span.start.line, 2);
}

#[test]
fn test_missing_module_keyword() {
    let err = strict_error("PROCEDURE P;");
    assert_eq!(err.code, ErrorCode::E0206);
}

#[test]
fn test_missing_end_points_at_opener() {
    let errors = recovery_errors("MODULE M;\nBEGIN\n  IF x THEN\n    y := 1;\n");
    let err = errors
        .iter()
        .find(|e| e.code == ErrorCode::E0202)
        .expect("missing END should be reported");
    assert!(err.has_related());
    assert_eq!(err.related[0].span.start.line, 3);
}

#[test]
fn test_trailing_input_after_module() {
    let errors = recovery_errors("MODULE M;\nEND MODULE.\nx := 1;");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ErrorCode::E0205);
    assert!(errors[0].message.contains("after end of module"));
}

#[test]
fn test_bad_statement_is_reported_with_context() {
    let errors = recovery_errors("MODULE M;\nBEGIN\n  := 3;\n  x := 1;\nEND MODULE.");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ErrorCode::E0403);
    assert!(errors[0].message.contains("in statement"));
}

#[test]
fn test_bad_type_spec() {
    let errors = recovery_errors("MODULE M;\nVAR x : ;\nEND MODULE.");
    assert!(errors.iter().any(|e| e.code == ErrorCode::E0302));
}

#[test]
fn test_bad_import_name() {
    let errors = recovery_errors("MODULE M;\nFROM 42 IMPORT x;\nEND MODULE.");
    assert!(errors.iter().any(|e| e.code == ErrorCode::E0502));
}

#[test]
fn test_missing_method_keyword() {
    let errors =
        recovery_errors("MODULE M;\nTYPE T = OBJECT\n  ASK Count : INTEGER;\nEND OBJECT;\nEND MODULE.");
    assert!(errors.iter().any(|e| e.code == ErrorCode::E0306));
}

#[test]
fn test_recovery_reports_multiple_errors() {
    let text = "MODULE M;\nVAR a : INTEGER\nVAR b : ;\nBEGIN\n  a := ;\nEND MODULE.";
    let errors = recovery_errors(text);
    assert!(errors.len() >= 3, "got {:?}", errors);
    let codes: Vec<_> = errors.iter().map(|e| e.code).collect();
    assert!(codes.contains(&ErrorCode::E0201));
    assert!(codes.contains(&ErrorCode::E0302));
    assert!(codes.contains(&ErrorCode::E0401));
}

#[test]
fn test_strict_mode_stops_at_first_error() {
    let err = strict_error("MODULE M;\nVAR a : INTEGER\nVAR b : ;\nEND MODULE.");
    assert_eq!(err.code, ErrorCode::E0201);
    assert_eq!(err.span.start.line, 3);
}

#[test]
fn test_error_display_includes_code_and_position() {
    let err = strict_error("MODULE M\nEND MODULE.");
    let text = err.to_string();
    assert!(text.starts_with("E0201"));
    assert!(text.contains("2:1"), "got {}", text);
}
