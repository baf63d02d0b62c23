#![allow(clippy::unwrap_used)]

mod tests_imports;
mod tests_objects;
mod tests_references;

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::{AnalysisResult, Analyzer, ModuleResolver, analyze};
use crate::parser::{Module, ParseMode, parse_source};
use crate::semantic::symbol_table::SymbolTable;

pub(super) fn parse_module(source: &str) -> Module {
    let parse = parse_source(source, ParseMode::Recovery).unwrap();
    assert!(parse.errors.is_empty(), "syntax errors: {:?}", parse.errors);
    parse.module
}

pub(super) fn analyze_source(source: &str) -> AnalysisResult {
    analyze(&parse_module(source))
}

/// Analyze `source` with the other modules' tables available by name
pub(super) fn analyze_with(source: &str, modules: &[&str]) -> AnalysisResult {
    let tables = tables_of(modules);
    let resolver = |name: &str| tables.get(name).cloned();
    let resolver: &dyn ModuleResolver = &resolver;
    Analyzer::new(Some(resolver)).analyze(&parse_module(source))
}

/// Standalone tables of each module, keyed by module name
pub(super) fn tables_of(modules: &[&str]) -> FxHashMap<String, Arc<SymbolTable>> {
    modules
        .iter()
        .map(|source| {
            let result = analyze_source(source);
            (
                result.symbols.module_name().to_string(),
                Arc::new(result.symbols),
            )
        })
        .collect()
}

/// Diagnostic codes in source order
pub(super) fn codes(result: &AnalysisResult) -> Vec<&'static str> {
    result.diagnostics.iter().map(|d| d.code).collect()
}

pub(super) fn count(result: &AnalysisResult, code: &str) -> usize {
    result.diagnostics.iter().filter(|d| d.code == code).count()
}
