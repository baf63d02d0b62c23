//! # Semantic Analyzer
//!
//! Walks a parsed [`Module`], fills a [`SymbolTable`] and collects
//! [`Diagnostic`]s. Analysis never stops at the first problem: every
//! unresolved name or bad override is recorded and the walk continues.
//!
//! ## Passes
//!
//! 1. The module symbol and the imports. `FROM M IMPORT x` copies `x` out of
//!    the table the [`ModuleResolver`] returns for `M`; `IMPORT M` makes the
//!    whole module available for qualified and fallback lookups.
//! 2. Declarations are registered in source order. Type references are kept
//!    as names and only checked at the end, so a type may be used before it
//!    is declared.
//! 3. Procedure and method bodies, object override rules, then the module
//!    body.
//!
//! ## Name resolution order
//!
//! Builtins, then the scope chain (object members are searched where a
//! method's object scope sits in that chain), then for an implementation
//! module the paired definition module, then every `IMPORT`ed module.

mod bodies;
mod context;
mod declarations;
mod expressions;
mod imports;
mod objects;
mod statements;

use std::sync::Arc;

use crate::parser::Module;
use crate::semantic::diagnostics::Diagnostic;
use crate::semantic::symbol_table::SymbolTable;

use context::AnalysisContext;

/// Looks up the symbol table of another module by name.
///
/// The analyzer asks at most once per distinct module name per pass and
/// treats `None` as "unresolved", never as a failure.
pub trait ModuleResolver {
    fn resolve_module(&self, name: &str) -> Option<Arc<SymbolTable>>;
}

impl<F> ModuleResolver for F
where
    F: Fn(&str) -> Option<Arc<SymbolTable>>,
{
    fn resolve_module(&self, name: &str) -> Option<Arc<SymbolTable>> {
        self(name)
    }
}

/// Output of one analysis pass
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub symbols: SymbolTable,
    /// Ordered by source position
    pub diagnostics: Vec<Diagnostic>,
}

impl AnalysisResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }
}

/// Semantic analyzer for one module
#[derive(Clone, Copy, Default)]
pub struct Analyzer<'r> {
    resolver: Option<&'r dyn ModuleResolver>,
}

impl<'r> Analyzer<'r> {
    pub fn new(resolver: Option<&'r dyn ModuleResolver>) -> Self {
        Self { resolver }
    }

    /// Analyzer without cross-module lookups
    pub fn standalone() -> Self {
        Self::default()
    }

    pub fn analyze(&self, module: &Module) -> AnalysisResult {
        tracing::debug!(
            "analyzing {} module '{}'",
            module.kind.as_str(),
            module.name.name
        );
        let mut cx = AnalysisContext::new(module, self.resolver);

        cx.define_module_symbol(module);
        cx.register_imports(module);
        cx.register_decls(&module.decls);
        cx.analyze_bodies(&module.decls);
        cx.check_object_types();
        if let Some(body) = &module.body {
            cx.check_block(body);
        }
        cx.check_exports(module);
        cx.validate_pending_types();

        let result = cx.finish();
        tracing::debug!(
            "module '{}': {} symbols, {} diagnostics",
            module.name.name,
            result.symbols.symbol_count(),
            result.diagnostics.len()
        );
        result
    }
}

/// Analyze `module` without a resolver
pub fn analyze(module: &Module) -> AnalysisResult {
    Analyzer::standalone().analyze(module)
}

#[cfg(test)]
mod tests;
