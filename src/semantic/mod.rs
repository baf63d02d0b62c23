//! # Semantic Analysis
//!
//! Turns parsed modules into symbol tables and diagnostics, one module at a
//! time ([`analyzer`]) or across a whole project ([`workspace`]).
//!
//! Cross-module lookups go through the [`ModuleResolver`] callback, so the
//! analyzer never owns or reaches into other modules' state.

pub mod analyzer;
pub mod diagnostics;
pub mod symbol_table;
pub mod types;
pub mod workspace;

pub use analyzer::{AnalysisResult, Analyzer, ModuleResolver, analyze};
pub use diagnostics::{Diagnostic, DiagnosticCollector, Severity, codes};
pub use symbol_table::{
    DefineError, Reference, Scope, ScopeId, ScopeKind, Symbol, SymbolId, SymbolKind, SymbolTable,
    Visibility,
};
pub use types::Type;
pub use workspace::{
    DocumentState, SharedWorkspace, Workspace, WorkspaceConfig, WorkspaceDocument, WorkspaceError,
    WorkspaceState,
};
