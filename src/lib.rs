//! # simlang-base
//!
//! Front-end for a MODSIM-style simulation language: lexer, parser, symbol
//! tables, semantic analysis and a multi-file workspace.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → WorkspaceLoader, source file discovery
//!   ↓
//! semantic  → symbol tables, analyzer, diagnostics, workspace
//!   ↓
//! syntax    → SyntaxFile: tokenize → parse for one document
//!   ↓
//! parser    → Logos lexer, keywords, AST, recursive-descent parser
//!   ↓
//! base      → Position/Span, LineIndex, constants
//! ```
//!
//! `project::file_loader` is the one exception to the ordering: the
//! workspace uses it to discover source files.
//!
//! The library only emits `tracing` events; installing a subscriber is up to
//! the embedding process.

/// Foundation types: Position, Span, LineIndex, constants
pub mod base;

/// Parser: Logos lexer, keyword table, AST, recursive-descent parser
pub mod parser;

/// Syntax: the per-document tokenize → parse pipeline
pub mod syntax;

/// Semantic model: symbol tables, analysis, workspace
pub mod semantic;

/// Project management: loading workspaces from disk
pub mod project;

// Re-export commonly needed items
pub use parser::keywords;

pub use base::{LineIndex, Position, Span};
pub use parser::{Module, ModuleKind, ParseError, ParseMode, Token, parse_source, tokenize};
pub use project::WorkspaceLoader;
pub use semantic::{
    AnalysisResult, Analyzer, Diagnostic, ModuleResolver, SymbolTable, Workspace, WorkspaceConfig,
    WorkspaceError, analyze,
};
pub use syntax::SyntaxFile;
