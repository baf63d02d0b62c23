use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use smol_str::SmolStr;

use crate::parser::{Module, ModuleKind, ParseMode};
use crate::semantic::analyzer::{AnalysisResult, Analyzer, ModuleResolver};
use crate::semantic::diagnostics::Diagnostic;
use crate::semantic::symbol_table::SymbolTable;
use crate::syntax::SyntaxFile;
use crate::syntax::parser::load_file;

/// Lifecycle of a document inside the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentState {
    Ready,
    Reanalyzing,
    /// Returned from [`super::Workspace::remove_document`]; no longer part of
    /// any graph
    Removed,
}

/// One source file of the workspace and everything derived from it
#[derive(Debug, Clone)]
pub struct WorkspaceDocument {
    pub(super) id: PathBuf,
    pub(super) version: u32,
    pub(super) module_name: Option<SmolStr>,
    pub(super) module_kind: Option<ModuleKind>,
    pub(super) module: Option<Module>,
    pub(super) symbols: Option<Arc<SymbolTable>>,
    pub(super) imports: Vec<SmolStr>,
    pub(super) dependencies: BTreeSet<PathBuf>,
    pub(super) dependents: BTreeSet<PathBuf>,
    syntax_diagnostics: Vec<Diagnostic>,
    diagnostics: Vec<Diagnostic>,
    pub(super) last_error: Option<String>,
    pub(super) state: DocumentState,
}

impl WorkspaceDocument {
    /// Parse and analyze `text` as document `id`
    pub(super) fn analyze(
        id: PathBuf,
        text: &str,
        mode: ParseMode,
        resolver: Option<&dyn ModuleResolver>,
    ) -> Self {
        Self::from_syntax(id, SyntaxFile::new(text, mode), resolver)
    }

    /// Read `path` from disk and analyze it without access to other modules
    pub(super) fn load(path: &Path, mode: ParseMode) -> Self {
        match load_file(path) {
            Ok(text) => Self::analyze(path.to_path_buf(), &text, mode, None),
            Err(err) => {
                tracing::warn!("{}", err);
                Self::unreadable(path.to_path_buf(), err.to_string())
            }
        }
    }

    pub(super) fn from_syntax(
        id: PathBuf,
        file: SyntaxFile,
        resolver: Option<&dyn ModuleResolver>,
    ) -> Self {
        let syntax_diagnostics: Vec<Diagnostic> = file.errors().iter().map(Diagnostic::from).collect();
        let last_error = file.fatal_error().map(ToString::to_string);
        let module_name = file.module_name().map(SmolStr::from);
        let module_kind = file.module_kind();
        let imports = file.extract_imports();
        let module = file.into_module();

        let mut document = Self {
            id,
            version: 0,
            module_name,
            module_kind,
            module,
            symbols: None,
            imports,
            dependencies: BTreeSet::new(),
            dependents: BTreeSet::new(),
            diagnostics: syntax_diagnostics.clone(),
            syntax_diagnostics,
            last_error,
            state: DocumentState::Ready,
        };
        if let Some(result) = document.analysis(resolver) {
            document.apply_analysis(result);
        }
        document
    }

    fn unreadable(id: PathBuf, error: String) -> Self {
        Self {
            id,
            version: 0,
            module_name: None,
            module_kind: None,
            module: None,
            symbols: None,
            imports: Vec::new(),
            dependencies: BTreeSet::new(),
            dependents: BTreeSet::new(),
            syntax_diagnostics: Vec::new(),
            diagnostics: Vec::new(),
            last_error: Some(error),
            state: DocumentState::Ready,
        }
    }

    /// Run the analyzer over the parsed module, if there is one
    pub(super) fn analysis(&self, resolver: Option<&dyn ModuleResolver>) -> Option<AnalysisResult> {
        let module = self.module.as_ref()?;
        Some(Analyzer::new(resolver).analyze(module))
    }

    pub(super) fn apply_analysis(&mut self, result: AnalysisResult) {
        let mut diagnostics = self.syntax_diagnostics.clone();
        diagnostics.extend(result.diagnostics);
        diagnostics.sort_by_key(|diagnostic| diagnostic.span.start.offset);
        self.diagnostics = diagnostics;
        self.symbols = Some(Arc::new(result.symbols));
    }

    /// Whether a second pass with other modules' tables can change anything
    pub(super) fn needs_resolver(&self) -> bool {
        self.module.is_some()
            && (!self.imports.is_empty() || self.module_kind == Some(ModuleKind::Implementation))
    }

    pub fn id(&self) -> &Path {
        &self.id
    }

    /// Bumped on every update after the document was first added
    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn module_name(&self) -> Option<&str> {
        self.module_name.as_deref()
    }

    pub fn module_kind(&self) -> Option<ModuleKind> {
        self.module_kind
    }

    /// The AST; `None` when a strict parse failed or the file was unreadable
    pub fn module(&self) -> Option<&Module> {
        self.module.as_ref()
    }

    pub fn symbols(&self) -> Option<&Arc<SymbolTable>> {
        self.symbols.as_ref()
    }

    /// Module names named by the document's import clauses
    pub fn imports(&self) -> &[SmolStr] {
        &self.imports
    }

    pub fn dependencies(&self) -> &BTreeSet<PathBuf> {
        &self.dependencies
    }

    pub fn dependents(&self) -> &BTreeSet<PathBuf> {
        &self.dependents
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Why the document has no AST, if it has none
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }
}
