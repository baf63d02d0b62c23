use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::config::WorkspaceConfig;
use super::document::WorkspaceDocument;
use crate::base::Span;
use crate::semantic::analyzer::ModuleResolver;
use crate::semantic::diagnostics::Diagnostic;
use crate::semantic::symbol_table::{Symbol, SymbolId, SymbolTable};

/// Module name of the merged global table
pub const GLOBAL_TABLE_NAME: &str = "<workspace>";

/// Indexing progress of a [`Workspace`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WorkspaceState {
    #[default]
    Unindexed,
    Indexing,
    Ready,
}

/// Every document of a project, keyed by path, with the import graph
/// between them and the merged global table.
#[derive(Debug)]
pub struct Workspace {
    pub(super) config: WorkspaceConfig,
    pub(super) state: WorkspaceState,
    pub(super) documents: FxHashMap<PathBuf, WorkspaceDocument>,
    /// Importable module name → declaring document
    pub(super) modules: FxHashMap<SmolStr, PathBuf>,
    /// Implementation module name → declaring document
    pub(super) implementations: FxHashMap<SmolStr, PathBuf>,
    pub(super) cycles: Vec<Vec<PathBuf>>,
    pub(super) global: SymbolTable,
    /// Document each global symbol was merged from
    pub(super) global_sources: FxHashMap<SymbolId, PathBuf>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(WorkspaceConfig::default())
    }
}

impl Workspace {
    pub fn new(config: WorkspaceConfig) -> Self {
        Self {
            config,
            state: WorkspaceState::Unindexed,
            documents: FxHashMap::default(),
            modules: FxHashMap::default(),
            implementations: FxHashMap::default(),
            cycles: Vec::new(),
            global: SymbolTable::new(GLOBAL_TABLE_NAME, Span::default()),
            global_sources: FxHashMap::default(),
        }
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    pub fn state(&self) -> WorkspaceState {
        self.state
    }

    pub fn document(&self, id: &Path) -> Option<&WorkspaceDocument> {
        self.documents.get(id)
    }

    /// The document declaring module `name`.
    ///
    /// Importable modules take precedence over an implementation module of
    /// the same name.
    pub fn document_for_module(&self, name: &str) -> Option<&WorkspaceDocument> {
        self.modules
            .get(name)
            .or_else(|| self.implementations.get(name))
            .and_then(|id| self.documents.get(id))
    }

    /// All documents, ordered by path
    pub fn documents(&self) -> Vec<&WorkspaceDocument> {
        let mut documents: Vec<_> = self.documents.values().collect();
        documents.sort_by(|a, b| a.id().cmp(b.id()));
        documents
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn contains(&self, id: &Path) -> bool {
        self.documents.contains_key(id)
    }

    /// Documents `id` imports. Empty for an unknown document.
    pub fn dependencies(&self, id: &Path) -> Vec<&Path> {
        self.documents
            .get(id)
            .map(|document| document.dependencies().iter().map(PathBuf::as_path).collect())
            .unwrap_or_default()
    }

    /// Documents importing `id`. Empty for an unknown document.
    pub fn dependents(&self, id: &Path) -> Vec<&Path> {
        self.documents
            .get(id)
            .map(|document| document.dependents().iter().map(PathBuf::as_path).collect())
            .unwrap_or_default()
    }

    /// Import cycles found by the last graph update, each listed from the
    /// document where the search entered it
    pub fn cycles(&self) -> &[Vec<PathBuf>] {
        &self.cycles
    }

    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    /// Syntax and semantic diagnostics of `id`, in source order
    pub fn diagnostics(&self, id: &Path) -> &[Diagnostic] {
        self.documents
            .get(id)
            .map_or(&[], |document| document.diagnostics())
    }

    /// Symbol table of the module declared as `name`
    pub fn module_symbols(&self, name: &str) -> Option<Arc<SymbolTable>> {
        self.document_for_module(name)
            .and_then(|document| document.symbols().cloned())
    }

    pub fn global_symbols(&self) -> &SymbolTable {
        &self.global
    }

    /// Look up a top-level name across the workspace, with the document that
    /// won the merge for it
    pub fn lookup_global(&self, name: &str) -> Option<(&Symbol, &Path)> {
        let id = self.global.lookup_id(name)?;
        let source = self.global_sources.get(&id)?;
        Some((self.global.symbol(id), source.as_path()))
    }

    pub fn global_symbol_document(&self, id: SymbolId) -> Option<&Path> {
        self.global_sources.get(&id).map(PathBuf::as_path)
    }

    /// Resolver over the current tables of importable modules
    pub(super) fn resolver(&self) -> WorkspaceResolver<'_> {
        WorkspaceResolver {
            modules: &self.modules,
            documents: &self.documents,
        }
    }
}

/// Serves module tables to the analyzer straight from the workspace maps
pub(super) struct WorkspaceResolver<'w> {
    modules: &'w FxHashMap<SmolStr, PathBuf>,
    documents: &'w FxHashMap<PathBuf, WorkspaceDocument>,
}

impl ModuleResolver for WorkspaceResolver<'_> {
    fn resolve_module(&self, name: &str) -> Option<Arc<SymbolTable>> {
        let id = self.modules.get(name)?;
        self.documents.get(id)?.symbols().cloned()
    }
}
