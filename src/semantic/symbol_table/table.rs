use smol_str::SmolStr;

use super::references::ReferenceIndex;
use super::scope::{Scope, ScopeId, ScopeKind};
use super::symbol::{Symbol, SymbolId, SymbolKind};
use crate::base::Span;

/// Error returned by [`SymbolTable::define`]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DefineError {
    #[error("'{name}' is already defined in this scope")]
    Duplicate {
        name: SmolStr,
        existing: SymbolId,
        existing_span: Span,
    },
}

/// Scope tree and symbols of one module.
///
/// Scopes and symbols live in two arenas; scopes refer to their parent and
/// children by [`ScopeId`] and map names to [`SymbolId`]s.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    /// Arena storage for all symbols - single source of truth
    pub(super) symbols: Vec<Symbol>,
    pub(super) scopes: Vec<Scope>,
    pub(super) current: ScopeId,
    pub(super) references: ReferenceIndex,
    module_name: SmolStr,
}

impl SymbolTable {
    /// A table whose root module scope covers `span`
    pub fn new(module_name: impl Into<SmolStr>, span: Span) -> Self {
        Self {
            symbols: Vec::new(),
            scopes: vec![Scope::new(ScopeId::ROOT, ScopeKind::Module, span, None)],
            current: ScopeId::ROOT,
            references: ReferenceIndex::default(),
            module_name: module_name.into(),
        }
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn current_scope(&self) -> ScopeId {
        self.current
    }

    /// Open a child of the current scope and make it current
    pub fn enter_scope(&mut self, kind: ScopeKind, span: Span) -> ScopeId {
        let parent = self.current;
        let id = ScopeId::new(self.scopes.len());
        self.scopes.push(Scope::new(id, kind, span, Some(parent)));
        self.scopes[parent.index()].children.push(id);
        self.current = id;
        id
    }

    /// Return to the parent scope; the root scope is never left
    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current.index()].parent {
            self.current = parent;
        }
    }

    /// Define a symbol in the current scope.
    ///
    /// Only the current scope is checked, so shadowing an outer name is
    /// allowed. A procedure completes an earlier forward heading of the same
    /// name instead of clashing with it.
    pub fn define(&mut self, symbol: Symbol) -> Result<SymbolId, DefineError> {
        self.define_in(self.current, symbol)
    }

    pub fn define_in(&mut self, scope: ScopeId, mut symbol: Symbol) -> Result<SymbolId, DefineError> {
        symbol.scope = scope;
        if let Some(&existing) = self.scopes[scope.index()].symbols.get(&symbol.name) {
            let previous = &mut self.symbols[existing.index()];
            if previous.is_forward
                && previous.kind == SymbolKind::Procedure
                && symbol.kind == SymbolKind::Procedure
            {
                tracing::trace!("completing forward procedure '{}'", symbol.name);
                *previous = symbol;
                return Ok(existing);
            }
            return Err(DefineError::Duplicate {
                name: symbol.name,
                existing,
                existing_span: previous.span,
            });
        }

        let id = SymbolId::new(self.symbols.len());
        self.scopes[scope.index()]
            .symbols
            .insert(symbol.name.clone(), id);
        self.symbols.push(symbol);
        Ok(id)
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub fn symbol_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.index()]
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn root(&self) -> ScopeId {
        ScopeId::ROOT
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.scope(id).parent
    }

    pub fn children(&self, id: ScopeId) -> &[ScopeId] {
        &self.scope(id).children
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    /// Every symbol, in definition order
    pub fn all_symbols(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(index, symbol)| (SymbolId::new(index), symbol))
    }

    /// Symbols defined directly in `scope`, in definition order
    pub fn symbols_in(&self, scope: ScopeId) -> Vec<(SymbolId, &Symbol)> {
        let mut ids: Vec<SymbolId> = self.scope(scope).symbols.values().copied().collect();
        ids.sort();
        ids.into_iter().map(|id| (id, self.symbol(id))).collect()
    }

    /// Top-level symbols of the module scope
    pub fn root_symbols(&self) -> Vec<(SymbolId, &Symbol)> {
        self.symbols_in(ScopeId::ROOT)
    }
}
