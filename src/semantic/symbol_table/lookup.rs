use std::collections::VecDeque;

use super::scope::ScopeId;
use super::symbol::{Symbol, SymbolId};
use super::table::SymbolTable;
use crate::base::Position;

impl SymbolTable {
    // ============================================================
    // Scoped lookups
    // ============================================================

    /// Resolve `name` from the current scope outwards to the root
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.lookup_id(name).map(|id| self.symbol(id))
    }

    pub fn lookup_id(&self, name: &str) -> Option<SymbolId> {
        self.lookup_from(self.current, name)
    }

    /// Resolve `name` starting at `scope` and walking parent links
    pub fn lookup_from(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id);
            if let Some(&symbol) = scope.symbols.get(name) {
                return Some(symbol);
            }
            current = scope.parent;
        }
        None
    }

    /// Only the current scope, no parents
    pub fn lookup_local(&self, name: &str) -> Option<&Symbol> {
        self.scope(self.current)
            .symbols
            .get(name)
            .map(|&id| self.symbol(id))
    }

    /// Search every scope breadth-first from the root; the shallowest match wins
    pub fn lookup_global(&self, name: &str) -> Option<&Symbol> {
        let mut queue = VecDeque::from([self.root()]);
        while let Some(id) = queue.pop_front() {
            let scope = self.scope(id);
            if let Some(&symbol) = scope.symbols.get(name) {
                return Some(self.symbol(symbol));
            }
            queue.extend(scope.children.iter().copied());
        }
        None
    }

    // ============================================================
    // Position queries
    // ============================================================

    /// Innermost scope whose span contains `position`
    pub fn scope_at(&self, position: Position) -> ScopeId {
        let mut current = self.root();
        'descend: loop {
            for &child in self.children(current) {
                if self.scope(child).span.contains(position) {
                    current = child;
                    continue 'descend;
                }
            }
            return current;
        }
    }

    /// Symbol declared or referenced at `position`
    pub fn symbol_at(&self, position: Position) -> Option<SymbolId> {
        if let Some(id) = self.references.symbol_at(position) {
            return Some(id);
        }
        self.all_symbols()
            .find(|(_, symbol)| !symbol.is_imported() && symbol.span.contains(position))
            .map(|(id, _)| id)
    }
}
