//! Index of resolved name uses.
//!
//! Every identifier the analyzer resolves is recorded with the symbol it
//! resolved to. Because the target is a [`SymbolId`] and not a name, a
//! rename only touches uses of that exact declaration, never a same-named
//! symbol in another scope.

use rustc_hash::FxHashMap;

use super::scope::ScopeId;
use super::symbol::SymbolId;
use super::table::SymbolTable;
use crate::base::{Position, Span};

/// A single use of a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reference {
    pub symbol: SymbolId,
    pub span: Span,
    /// Scope the use appears in
    pub scope: ScopeId,
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    references: Vec<Reference>,
    by_symbol: FxHashMap<SymbolId, Vec<usize>>,
}

impl ReferenceIndex {
    pub fn add(&mut self, reference: Reference) {
        tracing::trace!(
            "reference to symbol {:?} at {}",
            reference.symbol,
            reference.span.start
        );
        self.by_symbol
            .entry(reference.symbol)
            .or_default()
            .push(self.references.len());
        self.references.push(reference);
    }

    pub fn references_to(&self, symbol: SymbolId) -> impl Iterator<Item = &Reference> {
        self.by_symbol
            .get(&symbol)
            .into_iter()
            .flatten()
            .map(|&index| &self.references[index])
    }

    pub fn count(&self, symbol: SymbolId) -> usize {
        self.by_symbol.get(&symbol).map_or(0, Vec::len)
    }

    pub fn symbol_at(&self, position: Position) -> Option<SymbolId> {
        self.references
            .iter()
            .find(|r| r.span.contains(position))
            .map(|r| r.symbol)
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}

impl SymbolTable {
    /// Record a use of `symbol` at `span` in the current scope
    pub fn record_reference(&mut self, symbol: SymbolId, span: Span) {
        self.record_reference_in(self.current_scope(), symbol, span);
    }

    /// Record a use that appeared in `scope`, after the walk has left it
    pub fn record_reference_in(&mut self, scope: ScopeId, symbol: SymbolId, span: Span) {
        self.references.add(Reference {
            symbol,
            span,
            scope,
        });
    }

    /// Every recorded use of `symbol`, in recording order
    pub fn references_to(&self, symbol: SymbolId) -> Vec<Reference> {
        self.references.references_to(symbol).copied().collect()
    }

    /// Number of recorded uses of `symbol`
    pub fn reference_count(&self, symbol: SymbolId) -> usize {
        self.references.count(symbol)
    }

    /// Declaration span plus every use: the edit set of a scope-aware rename
    pub fn rename_spans(&self, symbol: SymbolId) -> Vec<Span> {
        let mut spans = vec![self.symbol(symbol).span];
        spans.extend(self.references.references_to(symbol).map(|r| r.span));
        spans
    }
}
