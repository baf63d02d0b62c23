use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::symbol::SymbolId;
use crate::base::Span;

/// Index of a scope in the table's scope arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeId(pub u32);

impl ScopeId {
    /// The module scope every table starts with
    pub const ROOT: ScopeId = ScopeId(0);

    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Module,
    Procedure,
    Object,
    Method,
    Record,
}

/// Represents a lexical scope in the symbol table
#[derive(Debug, Clone)]
pub struct Scope {
    pub id: ScopeId,
    pub kind: ScopeKind,
    pub span: Span,
    /// Maps symbol name to SymbolId (symbols are stored in arena)
    pub symbols: FxHashMap<SmolStr, SymbolId>,
    /// Back-reference only; the table owns every scope
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
}

impl Scope {
    pub fn new(id: ScopeId, kind: ScopeKind, span: Span, parent: Option<ScopeId>) -> Self {
        Self {
            id,
            kind,
            span,
            symbols: FxHashMap::default(),
            parent,
            children: Vec::new(),
        }
    }
}
