use smol_str::SmolStr;

use super::scope::ScopeId;
use crate::base::Span;
use crate::parser::{DispatchKind, ParamMode};
use crate::semantic::types::Type;

/// Unique identifier for a symbol in the arena.
/// Uses u32 for compact storage (supports ~4 billion symbols).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(pub u32);

impl SymbolId {
    /// Create a new SymbolId from an index
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Get the index into the arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Module,
    Type,
    Const,
    Var,
    Parameter,
    Procedure,
    Method,
    Field,
}

impl SymbolKind {
    pub fn display(self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Type => "type",
            Self::Const => "constant",
            Self::Var => "variable",
            Self::Parameter => "parameter",
            Self::Procedure => "procedure",
            Self::Method => "method",
            Self::Field => "field",
        }
    }

    /// Symbols that denote storage and may appear on the left of `:=`
    pub fn is_assignable(self) -> bool {
        matches!(self, Self::Var | Self::Parameter | Self::Field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// A named entity recorded in a symbol table
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: SmolStr,
    pub kind: SymbolKind,
    /// Declared type (`Type::Unknown` when none was written or it did not resolve)
    pub ty: Type,
    /// Span of the declaring identifier
    pub span: Span,
    /// Owning scope, set by `SymbolTable::define`
    pub scope: ScopeId,
    pub param_mode: Option<ParamMode>,
    pub dispatch: Option<DispatchKind>,
    pub is_override: bool,
    pub visibility: Visibility,
    /// Declared in a CLASS section
    pub is_class: bool,
    /// Object (or record) type a field or method belongs to
    pub owner: Option<SmolStr>,
    /// Module an imported copy came from
    pub origin: Option<SmolStr>,
    /// Procedure heading without a body yet
    pub is_forward: bool,
}

impl Symbol {
    pub fn new(name: impl Into<SmolStr>, kind: SymbolKind, span: Span) -> Self {
        Self {
            name: name.into(),
            kind,
            ty: Type::Unknown,
            span,
            scope: ScopeId::ROOT,
            param_mode: None,
            dispatch: None,
            is_override: false,
            visibility: Visibility::Public,
            is_class: false,
            owner: None,
            origin: None,
            is_forward: false,
        }
    }

    pub fn with_type(mut self, ty: Type) -> Self {
        self.ty = ty;
        self
    }

    pub fn with_param_mode(mut self, mode: ParamMode) -> Self {
        self.param_mode = Some(mode);
        self
    }

    pub fn with_owner(mut self, owner: impl Into<SmolStr>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_origin(mut self, module: impl Into<SmolStr>) -> Self {
        self.origin = Some(module.into());
        self
    }

    pub fn is_imported(&self) -> bool {
        self.origin.is_some()
    }
}
