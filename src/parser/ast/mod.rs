//! Typed AST produced by the recursive-descent parser.
//!
//! The tree is strictly owned: every node owns its children and its span.
//! Each node category is a closed enum so traversal (see [`NodeRef`]) is an
//! exhaustive match.

mod decl;
mod expr;
mod module;
mod stmt;
mod types;
mod visit;

pub use decl::{
    ConstDecl, Decl, DispatchKind, MethodHeading, MethodImpl, ObjectImpl, Param, ParamMode,
    ProcDecl, ProcHeading, TypeDecl, VarDecl,
};
pub use expr::{BinaryOp, Expr, MethodCall, NilKind, UnaryOp};
pub use module::{Export, Import, ImportItem, Module, ModuleKind};
pub use stmt::{CaseArm, CondBranch, ForDirection, Stmt, WaitKind};
pub use types::{ArrayIndex, FieldDecl, ObjectMember, ObjectSection, ObjectType, SectionKind, TypeSpec};
pub use visit::NodeRef;

use crate::base::Span;
use smol_str::SmolStr;

/// An identifier occurrence with its span
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    pub name: SmolStr,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<SmolStr>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

/// A possibly module-qualified name: `Queue` or `Lists.Queue`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualIdent {
    pub module: Option<Ident>,
    pub name: Ident,
    pub span: Span,
}

impl QualIdent {
    pub fn simple(name: Ident) -> Self {
        Self {
            span: name.span,
            module: None,
            name,
        }
    }

    /// `Module.Name` or `Name`
    pub fn display(&self) -> String {
        match &self.module {
            Some(module) => format!("{}.{}", module.name, self.name.name),
            None => self.name.name.to_string(),
        }
    }
}
