use super::{Expr, Ident, Stmt, TypeSpec};
use crate::base::Span;

/// A declaration at module, procedure or method level
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Type(TypeDecl),
    Const(ConstDecl),
    Var(VarDecl),
    Procedure(ProcDecl),
    /// `OBJECT Name; ... END OBJECT;` holding method bodies
    ObjectImpl(ObjectImpl),
}

impl Decl {
    pub fn span(&self) -> Span {
        match self {
            Self::Type(decl) => decl.span,
            Self::Const(decl) => decl.span,
            Self::Var(decl) => decl.span,
            Self::Procedure(decl) => decl.span,
            Self::ObjectImpl(decl) => decl.span,
        }
    }

    /// Names this declaration introduces
    pub fn names(&self) -> Vec<&Ident> {
        match self {
            Self::Type(decl) => vec![&decl.name],
            Self::Const(decl) => vec![&decl.name],
            Self::Var(decl) => decl.names.iter().collect(),
            Self::Procedure(decl) => vec![&decl.heading.name],
            Self::ObjectImpl(_) => vec![],
        }
    }
}

/// `Name = TypeSpec;`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: Ident,
    pub spec: TypeSpec,
    pub span: Span,
}

/// `Name [: Type] = Expr;`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    pub name: Ident,
    pub ty: Option<TypeSpec>,
    pub value: Expr,
    pub span: Span,
}

/// `a, b : Type [:= init];`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub names: Vec<Ident>,
    pub ty: TypeSpec,
    pub init: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParamMode {
    /// Read-only inside the callee; also the mode of an unmarked parameter
    #[default]
    In,
    Out,
    InOut,
}

impl ParamMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
            Self::InOut => "INOUT",
        }
    }

    /// The argument must be an assignable designator
    pub fn needs_designator(self) -> bool {
        matches!(self, Self::Out | Self::InOut)
    }
}

/// `[IN|OUT|INOUT] a, b : Type`
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub mode: ParamMode,
    pub names: Vec<Ident>,
    pub ty: TypeSpec,
    pub span: Span,
}

/// `PROCEDURE Name(params) : Result`
#[derive(Debug, Clone, PartialEq)]
pub struct ProcHeading {
    pub name: Ident,
    pub params: Vec<Param>,
    pub return_type: Option<TypeSpec>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcDecl {
    pub heading: ProcHeading,
    pub locals: Vec<Decl>,
    pub body: Vec<Stmt>,
    /// Heading only, no `BEGIN ... END`
    pub is_forward: bool,
    pub span: Span,
}

/// How a method is invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchKind {
    /// Synchronous call
    Ask,
    /// Asynchronous, scheduled
    Tell,
    /// Suspending, waited on
    WaitFor,
}

impl DispatchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ask => "ASK",
            Self::Tell => "TELL",
            Self::WaitFor => "WAITFOR",
        }
    }
}

/// `ASK METHOD Name(params) : Result`
#[derive(Debug, Clone, PartialEq)]
pub struct MethodHeading {
    pub dispatch: DispatchKind,
    pub name: Ident,
    pub params: Vec<Param>,
    pub return_type: Option<TypeSpec>,
    pub span: Span,
}

/// Method body inside an object implementation
#[derive(Debug, Clone, PartialEq)]
pub struct MethodImpl {
    pub heading: MethodHeading,
    pub locals: Vec<Decl>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectImpl {
    pub name: Ident,
    pub methods: Vec<MethodImpl>,
    pub span: Span,
}
