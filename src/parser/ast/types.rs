use super::{Expr, Ident, MethodHeading, Param, QualIdent};
use crate::base::Span;

/// A type specification
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSpec {
    /// Reference to a named type (`INTEGER`, `Queue`, `Lists.Queue`)
    Named(QualIdent),
    /// `ARRAY 1..10, INTEGER OF REAL`
    Array {
        indices: Vec<ArrayIndex>,
        element: Box<TypeSpec>,
        span: Span,
    },
    /// `RECORD ... END RECORD`
    Record { fields: Vec<FieldDecl>, span: Span },
    /// `POINTER TO T`
    Pointer { target: Box<TypeSpec>, span: Span },
    /// `SET OF T`
    Set { element: Box<TypeSpec>, span: Span },
    /// `(Red, Green)` or `ENUM (Red, Green)`
    Enum { values: Vec<Ident>, span: Span },
    /// `1..10` or `[1..10]`
    Subrange { low: Expr, high: Expr, span: Span },
    /// `PROCEDURE (IN x : INTEGER) : REAL`
    Procedure {
        params: Vec<Param>,
        return_type: Option<Box<TypeSpec>>,
        span: Span,
    },
    Object(ObjectType),
}

impl TypeSpec {
    pub fn span(&self) -> Span {
        match self {
            Self::Named(name) => name.span,
            Self::Object(object) => object.span,
            Self::Array { span, .. }
            | Self::Record { span, .. }
            | Self::Pointer { span, .. }
            | Self::Set { span, .. }
            | Self::Enum { span, .. }
            | Self::Subrange { span, .. }
            | Self::Procedure { span, .. } => *span,
        }
    }

    /// The type name if this is a plain named reference
    pub fn as_named(&self) -> Option<&QualIdent> {
        match self {
            Self::Named(name) => Some(name),
            _ => None,
        }
    }
}

/// One dimension of an array type
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayIndex {
    Range { low: Expr, high: Expr, span: Span },
    /// Index type such as an enumeration or `INTEGER` for dynamic arrays
    Type(QualIdent),
}

impl ArrayIndex {
    pub fn span(&self) -> Span {
        match self {
            Self::Range { span, .. } => *span,
            Self::Type(name) => name.span,
        }
    }
}

/// `a, b : T` in a record or object body
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub names: Vec<Ident>,
    pub ty: TypeSpec,
    pub span: Span,
}

/// `OBJECT(Base1, Base2) ... END OBJECT`
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    /// Base types, in declaration order, referenced by name
    pub bases: Vec<QualIdent>,
    pub sections: Vec<ObjectSection>,
    pub span: Span,
}

impl ObjectType {
    pub fn fields(&self) -> impl Iterator<Item = (&ObjectSection, &FieldDecl)> {
        self.sections.iter().flat_map(|section| {
            section.members.iter().filter_map(move |member| match member {
                ObjectMember::Field(field) => Some((section, field)),
                ObjectMember::Method(_) => None,
            })
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = (&ObjectSection, &MethodHeading)> {
        self.sections.iter().flat_map(|section| {
            section.members.iter().filter_map(move |member| match member {
                ObjectMember::Method(method) => Some((section, method)),
                ObjectMember::Field(_) => None,
            })
        })
    }
}

/// Visibility/role of an object body section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// Members before any section keyword
    Public,
    Private,
    Class,
    Override,
}

/// A run of object members under one section keyword
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSection {
    pub kind: SectionKind,
    pub members: Vec<ObjectMember>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectMember {
    Field(FieldDecl),
    Method(MethodHeading),
}

impl ObjectMember {
    pub fn span(&self) -> Span {
        match self {
            Self::Field(field) => field.span,
            Self::Method(method) => method.span,
        }
    }
}
