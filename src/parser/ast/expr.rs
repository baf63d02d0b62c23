use super::Ident;
use crate::base::Span;

/// An expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Name(Ident),
    Integer { value: i64, span: Span },
    Real { value: f64, span: Span },
    Str { value: String, span: Span },
    Char { value: char, span: Span },
    Bool { value: bool, span: Span },
    Nil { kind: NilKind, span: Span },
    SelfRef { span: Span },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        span: Span,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        span: Span,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        span: Span,
    },
    Index {
        base: Box<Expr>,
        indices: Vec<Expr>,
        span: Span,
    },
    Field {
        base: Box<Expr>,
        field: Ident,
        span: Span,
    },
    /// `p^`
    Deref { base: Box<Expr>, span: Span },
    /// `[a, b, 1..5]`
    Set { elements: Vec<Expr>, span: Span },
    /// `low..high` inside set constructors and CASE labels
    Range {
        low: Box<Expr>,
        high: Box<Expr>,
        span: Span,
    },
    /// `ASK obj Method(args)` used for its value
    Ask(Box<MethodCall>),
    /// `INHERITED Method(args)` used for its value
    Inherited {
        method: Ident,
        args: Vec<Expr>,
        span: Span,
    },
    /// Placeholder synthesized by error recovery
    Missing { span: Span },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Self::Name(ident) => ident.span,
            Self::Ask(call) => call.span,
            Self::Integer { span, .. }
            | Self::Real { span, .. }
            | Self::Str { span, .. }
            | Self::Char { span, .. }
            | Self::Bool { span, .. }
            | Self::Nil { span, .. }
            | Self::SelfRef { span }
            | Self::Unary { span, .. }
            | Self::Binary { span, .. }
            | Self::Call { span, .. }
            | Self::Index { span, .. }
            | Self::Field { span, .. }
            | Self::Deref { span, .. }
            | Self::Set { span, .. }
            | Self::Range { span, .. }
            | Self::Inherited { span, .. }
            | Self::Missing { span } => *span,
        }
    }

    /// Whether the expression denotes a storage location (valid assignment target)
    pub fn is_designator(&self) -> bool {
        match self {
            Self::Name(_) => true,
            Self::Field { base, .. } | Self::Index { base, .. } => base.is_designator_base(),
            Self::Deref { .. } => true,
            _ => false,
        }
    }

    fn is_designator_base(&self) -> bool {
        self.is_designator() || matches!(self, Self::SelfRef { .. } | Self::Call { .. })
    }

    /// Leftmost identifier of a designator (`a` in `a.b[1]^`)
    pub fn root_name(&self) -> Option<&Ident> {
        match self {
            Self::Name(ident) => Some(ident),
            Self::Field { base, .. } | Self::Index { base, .. } | Self::Deref { base, .. } => {
                base.root_name()
            }
            _ => None,
        }
    }
}

/// `obj [TO] Method(args)` part of ASK/TELL/WAIT FOR
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub target: Expr,
    pub method: Ident,
    pub args: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NilKind {
    Nil,
    NilObj,
    NilRec,
    NilArray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Neg,
    Plus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    In,
    Add,
    Sub,
    Mul,
    Div,
    IntDiv,
    Mod,
}

impl BinaryOp {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq | Self::In
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(self, Self::Or | Self::And)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Or => "OR",
            Self::And => "AND",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::In => "IN",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::IntDiv => "DIV",
            Self::Mod => "MOD",
        }
    }
}
