use super::{Expr, Ident, MethodCall};
use crate::base::Span;

/// A statement
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `target := value`
    Assign { target: Expr, value: Expr, span: Span },
    /// Procedure call or bare designator used as a statement
    Call { call: Expr, span: Span },
    /// `IF c THEN ... ELSIF c THEN ... ELSE ... END IF`
    If {
        branches: Vec<CondBranch>,
        else_body: Option<Vec<Stmt>>,
        span: Span,
    },
    While { cond: Expr, body: Vec<Stmt>, span: Span },
    /// `FOR i := a TO b BY c ... END FOR`
    For {
        var: Ident,
        from: Expr,
        direction: ForDirection,
        to: Expr,
        step: Option<Expr>,
        body: Vec<Stmt>,
        span: Span,
    },
    /// `FOREACH x IN group ... END FOREACH`
    ForEach {
        var: Ident,
        iterable: Expr,
        body: Vec<Stmt>,
        span: Span,
    },
    /// `REPEAT ... UNTIL cond`
    Repeat { body: Vec<Stmt>, cond: Expr, span: Span },
    Loop { body: Vec<Stmt>, span: Span },
    Case {
        selector: Expr,
        arms: Vec<CaseArm>,
        otherwise: Option<Vec<Stmt>>,
        span: Span,
    },
    Return { value: Option<Expr>, span: Span },
    Exit { span: Span },
    /// `NEW(x)`
    New { target: Expr, span: Span },
    /// `DISPOSE(x)`
    Dispose { target: Expr, span: Span },
    /// `ASK obj TO Method(args)`
    Ask { call: MethodCall, span: Span },
    /// `TELL obj TO Method(args) IN delay`
    Tell {
        call: MethodCall,
        delay: Option<Expr>,
        span: Span,
    },
    /// `WAIT FOR ... / WAIT DURATION ... ON INTERRUPT ... END WAIT`
    Wait {
        kind: WaitKind,
        body: Vec<Stmt>,
        interrupt: Option<Vec<Stmt>>,
        span: Span,
    },
    Terminate { span: Span },
    /// `INHERITED Method(args)`
    Inherited {
        method: Ident,
        args: Vec<Expr>,
        span: Span,
    },
    /// `WITH rec DO ... END WITH`
    With { subject: Expr, body: Vec<Stmt>, span: Span },
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Self::Assign { span, .. }
            | Self::Call { span, .. }
            | Self::If { span, .. }
            | Self::While { span, .. }
            | Self::For { span, .. }
            | Self::ForEach { span, .. }
            | Self::Repeat { span, .. }
            | Self::Loop { span, .. }
            | Self::Case { span, .. }
            | Self::Return { span, .. }
            | Self::Exit { span }
            | Self::New { span, .. }
            | Self::Dispose { span, .. }
            | Self::Ask { span, .. }
            | Self::Tell { span, .. }
            | Self::Wait { span, .. }
            | Self::Terminate { span }
            | Self::Inherited { span, .. }
            | Self::With { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForDirection {
    To,
    DownTo,
}

/// One `IF`/`ELSIF` condition with its statements
#[derive(Debug, Clone, PartialEq)]
pub struct CondBranch {
    pub cond: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// `WHEN 1, 3..5: ...`
#[derive(Debug, Clone, PartialEq)]
pub struct CaseArm {
    pub labels: Vec<Expr>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WaitKind {
    /// `WAIT FOR obj TO Method(args)`
    For(MethodCall),
    /// `WAIT DURATION expr`
    Duration(Expr),
}
