//! Expressions
//!
//! Precedence, loosest first: `OR`, `AND`, equality (`=` `<>` `#`),
//! relational (`<` `<=` `>` `>=` `IN`), additive, multiplicative
//! (`*` `/` `DIV` `MOD`), unary (`NOT` `-` `+`), postfix.

use crate::base::{Position, Span};
use crate::parser::ast::{BinaryOp, Expr, NilKind, UnaryOp};
use crate::parser::errors::{ErrorCode, ParseContext, SyntaxError};
use crate::parser::parser::{PResult, Parser};
use crate::parser::syntax_kind::SyntaxKind;

/// Binary operator for the current token at the given level
fn binary_op(kind: SyntaxKind, level: u8) -> Option<BinaryOp> {
    let op = match (level, kind) {
        (0, SyntaxKind::OR_KW) => BinaryOp::Or,
        (1, SyntaxKind::AND_KW) => BinaryOp::And,
        (2, SyntaxKind::EQ) => BinaryOp::Eq,
        (2, SyntaxKind::NOT_EQ | SyntaxKind::HASH) => BinaryOp::NotEq,
        (3, SyntaxKind::LT) => BinaryOp::Lt,
        (3, SyntaxKind::LT_EQ) => BinaryOp::LtEq,
        (3, SyntaxKind::GT) => BinaryOp::Gt,
        (3, SyntaxKind::GT_EQ) => BinaryOp::GtEq,
        (3, SyntaxKind::IN_KW) => BinaryOp::In,
        (4, SyntaxKind::PLUS) => BinaryOp::Add,
        (4, SyntaxKind::MINUS) => BinaryOp::Sub,
        (5, SyntaxKind::STAR) => BinaryOp::Mul,
        (5, SyntaxKind::SLASH) => BinaryOp::Div,
        (5, SyntaxKind::DIV_KW) => BinaryOp::IntDiv,
        (5, SyntaxKind::MOD_KW) => BinaryOp::Mod,
        _ => return None,
    };
    Some(op)
}

const UNARY_LEVEL: u8 = 6;

impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self) -> PResult<Expr> {
        self.push_context(ParseContext::Expression);
        let expr = self.parse_binary(0);
        self.pop_context();
        expr
    }

    fn parse_binary(&mut self, level: u8) -> PResult<Expr> {
        if level == UNARY_LEVEL {
            return self.parse_unary();
        }
        let start = self.start();
        let mut lhs = self.parse_binary(level + 1)?;
        while let Some(op) = binary_op(self.kind(), level) {
            self.bump();
            if self.at_any(&[SyntaxKind::SEMICOLON, SyntaxKind::R_PAREN, SyntaxKind::EOF]) {
                self.error(
                    ErrorCode::E0402,
                    format!("expected operand after '{}', found {}", op.as_str(), self.kind()),
                )?;
            }
            let rhs = self.parse_binary(level + 1)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                span: self.span_from(start),
            };
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> PResult<Expr> {
        let start = self.start();
        let op = match self.kind() {
            SyntaxKind::NOT_KW => UnaryOp::Not,
            SyntaxKind::MINUS => UnaryOp::Neg,
            SyntaxKind::PLUS => UnaryOp::Plus,
            _ => return self.parse_postfix_expr(),
        };
        self.bump();
        let operand = self.parse_unary()?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
            span: self.span_from(start),
        })
    }

    /// Primary followed by any number of calls, indexes, field selections and dereferences
    pub(crate) fn parse_postfix_expr(&mut self) -> PResult<Expr> {
        let start = self.start();
        let mut expr = self.parse_primary()?;
        loop {
            expr = match self.kind() {
                SyntaxKind::L_PAREN => {
                    let args = self.parse_args()?;
                    Expr::Call {
                        callee: Box::new(expr),
                        args,
                        span: self.span_from(start),
                    }
                }
                SyntaxKind::L_BRACKET | SyntaxKind::DOT | SyntaxKind::CARET => {
                    match self.parse_selector(expr, start)? {
                        Ok(selected) => selected,
                        Err(unchanged) => return Ok(unchanged),
                    }
                }
                _ => return Ok(expr),
            };
        }
    }

    /// Designator without calls: the target of `ASK`/`TELL`/`WAIT FOR`
    pub(crate) fn parse_designator(&mut self) -> PResult<Expr> {
        let start = self.start();
        let mut expr = match self.kind() {
            SyntaxKind::SELF_KW => Expr::SelfRef {
                span: self.bump().span,
            },
            _ => Expr::Name(self.expect_ident()?),
        };
        // `obj.Method` never occurs here, so a dot always selects a field
        while self.at_any(&[SyntaxKind::L_BRACKET, SyntaxKind::DOT, SyntaxKind::CARET]) {
            match self.parse_selector(expr, start)? {
                Ok(selected) => expr = selected,
                Err(unchanged) => return Ok(unchanged),
            }
        }
        Ok(expr)
    }

    /// One `[...]`, `.field` or `^` selector applied to `base`.
    /// Hands `base` back untouched when the dot is not followed by a field name.
    fn parse_selector(
        &mut self,
        base: Expr,
        start: Position,
    ) -> PResult<Result<Expr, Expr>> {
        let selected = match self.kind() {
            SyntaxKind::L_BRACKET => {
                self.bump();
                let mut indices = vec![self.parse_expr()?];
                while self.eat(SyntaxKind::COMMA) {
                    indices.push(self.parse_expr()?);
                }
                self.expect(SyntaxKind::R_BRACKET)?;
                Expr::Index {
                    base: Box::new(base),
                    indices,
                    span: self.span_from(start),
                }
            }
            SyntaxKind::DOT if self.nth(1) == SyntaxKind::IDENT => {
                self.bump();
                let field = self.expect_ident()?;
                Expr::Field {
                    base: Box::new(base),
                    field,
                    span: self.span_from(start),
                }
            }
            SyntaxKind::CARET => {
                self.bump();
                Expr::Deref {
                    base: Box::new(base),
                    span: self.span_from(start),
                }
            }
            _ => return Ok(Err(base)),
        };
        Ok(Ok(selected))
    }

    fn parse_primary(&mut self) -> PResult<Expr> {
        let start = self.start();
        let expr = match self.kind() {
            SyntaxKind::IDENT => Expr::Name(self.expect_ident()?),
            SyntaxKind::INTEGER => {
                let token = self.bump();
                match token.text.parse::<i64>() {
                    Ok(value) => Expr::Integer {
                        value,
                        span: token.span,
                    },
                    Err(_) => {
                        let err = SyntaxError::new(
                            format!("integer literal {} is out of range", token.text),
                            token.span,
                            ErrorCode::E0401,
                        );
                        self.report(err)?;
                        Expr::Missing { span: token.span }
                    }
                }
            }
            SyntaxKind::REAL => {
                let token = self.bump();
                let value = token.text.parse::<f64>().unwrap_or_default();
                Expr::Real {
                    value,
                    span: token.span,
                }
            }
            SyntaxKind::STRING => {
                let token = self.bump();
                Expr::Str {
                    value: token.string_value().unwrap_or_default().to_string(),
                    span: token.span,
                }
            }
            SyntaxKind::CHAR => {
                let token = self.bump();
                Expr::Char {
                    value: token.char_value().unwrap_or_default(),
                    span: token.span,
                }
            }
            SyntaxKind::TRUE_KW | SyntaxKind::FALSE_KW => {
                let token = self.bump();
                Expr::Bool {
                    value: token.kind == SyntaxKind::TRUE_KW,
                    span: token.span,
                }
            }
            SyntaxKind::NIL_KW
            | SyntaxKind::NILOBJ_KW
            | SyntaxKind::NILREC_KW
            | SyntaxKind::NILARRAY_KW => {
                let token = self.bump();
                let kind = match token.kind {
                    SyntaxKind::NILOBJ_KW => NilKind::NilObj,
                    SyntaxKind::NILREC_KW => NilKind::NilRec,
                    SyntaxKind::NILARRAY_KW => NilKind::NilArray,
                    _ => NilKind::Nil,
                };
                Expr::Nil {
                    kind,
                    span: token.span,
                }
            }
            SyntaxKind::SELF_KW => Expr::SelfRef {
                span: self.bump().span,
            },
            SyntaxKind::L_PAREN => {
                self.bump();
                let inner = self.parse_expr()?;
                self.expect(SyntaxKind::R_PAREN)?;
                inner
            }
            SyntaxKind::L_BRACKET => self.parse_set()?,
            SyntaxKind::ASK_KW => {
                self.bump();
                Expr::Ask(Box::new(self.parse_method_call(start)?))
            }
            SyntaxKind::INHERITED_KW => {
                self.bump();
                let method = self.expect_ident()?;
                let args = if self.at(SyntaxKind::L_PAREN) {
                    self.parse_args()?
                } else {
                    Vec::new()
                };
                Expr::Inherited {
                    method,
                    args,
                    span: self.span_from(start),
                }
            }
            _ => {
                self.context_error(ErrorCode::E0401)?;
                Expr::Missing {
                    span: Span::empty(start),
                }
            }
        };
        Ok(expr)
    }

    /// "[" [Element {"," Element}] "]" where Element = Expr [".." Expr]
    fn parse_set(&mut self) -> PResult<Expr> {
        let start = self.start();
        self.bump();
        let mut elements = Vec::new();
        if !self.at(SyntaxKind::R_BRACKET) {
            loop {
                let element_start = self.start();
                let low = self.parse_expr()?;
                let element = if self.eat(SyntaxKind::RANGE) {
                    let high = self.parse_expr()?;
                    Expr::Range {
                        low: Box::new(low),
                        high: Box::new(high),
                        span: self.span_from(element_start),
                    }
                } else {
                    low
                };
                elements.push(element);
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::R_BRACKET)?;
        Ok(Expr::Set {
            elements,
            span: self.span_from(start),
        })
    }

    /// "(" [Expr {"," Expr}] ")"
    pub(crate) fn parse_args(&mut self) -> PResult<Vec<Expr>> {
        let opened = self.bump().span;
        self.push_context(ParseContext::ArgumentList);
        let mut args = Vec::new();
        if !self.at(SyntaxKind::R_PAREN) {
            args.push(self.parse_expr()?);
            while self.eat(SyntaxKind::COMMA) {
                args.push(self.parse_expr()?);
            }
        }
        self.pop_context();

        if !self.eat(SyntaxKind::R_PAREN) {
            let err = SyntaxError::builder(ErrorCode::E0404)
                .message(format!("expected ')' to close argument list, found {}", self.kind()))
                .span(self.current().span)
                .found(self.kind())
                .related("argument list opened here", opened)
                .build();
            self.report(err)?;
        }
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::{BinaryOp, Expr, Stmt, UnaryOp};
    use crate::parser::{ParseMode, parse_source};

    fn expr_of(text: &str) -> Expr {
        let source = format!("MODULE T;\nBEGIN\n  x := {};\nEND MODULE.", text);
        let parse = parse_source(&source, ParseMode::Strict).unwrap();
        match parse.module.body.unwrap().remove(0) {
            Stmt::Assign { value, .. } => value,
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let Expr::Binary { op, rhs, .. } = expr_of("1 + 2 * 3") else {
            panic!("expected binary expression");
        };
        assert_eq!(op, BinaryOp::Add);
        assert!(matches!(*rhs, Expr::Binary { op: BinaryOp::Mul, .. }));
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let Expr::Binary { op, rhs, .. } = expr_of("a OR b AND c") else {
            panic!("expected binary expression");
        };
        assert_eq!(op, BinaryOp::Or);
        assert!(matches!(*rhs, Expr::Binary { op: BinaryOp::And, .. }));
    }

    #[test]
    fn test_hash_is_not_equal() {
        assert!(matches!(
            expr_of("a # b"),
            Expr::Binary { op: BinaryOp::NotEq, .. }
        ));
    }

    #[test]
    fn test_unary_not() {
        assert!(matches!(
            expr_of("NOT done"),
            Expr::Unary { op: UnaryOp::Not, .. }
        ));
    }

    #[test]
    fn test_postfix_chain() {
        let expr = expr_of("a.b[1]^.c");
        let Expr::Field { base, field, .. } = &expr else {
            panic!("expected field selection, got {:?}", expr);
        };
        assert_eq!(field.as_str(), "c");
        assert!(matches!(**base, Expr::Deref { .. }));
        assert_eq!(expr.root_name().map(|i| i.as_str()), Some("a"));
    }

    #[test]
    fn test_set_with_range() {
        let Expr::Set { elements, .. } = expr_of("[1, 3..5]") else {
            panic!("expected set");
        };
        assert_eq!(elements.len(), 2);
        assert!(matches!(elements[1], Expr::Range { .. }));
    }

    #[test]
    fn test_ask_expression() {
        let Expr::Ask(call) = expr_of("ASK queue TO Count(1)") else {
            panic!("expected ASK expression");
        };
        assert_eq!(call.method.as_str(), "Count");
        assert_eq!(call.args.len(), 1);
    }

    #[test]
    fn test_literals() {
        assert!(matches!(expr_of("TRUE"), Expr::Bool { value: true, .. }));
        assert!(matches!(expr_of("'c'"), Expr::Char { value: 'c', .. }));
        assert!(matches!(expr_of("2.5E1"), Expr::Real { value, .. } if value == 25.0));
        assert!(matches!(expr_of("\"hi\""), Expr::Str { ref value, .. } if value == "hi"));
    }

    #[test]
    fn test_integer_overflow_is_reported() {
        let source = "MODULE T;\nBEGIN\n  x := 99999999999999999999;\nEND MODULE.";
        let parse = parse_source(source, ParseMode::Recovery).unwrap();
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(parse.errors[0].code, crate::parser::errors::ErrorCode::E0401);
    }

    #[test]
    fn test_unclosed_argument_list() {
        let source = "MODULE T;\nBEGIN\n  Foo(1, 2;\nEND MODULE.";
        let parse = parse_source(source, ParseMode::Recovery).unwrap();
        assert!(
            parse
                .errors
                .iter()
                .any(|e| e.code == crate::parser::errors::ErrorCode::E0404)
        );
    }
}
