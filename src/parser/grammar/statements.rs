//! Statements
//!
//! Every compound statement closes with `END`, optionally followed by its own
//! keyword (`END IF`, `END WHILE`, ...). `DO` after loop headers is optional.

use crate::base::Position;
use crate::parser::ast::{CaseArm, CondBranch, Expr, ForDirection, MethodCall, Stmt, WaitKind};
use crate::parser::errors::{ErrorCode, ParseContext};
use crate::parser::parser::{PResult, Parser};
use crate::parser::syntax_kind::SyntaxKind;

/// Tokens that close a statement sequence
const BLOCK_ENDS: &[SyntaxKind] = &[
    SyntaxKind::END_KW,
    SyntaxKind::ELSE_KW,
    SyntaxKind::ELSIF_KW,
    SyntaxKind::UNTIL_KW,
    SyntaxKind::WHEN_KW,
    SyntaxKind::OTHERWISE_KW,
    SyntaxKind::ON_KW,
    SyntaxKind::PIPE,
    SyntaxKind::EOF,
];

impl Parser<'_> {
    /// StmtSeq = [Stmt] {";" [Stmt]}
    ///
    /// Stops before any block-closing keyword; the enclosing construct decides
    /// whether that keyword is the one it expects.
    pub(crate) fn parse_stmt_list(&mut self) -> PResult<Vec<Stmt>> {
        self.push_context(ParseContext::StatementList);
        let mut stmts = Vec::new();
        loop {
            while self.eat(SyntaxKind::SEMICOLON) {}
            if self.at_any(BLOCK_ENDS) {
                break;
            }

            let before = self.pos();
            if let Some(stmt) = self.parse_statement()? {
                stmts.push(stmt);
            }
            if self.pos() == before {
                self.recover(ParseContext::StatementList);
                continue;
            }
            if !self.eat(SyntaxKind::SEMICOLON) && !self.at_any(BLOCK_ENDS) {
                self.error(
                    ErrorCode::E0201,
                    format!("expected ';' between statements, found {}", self.kind()),
                )?;
            }
        }
        self.pop_context();
        Ok(stmts)
    }

    /// One statement, or `None` (after reporting) when no statement starts here
    fn parse_statement(&mut self) -> PResult<Option<Stmt>> {
        let start = self.start();
        let stmt = match self.kind() {
            SyntaxKind::IF_KW => self.parse_if()?,
            SyntaxKind::WHILE_KW => {
                let opened = self.bump().span;
                let cond = self.parse_expr()?;
                self.eat(SyntaxKind::DO_KW);
                let body = self.parse_stmt_list()?;
                self.expect_end(SyntaxKind::WHILE_KW, opened)?;
                Stmt::While {
                    cond,
                    body,
                    span: self.span_from(start),
                }
            }
            SyntaxKind::FOR_KW => self.parse_for()?,
            SyntaxKind::FOREACH_KW => {
                let opened = self.bump().span;
                let var = self.expect_ident()?;
                self.expect(SyntaxKind::IN_KW)?;
                let iterable = self.parse_expr()?;
                self.eat(SyntaxKind::DO_KW);
                let body = self.parse_stmt_list()?;
                self.expect_end(SyntaxKind::FOREACH_KW, opened)?;
                Stmt::ForEach {
                    var,
                    iterable,
                    body,
                    span: self.span_from(start),
                }
            }
            SyntaxKind::REPEAT_KW => {
                self.bump();
                let body = self.parse_stmt_list()?;
                self.expect(SyntaxKind::UNTIL_KW)?;
                let cond = self.parse_expr()?;
                Stmt::Repeat {
                    body,
                    cond,
                    span: self.span_from(start),
                }
            }
            SyntaxKind::LOOP_KW => {
                let opened = self.bump().span;
                let body = self.parse_stmt_list()?;
                self.expect_end(SyntaxKind::LOOP_KW, opened)?;
                Stmt::Loop {
                    body,
                    span: self.span_from(start),
                }
            }
            SyntaxKind::CASE_KW => self.parse_case()?,
            SyntaxKind::RETURN_KW => {
                self.bump();
                let value = if self.at(SyntaxKind::SEMICOLON) || self.at_any(BLOCK_ENDS) {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                Stmt::Return {
                    value,
                    span: self.span_from(start),
                }
            }
            SyntaxKind::EXIT_KW => {
                self.bump();
                Stmt::Exit {
                    span: self.span_from(start),
                }
            }
            SyntaxKind::TERMINATE_KW => {
                self.bump();
                Stmt::Terminate {
                    span: self.span_from(start),
                }
            }
            SyntaxKind::NEW_KW | SyntaxKind::DISPOSE_KW => {
                let is_new = self.bump().kind == SyntaxKind::NEW_KW;
                self.expect(SyntaxKind::L_PAREN)?;
                let target = self.parse_expr()?;
                self.expect(SyntaxKind::R_PAREN)?;
                let span = self.span_from(start);
                if is_new {
                    Stmt::New { target, span }
                } else {
                    Stmt::Dispose { target, span }
                }
            }
            SyntaxKind::ASK_KW => {
                self.bump();
                let call = self.parse_method_call(start)?;
                Stmt::Ask {
                    call,
                    span: self.span_from(start),
                }
            }
            SyntaxKind::TELL_KW => {
                self.bump();
                let call = self.parse_method_call(start)?;
                let delay = if self.eat(SyntaxKind::IN_KW) {
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                Stmt::Tell {
                    call,
                    delay,
                    span: self.span_from(start),
                }
            }
            SyntaxKind::WAIT_KW => self.parse_wait()?,
            SyntaxKind::INHERITED_KW => {
                self.bump();
                let method = self.expect_ident()?;
                let args = if self.at(SyntaxKind::L_PAREN) {
                    self.parse_args()?
                } else {
                    Vec::new()
                };
                Stmt::Inherited {
                    method,
                    args,
                    span: self.span_from(start),
                }
            }
            SyntaxKind::WITH_KW => {
                let opened = self.bump().span;
                let subject = self.parse_expr()?;
                self.eat(SyntaxKind::DO_KW);
                let body = self.parse_stmt_list()?;
                self.expect_end(SyntaxKind::WITH_KW, opened)?;
                Stmt::With {
                    subject,
                    body,
                    span: self.span_from(start),
                }
            }
            SyntaxKind::IDENT | SyntaxKind::SELF_KW => {
                let target = self.parse_postfix_expr()?;
                if self.eat(SyntaxKind::ASSIGN) {
                    let value = self.parse_expr()?;
                    Stmt::Assign {
                        target,
                        value,
                        span: self.span_from(start),
                    }
                } else {
                    Stmt::Call {
                        call: target,
                        span: self.span_from(start),
                    }
                }
            }
            _ => {
                self.context_error(ErrorCode::E0403)?;
                return Ok(None);
            }
        };
        Ok(Some(stmt))
    }

    /// IF Expr THEN StmtSeq {ELSIF Expr THEN StmtSeq} [ELSE StmtSeq] END [IF]
    fn parse_if(&mut self) -> PResult<Stmt> {
        let start = self.start();
        let opened = self.current().span;
        let mut branches = Vec::new();
        let mut else_body = None;

        loop {
            let branch_start = self.start();
            self.bump();
            let cond = self.parse_expr()?;
            self.expect(SyntaxKind::THEN_KW)?;
            let body = self.parse_stmt_list()?;
            branches.push(CondBranch {
                cond,
                body,
                span: self.span_from(branch_start),
            });
            if !self.at(SyntaxKind::ELSIF_KW) {
                break;
            }
        }
        if self.eat(SyntaxKind::ELSE_KW) {
            else_body = Some(self.parse_stmt_list()?);
        }
        self.expect_end(SyntaxKind::IF_KW, opened)?;
        Ok(Stmt::If {
            branches,
            else_body,
            span: self.span_from(start),
        })
    }

    /// FOR Ident ":=" Expr (TO | DOWNTO) Expr [BY Expr] [DO] StmtSeq END [FOR]
    fn parse_for(&mut self) -> PResult<Stmt> {
        let start = self.start();
        let opened = self.bump().span;
        let var = self.expect_ident()?;
        self.expect(SyntaxKind::ASSIGN)?;
        let from = self.parse_expr()?;
        let direction = if self.eat(SyntaxKind::DOWNTO_KW) {
            ForDirection::DownTo
        } else {
            self.expect(SyntaxKind::TO_KW)?;
            ForDirection::To
        };
        let to = self.parse_expr()?;
        let step = if self.eat(SyntaxKind::BY_KW) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.eat(SyntaxKind::DO_KW);
        let body = self.parse_stmt_list()?;
        self.expect_end(SyntaxKind::FOR_KW, opened)?;
        Ok(Stmt::For {
            var,
            from,
            direction,
            to,
            step,
            body,
            span: self.span_from(start),
        })
    }

    /// CASE Expr [OF] {[WHEN | "|"] Labels ":" StmtSeq} [OTHERWISE | ELSE StmtSeq] END [CASE]
    fn parse_case(&mut self) -> PResult<Stmt> {
        let start = self.start();
        let opened = self.bump().span;
        let selector = self.parse_expr()?;
        self.eat(SyntaxKind::OF_KW);

        let mut arms = Vec::new();
        loop {
            self.eat(SyntaxKind::PIPE);
            if self.at_any(&[
                SyntaxKind::OTHERWISE_KW,
                SyntaxKind::ELSE_KW,
                SyntaxKind::END_KW,
                SyntaxKind::EOF,
            ]) {
                break;
            }
            let arm_start = self.start();
            let before = self.pos();
            self.eat(SyntaxKind::WHEN_KW);
            let mut labels = vec![self.parse_case_label()?];
            while self.eat(SyntaxKind::COMMA) {
                labels.push(self.parse_case_label()?);
            }
            self.expect(SyntaxKind::COLON)?;
            let body = self.parse_stmt_list()?;
            arms.push(CaseArm {
                labels,
                body,
                span: self.span_from(arm_start),
            });
            if self.pos() == before {
                self.recover(ParseContext::StatementList);
            }
        }
        let otherwise = if self.eat(SyntaxKind::OTHERWISE_KW) || self.eat(SyntaxKind::ELSE_KW) {
            self.eat(SyntaxKind::COLON);
            Some(self.parse_stmt_list()?)
        } else {
            None
        };
        self.expect_end(SyntaxKind::CASE_KW, opened)?;
        Ok(Stmt::Case {
            selector,
            arms,
            otherwise,
            span: self.span_from(start),
        })
    }

    /// Label = Expr [".." Expr]
    fn parse_case_label(&mut self) -> PResult<Expr> {
        let start = self.start();
        let low = self.parse_expr()?;
        if self.eat(SyntaxKind::RANGE) {
            let high = self.parse_expr()?;
            return Ok(Expr::Range {
                low: Box::new(low),
                high: Box::new(high),
                span: self.span_from(start),
            });
        }
        Ok(low)
    }

    /// WAIT (FOR MethodCall | DURATION Expr) StmtSeq [ON INTERRUPT StmtSeq] END [WAIT]
    fn parse_wait(&mut self) -> PResult<Stmt> {
        let start = self.start();
        let opened = self.bump().span;
        let kind = if self.eat(SyntaxKind::FOR_KW) {
            WaitKind::For(self.parse_method_call(self.start())?)
        } else {
            self.expect(SyntaxKind::DURATION_KW)?;
            WaitKind::Duration(self.parse_expr()?)
        };
        let body = self.parse_stmt_list()?;
        let interrupt = if self.eat(SyntaxKind::ON_KW) {
            self.expect(SyntaxKind::INTERRUPT_KW)?;
            Some(self.parse_stmt_list()?)
        } else {
            None
        };
        self.expect_end(SyntaxKind::WAIT_KW, opened)?;
        Ok(Stmt::Wait {
            kind,
            body,
            interrupt,
            span: self.span_from(start),
        })
    }

    /// MethodCall = Designator [TO] Ident ["(" Args ")"]
    pub(crate) fn parse_method_call(&mut self, start: Position) -> PResult<MethodCall> {
        let target = self.parse_designator()?;
        self.eat(SyntaxKind::TO_KW);
        let method = self.expect_ident()?;
        let args = if self.at(SyntaxKind::L_PAREN) {
            self.parse_args()?
        } else {
            Vec::new()
        };
        Ok(MethodCall {
            target,
            method,
            args,
            span: self.span_from(start),
        })
    }
}
