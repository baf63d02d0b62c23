//! Declaration sections
//!
//! `TYPE`, `CONST` and `VAR` open sections whose entries need no repeated
//! keyword. The dialect also lets a bare `Name =` / `Name :` continue the
//! last section, or appear with no section keyword at all; the section is
//! then inferred from the next two tokens.

use crate::base::constants::LOOKAHEAD_BUDGET;
use crate::parser::ast::{ConstDecl, Decl, Param, ParamMode, ProcDecl, ProcHeading, TypeDecl, VarDecl};
use crate::parser::errors::{ErrorCode, ParseContext, SyntaxError};
use crate::parser::parser::{PResult, Parser};
use crate::parser::syntax_kind::SyntaxKind;

/// Which declaration section a bare entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeclSection {
    Type,
    Const,
    Var,
}

impl Parser<'_> {
    /// Parse one declaration-level item, appending any declarations it yields.
    ///
    /// Always consumes at least one token unless at EOF.
    pub(crate) fn parse_declaration_item(
        &mut self,
        section: &mut Option<DeclSection>,
        decls: &mut Vec<Decl>,
    ) -> PResult<()> {
        self.push_context(ParseContext::DeclarationSection);
        match self.kind() {
            SyntaxKind::TYPE_KW => {
                self.bump();
                *section = Some(DeclSection::Type);
            }
            SyntaxKind::CONST_KW => {
                self.bump();
                *section = Some(DeclSection::Const);
            }
            SyntaxKind::VAR_KW => {
                self.bump();
                *section = Some(DeclSection::Var);
            }
            SyntaxKind::PROCEDURE_KW => decls.push(Decl::Procedure(self.parse_procedure()?)),
            SyntaxKind::OBJECT_KW => decls.push(Decl::ObjectImpl(self.parse_object_impl()?)),
            SyntaxKind::IDENT => match self.section_for_entry(*section) {
                Some(DeclSection::Type) => decls.push(Decl::Type(self.parse_type_decl()?)),
                Some(DeclSection::Const) => decls.push(Decl::Const(self.parse_const_decl()?)),
                Some(DeclSection::Var) => decls.push(Decl::Var(self.parse_var_decl()?)),
                None => {
                    self.context_error(ErrorCode::E0303)?;
                    self.recover(ParseContext::DeclarationSection);
                }
            },
            SyntaxKind::EOF => {}
            _ => {
                self.context_error(ErrorCode::E0303)?;
                self.recover(ParseContext::DeclarationSection);
            }
        }
        self.pop_context();
        Ok(())
    }

    /// Local declarations up to (not including) `BEGIN`
    pub(crate) fn parse_local_declarations(&mut self) -> PResult<Vec<Decl>> {
        let mut decls = Vec::new();
        let mut section = None;
        while !self.at_any(&[SyntaxKind::BEGIN_KW, SyntaxKind::END_KW, SyntaxKind::EOF]) {
            self.parse_declaration_item(&mut section, &mut decls)?;
        }
        Ok(decls)
    }

    /// Decide which section a bare `Ident ...` entry belongs to.
    ///
    /// The last section keyword wins when the entry's shape fits it; otherwise
    /// the shape decides: `Ident :` or `Ident ,` is a variable, `Ident =` is a
    /// type when a type constructor (or a lone name and `;`) follows, else a
    /// constant.
    fn section_for_entry(&self, last: Option<DeclSection>) -> Option<DeclSection> {
        let after_name = self.nth(1);
        if let Some(last) = last {
            let fits = match last {
                DeclSection::Type => after_name == SyntaxKind::EQ,
                DeclSection::Const => matches!(after_name, SyntaxKind::EQ | SyntaxKind::COLON),
                DeclSection::Var => matches!(after_name, SyntaxKind::COLON | SyntaxKind::COMMA),
            };
            if fits {
                return Some(last);
            }
        }
        match after_name {
            SyntaxKind::COLON | SyntaxKind::COMMA => Some(DeclSection::Var),
            SyntaxKind::EQ => Some(self.infer_type_or_const()),
            _ => None,
        }
    }

    /// At `Ident = ...` with no usable section keyword
    fn infer_type_or_const(&self) -> DeclSection {
        match self.nth(2) {
            SyntaxKind::ARRAY_KW
            | SyntaxKind::RECORD_KW
            | SyntaxKind::POINTER_KW
            | SyntaxKind::SET_KW
            | SyntaxKind::OBJECT_KW
            | SyntaxKind::ENUM_KW
            | SyntaxKind::PROCEDURE_KW
            | SyntaxKind::L_BRACKET => DeclSection::Type,
            // `(Red, Green)` enumeration vs. parenthesized constant expression
            SyntaxKind::L_PAREN
                if self.nth(3) == SyntaxKind::IDENT
                    && matches!(self.nth(4), SyntaxKind::COMMA | SyntaxKind::R_PAREN) =>
            {
                DeclSection::Type
            }
            // `1..10` subrange
            SyntaxKind::INTEGER | SyntaxKind::CHAR if self.nth(3) == SyntaxKind::RANGE => {
                DeclSection::Type
            }
            SyntaxKind::IDENT => match self.nth(3) {
                SyntaxKind::SEMICOLON | SyntaxKind::RANGE => DeclSection::Type,
                SyntaxKind::DOT
                    if self.nth(4) == SyntaxKind::IDENT && self.nth(5) == SyntaxKind::SEMICOLON =>
                {
                    DeclSection::Type
                }
                _ => DeclSection::Const,
            },
            _ => DeclSection::Const,
        }
    }

    /// TypeDecl = Ident "=" TypeSpec ";"
    fn parse_type_decl(&mut self) -> PResult<TypeDecl> {
        let start = self.start();
        let name = self.expect_ident()?;
        self.expect(SyntaxKind::EQ)?;
        let spec = self.parse_type_spec()?;
        self.expect_semicolon()?;
        Ok(TypeDecl {
            name,
            spec,
            span: self.span_from(start),
        })
    }

    /// ConstDecl = Ident [":" TypeSpec] "=" Expr ";"
    fn parse_const_decl(&mut self) -> PResult<ConstDecl> {
        let start = self.start();
        let name = self.expect_ident()?;
        let ty = if self.eat(SyntaxKind::COLON) {
            Some(self.parse_type_spec()?)
        } else {
            None
        };
        self.expect(SyntaxKind::EQ)?;
        let value = self.parse_expr()?;
        self.expect_semicolon()?;
        Ok(ConstDecl {
            name,
            ty,
            value,
            span: self.span_from(start),
        })
    }

    /// VarDecl = Ident {"," Ident} ":" TypeSpec [":=" Expr] ";"
    fn parse_var_decl(&mut self) -> PResult<VarDecl> {
        let start = self.start();
        let mut names = vec![self.expect_ident()?];
        while self.eat(SyntaxKind::COMMA) {
            names.push(self.expect_ident()?);
        }
        self.expect(SyntaxKind::COLON)?;
        let ty = self.parse_type_spec()?;
        let init = if self.eat(SyntaxKind::ASSIGN) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect_semicolon()?;
        Ok(VarDecl {
            names,
            ty,
            init,
            span: self.span_from(start),
        })
    }

    /// ProcDecl = PROCEDURE Ident [Params] [":" TypeSpec] ";"
    ///            [[LocalDecls] BEGIN StmtSeq END [PROCEDURE] ";"]
    fn parse_procedure(&mut self) -> PResult<ProcDecl> {
        let start = self.start();
        self.bump();
        let name = self.expect_ident()?;
        let params = if self.at(SyntaxKind::L_PAREN) {
            self.parse_params()?
        } else {
            Vec::new()
        };
        let return_type = if self.eat(SyntaxKind::COLON) {
            Some(self.parse_type_spec()?)
        } else {
            None
        };
        let heading = ProcHeading {
            name,
            params,
            return_type,
            span: self.span_from(start),
        };
        self.expect_semicolon()?;

        let has_body = match self.kind() {
            SyntaxKind::BEGIN_KW => true,
            SyntaxKind::VAR_KW | SyntaxKind::CONST_KW | SyntaxKind::TYPE_KW => {
                self.locals_precede_body()
            }
            _ => false,
        };

        if !has_body {
            tracing::trace!("procedure '{}' is a forward declaration", heading.name.name);
            return Ok(ProcDecl {
                heading,
                locals: Vec::new(),
                body: Vec::new(),
                is_forward: true,
                span: self.span_from(start),
            });
        }

        let locals = self.parse_local_declarations()?;
        self.expect(SyntaxKind::BEGIN_KW)?;
        let body = self.parse_stmt_list()?;
        self.expect_end(SyntaxKind::PROCEDURE_KW, heading.span)?;
        self.expect_semicolon()?;

        Ok(ProcDecl {
            heading,
            locals,
            body,
            is_forward: false,
            span: self.span_from(start),
        })
    }

    /// Scan ahead from a VAR/CONST/TYPE run following a procedure heading.
    ///
    /// A `BEGIN` at nesting depth zero means the run is the procedure's local
    /// declarations. `PROCEDURE`, an object implementation, an unmatched `END`,
    /// EOF or running out of budget mean the heading was a forward declaration
    /// and the run belongs to the enclosing module.
    fn locals_precede_body(&self) -> bool {
        let mut depth = 0usize;
        for i in 0..LOOKAHEAD_BUDGET {
            let prev = if i == 0 { SyntaxKind::SEMICOLON } else { self.nth(i - 1) };
            if prev == SyntaxKind::END_KW {
                // `END RECORD` / `END OBJECT` closing markers
                continue;
            }
            match self.nth(i) {
                SyntaxKind::EOF => return false,
                SyntaxKind::RECORD_KW => depth += 1,
                SyntaxKind::OBJECT_KW => {
                    // `OBJECT Name;` at depth zero starts an object implementation
                    if depth == 0 && prev == SyntaxKind::SEMICOLON {
                        return false;
                    }
                    depth += 1;
                }
                SyntaxKind::END_KW => {
                    if depth == 0 {
                        return false;
                    }
                    depth -= 1;
                }
                SyntaxKind::BEGIN_KW if depth == 0 => return true,
                // A procedure type (`p : PROCEDURE(...)`) is not a new declaration
                SyntaxKind::PROCEDURE_KW
                    if depth == 0
                        && !matches!(
                            prev,
                            SyntaxKind::COLON | SyntaxKind::EQ | SyntaxKind::OF_KW | SyntaxKind::TO_KW
                        ) =>
                {
                    return false;
                }
                _ => {}
            }
        }
        false
    }

    /// Params = "(" [Param {";" Param}] ")"
    pub(crate) fn parse_params(&mut self) -> PResult<Vec<Param>> {
        self.push_context(ParseContext::ParameterList);
        let open = self.bump();
        let mut params = Vec::new();
        while !self.at_any(&[SyntaxKind::R_PAREN, SyntaxKind::EOF]) {
            params.push(self.parse_param()?);
            if !self.eat(SyntaxKind::SEMICOLON) && !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        if !self.at(SyntaxKind::R_PAREN) {
            let err = SyntaxError::builder(ErrorCode::E0304)
                .message(format!("expected ')' to close parameter list, found {}", self.kind()))
                .span(self.current().span)
                .found(self.kind())
                .related("parameter list opened here", open.span)
                .build();
            self.report(err)?;
            // Skip the damaged rest of the list
            while !self.at_any(&[SyntaxKind::R_PAREN, SyntaxKind::SEMICOLON, SyntaxKind::EOF]) {
                self.bump();
            }
        }
        self.eat(SyntaxKind::R_PAREN);
        self.pop_context();
        Ok(params)
    }

    /// Param = [IN | OUT | INOUT] Ident {"," Ident} ":" TypeSpec
    fn parse_param(&mut self) -> PResult<Param> {
        let start = self.start();
        let mode = match self.kind() {
            SyntaxKind::IN_KW => ParamMode::In,
            SyntaxKind::OUT_KW => ParamMode::Out,
            SyntaxKind::INOUT_KW => ParamMode::InOut,
            _ => ParamMode::default(),
        };
        if matches!(
            self.kind(),
            SyntaxKind::IN_KW | SyntaxKind::OUT_KW | SyntaxKind::INOUT_KW
        ) {
            self.bump();
        }
        let mut names = vec![self.expect_ident()?];
        while self.at(SyntaxKind::COMMA) && self.nth(1) == SyntaxKind::IDENT {
            self.bump();
            names.push(self.expect_ident()?);
        }
        self.expect(SyntaxKind::COLON)?;
        let ty = self.parse_type_spec()?;
        Ok(Param {
            mode,
            names,
            ty,
            span: self.span_from(start),
        })
    }
}
