use crate::base::Span;
use crate::parser::ast::{ArrayIndex, FieldDecl, Ident, QualIdent, TypeSpec};
use crate::parser::errors::{ErrorCode, ParseContext};
use crate::parser::parser::{PResult, Parser};
use crate::parser::syntax_kind::SyntaxKind;

impl Parser<'_> {
    /// TypeSpec = QualIdent | ARRAY ... OF TypeSpec | RECORD ... END | POINTER TO TypeSpec
    ///          | SET OF TypeSpec | Enum | Subrange | PROCEDURE [Params] [":" TypeSpec]
    ///          | OBJECT ... END
    pub(crate) fn parse_type_spec(&mut self) -> PResult<TypeSpec> {
        self.push_context(ParseContext::TypeSpec);
        let start = self.start();
        let spec = match self.kind() {
            SyntaxKind::IDENT if self.nth(1) == SyntaxKind::RANGE => self.parse_subrange_type()?,
            SyntaxKind::IDENT => TypeSpec::Named(self.parse_qual_ident()?),
            SyntaxKind::INTEGER | SyntaxKind::CHAR | SyntaxKind::MINUS => self.parse_subrange_type()?,
            SyntaxKind::L_BRACKET => {
                self.bump();
                let low = self.parse_expr()?;
                self.expect(SyntaxKind::RANGE)?;
                let high = self.parse_expr()?;
                self.expect(SyntaxKind::R_BRACKET)?;
                TypeSpec::Subrange {
                    low,
                    high,
                    span: self.span_from(start),
                }
            }
            SyntaxKind::ARRAY_KW => self.parse_array_type()?,
            SyntaxKind::RECORD_KW => self.parse_record_type()?,
            SyntaxKind::POINTER_KW => {
                self.bump();
                self.expect(SyntaxKind::TO_KW)?;
                let target = self.parse_type_spec()?;
                TypeSpec::Pointer {
                    target: Box::new(target),
                    span: self.span_from(start),
                }
            }
            SyntaxKind::SET_KW => {
                self.bump();
                self.expect(SyntaxKind::OF_KW)?;
                let element = self.parse_type_spec()?;
                TypeSpec::Set {
                    element: Box::new(element),
                    span: self.span_from(start),
                }
            }
            SyntaxKind::ENUM_KW | SyntaxKind::L_PAREN => {
                self.eat(SyntaxKind::ENUM_KW);
                self.expect(SyntaxKind::L_PAREN)?;
                let mut values = vec![self.expect_ident()?];
                while self.eat(SyntaxKind::COMMA) {
                    values.push(self.expect_ident()?);
                }
                self.expect(SyntaxKind::R_PAREN)?;
                TypeSpec::Enum {
                    values,
                    span: self.span_from(start),
                }
            }
            SyntaxKind::PROCEDURE_KW => {
                self.bump();
                let params = if self.at(SyntaxKind::L_PAREN) {
                    self.parse_params()?
                } else {
                    Vec::new()
                };
                let return_type = if self.eat(SyntaxKind::COLON) {
                    Some(Box::new(self.parse_type_spec()?))
                } else {
                    None
                };
                TypeSpec::Procedure {
                    params,
                    return_type,
                    span: self.span_from(start),
                }
            }
            SyntaxKind::OBJECT_KW => TypeSpec::Object(self.parse_object_type()?),
            _ => {
                self.error(
                    ErrorCode::E0302,
                    format!("expected type, found {}", self.kind()),
                )?;
                TypeSpec::Named(QualIdent::simple(Ident::new("", Span::empty(start))))
            }
        };
        self.pop_context();
        Ok(spec)
    }

    /// QualIdent = Ident ["." Ident]
    pub(crate) fn parse_qual_ident(&mut self) -> PResult<QualIdent> {
        let start = self.start();
        let first = self.expect_ident()?;
        if self.at(SyntaxKind::DOT) && self.nth(1) == SyntaxKind::IDENT {
            self.bump();
            let name = self.expect_ident()?;
            return Ok(QualIdent {
                module: Some(first),
                name,
                span: self.span_from(start),
            });
        }
        Ok(QualIdent::simple(first))
    }

    /// Subrange = Expr ".." Expr
    fn parse_subrange_type(&mut self) -> PResult<TypeSpec> {
        let start = self.start();
        let low = self.parse_expr()?;
        self.expect(SyntaxKind::RANGE)?;
        let high = self.parse_expr()?;
        Ok(TypeSpec::Subrange {
            low,
            high,
            span: self.span_from(start),
        })
    }

    /// ARRAY [Index {"," Index}] OF TypeSpec
    ///
    /// The index list may also be bracketed: `ARRAY [1..3, 1..2] OF REAL`.
    fn parse_array_type(&mut self) -> PResult<TypeSpec> {
        let start = self.start();
        self.bump();
        let mut indices = Vec::new();
        let bracketed = self.eat(SyntaxKind::L_BRACKET);
        if !self.at(SyntaxKind::OF_KW) && !(bracketed && self.at(SyntaxKind::R_BRACKET)) {
            indices.push(self.parse_array_index()?);
            while self.eat(SyntaxKind::COMMA) {
                indices.push(self.parse_array_index()?);
            }
        }
        if bracketed {
            self.expect(SyntaxKind::R_BRACKET)?;
        }
        self.expect(SyntaxKind::OF_KW)?;
        let element = self.parse_type_spec()?;
        Ok(TypeSpec::Array {
            indices,
            element: Box::new(element),
            span: self.span_from(start),
        })
    }

    fn parse_array_index(&mut self) -> PResult<ArrayIndex> {
        let start = self.start();
        let is_type_name = self.at(SyntaxKind::IDENT)
            && match self.nth(1) {
                SyntaxKind::COMMA | SyntaxKind::OF_KW | SyntaxKind::R_BRACKET => true,
                SyntaxKind::DOT => self.nth(3) != SyntaxKind::RANGE,
                _ => false,
            };
        if is_type_name {
            return Ok(ArrayIndex::Type(self.parse_qual_ident()?));
        }
        let low = self.parse_expr()?;
        self.expect(SyntaxKind::RANGE)?;
        let high = self.parse_expr()?;
        Ok(ArrayIndex::Range {
            low,
            high,
            span: self.span_from(start),
        })
    }

    /// RECORD {Field ";"} END [RECORD]
    fn parse_record_type(&mut self) -> PResult<TypeSpec> {
        let start = self.start();
        let opened = self.bump().span;
        self.push_context(ParseContext::RecordBody);
        let mut fields = Vec::new();
        while !self.at_any(&[SyntaxKind::END_KW, SyntaxKind::EOF]) {
            if self.eat(SyntaxKind::SEMICOLON) {
                continue;
            }
            if self.at(SyntaxKind::IDENT) {
                fields.push(self.parse_field_decl()?);
                if !self.at(SyntaxKind::END_KW) {
                    self.expect_semicolon()?;
                }
            } else {
                self.context_error(ErrorCode::E0302)?;
                self.recover(ParseContext::RecordBody);
            }
        }
        self.pop_context();
        self.expect_end(SyntaxKind::RECORD_KW, opened)?;
        Ok(TypeSpec::Record {
            fields,
            span: self.span_from(start),
        })
    }

    /// Field = Ident {"," Ident} ":" TypeSpec
    pub(crate) fn parse_field_decl(&mut self) -> PResult<FieldDecl> {
        let start = self.start();
        let mut names = vec![self.expect_ident()?];
        while self.eat(SyntaxKind::COMMA) {
            names.push(self.expect_ident()?);
        }
        self.expect(SyntaxKind::COLON)?;
        let ty = self.parse_type_spec()?;
        Ok(FieldDecl {
            names,
            ty,
            span: self.span_from(start),
        })
    }
}

