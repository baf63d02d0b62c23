//! Object types and object implementations
//!
//! An object type body is a sequence of sections. Members before any section
//! keyword form a public section; each `PRIVATE`, `CLASS` or `OVERRIDE`
//! keyword starts a fresh section, in any order and any number of times.

use crate::base::Position;
use crate::parser::ast::{
    DispatchKind, MethodHeading, MethodImpl, ObjectImpl, ObjectMember, ObjectSection, ObjectType,
    SectionKind,
};
use crate::parser::errors::{ErrorCode, ParseContext};
use crate::parser::parser::{PResult, Parser};
use crate::parser::syntax_kind::SyntaxKind;

/// Section being filled while walking an object body
struct OpenSection {
    kind: SectionKind,
    start: Position,
    members: Vec<ObjectMember>,
}

impl Parser<'_> {
    /// OBJECT ["(" QualIdent {"," QualIdent} ")"] [";"] ObjectBody END [OBJECT]
    pub(crate) fn parse_object_type(&mut self) -> PResult<ObjectType> {
        let start = self.start();
        let opened = self.bump().span;

        let mut bases = Vec::new();
        if self.eat(SyntaxKind::L_PAREN) {
            bases.push(self.parse_qual_ident()?);
            while self.eat(SyntaxKind::COMMA) {
                bases.push(self.parse_qual_ident()?);
            }
            self.expect(SyntaxKind::R_PAREN)?;
        }
        self.eat(SyntaxKind::SEMICOLON);

        self.push_context(ParseContext::ObjectBody);
        let mut sections = Vec::new();
        let mut open: Option<OpenSection> = None;

        while !self.at_any(&[SyntaxKind::END_KW, SyntaxKind::EOF]) {
            let section_kind = match self.kind() {
                SyntaxKind::PRIVATE_KW => Some(SectionKind::Private),
                SyntaxKind::CLASS_KW => Some(SectionKind::Class),
                SyntaxKind::OVERRIDE_KW => Some(SectionKind::Override),
                _ => None,
            };
            if let Some(kind) = section_kind {
                self.close_section(open.take(), &mut sections);
                open = Some(OpenSection {
                    kind,
                    start: self.start(),
                    members: Vec::new(),
                });
                self.bump();
                continue;
            }

            let member = match self.kind() {
                SyntaxKind::SEMICOLON => {
                    self.bump();
                    continue;
                }
                SyntaxKind::ASK_KW | SyntaxKind::TELL_KW | SyntaxKind::WAITFOR_KW => {
                    ObjectMember::Method(self.parse_method_heading()?)
                }
                SyntaxKind::IDENT => ObjectMember::Field(self.parse_field_decl()?),
                _ => {
                    self.context_error(ErrorCode::E0305)?;
                    self.recover(ParseContext::ObjectBody);
                    continue;
                }
            };
            if !self.at(SyntaxKind::END_KW) {
                self.expect_semicolon()?;
            }
            let section = open.get_or_insert_with(|| OpenSection {
                kind: SectionKind::Public,
                start: member.span().start,
                members: Vec::new(),
            });
            section.members.push(member);
        }
        self.close_section(open.take(), &mut sections);
        self.pop_context();

        self.expect_end(SyntaxKind::OBJECT_KW, opened)?;
        Ok(ObjectType {
            bases,
            sections,
            span: self.span_from(start),
        })
    }

    fn close_section(&self, open: Option<OpenSection>, sections: &mut Vec<ObjectSection>) {
        if let Some(open) = open {
            sections.push(ObjectSection {
                kind: open.kind,
                span: self.span_from(open.start),
                members: open.members,
            });
        }
    }

    /// MethodHead = (ASK | TELL | WAITFOR) METHOD Ident [Params] [":" TypeSpec]
    pub(crate) fn parse_method_heading(&mut self) -> PResult<MethodHeading> {
        let start = self.start();
        let dispatch = match self.bump().kind {
            SyntaxKind::TELL_KW => DispatchKind::Tell,
            SyntaxKind::WAITFOR_KW => DispatchKind::WaitFor,
            _ => DispatchKind::Ask,
        };
        self.expect_with(SyntaxKind::METHOD_KW, ErrorCode::E0306)?;
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
        Ok(MethodHeading {
            dispatch,
            name,
            params,
            return_type,
            span: self.span_from(start),
        })
    }

    /// ObjectImpl = OBJECT Ident ";" {MethodImpl} END [OBJECT] ";"
    pub(crate) fn parse_object_impl(&mut self) -> PResult<ObjectImpl> {
        let start = self.start();
        self.bump();
        let name = self.expect_ident()?;
        self.expect_semicolon()?;

        self.push_context(ParseContext::ObjectImpl);
        let mut methods = Vec::new();
        while !self.at_any(&[SyntaxKind::END_KW, SyntaxKind::EOF]) {
            match self.kind() {
                SyntaxKind::ASK_KW | SyntaxKind::TELL_KW | SyntaxKind::WAITFOR_KW => {
                    methods.push(self.parse_method_impl()?)
                }
                SyntaxKind::SEMICOLON => {
                    self.bump();
                }
                _ => {
                    self.context_error(ErrorCode::E0305)?;
                    self.recover(ParseContext::ObjectImpl);
                }
            }
        }
        self.pop_context();

        self.expect_end(SyntaxKind::OBJECT_KW, name.span)?;
        self.expect_semicolon()?;
        Ok(ObjectImpl {
            name,
            methods,
            span: self.span_from(start),
        })
    }

    /// MethodImpl = MethodHead ";" [LocalDecls] BEGIN StmtSeq END [METHOD] ";"
    fn parse_method_impl(&mut self) -> PResult<MethodImpl> {
        let start = self.start();
        let heading = self.parse_method_heading()?;
        self.expect_semicolon()?;
        let locals = self.parse_local_declarations()?;
        self.expect(SyntaxKind::BEGIN_KW)?;
        let body = self.parse_stmt_list()?;
        self.expect_end(SyntaxKind::METHOD_KW, heading.span)?;
        self.expect_semicolon()?;
        Ok(MethodImpl {
            heading,
            locals,
            body,
            span: self.span_from(start),
        })
    }
}
