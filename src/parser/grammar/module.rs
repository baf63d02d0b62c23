use crate::base::Span;
use crate::parser::ast::{Export, Ident, Import, ImportItem, Module, ModuleKind};
use crate::parser::errors::{ErrorCode, ParseContext};
use crate::parser::parser::{PResult, Parser};
use crate::parser::syntax_kind::SyntaxKind;

use super::declarations::DeclSection;

impl Parser<'_> {
    /// Module = [DEFINITION | IMPLEMENTATION | MAIN] MODULE Ident ";"
    ///          {Import | Export | Decl} [BEGIN StmtSeq] END [MODULE] ["." | ";"]
    pub(crate) fn parse_module(&mut self) -> PResult<Module> {
        let start = self.start();
        self.push_context(ParseContext::ModuleHeader);

        let kind = match self.kind() {
            SyntaxKind::DEFINITION_KW => ModuleKind::Definition,
            SyntaxKind::IMPLEMENTATION_KW => ModuleKind::Implementation,
            SyntaxKind::MAIN_KW => ModuleKind::Main,
            _ => ModuleKind::Plain,
        };
        if kind != ModuleKind::Plain {
            self.bump();
        }
        self.expect_with(SyntaxKind::MODULE_KW, ErrorCode::E0206)?;
        let name = self.expect_ident()?;
        self.expect_semicolon()?;

        let mut imports = Vec::new();
        let mut exports = Vec::new();
        let mut decls = Vec::new();
        let mut section: Option<DeclSection> = None;

        loop {
            match self.kind() {
                SyntaxKind::FROM_KW | SyntaxKind::IMPORT_KW => imports.push(self.parse_import()?),
                SyntaxKind::EXPORT_KW => exports.push(self.parse_export()?),
                SyntaxKind::BEGIN_KW | SyntaxKind::END_KW | SyntaxKind::EOF => break,
                _ => self.parse_declaration_item(&mut section, &mut decls)?,
            }
        }
        self.pop_context();

        let body = if self.eat(SyntaxKind::BEGIN_KW) {
            Some(self.parse_stmt_list()?)
        } else {
            None
        };

        let opened = name.span;
        self.expect_end(SyntaxKind::MODULE_KW, opened)?;
        if !self.eat(SyntaxKind::DOT) {
            self.eat(SyntaxKind::SEMICOLON);
        }
        if !self.at_eof() {
            self.error(
                ErrorCode::E0205,
                format!("unexpected {} after end of module", self.kind()),
            )?;
        }

        tracing::trace!(
            "parsed {} module '{}' with {} declarations",
            kind.as_str(),
            name.name,
            decls.len()
        );

        Ok(Module {
            kind,
            name,
            imports,
            exports,
            decls,
            body,
            span: self.span_from(start),
        })
    }

    /// Import = FROM Ident IMPORT Item {"," Item} ";" | IMPORT Ident {"," Ident} ";"
    fn parse_import(&mut self) -> PResult<Import> {
        let start = self.start();
        self.push_context(ParseContext::Import);

        let import = if self.eat(SyntaxKind::FROM_KW) {
            let module = self.expect_module_name()?;
            self.expect_with(SyntaxKind::IMPORT_KW, ErrorCode::E0501)?;
            let mut items = vec![self.parse_import_item()?];
            while self.eat(SyntaxKind::COMMA) {
                items.push(self.parse_import_item()?);
            }
            self.expect_semicolon()?;
            Import::From {
                module,
                items,
                span: self.span_from(start),
            }
        } else {
            self.bump();
            let mut modules = vec![self.expect_module_name()?];
            while self.eat(SyntaxKind::COMMA) {
                modules.push(self.expect_module_name()?);
            }
            self.expect_semicolon()?;
            Import::Modules {
                modules,
                span: self.span_from(start),
            }
        };

        self.pop_context();
        Ok(import)
    }

    fn expect_module_name(&mut self) -> PResult<Ident> {
        if !self.at(SyntaxKind::IDENT) {
            self.error(
                ErrorCode::E0502,
                format!("expected module name, found {}", self.kind()),
            )?;
        }
        Ok(self.expect_ident_quiet())
    }

    /// Item = Ident [AS Ident] | ALL Ident
    fn parse_import_item(&mut self) -> PResult<ImportItem> {
        let start = self.start();
        // `ALL` is contextual: only special when another identifier follows
        let all = self.at(SyntaxKind::IDENT)
            && self.current().text == "ALL"
            && self.nth(1) == SyntaxKind::IDENT;
        if all {
            self.bump();
        }
        let name = self.expect_ident()?;
        let alias = if self.eat(SyntaxKind::AS_KW) {
            if !self.at(SyntaxKind::IDENT) {
                self.error(
                    ErrorCode::E0503,
                    format!("expected alias name after AS, found {}", self.kind()),
                )?;
            }
            Some(self.expect_ident_quiet())
        } else {
            None
        };
        Ok(ImportItem {
            name,
            alias,
            all,
            span: self.span_from(start),
        })
    }

    /// Export = EXPORT Ident {"," Ident} ";"
    fn parse_export(&mut self) -> PResult<Export> {
        let start = self.start();
        self.bump();
        let mut names = vec![self.expect_ident()?];
        while self.eat(SyntaxKind::COMMA) {
            names.push(self.expect_ident()?);
        }
        self.expect_semicolon()?;
        Ok(Export {
            names,
            span: self.span_from(start),
        })
    }

    /// Identifier if present, otherwise an empty synthesized one (error already reported)
    fn expect_ident_quiet(&mut self) -> Ident {
        if self.at(SyntaxKind::IDENT) {
            let token = self.bump();
            Ident::new(token.text, token.span)
        } else {
            Ident::new("", Span::empty(self.start()))
        }
    }
}
