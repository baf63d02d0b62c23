//! Recursive descent parser
//!
//! Builds a typed [`Module`] from a token stream. Grammar rules live in
//! `grammar/`; this file holds the parser state and the token helpers they
//! share.
//!
//! Two modes are supported. `Strict` stops at the first syntax error and
//! returns it. `Recovery` records the error, synthesizes the missing token at
//! the current position and keeps going, so editors always get a tree.

use super::ast::{Ident, Module};
use super::errors::{ErrorCode, ParseContext, ParseError, SyntaxError, format_context_error};
use super::lexer::{Token, significant_tokens, tokenize};
use super::syntax_kind::SyntaxKind;
use crate::base::{Position, Span};

/// How the parser reacts to a syntax error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParseMode {
    /// Abort on the first error
    Strict,
    /// Record errors, synthesize missing tokens, continue
    #[default]
    Recovery,
}

/// Parse result containing the module and any recorded errors
#[derive(Debug, Clone, PartialEq)]
pub struct Parse {
    pub module: Module,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

pub(crate) type PResult<T> = Result<T, ParseError>;

/// Parse a token stream. `ERROR` tokens are skipped.
pub fn parse(tokens: &[Token], mode: ParseMode) -> Result<Parse, ParseError> {
    let filtered;
    let tokens = if tokens.iter().any(Token::is_error) {
        filtered = significant_tokens(tokens);
        &filtered[..]
    } else {
        tokens
    };

    tracing::trace!("parsing {} tokens in {:?} mode", tokens.len(), mode);
    let mut parser = Parser::new(tokens, mode);
    let module = parser.parse_module()?;
    if !parser.errors.is_empty() {
        tracing::debug!(
            "module '{}' parsed with {} errors",
            module.name.name,
            parser.errors.len()
        );
    }
    Ok(Parse {
        module,
        errors: parser.errors,
    })
}

/// Tokenize and parse source text
pub fn parse_source(text: &str, mode: ParseMode) -> Result<Parse, ParseError> {
    parse(&tokenize(text), mode)
}

/// The parser state
pub(crate) struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    mode: ParseMode,
    pub(crate) errors: Vec<SyntaxError>,
    contexts: Vec<ParseContext>,
    /// End of the last consumed token
    prev_end: Position,
    eof: Token,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(tokens: &'t [Token], mode: ParseMode) -> Self {
        let end = tokens.last().map(|t| t.span.end).unwrap_or_default();
        let first = tokens.first().map(|t| t.span.start).unwrap_or_default();
        Self {
            tokens,
            pos: 0,
            mode,
            errors: Vec::new(),
            contexts: Vec::new(),
            prev_end: first,
            eof: Token::synthetic(SyntaxKind::EOF, Span::empty(end)),
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    pub(crate) fn current(&self) -> &Token {
        self.nth_token(0)
    }

    pub(crate) fn nth_token(&self, n: usize) -> &Token {
        self.tokens.get(self.pos + n).unwrap_or(&self.eof)
    }

    pub(crate) fn kind(&self) -> SyntaxKind {
        self.current().kind
    }

    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.nth_token(n).kind
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.kind() == kind
    }

    pub(crate) fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.kind())
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.at(SyntaxKind::EOF)
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    pub(crate) fn bump(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != SyntaxKind::EOF {
            self.pos += 1;
            self.prev_end = token.span.end;
        }
        token
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume `kind`, or report it missing and return a synthesized token
    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> PResult<Token> {
        let code = match kind {
            SyntaxKind::SEMICOLON => ErrorCode::E0201,
            SyntaxKind::END_KW => ErrorCode::E0202,
            SyntaxKind::R_PAREN => ErrorCode::E0203,
            SyntaxKind::R_BRACKET => ErrorCode::E0204,
            _ => ErrorCode::E0902,
        };
        self.expect_with(kind, code)
    }

    pub(crate) fn expect_with(&mut self, kind: SyntaxKind, code: ErrorCode) -> PResult<Token> {
        if self.at(kind) {
            return Ok(self.bump());
        }
        let message = format!("expected {}, found {}", kind, self.kind());
        self.error(code, message)?;
        Ok(Token::synthetic(kind, self.current().span))
    }

    pub(crate) fn expect_semicolon(&mut self) -> PResult<()> {
        self.expect(SyntaxKind::SEMICOLON).map(|_| ())
    }

    /// Consume an identifier; a synthesized one has an empty name
    pub(crate) fn expect_ident(&mut self) -> PResult<Ident> {
        if self.at(SyntaxKind::IDENT) {
            let token = self.bump();
            return Ok(Ident::new(token.text, token.span));
        }
        let message = format!("expected identifier, found {}", self.kind());
        self.error(ErrorCode::E0301, message)?;
        Ok(Ident::new("", Span::empty(self.current().span.start)))
    }

    /// `END` optionally followed by the construct keyword it closes
    pub(crate) fn expect_end(&mut self, construct: SyntaxKind, opened: Span) -> PResult<()> {
        if self.eat(SyntaxKind::END_KW) {
            self.eat(construct);
            return Ok(());
        }
        let err = SyntaxError::builder(ErrorCode::E0202)
            .message(format!("expected END to close {}, found {}", construct, self.kind()))
            .span(self.current().span)
            .found(self.kind())
            .related(format!("{} started here", construct), opened)
            .build();
        self.report(err)
    }

    // =========================================================================
    // Spans
    // =========================================================================

    pub(crate) fn start(&self) -> Position {
        self.current().span.start
    }

    /// Span from `start` to the end of the last consumed token
    pub(crate) fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.prev_end.max(start))
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    /// Report an error at the current token
    pub(crate) fn error(&mut self, code: ErrorCode, message: impl Into<String>) -> PResult<()> {
        let err = SyntaxError::new(message, self.current().span, code).with_found(self.kind());
        self.report(err)
    }

    /// "unexpected X in <context>, expected ..."
    pub(crate) fn context_error(&mut self, code: ErrorCode) -> PResult<()> {
        let context = self.context();
        let message = format_context_error(self.kind(), context);
        self.error(code, message)
    }

    pub(crate) fn report(&mut self, err: SyntaxError) -> PResult<()> {
        match self.mode {
            ParseMode::Strict => Err(err),
            ParseMode::Recovery => {
                tracing::trace!("recovered from parse error: {}", err);
                self.errors.push(err);
                Ok(())
            }
        }
    }

    /// Skip to the next recovery point of `context`, always consuming at least one token
    pub(crate) fn recover(&mut self, context: ParseContext) {
        self.bump();
        while !self.at_eof() && !context.is_recovery_point(self.kind()) {
            self.bump();
        }
        self.eat(SyntaxKind::SEMICOLON);
    }

    pub(crate) fn push_context(&mut self, context: ParseContext) {
        self.contexts.push(context);
    }

    pub(crate) fn pop_context(&mut self) {
        self.contexts.pop();
    }

    fn context(&self) -> ParseContext {
        self.contexts
            .last()
            .copied()
            .unwrap_or(ParseContext::DeclarationSection)
    }
}
