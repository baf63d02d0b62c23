//! Logos-based lexer
//!
//! Fast tokenization using the logos crate. Comments are consumed by a
//! callback that tracks nesting of both comment forms; string, character and
//! numeric literals are finished by callbacks so the dialect rules (doubled
//! quotes, four-quote characters, `1..10` ranges) stay in one place.
//!
//! The lexer never fails: malformed input becomes an `ERROR` token that
//! carries a message, and scanning continues after it.

use logos::{FilterResult, Logos};
use smol_str::SmolStr;

use super::keywords::keyword_kind;
use super::syntax_kind::SyntaxKind;
use crate::base::{LineIndex, Span};

/// A token with its kind, raw text, decoded value and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    /// The lexeme exactly as written in the source
    pub text: SmolStr,
    pub value: TokenValue,
    pub span: Span,
}

/// Decoded payload of a token
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TokenValue {
    #[default]
    None,
    /// Decoded string literal (doubled quotes collapsed)
    Str(String),
    /// Decoded character literal
    Char(char),
    /// Human-readable message of an `ERROR` token
    Error(String),
}

impl Token {
    /// A zero-width token that was not present in the source (error recovery)
    pub fn synthetic(kind: SyntaxKind, span: Span) -> Self {
        Self {
            kind,
            text: SmolStr::default(),
            value: TokenValue::None,
            span: Span::empty(span.start),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == SyntaxKind::ERROR
    }

    pub fn string_value(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn char_value(&self) -> Option<char> {
        match self.value {
            TokenValue::Char(value) => Some(value),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Reasons a piece of input could not be tokenized
#[derive(Debug, Clone, PartialEq, Default, thiserror::Error)]
pub enum LexError {
    #[default]
    #[error("unexpected character")]
    UnexpectedCharacter,
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("malformed character literal")]
    MalformedChar,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    source: &'a str,
    line_index: LineIndex,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            source: input,
            line_index: LineIndex::new(input),
            finished: false,
        }
    }

    fn span(&self, range: std::ops::Range<usize>) -> Span {
        Span::new(
            self.line_index.position(self.source, range.start),
            self.line_index.position(self.source, range.end),
        )
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let Some(logos_token) = self.inner.next() else {
            self.finished = true;
            let end = self.line_index.position(self.source, self.source.len());
            return Some(Token {
                kind: SyntaxKind::EOF,
                text: SmolStr::default(),
                value: TokenValue::None,
                span: Span::empty(end),
            });
        };
        let text = self.inner.slice();
        let span = self.span(self.inner.span());

        let (kind, value) = match logos_token {
            Ok(token) => token.classify(text),
            Err(LexError::UnexpectedCharacter) => (
                SyntaxKind::ERROR,
                TokenValue::Error(format!("unexpected character '{text}'")),
            ),
            Err(err) => (SyntaxKind::ERROR, TokenValue::Error(err.to_string())),
        };

        if kind == SyntaxKind::ERROR {
            tracing::trace!("lexical error at {}: {:?}", span.start, value);
        }

        Some(Token {
            kind,
            text: SmolStr::new(text),
            value,
            span,
        })
    }
}

/// Tokenize an entire string. The result always ends with an `EOF` token.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}

/// Tokens with `ERROR` tokens removed, ready for the parser
pub fn significant_tokens(tokens: &[Token]) -> Vec<Token> {
    tokens.iter().filter(|t| !t.is_error()).cloned().collect()
}

/// The `ERROR` tokens of a token stream
pub fn lexical_errors(tokens: &[Token]) -> impl Iterator<Item = &Token> {
    tokens.iter().filter(|t| t.is_error())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberKind {
    Integer,
    Real,
}

/// Logos token enum - mapped to SyntaxKind by `classify`
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n\f]+")]
enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[token("{", |lex| skip_comment(lex, CommentForm::Brace))]
    #[token("(*", |lex| skip_comment(lex, CommentForm::Paren))]
    Comment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+", finish_number)]
    Number(NumberKind),

    #[token("\"", string_literal)]
    String(String),

    #[token("'", char_literal)]
    Char(char),

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token(":=")]
    Assign,
    #[token("<>")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("..")]
    Range,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("=")]
    Eq,
    #[token("#")]
    Hash,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("^")]
    Caret,
    #[token("|")]
    Pipe,
}

impl LogosToken {
    fn classify(self, text: &str) -> (SyntaxKind, TokenValue) {
        use LogosToken::*;
        let kind = match self {
            Comment => return (SyntaxKind::ERROR, TokenValue::Error("stray comment".into())),
            Ident => keyword_kind(text).unwrap_or(SyntaxKind::IDENT),
            Number(NumberKind::Integer) => SyntaxKind::INTEGER,
            Number(NumberKind::Real) => SyntaxKind::REAL,
            String(value) => return (SyntaxKind::STRING, TokenValue::Str(value)),
            Char(value) => return (SyntaxKind::CHAR, TokenValue::Char(value)),
            Assign => SyntaxKind::ASSIGN,
            NotEq => SyntaxKind::NOT_EQ,
            LtEq => SyntaxKind::LT_EQ,
            GtEq => SyntaxKind::GT_EQ,
            Range => SyntaxKind::RANGE,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Star => SyntaxKind::STAR,
            Slash => SyntaxKind::SLASH,
            Eq => SyntaxKind::EQ,
            Hash => SyntaxKind::HASH,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            Comma => SyntaxKind::COMMA,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            Dot => SyntaxKind::DOT,
            Caret => SyntaxKind::CARET,
            Pipe => SyntaxKind::PIPE,
        };
        (kind, TokenValue::None)
    }
}

// =========================================================================
// CALLBACKS
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentForm {
    Brace,
    Paren,
}

/// Consume a (possibly nested) comment whose opener was just matched.
///
/// Both forms nest inside each other; a closer only counts when it matches
/// the innermost open form.
fn skip_comment(lex: &mut logos::Lexer<LogosToken>, opener: CommentForm) -> FilterResult<(), LexError> {
    let bytes = lex.remainder().as_bytes();
    let mut stack = vec![opener];
    let mut i = 0;
    while i < bytes.len() {
        let next = bytes.get(i + 1).copied();
        match bytes[i] {
            b'{' => {
                stack.push(CommentForm::Brace);
                i += 1;
            }
            b'(' if next == Some(b'*') => {
                stack.push(CommentForm::Paren);
                i += 2;
            }
            b'}' if stack.last() == Some(&CommentForm::Brace) => {
                stack.pop();
                i += 1;
            }
            b'*' if next == Some(b')') && stack.last() == Some(&CommentForm::Paren) => {
                stack.pop();
                i += 2;
            }
            _ => i += 1,
        }
        if stack.is_empty() {
            lex.bump(i);
            return FilterResult::Skip;
        }
    }
    lex.bump(bytes.len());
    FilterResult::Error(LexError::UnterminatedComment)
}

/// Extend an integer with a fraction and/or exponent.
///
/// A dot only starts a fraction when a digit follows it, so `1..10` stays
/// INTEGER RANGE INTEGER.
fn finish_number(lex: &mut logos::Lexer<LogosToken>) -> NumberKind {
    let bytes = lex.remainder().as_bytes();
    let mut len = 0;
    let mut kind = NumberKind::Integer;

    if bytes.first() == Some(&b'.') && bytes.get(1).is_some_and(u8::is_ascii_digit) {
        len = 1;
        while bytes.get(len).is_some_and(u8::is_ascii_digit) {
            len += 1;
        }
        kind = NumberKind::Real;
    }

    if matches!(bytes.get(len), Some(b'e' | b'E')) {
        let mut exp = len + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        if bytes.get(exp).is_some_and(u8::is_ascii_digit) {
            while bytes.get(exp).is_some_and(u8::is_ascii_digit) {
                exp += 1;
            }
            len = exp;
            kind = NumberKind::Real;
        }
    }

    lex.bump(len);
    kind
}

/// Finish a string literal. `""` inside the literal is an escaped quote;
/// backslash has no special meaning. A line break ends the literal with an error.
fn string_literal(lex: &mut logos::Lexer<LogosToken>) -> Result<String, LexError> {
    let rest = lex.remainder();
    let mut value = String::new();
    let mut chars = rest.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        match c {
            '"' => {
                if chars.peek().is_some_and(|&(_, next)| next == '"') {
                    chars.next();
                    value.push('"');
                } else {
                    lex.bump(idx + 1);
                    return Ok(value);
                }
            }
            '\n' | '\r' => {
                lex.bump(idx);
                return Err(LexError::UnterminatedString);
            }
            _ => value.push(c),
        }
    }
    lex.bump(rest.len());
    Err(LexError::UnterminatedString)
}

/// Finish a character literal: `'c'`, or `''''` for the quote character.
fn char_literal(lex: &mut logos::Lexer<LogosToken>) -> Result<char, LexError> {
    let rest = lex.remainder();
    if rest.starts_with("'''") {
        lex.bump(3);
        return Ok('\'');
    }
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(c), Some('\'')) if c != '\'' && c != '\n' => {
            lex.bump(c.len_utf8() + 1);
            Ok(c)
        }
        _ => {
            // Swallow the rest of a bad quoted run on this line so it does not
            // cascade into identifier tokens.
            let line_end = rest.find(['\n', '\r']).unwrap_or(rest.len());
            if let Some(close) = rest[..line_end].find('\'') {
                lex.bump(close + 1);
            }
            Err(LexError::MalformedChar)
        }
    }
}
