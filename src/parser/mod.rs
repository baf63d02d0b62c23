//! Lexer and recursive descent parser for the simulation language
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind, spans and decoded values
//!     ↓
//! Parser (grammar/) → typed AST rooted at `Module`
//!     ↓
//! semantic → symbol tables and diagnostics
//! ```
//!
//! The parser works on the significant token stream: comments and whitespace
//! never reach it, and `ERROR` tokens are reported by the syntax layer and
//! filtered out before parsing.

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
pub mod errors;
mod grammar;
pub mod keywords;
pub mod lexer;
mod syntax_kind;

pub use ast::*;
pub use errors::{ErrorCode, ParseContext, ParseError, Severity, SyntaxError};
pub use lexer::{LexError, Lexer, Token, TokenValue, tokenize};
pub use parser::{Parse, ParseMode, parse, parse_source};
pub use syntax_kind::SyntaxKind;
