//! Syntax file wrapper for one parsed source document.
//!
//! Runs the tokenize → parse pipeline and keeps everything downstream
//! consumers need: the token stream, the AST (absent when a strict parse
//! fails) and every lexical and syntax error in source order.

use smol_str::SmolStr;

use crate::parser::{
    ErrorCode, Module, ModuleKind, ParseMode, SyntaxError, Token, lexer::lexical_errors, parse,
    tokenize,
};

/// A tokenized and parsed source document
#[derive(Debug, Clone)]
pub struct SyntaxFile {
    tokens: Vec<Token>,
    module: Option<Module>,
    errors: Vec<SyntaxError>,
    mode: ParseMode,
}

// Two SyntaxFiles are equal if they produced the same tree and the same errors
impl PartialEq for SyntaxFile {
    fn eq(&self, other: &Self) -> bool {
        self.module == other.module && self.errors == other.errors
    }
}

impl SyntaxFile {
    /// Tokenize and parse `source`
    pub fn new(source: &str, mode: ParseMode) -> Self {
        let tokens = tokenize(source);
        let mut errors: Vec<SyntaxError> = lexical_errors(&tokens)
            .map(|token| {
                let message = token.error_message().unwrap_or("invalid token");
                SyntaxError::new(message, token.span, ErrorCode::for_lexical_message(message))
            })
            .collect();

        let module = match parse(&tokens, mode) {
            Ok(result) => {
                errors.extend(result.errors);
                Some(result.module)
            }
            Err(err) => {
                tracing::debug!("strict parse failed: {}", err);
                errors.push(err);
                None
            }
        };
        errors.sort_by_key(|err| err.span.start.offset);

        Self {
            tokens,
            module,
            errors,
            mode,
        }
    }

    /// Parse in recovery mode
    pub fn recovering(source: &str) -> Self {
        Self::new(source, ParseMode::Recovery)
    }

    /// Parse in strict mode
    pub fn strict(source: &str) -> Self {
        Self::new(source, ParseMode::Strict)
    }

    /// The AST, if one could be built
    pub fn module(&self) -> Option<&Module> {
        self.module.as_ref()
    }

    pub fn into_module(self) -> Option<Module> {
        self.module
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Check if tokenizing or parsing reported anything
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Lexical and syntax errors, ordered by position
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// First error that prevented building an AST
    pub fn fatal_error(&self) -> Option<&SyntaxError> {
        if self.module.is_some() {
            return None;
        }
        self.errors.iter().find(|err| !err.code.is_lexical())
    }

    /// Declared module name
    pub fn module_name(&self) -> Option<&str> {
        self.module
            .as_ref()
            .map(|m| m.name.as_str())
            .filter(|name| !name.is_empty())
    }

    pub fn module_kind(&self) -> Option<ModuleKind> {
        self.module.as_ref().map(|m| m.kind)
    }

    /// Names of imported modules, deduplicated, in source order
    pub fn extract_imports(&self) -> Vec<SmolStr> {
        let Some(module) = &self.module else {
            return Vec::new();
        };
        let mut names: Vec<SmolStr> = Vec::new();
        for ident in module.imported_modules() {
            if !ident.name.is_empty() && !names.contains(&ident.name) {
                names.push(ident.name.clone());
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_file() {
        let file = SyntaxFile::recovering(
            "DEFINITION MODULE Queues;\nFROM Stats IMPORT Mean;\nIMPORT Util, Stats;\nEND MODULE.",
        );
        assert!(!file.has_errors());
        assert_eq!(file.module_name(), Some("Queues"));
        assert_eq!(file.module_kind(), Some(ModuleKind::Definition));
        assert_eq!(file.extract_imports(), vec!["Stats", "Util"]);
    }

    #[test]
    fn test_lexical_errors_are_reported_and_parse_continues() {
        let file = SyntaxFile::recovering("MODULE M;\nVAR x : INTEGER; ?\nEND MODULE.");
        assert!(file.module().is_some());
        assert_eq!(file.errors().len(), 1);
        assert_eq!(file.errors()[0].code, ErrorCode::E0101);
    }

    #[test]
    fn test_strict_failure_has_no_module() {
        let file = SyntaxFile::strict("MODULE M\nEND MODULE.");
        assert!(file.module().is_none());
        assert!(file.extract_imports().is_empty());
        assert_eq!(file.fatal_error().map(|e| e.code), Some(ErrorCode::E0201));
    }

    #[test]
    fn test_errors_are_ordered_by_position() {
        let file = SyntaxFile::recovering("MODULE M;\nVAR a : INTEGER\n\"open\nEND MODULE.");
        let offsets: Vec<_> = file.errors().iter().map(|e| e.span.start.offset).collect();
        let mut sorted = offsets.clone();
        sorted.sort();
        assert_eq!(offsets, sorted);
    }
}
