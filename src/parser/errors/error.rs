//! Syntax error types
//!
//! Provides rich error information including:
//! - Error codes for categorization
//! - Severity levels
//! - Hints/suggestions for fixes
//! - Related source locations ("construct opened here")

use crate::base::Span;
use crate::parser::SyntaxKind;

use super::codes::ErrorCode;
use super::context::ParseContext;

/// Severity level for syntax diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
    Hint,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Hint => "hint",
        }
    }
}

/// Related location information for an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub message: String,
    pub span: Span,
}

impl RelatedInfo {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// A syntax error with code, location and the offending token kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code} at {pos}: {message}", pos = .span.start)]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
    pub code: ErrorCode,
    pub severity: Severity,
    /// Kind of the token the parser stopped at, if any
    pub found: Option<SyntaxKind>,
    pub hint: Option<String>,
    pub related: Vec<RelatedInfo>,
}

/// Error returned by strict-mode parsing: the first syntax error encountered
pub type ParseError = SyntaxError;

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Span, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            span,
            code,
            severity: Severity::Error,
            found: None,
            hint: None,
            related: vec![],
        }
    }

    /// Create a builder for more complex error construction
    pub fn builder(code: ErrorCode) -> SyntaxErrorBuilder {
        SyntaxErrorBuilder::new(code)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }

    pub fn with_found(mut self, found: SyntaxKind) -> Self {
        self.found = Some(found);
        self
    }

    pub fn has_hint(&self) -> bool {
        self.hint.is_some()
    }

    pub fn has_related(&self) -> bool {
        !self.related.is_empty()
    }

    /// Format the error for display, including the hint
    pub fn format(&self) -> String {
        let mut result = format!("{}: {}", self.code, self.message);
        if let Some(hint) = &self.hint {
            result.push_str(&format!("\n  hint: {}", hint));
        }
        result
    }
}

/// Builder for creating complex syntax errors
pub struct SyntaxErrorBuilder {
    code: ErrorCode,
    message: Option<String>,
    span: Option<Span>,
    severity: Severity,
    found: Option<SyntaxKind>,
    hint: Option<String>,
    related: Vec<RelatedInfo>,
}

impl SyntaxErrorBuilder {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: None,
            span: None,
            severity: Severity::Error,
            found: None,
            hint: None,
            related: vec![],
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn found(mut self, found: SyntaxKind) -> Self {
        self.found = Some(found);
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn related(mut self, message: impl Into<String>, span: Span) -> Self {
        self.related.push(RelatedInfo::new(message, span));
        self
    }

    /// Build the syntax error. Missing message falls back to the code's default,
    /// missing span to the start of the file.
    pub fn build(self) -> SyntaxError {
        SyntaxError {
            message: self
                .message
                .unwrap_or_else(|| self.code.default_message().to_string()),
            span: self.span.unwrap_or_default(),
            code: self.code,
            severity: self.severity,
            found: self.found,
            hint: self.hint,
            related: self.related,
        }
    }
}

/// "unexpected X in Y, expected Z"
pub fn format_context_error(found: SyntaxKind, context: ParseContext) -> String {
    format!(
        "unexpected {} {}, expected {}",
        found,
        context.description(),
        context.expected_description()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Position;

    fn span_at(offset: usize) -> Span {
        Span::empty(Position::new(1, offset + 1, offset))
    }

    #[test]
    fn test_syntax_error_new() {
        let err = SyntaxError::new("expected ';'", span_at(10), ErrorCode::E0201);

        assert_eq!(err.message, "expected ';'");
        assert_eq!(err.code, ErrorCode::E0201);
        assert_eq!(err.severity, Severity::Error);
        assert!(err.hint.is_none());
        assert!(err.found.is_none());
    }

    #[test]
    fn test_syntax_error_display_includes_position() {
        let err = SyntaxError::new("expected ';'", span_at(4), ErrorCode::E0201);
        assert_eq!(err.to_string(), "E0201 at 1:5: expected ';'");
    }

    #[test]
    fn test_syntax_error_builder() {
        let err = SyntaxError::builder(ErrorCode::E0202)
            .message("expected END to close PROCEDURE")
            .span(span_at(40))
            .found(SyntaxKind::EOF)
            .hint("add 'END PROCEDURE;'")
            .related("procedure started here", span_at(0))
            .build();

        assert_eq!(err.code, ErrorCode::E0202);
        assert_eq!(err.found, Some(SyntaxKind::EOF));
        assert!(err.has_hint());
        assert!(err.has_related());
        assert!(err.format().contains("hint: add 'END PROCEDURE;'"));
    }

    #[test]
    fn test_syntax_error_builder_defaults() {
        let err = SyntaxError::builder(ErrorCode::E0201).build();
        assert_eq!(err.message, "missing semicolon");
        assert_eq!(err.span, Span::default());
    }

    #[test]
    fn test_severity() {
        assert!(Severity::Error.is_error());
        assert!(!Severity::Warning.is_error());
        assert_eq!(Severity::Hint.as_str(), "hint");
    }

    #[test]
    fn test_format_context_error() {
        let message = format_context_error(SyntaxKind::R_PAREN, ParseContext::ObjectBody);
        assert!(message.contains("')'"));
        assert!(message.contains("in object body"));
        assert!(message.contains("expected"));
    }
}
