//! Semantic error reporting.
//!
//! Semantic errors and warnings never abort analysis; they are collected
//! here and attached to the document they belong to.

use crate::base::Span;
use crate::parser::SyntaxError;
pub use crate::parser::errors::Severity;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Error/warning code (e.g., "E0001").
    pub code: &'static str,
    pub message: String,
    pub span: Span,
    /// Optional related locations.
    pub related: Vec<RelatedInfo>,
}

/// Related information for a diagnostic.
#[derive(Clone, Debug, PartialEq)]
pub struct RelatedInfo {
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(code: &'static str, span: Span, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            span,
            related: Vec::new(),
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(code: &'static str, span: Span, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(code, span, message)
        }
    }

    /// Add related information.
    pub fn with_related(mut self, message: impl Into<String>, span: Span) -> Self {
        self.related.push(RelatedInfo {
            message: message.into(),
            span,
        });
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl From<&SyntaxError> for Diagnostic {
    fn from(err: &SyntaxError) -> Self {
        Self {
            severity: err.severity,
            code: err.code.as_str(),
            message: err.message.clone(),
            span: err.span,
            related: err
                .related
                .iter()
                .map(|info| RelatedInfo {
                    message: info.message.clone(),
                    span: info.span,
                })
                .collect(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} at {}: {}",
            self.severity.as_str(),
            self.code,
            self.span.start,
            self.message
        )
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes for semantic errors.
///
/// ## Error Code Ranges
///
/// - **E0001-E0099**: Semantic analysis errors (resolution, typing, validation)
/// - **W0001-W0099**: Warnings (unused, suspicious, unresolved imports)
pub mod codes {
    // ========================================================================
    // SEMANTIC ERRORS (E0001-E0099)
    // ========================================================================

    /// Undefined identifier.
    pub const UNDEFINED_REFERENCE: &str = "E0001";
    /// Type name that resolves nowhere.
    pub const UNKNOWN_TYPE: &str = "E0002";
    /// Type mismatch.
    pub const TYPE_MISMATCH: &str = "E0003";
    /// Duplicate definition in one scope.
    pub const DUPLICATE_DEFINITION: &str = "E0004";
    /// OVERRIDE method without a base method.
    pub const INVALID_OVERRIDE: &str = "E0005";
    /// OVERRIDE method whose signature differs from the base method.
    pub const OVERRIDE_MISMATCH: &str = "E0006";
    /// Object type inherits from itself.
    pub const CIRCULAR_INHERITANCE: &str = "E0007";
    /// Name used as a type that is not a type.
    pub const NOT_A_TYPE: &str = "E0008";
    /// Assignment to an IN parameter.
    pub const ASSIGN_TO_IN_PARAMETER: &str = "E0009";
    /// Non-designator passed to an OUT/INOUT parameter.
    pub const NON_ASSIGNABLE_ARGUMENT: &str = "E0010";
    /// Method implemented but not declared by its object.
    pub const UNDECLARED_METHOD: &str = "E0011";
    /// Object implementation for an unknown object type.
    pub const UNKNOWN_OBJECT: &str = "E0012";
    /// Assignment to something that is not a variable.
    pub const INVALID_ASSIGNMENT: &str = "E0013";

    // ========================================================================
    // WARNINGS (W0001-W0099)
    // ========================================================================

    /// Unused local variable or parameter.
    pub const UNUSED_SYMBOL: &str = "W0001";
    /// OUT parameter read before it is assigned.
    pub const OUT_READ_BEFORE_ASSIGN: &str = "W0002";
    /// OUT parameter never assigned.
    pub const OUT_NEVER_ASSIGNED: &str = "W0003";
    /// Non-override method hides a base method.
    pub const HIDES_BASE_METHOD: &str = "W0004";
    /// Imported module or name could not be resolved.
    pub const UNRESOLVED_IMPORT: &str = "W0005";
    /// Module imports itself.
    pub const SELF_IMPORT: &str = "W0006";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during semantic analysis.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        tracing::trace!("diagnostic: {}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    pub fn error(&mut self, code: &'static str, span: Span, message: impl Into<String>) {
        self.add(Diagnostic::error(code, span, message));
    }

    pub fn warning(&mut self, code: &'static str, span: Span, message: impl Into<String>) {
        self.add(Diagnostic::warning(code, span, message));
    }

    /// Add a duplicate definition error pointing back at the first definition.
    pub fn duplicate_definition(&mut self, name: &str, span: Span, existing: Span) {
        self.add(
            Diagnostic::error(
                codes::DUPLICATE_DEFINITION,
                span,
                format!("duplicate definition: '{}' is already defined in this scope", name),
            )
            .with_related(format!("previous definition of '{}'", name), existing),
        );
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Position;

    fn span() -> Span {
        Span::new(Position::new(2, 3, 10), Position::new(2, 6, 13))
    }

    #[test]
    fn test_collector_counts() {
        let mut collector = DiagnosticCollector::new();
        collector.error(codes::UNKNOWN_TYPE, span(), "unknown type 'Foo'");
        collector.warning(codes::UNUSED_SYMBOL, span(), "unused variable: 'x'");
        collector.duplicate_definition("x", span(), span());
        assert_eq!(collector.error_count(), 2);
        assert_eq!(collector.warning_count(), 1);
        assert!(collector.has_errors());
        assert_eq!(collector.diagnostics()[2].related.len(), 1);
    }

    #[test]
    fn test_display() {
        let diag = Diagnostic::warning(codes::SELF_IMPORT, span(), "module 'A' imports itself");
        assert_eq!(diag.to_string(), "warning W0006 at 2:3: module 'A' imports itself");
    }

    #[test]
    fn test_from_syntax_error_keeps_code() {
        let err = SyntaxError::new("expected ';'", span(), crate::parser::ErrorCode::E0201);
        let diag = Diagnostic::from(&err);
        assert_eq!(diag.code, "E0201");
        assert!(diag.is_error());
    }
}
