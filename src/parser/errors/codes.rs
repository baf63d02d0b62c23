//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Structural errors (END markers, semicolons, delimiters)
//! - E03xx: Declaration errors (sections, types, procedures, objects)
//! - E04xx: Expression and statement errors
//! - E05xx: Import/export errors
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for parser diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,
    /// Unterminated string literal
    E0102,
    /// Unterminated comment
    E0103,
    /// Malformed character literal
    E0104,

    // =========================================================================
    // E02xx: Structural errors
    // =========================================================================
    /// Missing semicolon
    E0201,
    /// Missing `END`
    E0202,
    /// Unclosed parenthesis `(`
    E0203,
    /// Unclosed bracket `[`
    E0204,
    /// Unexpected input after the end of the module
    E0205,
    /// Missing or malformed module header
    E0206,

    // =========================================================================
    // E03xx: Declaration errors
    // =========================================================================
    /// Missing identifier/name
    E0301,
    /// Invalid type specification
    E0302,
    /// Unexpected token in a declaration section
    E0303,
    /// Invalid parameter list
    E0304,
    /// Unexpected token in an object body
    E0305,
    /// Invalid method heading
    E0306,

    // =========================================================================
    // E04xx: Expression and statement errors
    // =========================================================================
    /// Invalid expression
    E0401,
    /// Missing operand in expression
    E0402,
    /// Invalid statement
    E0403,
    /// Unclosed call argument list
    E0404,

    // =========================================================================
    // E05xx: Import/export errors
    // =========================================================================
    /// Invalid import clause
    E0501,
    /// Missing module name
    E0502,
    /// Invalid alias
    E0503,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Unexpected token in current context
    E0901,
    /// Expected a specific token
    E0902,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0104 => "E0104",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            Self::E0205 => "E0205",
            Self::E0206 => "E0206",
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0304 => "E0304",
            Self::E0305 => "E0305",
            Self::E0306 => "E0306",
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0403 => "E0403",
            Self::E0404 => "E0404",
            Self::E0501 => "E0501",
            Self::E0502 => "E0502",
            Self::E0503 => "E0503",
            Self::E0901 => "E0901",
            Self::E0902 => "E0902",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 | Self::E0103 | Self::E0104 => "lexical error",
            Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204 | Self::E0205 | Self::E0206 => {
                "structural error"
            }
            Self::E0301 | Self::E0302 | Self::E0303 | Self::E0304 | Self::E0305 | Self::E0306 => {
                "declaration error"
            }
            Self::E0401 | Self::E0402 | Self::E0403 | Self::E0404 => "expression error",
            Self::E0501 | Self::E0502 | Self::E0503 => "import error",
            Self::E0901 | Self::E0902 => "syntax error",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "unexpected character",
            Self::E0102 => "unterminated string literal",
            Self::E0103 => "unterminated comment",
            Self::E0104 => "malformed character literal",
            Self::E0201 => "missing semicolon",
            Self::E0202 => "missing END",
            Self::E0203 => "unclosed parenthesis",
            Self::E0204 => "unclosed bracket",
            Self::E0205 => "unexpected input after end of module",
            Self::E0206 => "missing module header",
            Self::E0301 => "missing identifier",
            Self::E0302 => "invalid type specification",
            Self::E0303 => "unexpected token in declaration section",
            Self::E0304 => "invalid parameter list",
            Self::E0305 => "unexpected token in object body",
            Self::E0306 => "invalid method heading",
            Self::E0401 => "invalid expression",
            Self::E0402 => "missing operand",
            Self::E0403 => "invalid statement",
            Self::E0404 => "unclosed argument list",
            Self::E0501 => "invalid import",
            Self::E0502 => "missing module name",
            Self::E0503 => "invalid alias",
            Self::E0901 => "unexpected token",
            Self::E0902 => "expected token",
        }
    }

    /// Code for the message of a lexer `ERROR` token
    pub fn for_lexical_message(message: &str) -> Self {
        if message.starts_with("unterminated string") {
            Self::E0102
        } else if message.starts_with("unterminated comment") {
            Self::E0103
        } else if message.starts_with("malformed character") {
            Self::E0104
        } else {
            Self::E0101
        }
    }

    /// Check if this is a structural error (END markers, delimiters)
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204 | Self::E0205 | Self::E0206
        )
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self, Self::E0101 | Self::E0102 | Self::E0103 | Self::E0104)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::E0201), "E0201");
        assert_eq!(ErrorCode::E0902.as_str(), "E0902");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::E0202.category_description(), "structural error");
        assert_eq!(ErrorCode::E0304.category_description(), "declaration error");
        assert_eq!(ErrorCode::E0403.category_description(), "expression error");
        assert_eq!(ErrorCode::E0501.category_description(), "import error");
    }

    #[test]
    fn test_lexical_message_mapping() {
        assert_eq!(ErrorCode::for_lexical_message("unterminated comment"), ErrorCode::E0103);
        assert_eq!(
            ErrorCode::for_lexical_message("unterminated string literal"),
            ErrorCode::E0102
        );
        assert_eq!(
            ErrorCode::for_lexical_message("unexpected character '!'"),
            ErrorCode::E0101
        );
        assert!(ErrorCode::E0104.is_lexical());
        assert!(!ErrorCode::E0201.is_lexical());
    }
}
