//! Token kinds produced by the lexer
//!
//! This enum is the closed set of token kinds. Keywords are exact-case
//! ALL-CAPS spellings; every other spelling lexes as `IDENT`.

/// All token kinds of the language
///
/// Trivia (whitespace, comments) never reaches the token stream; malformed
/// input surfaces as `ERROR` tokens and the stream always ends with `EOF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,   // identifier
    INTEGER, // 42
    REAL,    // 3.14, 1.5E-3
    STRING,  // "hello"
    CHAR,    // 'c'

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    ASSIGN,    // :=
    PLUS,      // +
    MINUS,     // -
    STAR,      // *
    SLASH,     // /
    EQ,        // =
    NOT_EQ,    // <>
    HASH,      // # (alternate not-equal)
    LT,        // <
    LT_EQ,     // <=
    GT,        // >
    GT_EQ,     // >=
    L_PAREN,   // (
    R_PAREN,   // )
    L_BRACKET, // [
    R_BRACKET, // ]
    COMMA,     // ,
    SEMICOLON, // ;
    COLON,     // :
    DOT,       // .
    RANGE,     // ..
    CARET,     // ^
    PIPE,      // |

    // =========================================================================
    // KEYWORDS (exact case)
    // =========================================================================
    AND_KW,
    ARRAY_KW,
    AS_KW,
    ASK_KW,
    BEGIN_KW,
    BY_KW,
    CASE_KW,
    CLASS_KW,
    CONST_KW,
    DEFINITION_KW,
    DISPOSE_KW,
    DIV_KW,
    DO_KW,
    DOWNTO_KW,
    DURATION_KW,
    ELSE_KW,
    ELSIF_KW,
    END_KW,
    ENUM_KW,
    EXIT_KW,
    EXPORT_KW,
    FALSE_KW,
    FOR_KW,
    FOREACH_KW,
    FROM_KW,
    IF_KW,
    IMPLEMENTATION_KW,
    IMPORT_KW,
    IN_KW,
    INHERITED_KW,
    INOUT_KW,
    INTERRUPT_KW,
    LOOP_KW,
    MAIN_KW,
    METHOD_KW,
    MOD_KW,
    MODULE_KW,
    NEW_KW,
    NIL_KW,
    NILARRAY_KW,
    NILOBJ_KW,
    NILREC_KW,
    NOT_KW,
    OBJECT_KW,
    OF_KW,
    ON_KW,
    OR_KW,
    OTHERWISE_KW,
    OUT_KW,
    OVERRIDE_KW,
    POINTER_KW,
    PRIVATE_KW,
    PROCEDURE_KW,
    RECORD_KW,
    REPEAT_KW,
    RETURN_KW,
    SELF_KW,
    SET_KW,
    TELL_KW,
    TERMINATE_KW,
    THEN_KW,
    TO_KW,
    TRUE_KW,
    TYPE_KW,
    UNTIL_KW,
    VAR_KW,
    WAIT_KW,
    WAITFOR_KW,
    WHEN_KW,
    WHILE_KW,
    WITH_KW,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    ERROR,
    EOF,
}

impl SyntaxKind {
    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::AND_KW as u16) && (self as u16) <= (Self::WITH_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::ASSIGN as u16) && (self as u16) <= (Self::PIPE as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INTEGER | Self::REAL | Self::STRING | Self::CHAR
        )
    }

    /// Keywords that start a declaration section or declaration
    pub fn starts_declaration(self) -> bool {
        matches!(
            self,
            Self::TYPE_KW | Self::CONST_KW | Self::VAR_KW | Self::PROCEDURE_KW | Self::OBJECT_KW
        )
    }

    /// Keywords that start a statement
    pub fn starts_statement(self) -> bool {
        matches!(
            self,
            Self::IF_KW
                | Self::WHILE_KW
                | Self::FOR_KW
                | Self::FOREACH_KW
                | Self::REPEAT_KW
                | Self::LOOP_KW
                | Self::CASE_KW
                | Self::RETURN_KW
                | Self::EXIT_KW
                | Self::NEW_KW
                | Self::DISPOSE_KW
                | Self::ASK_KW
                | Self::TELL_KW
                | Self::WAIT_KW
                | Self::TERMINATE_KW
                | Self::INHERITED_KW
                | Self::WITH_KW
        )
    }

    /// Human-readable description used in "expected ..." messages
    pub fn describe(self) -> &'static str {
        match self {
            Self::IDENT => "identifier",
            Self::INTEGER => "integer literal",
            Self::REAL => "real literal",
            Self::STRING => "string literal",
            Self::CHAR => "character literal",
            Self::ASSIGN => "':='",
            Self::PLUS => "'+'",
            Self::MINUS => "'-'",
            Self::STAR => "'*'",
            Self::SLASH => "'/'",
            Self::EQ => "'='",
            Self::NOT_EQ => "'<>'",
            Self::HASH => "'#'",
            Self::LT => "'<'",
            Self::LT_EQ => "'<='",
            Self::GT => "'>'",
            Self::GT_EQ => "'>='",
            Self::L_PAREN => "'('",
            Self::R_PAREN => "')'",
            Self::L_BRACKET => "'['",
            Self::R_BRACKET => "']'",
            Self::COMMA => "','",
            Self::SEMICOLON => "';'",
            Self::COLON => "':'",
            Self::DOT => "'.'",
            Self::RANGE => "'..'",
            Self::CARET => "'^'",
            Self::PIPE => "'|'",
            Self::ERROR => "invalid token",
            Self::EOF => "end of input",
            kw => super::keywords::keyword_text(kw).unwrap_or("keyword"),
        }
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}
