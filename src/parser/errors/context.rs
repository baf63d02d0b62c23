//! Parse context tracking for context-aware error messages
//!
//! The parser keeps a stack of contexts so an error can say where in the
//! module structure it happened and recovery knows which tokens resume parsing.

use crate::parser::SyntaxKind;

/// Represents the current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseContext {
    /// Module header, imports and exports
    ModuleHeader,
    /// Between declarations at module or procedure level
    DeclarationSection,
    /// Inside a TYPE specification
    TypeSpec,
    /// Inside a record field list
    RecordBody,
    /// Inside an OBJECT type body
    ObjectBody,
    /// Inside an OBJECT implementation block
    ObjectImpl,
    /// Parameter list of a procedure or method
    ParameterList,
    /// A statement sequence
    StatementList,
    /// Parsing an expression
    Expression,
    /// Call argument list
    ArgumentList,
    /// An import clause
    Import,
}

impl ParseContext {
    pub fn description(&self) -> &'static str {
        match self {
            Self::ModuleHeader => "in module header",
            Self::DeclarationSection => "in declaration section",
            Self::TypeSpec => "in type specification",
            Self::RecordBody => "in record body",
            Self::ObjectBody => "in object body",
            Self::ObjectImpl => "in object implementation",
            Self::ParameterList => "in parameter list",
            Self::StatementList => "in statement list",
            Self::Expression => "in expression",
            Self::ArgumentList => "in argument list",
            Self::Import => "in import clause",
        }
    }

    /// What the parser would have accepted in this context
    pub fn expected_description(&self) -> &'static str {
        match self {
            Self::ModuleHeader => "an import, export, or declaration",
            Self::DeclarationSection => "TYPE, CONST, VAR, PROCEDURE, OBJECT, BEGIN or END",
            Self::TypeSpec => "a type name or type constructor",
            Self::RecordBody => "a field declaration or END",
            Self::ObjectBody => "a field, method heading, section keyword or END",
            Self::ObjectImpl => "a method implementation or END",
            Self::ParameterList => "a parameter",
            Self::StatementList => "a statement",
            Self::Expression => "an expression (literal, identifier, or operator)",
            Self::ArgumentList => "an argument",
            Self::Import => "a module or symbol name",
        }
    }

    /// Tokens at which error recovery stops skipping in this context
    pub fn recovery_tokens(&self) -> &'static [SyntaxKind] {
        match self {
            Self::ModuleHeader | Self::Import => &[
                SyntaxKind::SEMICOLON,
                SyntaxKind::FROM_KW,
                SyntaxKind::IMPORT_KW,
                SyntaxKind::EXPORT_KW,
                SyntaxKind::TYPE_KW,
                SyntaxKind::CONST_KW,
                SyntaxKind::VAR_KW,
                SyntaxKind::PROCEDURE_KW,
                SyntaxKind::OBJECT_KW,
                SyntaxKind::BEGIN_KW,
                SyntaxKind::END_KW,
            ],
            Self::DeclarationSection | Self::TypeSpec => &[
                SyntaxKind::SEMICOLON,
                SyntaxKind::TYPE_KW,
                SyntaxKind::CONST_KW,
                SyntaxKind::VAR_KW,
                SyntaxKind::PROCEDURE_KW,
                SyntaxKind::OBJECT_KW,
                SyntaxKind::BEGIN_KW,
                SyntaxKind::END_KW,
            ],
            Self::RecordBody => &[SyntaxKind::SEMICOLON, SyntaxKind::END_KW],
            Self::ObjectBody => &[
                SyntaxKind::SEMICOLON,
                SyntaxKind::ASK_KW,
                SyntaxKind::TELL_KW,
                SyntaxKind::WAITFOR_KW,
                SyntaxKind::PRIVATE_KW,
                SyntaxKind::CLASS_KW,
                SyntaxKind::OVERRIDE_KW,
                SyntaxKind::END_KW,
            ],
            Self::ObjectImpl => &[
                SyntaxKind::SEMICOLON,
                SyntaxKind::ASK_KW,
                SyntaxKind::TELL_KW,
                SyntaxKind::WAITFOR_KW,
                SyntaxKind::END_KW,
            ],
            Self::ParameterList => &[SyntaxKind::SEMICOLON, SyntaxKind::R_PAREN],
            Self::StatementList => &[
                SyntaxKind::SEMICOLON,
                SyntaxKind::IF_KW,
                SyntaxKind::WHILE_KW,
                SyntaxKind::FOR_KW,
                SyntaxKind::FOREACH_KW,
                SyntaxKind::REPEAT_KW,
                SyntaxKind::LOOP_KW,
                SyntaxKind::CASE_KW,
                SyntaxKind::RETURN_KW,
                SyntaxKind::EXIT_KW,
                SyntaxKind::NEW_KW,
                SyntaxKind::DISPOSE_KW,
                SyntaxKind::ASK_KW,
                SyntaxKind::TELL_KW,
                SyntaxKind::WAIT_KW,
                SyntaxKind::TERMINATE_KW,
                SyntaxKind::INHERITED_KW,
                SyntaxKind::WITH_KW,
                SyntaxKind::END_KW,
                SyntaxKind::ELSE_KW,
                SyntaxKind::ELSIF_KW,
                SyntaxKind::UNTIL_KW,
                SyntaxKind::WHEN_KW,
                SyntaxKind::OTHERWISE_KW,
                SyntaxKind::ON_KW,
            ],
            Self::Expression | Self::ArgumentList => &[
                SyntaxKind::SEMICOLON,
                SyntaxKind::R_PAREN,
                SyntaxKind::R_BRACKET,
                SyntaxKind::COMMA,
                SyntaxKind::THEN_KW,
                SyntaxKind::DO_KW,
                SyntaxKind::OF_KW,
                SyntaxKind::END_KW,
            ],
        }
    }

    /// Check if a token kind is a recovery point for this context
    pub fn is_recovery_point(&self, kind: SyntaxKind) -> bool {
        kind == SyntaxKind::EOF || self.recovery_tokens().contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_context_has_a_terminator() {
        let contexts = [
            ParseContext::ModuleHeader,
            ParseContext::DeclarationSection,
            ParseContext::TypeSpec,
            ParseContext::RecordBody,
            ParseContext::ObjectBody,
            ParseContext::ObjectImpl,
            ParseContext::ParameterList,
            ParseContext::StatementList,
            ParseContext::Expression,
            ParseContext::ArgumentList,
            ParseContext::Import,
        ];
        for ctx in contexts {
            assert!(
                ctx.recovery_tokens().contains(&SyntaxKind::SEMICOLON),
                "context {:?} should recover at ';'",
                ctx
            );
            assert!(ctx.is_recovery_point(SyntaxKind::EOF));
            assert!(!ctx.description().is_empty());
        }
    }

    #[test]
    fn test_statement_recovery_stops_at_keywords() {
        assert!(ParseContext::StatementList.is_recovery_point(SyntaxKind::WHILE_KW));
        assert!(!ParseContext::StatementList.is_recovery_point(SyntaxKind::IDENT));
        assert!(ParseContext::DeclarationSection.is_recovery_point(SyntaxKind::PROCEDURE_KW));
    }
}
