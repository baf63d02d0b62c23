//! Reserved word table.
//!
//! Keywords are case-sensitive: only the exact ALL-CAPS spelling is reserved,
//! `begin` or `Begin` are ordinary identifiers.

use super::SyntaxKind;

/// Every reserved word with its token kind, in alphabetical order
pub const KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("AND", SyntaxKind::AND_KW),
    ("ARRAY", SyntaxKind::ARRAY_KW),
    ("AS", SyntaxKind::AS_KW),
    ("ASK", SyntaxKind::ASK_KW),
    ("BEGIN", SyntaxKind::BEGIN_KW),
    ("BY", SyntaxKind::BY_KW),
    ("CASE", SyntaxKind::CASE_KW),
    ("CLASS", SyntaxKind::CLASS_KW),
    ("CONST", SyntaxKind::CONST_KW),
    ("DEFINITION", SyntaxKind::DEFINITION_KW),
    ("DISPOSE", SyntaxKind::DISPOSE_KW),
    ("DIV", SyntaxKind::DIV_KW),
    ("DO", SyntaxKind::DO_KW),
    ("DOWNTO", SyntaxKind::DOWNTO_KW),
    ("DURATION", SyntaxKind::DURATION_KW),
    ("ELSE", SyntaxKind::ELSE_KW),
    ("ELSIF", SyntaxKind::ELSIF_KW),
    ("END", SyntaxKind::END_KW),
    ("ENUM", SyntaxKind::ENUM_KW),
    ("EXIT", SyntaxKind::EXIT_KW),
    ("EXPORT", SyntaxKind::EXPORT_KW),
    ("FALSE", SyntaxKind::FALSE_KW),
    ("FOR", SyntaxKind::FOR_KW),
    ("FOREACH", SyntaxKind::FOREACH_KW),
    ("FROM", SyntaxKind::FROM_KW),
    ("IF", SyntaxKind::IF_KW),
    ("IMPLEMENTATION", SyntaxKind::IMPLEMENTATION_KW),
    ("IMPORT", SyntaxKind::IMPORT_KW),
    ("IN", SyntaxKind::IN_KW),
    ("INHERITED", SyntaxKind::INHERITED_KW),
    ("INOUT", SyntaxKind::INOUT_KW),
    ("INTERRUPT", SyntaxKind::INTERRUPT_KW),
    ("LOOP", SyntaxKind::LOOP_KW),
    ("MAIN", SyntaxKind::MAIN_KW),
    ("METHOD", SyntaxKind::METHOD_KW),
    ("MOD", SyntaxKind::MOD_KW),
    ("MODULE", SyntaxKind::MODULE_KW),
    ("NEW", SyntaxKind::NEW_KW),
    ("NIL", SyntaxKind::NIL_KW),
    ("NILARRAY", SyntaxKind::NILARRAY_KW),
    ("NILOBJ", SyntaxKind::NILOBJ_KW),
    ("NILREC", SyntaxKind::NILREC_KW),
    ("NOT", SyntaxKind::NOT_KW),
    ("OBJECT", SyntaxKind::OBJECT_KW),
    ("OF", SyntaxKind::OF_KW),
    ("ON", SyntaxKind::ON_KW),
    ("OR", SyntaxKind::OR_KW),
    ("OTHERWISE", SyntaxKind::OTHERWISE_KW),
    ("OUT", SyntaxKind::OUT_KW),
    ("OVERRIDE", SyntaxKind::OVERRIDE_KW),
    ("POINTER", SyntaxKind::POINTER_KW),
    ("PRIVATE", SyntaxKind::PRIVATE_KW),
    ("PROCEDURE", SyntaxKind::PROCEDURE_KW),
    ("RECORD", SyntaxKind::RECORD_KW),
    ("REPEAT", SyntaxKind::REPEAT_KW),
    ("RETURN", SyntaxKind::RETURN_KW),
    ("SELF", SyntaxKind::SELF_KW),
    ("SET", SyntaxKind::SET_KW),
    ("TELL", SyntaxKind::TELL_KW),
    ("TERMINATE", SyntaxKind::TERMINATE_KW),
    ("THEN", SyntaxKind::THEN_KW),
    ("TO", SyntaxKind::TO_KW),
    ("TRUE", SyntaxKind::TRUE_KW),
    ("TYPE", SyntaxKind::TYPE_KW),
    ("UNTIL", SyntaxKind::UNTIL_KW),
    ("VAR", SyntaxKind::VAR_KW),
    ("WAIT", SyntaxKind::WAIT_KW),
    ("WAITFOR", SyntaxKind::WAITFOR_KW),
    ("WHEN", SyntaxKind::WHEN_KW),
    ("WHILE", SyntaxKind::WHILE_KW),
    ("WITH", SyntaxKind::WITH_KW),
];

/// Look up the keyword kind for an exact spelling
pub fn keyword_kind(text: &str) -> Option<SyntaxKind> {
    KEYWORDS
        .binary_search_by(|(kw, _)| kw.cmp(&text))
        .ok()
        .map(|idx| KEYWORDS[idx].1)
}

/// Source spelling of a keyword kind
pub fn keyword_text(kind: SyntaxKind) -> Option<&'static str> {
    KEYWORDS.iter().find(|(_, k)| *k == kind).map(|(kw, _)| *kw)
}

/// True if `text` is a reserved word (exact case)
pub fn is_keyword(text: &str) -> bool {
    keyword_kind(text).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_for_binary_search() {
        assert!(KEYWORDS.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn test_keyword_lookup_is_case_sensitive() {
        assert_eq!(keyword_kind("BEGIN"), Some(SyntaxKind::BEGIN_KW));
        assert_eq!(keyword_kind("begin"), None);
        assert_eq!(keyword_kind("Begin"), None);
        assert!(is_keyword("WAITFOR"));
        assert!(!is_keyword("WaitFor"));
    }
}
