//! Domain constants shared across the front-end.

/// File extension of source modules (without the dot)
pub const SOURCE_EXT: &str = "mod";

/// Directory names that hold dependency caches or build output and are never indexed
pub const SKIPPED_DIRS: &[&str] = &["node_modules", "target", "build"];

/// Maximum number of tokens the parser scans ahead when deciding whether a
/// procedure heading is followed by a body or is a forward declaration
pub const LOOKAHEAD_BUDGET: usize = 512;

/// Names of the builtin scalar types (resolved before any scope lookup)
pub const BUILTIN_TYPES: &[&str] = &[
    "INTEGER", "REAL", "BOOLEAN", "CHAR", "STRING", "LONGINT", "LONGREAL", "CARDINAL", "ANYOBJ",
    "ANYREC",
];

/// Builtin procedures callable without declaration
pub const BUILTIN_PROCEDURES: &[&str] = &[
    "INC", "DEC", "ABS", "ORD", "CHR", "FLOAT", "TRUNC", "ROUND", "ODD", "MIN", "MAX", "HIGH",
    "LOW", "SIZEOF", "OUTPUT", "INPUT", "HALT", "CLONE", "INTTOSTR", "REALTOSTR", "STRTOINT",
    "STRTOREAL", "STRLEN", "SUBSTR", "POSITION", "UPPER", "LOWER", "SimTime",
];
