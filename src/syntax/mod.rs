// Per-document syntax pipeline
pub mod file;
pub mod parser;

pub use file::SyntaxFile;
pub use parser::{LoadError, load_and_parse};

// Re-export Position and Span from base for convenience
pub use crate::base::{Position, Span};
