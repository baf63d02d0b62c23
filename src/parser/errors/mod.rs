//! Parser error handling module
//!
//! - Categorized error codes for filtering and documentation
//! - Context-aware error messages
//! - Suggestions/hints for common mistakes
//! - Related span tracking (e.g. "procedure started here" for a missing END)

mod codes;
mod context;
mod error;

pub use codes::ErrorCode;
pub use context::ParseContext;
pub use error::{ParseError, RelatedInfo, Severity, SyntaxError, SyntaxErrorBuilder, format_context_error};

#[cfg(test)]
mod tests;
