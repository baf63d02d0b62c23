//! Foundation types for the simlang toolchain.
//!
//! This module provides fundamental types used throughout the front-end:
//! - [`Position`], [`Span`] - 1-based line/column positions plus byte offsets
//! - [`LineIndex`] - byte offset to line/column conversion
//! - Domain constants (file extension, skipped directories, builtin types)
//!
//! This module has NO dependencies on other simlang modules.

pub mod constants;
mod line_index;
mod position;

pub use line_index::LineIndex;
pub use position::{Position, Span};
