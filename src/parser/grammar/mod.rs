//! Grammar rules
//!
//! Each file adds an `impl Parser` block for one family of constructs:
//!
//! - `module`: module header, imports, exports, module body
//! - `declarations`: TYPE/CONST/VAR sections, procedures, continuation form
//! - `types`: type specifications
//! - `objects`: object types and object implementations
//! - `statements`: statement sequences and every statement form
//! - `expressions`: precedence-climbing expression parser

mod declarations;
mod expressions;
mod module;
mod objects;
mod statements;
mod types;
