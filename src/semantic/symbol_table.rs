/// Scoped registry of named entities for one module
mod lookup;
mod references;
mod scope;
mod symbol;
mod table;

pub use references::{Reference, ReferenceIndex};
pub use scope::{Scope, ScopeId, ScopeKind};
pub use symbol::{Symbol, SymbolId, SymbolKind, Visibility};
pub use table::{DefineError, SymbolTable};

#[cfg(test)]
mod tests;
