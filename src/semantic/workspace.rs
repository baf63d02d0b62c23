//! # Workspace
//!
//! Multi-file view of a project: every source file under the configured
//! roots, the module-name → document map, the import dependency graph and
//! one global table merged from every module's top-level scope.
//!
//! ## Indexing
//!
//! 1. Collect files under each root (see [`crate::project::file_loader`]).
//! 2. Parse and analyze each file on its own, in parallel. No document's
//!    first pass depends on another's.
//! 3. Sequentially: map module names, record import edges on both sides,
//!    find cycles (recorded, never rejected).
//! 4. Re-analyze every document that imports something, now with the other
//!    modules' first-pass tables available.
//! 5. Merge top-level scopes into the global table, fewest dependencies
//!    first; the first definition of a name wins.
//!
//! Edits re-analyze only the edited document, then redo steps 3 and 5.

mod config;
mod core;
mod document;
mod editing;
mod error;
mod graph;
mod indexing;
mod merge;
mod shared;

pub use config::WorkspaceConfig;
pub use self::core::{Workspace, WorkspaceState};
pub use document::{DocumentState, WorkspaceDocument};
pub use error::WorkspaceError;
pub use shared::SharedWorkspace;

#[cfg(test)]
mod tests;
