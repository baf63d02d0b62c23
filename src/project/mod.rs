pub mod file_loader;
pub mod workspace_loader;

pub use workspace_loader::WorkspaceLoader;

// Re-export the single-file entry points for convenience
pub use crate::syntax::parser::{LoadError, load_and_parse};
