use std::path::PathBuf;

use thiserror::Error;

/// Failures of workspace operations.
///
/// A file that does not parse is not one of them: it stays in the workspace
/// with its error recorded on the document.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("workspace root {0} is not a directory")]
    RootNotFound(PathBuf),

    #[error("indexing is already in progress")]
    IndexingInProgress,

    #[error("no document {0} in the workspace")]
    UnknownDocument(PathBuf),

    #[error("{path} is not a .{expected} source file")]
    UnsupportedExtension { path: PathBuf, expected: String },
}
