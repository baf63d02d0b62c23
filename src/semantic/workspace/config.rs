use std::path::PathBuf;

use crate::base::constants::{SKIPPED_DIRS, SOURCE_EXT};
use crate::parser::ParseMode;

/// Where to look for sources and how to process them
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceConfig {
    pub roots: Vec<PathBuf>,
    /// Source file extension, without the dot
    pub extension: String,
    /// Directory names never entered while collecting files
    pub skipped_dirs: Vec<String>,
    pub parse_mode: ParseMode,
    /// Analyze files on the rayon pool during indexing
    pub parallel: bool,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            extension: SOURCE_EXT.to_string(),
            skipped_dirs: SKIPPED_DIRS.iter().map(|dir| dir.to_string()).collect(),
            parse_mode: ParseMode::default(),
            parallel: true,
        }
    }
}

impl WorkspaceConfig {
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = mode;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}
