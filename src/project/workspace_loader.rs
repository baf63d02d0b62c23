use std::path::{Path, PathBuf};

use crate::semantic::workspace::{SharedWorkspace, Workspace, WorkspaceConfig, WorkspaceError};

/// Builds indexed workspaces from directories on disk
#[derive(Debug, Clone, Default)]
pub struct WorkspaceLoader {
    config: WorkspaceConfig,
}

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WorkspaceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// Index every source file under the configured roots
    pub fn load(&self) -> Result<Workspace, WorkspaceError> {
        let mut workspace = Workspace::new(self.config.clone());
        workspace.index()?;
        Ok(workspace)
    }

    /// Index every source file under `root` alone, with the loader's other
    /// settings
    pub fn load_directory(&self, root: impl Into<PathBuf>) -> Result<Workspace, WorkspaceError> {
        let config = WorkspaceConfig {
            roots: vec![root.into()],
            ..self.config.clone()
        };
        Self::with_config(config).load()
    }

    /// Like [`Self::load`], behind a handle that can be shared across threads
    pub fn load_shared(&self) -> Result<SharedWorkspace, WorkspaceError> {
        let shared = SharedWorkspace::new(Workspace::new(self.config.clone()));
        shared.index()?;
        Ok(shared)
    }

    /// Read one file from disk into an existing workspace
    pub fn load_file_into(&self, path: &Path, workspace: &mut Workspace) -> Result<(), WorkspaceError> {
        tracing::debug!("loading {}", path.display());
        workspace.open_file(path)
    }
}
