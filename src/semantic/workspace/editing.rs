use std::path::{Path, PathBuf};

use smol_str::SmolStr;

use super::core::Workspace;
use super::document::{DocumentState, WorkspaceDocument};
use super::error::WorkspaceError;
use crate::syntax::parser::{LoadError, load_source};

impl Workspace {
    /// Add `id` with contents `text`, or replace its contents if the
    /// workspace already has it.
    pub fn open_document(&mut self, id: impl Into<PathBuf>, text: &str) {
        let id = id.into();
        if let Some(document) = self.documents.get_mut(&id) {
            document.state = DocumentState::Reanalyzing;
        }
        let document = self.analyze_text(id, text);
        self.replace_document(document);
    }

    /// Read `path` from disk and open it; it must carry the configured extension
    pub fn open_file(&mut self, path: &Path) -> Result<(), WorkspaceError> {
        let text = load_source(path, &self.config.extension).map_err(|err| match err {
            LoadError::Io { source, .. } => WorkspaceError::Io {
                path: path.to_path_buf(),
                source,
            },
            LoadError::UnsupportedExtension { expected, .. } => {
                WorkspaceError::UnsupportedExtension {
                    path: path.to_path_buf(),
                    expected,
                }
            }
        })?;
        self.open_document(path, &text);
        Ok(())
    }

    /// Replace the contents of a known document.
    ///
    /// Only this document is re-analyzed. Documents importing it keep their
    /// tables until they are edited or the workspace is re-indexed.
    pub fn update_document(&mut self, id: &Path, text: &str) -> Result<(), WorkspaceError> {
        let Some(document) = self.documents.get_mut(id) else {
            return Err(WorkspaceError::UnknownDocument(id.to_path_buf()));
        };
        document.state = DocumentState::Reanalyzing;
        let document = self.analyze_text(id.to_path_buf(), text);
        self.replace_document(document);
        Ok(())
    }

    /// Take a document out of the workspace, with every edge touching it
    pub fn remove_document(&mut self, id: &Path) -> Result<WorkspaceDocument, WorkspaceError> {
        let Some(mut document) = self.documents.remove(id) else {
            return Err(WorkspaceError::UnknownDocument(id.to_path_buf()));
        };
        self.unlink_document(&document);
        if let Some(name) = document.module_name.clone() {
            self.unregister_module(id, &name);
            self.relink_importers(&[name], id);
        }
        self.detect_cycles();
        self.rebuild_global();

        tracing::debug!("removed {}", id.display());
        document.dependencies.clear();
        document.dependents.clear();
        document.state = DocumentState::Removed;
        Ok(document)
    }

    fn analyze_text(&self, id: PathBuf, text: &str) -> WorkspaceDocument {
        let resolver = self.resolver();
        WorkspaceDocument::analyze(id, text, self.config.parse_mode, Some(&resolver))
    }

    /// Swap in a freshly analyzed document and bring the name map, its
    /// edges, cycles and the global table up to date
    fn replace_document(&mut self, mut document: WorkspaceDocument) {
        let id = document.id.clone();
        let previous = self.documents.remove(&id);

        let mut changed_names: Vec<SmolStr> = Vec::new();
        let renamed = match &previous {
            Some(previous) => {
                document.version = previous.version + 1;
                document.dependencies = previous.dependencies.clone();
                document.dependents = previous.dependents.clone();
                previous.module_name != document.module_name
                    || previous.module_kind != document.module_kind
            }
            None => true,
        };
        let previous_name = previous.and_then(|previous| previous.module_name);
        let new_name = document.module_name.clone();
        self.documents.insert(id.clone(), document);

        if renamed {
            if let Some(name) = previous_name {
                self.unregister_module(&id, &name);
                changed_names.push(name);
            }
            self.register_module(&id);
            if let Some(name) = new_name {
                changed_names.push(name);
            }
        }
        self.link_document(&id);
        self.relink_importers(&changed_names, &id);
        self.detect_cycles();
        self.rebuild_global();

        tracing::debug!(
            "reanalyzed {} ({} diagnostics)",
            id.display(),
            self.diagnostics(&id).len()
        );
    }
}
