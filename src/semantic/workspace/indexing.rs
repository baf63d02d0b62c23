use std::path::PathBuf;

use rayon::prelude::*;

use super::config::WorkspaceConfig;
use super::core::{Workspace, WorkspaceState};
use super::document::WorkspaceDocument;
use super::error::WorkspaceError;
use crate::project::file_loader::collect_file_paths;
use crate::semantic::analyzer::AnalysisResult;

impl Workspace {
    /// Collect, parse and analyze every source file under the configured
    /// roots, replacing whatever the workspace held before.
    ///
    /// Returns the number of documents indexed.
    pub fn index(&mut self) -> Result<usize, WorkspaceError> {
        let previous = self.begin_indexing()?;
        match analyze_roots(&self.config) {
            Ok(documents) => Ok(self.install(documents)),
            Err(err) => {
                self.state = previous;
                Err(err)
            }
        }
    }

    /// Enter the indexing state, returning the state to restore on failure
    pub(super) fn begin_indexing(&mut self) -> Result<WorkspaceState, WorkspaceError> {
        if self.state == WorkspaceState::Indexing {
            return Err(WorkspaceError::IndexingInProgress);
        }
        Ok(std::mem::replace(&mut self.state, WorkspaceState::Indexing))
    }

    /// Build the maps, graph and global table over freshly analyzed documents
    pub(super) fn install(&mut self, documents: Vec<WorkspaceDocument>) -> usize {
        self.documents = documents
            .into_iter()
            .map(|document| (document.id.clone(), document))
            .collect();
        self.modules.clear();
        self.implementations.clear();

        let mut ids: Vec<PathBuf> = self.documents.keys().cloned().collect();
        ids.sort();
        for id in &ids {
            self.register_module(id);
        }
        self.link_all();
        self.detect_cycles();
        self.cross_module_pass();
        self.rebuild_global();
        self.state = WorkspaceState::Ready;

        tracing::info!(
            "indexed {} documents ({} modules, {} import cycles)",
            self.documents.len(),
            self.modules.len(),
            self.cycles.len()
        );
        self.documents.len()
    }

    /// Re-analyze documents that import something, now that every module's
    /// first-pass table is available
    fn cross_module_pass(&mut self) {
        let results: Vec<(PathBuf, AnalysisResult)> = {
            let resolver = self.resolver();
            let pending: Vec<&WorkspaceDocument> = self
                .documents
                .values()
                .filter(|document| document.needs_resolver())
                .collect();
            let analyze = |document: &&WorkspaceDocument| {
                document
                    .analysis(Some(&resolver))
                    .map(|result| (document.id.clone(), result))
            };
            if self.config.parallel {
                pending.par_iter().filter_map(analyze).collect()
            } else {
                pending.iter().filter_map(analyze).collect()
            }
        };

        tracing::debug!("second pass over {} documents", results.len());
        for (id, result) in results {
            if let Some(document) = self.documents.get_mut(&id) {
                document.apply_analysis(result);
            }
        }
    }
}

/// Parse and analyze every file under `config.roots` on its own.
///
/// Needs no workspace, so callers sharing one can run it without holding a
/// lock.
pub(super) fn analyze_roots(config: &WorkspaceConfig) -> Result<Vec<WorkspaceDocument>, WorkspaceError> {
    let mut paths = Vec::new();
    for root in &config.roots {
        if !root.is_dir() {
            return Err(WorkspaceError::RootNotFound(root.clone()));
        }
        paths.extend(collect_file_paths(root, &config.extension, &config.skipped_dirs));
    }
    paths.sort();
    paths.dedup();
    tracing::debug!("analyzing {} files", paths.len());

    let mode = config.parse_mode;
    let documents = if config.parallel {
        paths
            .par_iter()
            .map(|path| WorkspaceDocument::load(path, mode))
            .collect()
    } else {
        paths
            .iter()
            .map(|path| WorkspaceDocument::load(path, mode))
            .collect()
    };
    Ok(documents)
}
