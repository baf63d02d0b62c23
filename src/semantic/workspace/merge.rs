use std::path::PathBuf;

use rustc_hash::FxHashMap;

use super::core::{GLOBAL_TABLE_NAME, Workspace};
use super::document::WorkspaceDocument;
use crate::base::Span;
use crate::semantic::symbol_table::{DefineError, SymbolId, SymbolTable};

impl Workspace {
    /// Merge every document's top-level scope into the global table.
    ///
    /// Documents with fewer dependencies go first, ties broken by path. The
    /// first definition of a name wins; later ones are dropped. Imported
    /// copies are skipped so each symbol enters once, from its own module.
    pub(super) fn rebuild_global(&mut self) {
        let mut order: Vec<&WorkspaceDocument> = self
            .documents
            .values()
            .filter(|document| document.symbols.is_some())
            .collect();
        order.sort_by(|a, b| {
            a.dependencies
                .len()
                .cmp(&b.dependencies.len())
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut global = SymbolTable::new(GLOBAL_TABLE_NAME, Span::default());
        let mut sources: FxHashMap<SymbolId, PathBuf> = FxHashMap::default();
        let mut dropped = 0usize;
        for document in order {
            let Some(table) = &document.symbols else {
                continue;
            };
            let origin = document.module_name.clone().unwrap_or_default();
            for (_, symbol) in table.root_symbols() {
                if symbol.is_imported() {
                    continue;
                }
                let symbol = symbol.clone().with_origin(origin.clone());
                match global.define(symbol) {
                    Ok(id) => {
                        sources.insert(id, document.id.clone());
                    }
                    Err(DefineError::Duplicate { name, existing, .. }) => {
                        dropped += 1;
                        tracing::trace!(
                            "'{}' from {} loses to the definition in {}",
                            name,
                            document.id.display(),
                            sources
                                .get(&existing)
                                .map(|path| path.display().to_string())
                                .unwrap_or_default()
                        );
                    }
                }
            }
        }

        tracing::debug!(
            "merged {} global symbols ({} duplicates dropped)",
            global.symbol_count(),
            dropped
        );
        self.global = global;
        self.global_sources = sources;
    }
}
