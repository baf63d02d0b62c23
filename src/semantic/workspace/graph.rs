//! Module-name map and import edges.
//!
//! Every edge is stored on both ends: `a.dependencies` holds `b` exactly
//! when `b.dependents` holds `a`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::core::Workspace;
use super::document::WorkspaceDocument;
use crate::parser::ModuleKind;

impl Workspace {
    /// Map the module name `id` declares to `id`, unless another document
    /// already holds the name
    pub(super) fn register_module(&mut self, id: &Path) {
        let Some(document) = self.documents.get(id) else {
            return;
        };
        let (Some(name), Some(kind)) = (document.module_name.clone(), document.module_kind) else {
            return;
        };
        let map = if kind.is_importable() {
            &mut self.modules
        } else {
            &mut self.implementations
        };
        match map.get(&name) {
            Some(existing) if existing.as_path() != id => {
                tracing::warn!(
                    "module '{}' is declared by both {} and {}; keeping the first",
                    name,
                    existing.display(),
                    id.display()
                );
            }
            _ => {
                map.insert(name, id.to_path_buf());
            }
        }
    }

    /// Drop `id`'s claim on `name`, handing the name to another document
    /// declaring it, if any
    pub(super) fn unregister_module(&mut self, id: &Path, name: &SmolStr) {
        for importable in [true, false] {
            let map = if importable {
                &mut self.modules
            } else {
                &mut self.implementations
            };
            if map.get(name).is_none_or(|holder| holder.as_path() != id) {
                continue;
            }
            map.remove(name);

            let successor = self
                .documents
                .values()
                .filter(|document| document.id.as_path() != id)
                .filter(|document| document.module_name.as_ref() == Some(name))
                .filter(|document| document.module_kind.map(ModuleKind::is_importable) == Some(importable))
                .map(|document| document.id.clone())
                .min();
            if let Some(successor) = successor {
                tracing::debug!("module '{}' now declared by {}", name, successor.display());
                map.insert(name.clone(), successor);
            }
        }
    }

    /// Documents `document` should depend on under the current module map
    fn resolve_dependencies(&self, document: &WorkspaceDocument) -> BTreeSet<PathBuf> {
        let mut dependencies: BTreeSet<PathBuf> = document
            .imports
            .iter()
            .filter_map(|name| self.modules.get(name))
            .cloned()
            .collect();
        // An implementation module sees its own definition module
        if document.module_kind == Some(ModuleKind::Implementation)
            && let Some(definition) = document.module_name.as_ref().and_then(|name| self.modules.get(name))
        {
            dependencies.insert(definition.clone());
        }
        dependencies.remove(&document.id);
        dependencies
    }

    /// Recompute `id`'s outgoing edges, updating both ends of every edge
    /// that appeared or disappeared
    pub(super) fn link_document(&mut self, id: &Path) {
        let Some(document) = self.documents.get(id) else {
            return;
        };
        let new = self.resolve_dependencies(document);
        let old = &document.dependencies;
        let removed: Vec<PathBuf> = old.difference(&new).cloned().collect();
        let added: Vec<PathBuf> = new.difference(old).cloned().collect();

        for target in &removed {
            if let Some(target) = self.documents.get_mut(target) {
                target.dependents.remove(id);
            }
        }
        for target in &added {
            if let Some(target) = self.documents.get_mut(target) {
                target.dependents.insert(id.to_path_buf());
            }
        }
        if let Some(document) = self.documents.get_mut(id) {
            document.dependencies = new;
        }
    }

    /// Rebuild every edge from scratch
    pub(super) fn link_all(&mut self) {
        for document in self.documents.values_mut() {
            document.dependencies.clear();
            document.dependents.clear();
        }
        let mut ids: Vec<PathBuf> = self.documents.keys().cloned().collect();
        ids.sort();
        for id in &ids {
            self.link_document(id);
        }
    }

    /// Remove every edge touching `document`, which is no longer in the map
    pub(super) fn unlink_document(&mut self, document: &WorkspaceDocument) {
        for target in &document.dependencies {
            if let Some(target) = self.documents.get_mut(target) {
                target.dependents.remove(&document.id);
            }
        }
        for source in &document.dependents {
            if let Some(source) = self.documents.get_mut(source) {
                source.dependencies.remove(&document.id);
            }
        }
    }

    /// Relink documents other than `except` that import one of `names`
    /// or implement one of them
    pub(super) fn relink_importers(&mut self, names: &[SmolStr], except: &Path) {
        if names.is_empty() {
            return;
        }
        let mut importers: Vec<PathBuf> = self
            .documents
            .values()
            .filter(|document| document.id.as_path() != except)
            .filter(|document| {
                document.imports.iter().any(|name| names.contains(name))
                    || (document.module_kind == Some(ModuleKind::Implementation)
                        && document.module_name.as_ref().is_some_and(|name| names.contains(name)))
            })
            .map(|document| document.id.clone())
            .collect();
        importers.sort();
        for importer in &importers {
            self.link_document(importer);
        }
    }

    pub(super) fn detect_cycles(&mut self) {
        self.cycles = find_cycles(&self.documents);
        for cycle in &self.cycles {
            tracing::debug!(
                "import cycle: {}",
                cycle
                    .iter()
                    .map(|id| id.display().to_string())
                    .collect::<Vec<_>>()
                    .join(" -> ")
            );
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    OnStack,
    Done,
}

/// Depth-first search over dependency edges, in path order.
///
/// Each back edge to a document still on the stack yields the cycle from
/// that document to the top of the stack.
pub(super) fn find_cycles(documents: &FxHashMap<PathBuf, WorkspaceDocument>) -> Vec<Vec<PathBuf>> {
    let mut ids: Vec<&Path> = documents.keys().map(PathBuf::as_path).collect();
    ids.sort();

    let mut marks: FxHashMap<&Path, Mark> = FxHashMap::default();
    let mut stack: Vec<&Path> = Vec::new();
    let mut cycles = Vec::new();
    for id in ids {
        if !marks.contains_key(id) {
            visit(id, documents, &mut marks, &mut stack, &mut cycles);
        }
    }
    cycles
}

fn visit<'a>(
    id: &'a Path,
    documents: &'a FxHashMap<PathBuf, WorkspaceDocument>,
    marks: &mut FxHashMap<&'a Path, Mark>,
    stack: &mut Vec<&'a Path>,
    cycles: &mut Vec<Vec<PathBuf>>,
) {
    marks.insert(id, Mark::OnStack);
    stack.push(id);

    if let Some(document) = documents.get(id) {
        for dependency in &document.dependencies {
            let dependency = dependency.as_path();
            match marks.get(dependency) {
                Some(Mark::OnStack) => {
                    if let Some(start) = stack.iter().position(|entry| *entry == dependency) {
                        cycles.push(stack[start..].iter().map(|entry| entry.to_path_buf()).collect());
                    }
                }
                Some(Mark::Done) => {}
                None => visit(dependency, documents, marks, stack, cycles),
            }
        }
    }

    stack.pop();
    marks.insert(id, Mark::Done);
}
