//! Source file discovery under workspace roots

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

// Reading and parsing one file lives with the syntax pipeline
pub use crate::syntax::parser::{LoadError, get_extension, has_extension, load_and_parse, load_file};

/// Every file under `root` ending in `.extension`, sorted by path.
///
/// Hidden directories (name starting with `.`) and directories named in
/// `skipped_dirs` are not entered. Entries that cannot be read are logged
/// and left out; they never fail the walk.
pub fn collect_file_paths(root: &Path, extension: &str, skipped_dirs: &[String]) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped(entry, skipped_dirs))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("skipping unreadable entry under {}: {}", root.display(), err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && has_extension(entry.path(), extension))
        .map(DirEntry::into_path)
        .collect();
    paths.sort();
    tracing::debug!(
        "found {} .{} file(s) under {}",
        paths.len(),
        extension,
        root.display()
    );
    paths
}

fn is_skipped(entry: &DirEntry, skipped_dirs: &[String]) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || skipped_dirs.iter().any(|dir| *dir == name)
}

#[cfg(test)]
mod tests;
