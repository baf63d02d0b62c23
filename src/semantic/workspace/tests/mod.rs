#![allow(clippy::unwrap_used)]

mod tests_editing;
mod tests_graph;

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use super::{Workspace, WorkspaceConfig};

pub(super) const STATS_DEF: &str = "DEFINITION MODULE Stats;
TYPE Sample = RECORD
  total : REAL;
  n : INTEGER;
END RECORD;
CONST MaxSamples = 50;
PROCEDURE Mean(IN s : Sample) : REAL;
END MODULE.";

pub(super) const STATS_IMPL: &str = "IMPLEMENTATION MODULE Stats;
PROCEDURE Mean(IN s : Sample) : REAL;
BEGIN
  RETURN s.total / FLOAT(s.n);
END PROCEDURE;
VAR last : Sample;
BEGIN
  last.n := MaxSamples;
END MODULE.";

pub(super) const REPORT: &str = "MAIN MODULE Report;
FROM Stats IMPORT Sample, Mean;
VAR s : Sample;
    m : REAL;
BEGIN
  s.n := 1;
  m := Mean(s);
END MODULE.";

/// A temporary project holding `files` at their relative paths
pub(super) fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (relative, text) in files {
        let path = dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }
    dir
}

pub(super) fn config(dir: &TempDir) -> WorkspaceConfig {
    WorkspaceConfig::new([dir.path()])
}

pub(super) fn indexed(dir: &TempDir) -> Workspace {
    let mut workspace = Workspace::new(config(dir));
    workspace.index().unwrap();
    workspace
}

pub(super) fn path(dir: &TempDir, relative: &str) -> PathBuf {
    dir.path().join(relative)
}

/// Every edge must be recorded on both of its ends
pub(super) fn assert_edges_symmetric(workspace: &Workspace) {
    for document in workspace.documents() {
        for dependency in document.dependencies() {
            let target = workspace.document(dependency).unwrap();
            assert!(
                target.dependents().contains(document.id()),
                "{} -> {} has no back edge",
                document.id().display(),
                dependency.display()
            );
        }
        for dependent in document.dependents() {
            let source = workspace.document(dependent).unwrap();
            assert!(
                source.dependencies().contains(document.id()),
                "{} <- {} has no forward edge",
                document.id().display(),
                dependent.display()
            );
        }
    }
}
