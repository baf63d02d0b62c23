use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::core::Workspace;
use super::error::WorkspaceError;
use super::indexing::analyze_roots;

/// A [`Workspace`] behind a read-write lock, cloneable across threads.
///
/// [`SharedWorkspace::index`] parses and analyzes files without holding the
/// lock, so readers keep seeing the previous state until the new one is
/// installed. A second `index` call while one is running fails with
/// [`WorkspaceError::IndexingInProgress`].
#[derive(Debug, Clone, Default)]
pub struct SharedWorkspace {
    inner: Arc<RwLock<Workspace>>,
    indexing: Arc<AtomicBool>,
}

impl SharedWorkspace {
    pub fn new(workspace: Workspace) -> Self {
        Self {
            inner: Arc::new(RwLock::new(workspace)),
            indexing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Workspace> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Workspace> {
        self.inner.write()
    }

    pub fn is_indexing(&self) -> bool {
        self.indexing.load(Ordering::Acquire)
    }

    pub fn index(&self) -> Result<usize, WorkspaceError> {
        let _guard = IndexingGuard::acquire(&self.indexing)?;

        let (config, previous) = {
            let mut workspace = self.inner.write();
            let previous = workspace.begin_indexing()?;
            (workspace.config().clone(), previous)
        };

        match analyze_roots(&config) {
            Ok(documents) => Ok(self.inner.write().install(documents)),
            Err(err) => {
                self.inner.write().state = previous;
                Err(err)
            }
        }
    }
}

/// Holds the indexing flag; clears it on drop, including on early return
struct IndexingGuard<'a>(&'a AtomicBool);

impl<'a> IndexingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, WorkspaceError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| WorkspaceError::IndexingInProgress)?;
        Ok(Self(flag))
    }
}

impl Drop for IndexingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
