//! A view graph behind one lock.
//!
//! Propagation updates many views in one pass and is not atomic on its own,
//! so two edits in flight on the same graph can leave views half updated.
//! [`SharedViewGraph`] makes the single-writer rule structural: every edit
//! takes the write lock, every read takes the read lock, and readers only
//! ever see settled bounds.

use std::ops::Range;
use std::sync::Arc;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;

use crate::error::Result;
use crate::error::ViewError;
use crate::graph::ViewGraph;
use crate::node::ViewId;
use crate::stamp::Stamp;

/// A cloneable handle to one lock-protected [`ViewGraph`].
pub struct SharedViewGraph<S> {
    inner: Arc<RwLock<ViewGraph<S>>>,
}

impl<S> Clone for SharedViewGraph<S> {
    fn clone(&self) -> Self {
        SharedViewGraph {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Clone> From<ViewGraph<S>> for SharedViewGraph<S> {
    fn from(graph: ViewGraph<S>) -> Self {
        SharedViewGraph::new(graph)
    }
}

impl<S: Clone> SharedViewGraph<S> {
    pub fn new(graph: ViewGraph<S>) -> Self {
        SharedViewGraph {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// Hold the read lock, for several reads against one settled state.
    pub fn read(&self) -> Result<RwLockReadGuard<'_, ViewGraph<S>>> {
        self.inner.read().map_err(|_| ViewError::Poisoned)
    }

    /// Hold the write lock, for a store edit and its propagation as one step.
    pub fn write(&self) -> Result<RwLockWriteGuard<'_, ViewGraph<S>>> {
        self.inner.write().map_err(|_| ViewError::Poisoned)
    }

    // --- Writers ---

    pub fn create_sub_view(&self, parent: ViewId, from: usize, to: usize) -> Result<ViewId> {
        self.write()?.create_sub_view(parent, from, to)
    }

    pub fn propagate(&self, view: ViewId, index: usize, delta: isize) -> Result<()> {
        self.write()?.propagate(view, index, delta)
    }

    pub fn clear(&self, view: ViewId) -> Result<()> {
        self.write()?.clear(view)
    }

    pub fn set_backing(&self, view: ViewId, backing: S) -> Result<()> {
        self.write()?.set_backing(view, backing)
    }

    // --- Readers ---

    pub fn root(&self) -> Result<ViewId> {
        Ok(self.read()?.root())
    }

    pub fn len(&self, view: ViewId) -> Result<usize> {
        self.read()?.len(view)
    }

    pub fn is_empty(&self, view: ViewId) -> Result<bool> {
        self.read()?.is_empty(view)
    }

    pub fn range(&self, view: ViewId) -> Result<Range<usize>> {
        self.read()?.range(view)
    }

    pub fn version(&self, view: ViewId) -> Result<u64> {
        self.read()?.version(view)
    }

    pub fn backing(&self, view: ViewId) -> Result<S> {
        self.read()?.backing(view).cloned()
    }

    pub fn stamp(&self, view: ViewId) -> Result<Stamp> {
        self.read()?.stamp(view)
    }

    pub fn check(&self, stamp: &Stamp) -> Result<()> {
        self.read()?.check(stamp)
    }

    pub fn check_invariants(&self) -> Result<()> {
        self.read()?.check_invariants()
    }
}
