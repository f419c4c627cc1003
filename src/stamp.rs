//! Fail-fast version stamps.
//!
//! A consumer that walks a view (an iterator, a cursor) takes a [`Stamp`]
//! when it starts and checks it before every step. Any structural edit
//! anywhere in the graph bumps the version of every view, so a mismatch means
//! the walk is stale:
//!
//! ```
//! use viewgraph::{ViewError, ViewGraph};
//!
//! let mut graph = ViewGraph::with_size((), 8);
//! let root = graph.root();
//! let tail = graph.create_sub_view(root, 4, 8).unwrap();
//!
//! let stamp = graph.stamp(tail).unwrap();
//! assert!(graph.check(&stamp).is_ok());
//!
//! // An edit through a different view still invalidates the stamp.
//! graph.propagate(root, 0, 1).unwrap();
//! assert!(matches!(graph.check(&stamp), Err(ViewError::Stale { .. })));
//! ```

use crate::error::Result;
use crate::error::ViewError;
use crate::graph::ViewGraph;
use crate::node::ViewId;

/// The version of one view, captured at a point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Stamp {
    view: ViewId,
    version: u64,
}

impl Stamp {
    #[inline]
    pub fn view(&self) -> ViewId {
        return self.view;
    }

    #[inline]
    pub fn version(&self) -> u64 {
        return self.version;
    }

    /// Re-arm after the holder made an edit of its own.
    pub fn refresh<S: Clone>(&mut self, graph: &ViewGraph<S>) -> Result<()> {
        self.version = graph.version(self.view)?;
        return Ok(());
    }
}

impl<S: Clone> ViewGraph<S> {
    /// Capture the current version of `view`.
    pub fn stamp(&self, view: ViewId) -> Result<Stamp> {
        let version = self.version(view)?;
        return Ok(Stamp { view, version });
    }

    /// Fail with [`ViewError::Stale`] if the view moved on since `stamp`.
    pub fn check(&self, stamp: &Stamp) -> Result<()> {
        let found = self.version(stamp.view)?;
        if found != stamp.version {
            return Err(ViewError::Stale {
                view: stamp.view,
                expected: stamp.version,
                found,
            });
        }
        return Ok(());
    }
}
