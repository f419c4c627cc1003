use std::fmt;

use crate::bound::Bound;

/// Arena index type. u32 keeps handles small.
type Idx = u32;

/// Handle to a view in a [`ViewGraph`](crate::ViewGraph).
///
/// Handles are plain indices: copying or dropping one never touches the
/// graph. A handle from one graph means nothing in another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(Idx);

impl ViewId {
    /// The root view always lives at the start of the arena.
    pub const ROOT: ViewId = ViewId(0);

    /// Build a handle from a raw arena index.
    pub fn from_raw(raw: u32) -> ViewId {
        ViewId(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Option<ViewId> {
        Idx::try_from(index).ok().map(ViewId)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One list or sub-list in the graph.
///
/// `size` and `backing` are mirrored on every node and refreshed by each
/// propagation; they are copies, not shared cells.
#[derive(Clone, Debug)]
pub struct ViewNode<S> {
    pub(crate) bound: Bound,
    pub(crate) size: usize,
    pub(crate) version: u64,
    pub(crate) backing: S,
    /// View this one was carved from. `None` for the root.
    pub(crate) parent: Option<ViewId>,
    /// Entry point into the ring of this view's children.
    pub(crate) child: Option<ViewId>,
    /// Next view in the ring of views sharing `parent`. Self for a ring of one.
    pub(crate) sibling: ViewId,
}

impl<S> ViewNode<S> {
    pub fn bound(&self) -> Bound {
        self.bound
    }

    pub fn from_index(&self) -> usize {
        self.bound.from_index()
    }

    /// Exclusive upper bound; the root reports the live size.
    pub fn to_index(&self) -> usize {
        self.bound.to_index(self.size)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn backing(&self) -> &S {
        &self.backing
    }

    pub fn parent(&self) -> Option<ViewId> {
        self.parent
    }

    pub fn child(&self) -> Option<ViewId> {
        self.child
    }

    pub fn sibling(&self) -> ViewId {
        self.sibling
    }

    pub fn is_root(&self) -> bool {
        self.bound.is_root()
    }

    /// Take on the post-edit shared state.
    #[inline]
    pub(crate) fn refresh(&mut self, size: usize, backing: &S)
    where
        S: Clone,
    {
        self.version += 1;
        self.size = size;
        self.backing = backing.clone();
    }
}
