//! The view graph: one root over a shared store, plus any number of range
//! views carved from it or from each other.
//!
//! # Structure
//!
//! Views live in an arena and link to each other by [`ViewId`]:
//!
//! ```text
//!             root [0, size)
//!               |
//!             child
//!               v
//!         A [2, 6) --sibling--> B [6, 10) --sibling--> (back to A)
//!               |
//!             child
//!               v
//!         C [3, 5) --sibling--> (back to C)
//! ```
//!
//! Each parent points at one child; the children of a parent form a circular
//! ring through `sibling`. Creating a view splices it into the ring in O(1).
//!
//! # Propagation
//!
//! The owning container edits the store, then calls [`ViewGraph::propagate`]
//! once with the absolute edit index and the signed size delta. The pass
//! visits every view exactly once:
//!
//! - The edited view and each ancestor refresh their shared state and grow or
//!   shrink in place (`Bound::shift_containing`).
//! - Every other view (siblings along the ancestor chain and all subtrees
//!   below them and below the edited view) refreshes and shifts by the delta
//!   (`Bound::shift_following`).
//!
//! Every visited view bumps its `version`, so consumers can detect any edit
//! anywhere in the graph.
//!
//! Complexity:
//! - create_sub_view: O(1)
//! - propagate: O(n) in the number of views
//! - len / is_empty: O(1)

use std::ops::Range;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::bound::Bound;
use crate::error::Result;
use crate::error::ViewError;
use crate::node::ViewId;
use crate::node::ViewNode;
use crate::ring::Ring;

/// Views waiting for their children to be visited during propagation.
type Pending = SmallVec<[ViewId; 16]>;

/// An arena of views over one shared backing store.
///
/// `S` is the container's handle to its storage (an `Arc`, an allocation id,
/// and so on). It is cloned onto every view by each propagation.
#[derive(Clone, Debug)]
pub struct ViewGraph<S> {
    nodes: Vec<ViewNode<S>>,
}

impl<S> ViewGraph<S> {
    /// A graph whose root views an empty store.
    pub fn new(backing: S) -> Self {
        return Self::with_size(backing, 0);
    }

    /// A graph whose root views a store already holding `size` elements.
    pub fn with_size(backing: S, size: usize) -> Self {
        let root = ViewNode {
            bound: Bound::Root,
            size,
            version: 0,
            backing,
            parent: None,
            child: None,
            sibling: ViewId::ROOT,
        };
        return ViewGraph { nodes: vec![root] };
    }

    pub fn root(&self) -> ViewId {
        ViewId::ROOT
    }

    /// Number of views ever created, root included.
    pub fn view_count(&self) -> usize {
        self.nodes.len()
    }

    /// Read-only access to one view.
    pub fn view(&self, id: ViewId) -> Result<&ViewNode<S>> {
        self.nodes.get(id.index()).ok_or(ViewError::UnknownView(id))
    }

    // --- Node access helpers ---

    /// Only for ids already checked by `view`.
    #[inline]
    pub(crate) fn node(&self, id: ViewId) -> &ViewNode<S> {
        &self.nodes[id.index()]
    }

    #[inline]
    fn node_mut(&mut self, id: ViewId) -> &mut ViewNode<S> {
        &mut self.nodes[id.index()]
    }

    /// Iterate the children of `view`, each exactly once.
    pub fn children(&self, view: ViewId) -> Result<Ring<'_, S>> {
        let first = self.view(view)?.child;
        Ok(Ring::new(self, first))
    }
}

impl<S: Clone> ViewGraph<S> {
    // --- Topology ---

    /// Carve `[from, to)` out of `parent`.
    ///
    /// The bounds are absolute store indices and are taken as given: they are
    /// not clamped against the parent's own range.
    ///
    /// Views are never removed from the arena. A view the container stops
    /// using still receives every later propagation, so each `propagate`
    /// costs O(views ever created). Containers that carve short-lived
    /// sub-lists in a loop should carve them from a graph they can drop.
    pub fn create_sub_view(&mut self, parent: ViewId, from: usize, to: usize) -> Result<ViewId> {
        let (size, version, backing, first) = {
            let p = self.view(parent).inspect_err(|_| {
                vwarn!(parent = %parent, "create_sub_view on unknown parent");
            })?;
            (p.size, p.version, p.backing.clone(), p.child)
        };

        let count = self.nodes.len();
        let id = ViewId::from_index(count).ok_or(ViewError::ArenaFull(count))?;

        let sibling = match first {
            None => {
                self.node_mut(parent).child = Some(id);
                id
            }
            Some(first) => {
                let next = self.node(first).sibling;
                self.node_mut(first).sibling = id;
                next
            }
        };

        self.nodes.push(ViewNode {
            bound: Bound::Range { from, to },
            size,
            version,
            backing,
            parent: Some(parent),
            child: None,
            sibling,
        });

        vdebug!(view = %id, parent = %parent, from, to, "create_sub_view");
        Ok(id)
    }

    // --- Propagation ---

    /// Record a structural edit already applied to the store.
    ///
    /// `index` is the absolute position of the edit and `delta` the change in
    /// size: positive for an insertion, negative for a removal, zero for an
    /// in-place replacement that should only invalidate iterators.
    ///
    /// Fails before touching any view if `view` is unknown, `index` lies past
    /// the end of the store, a removal runs past the end, or an insertion
    /// would grow the store past `usize::MAX`.
    pub fn propagate(&mut self, view: ViewId, index: usize, delta: isize) -> Result<()> {
        let (size, backing) = {
            let origin = self.view(view)?;
            (origin.size, origin.backing.clone())
        };

        if index > size {
            vwarn!(view = %view, index, size, "propagate index out of range");
            return Err(ViewError::IndexOutOfRange { index, size });
        }
        if delta < 0 {
            let count = delta.unsigned_abs();
            if index.checked_add(count).is_none_or(|end| end > size) {
                vwarn!(view = %view, index, count, size, "propagate removal out of range");
                return Err(ViewError::RemovalOutOfRange { index, count, size });
            }
        }

        let size = size.checked_add_signed(delta).ok_or_else(|| {
            vwarn!(view = %view, delta, size, "propagate size overflow");
            ViewError::SizeOverflow { size, count: delta.unsigned_abs() }
        })?;
        vtrace!(view = %view, index, delta, size, "propagate");

        let mut pending = Pending::new();
        pending.push(view);

        // The edited view and its ancestors contain the edit. Their siblings
        // do not, and neither does anything below those siblings.
        let mut current = Some(view);
        while let Some(id) = current {
            let node = self.node_mut(id);
            node.refresh(size, &backing);
            node.bound.shift_containing(index, delta);
            let (sibling, parent) = (node.sibling, node.parent);

            let mut next = sibling;
            while next != id {
                let node = self.node_mut(next);
                node.refresh(size, &backing);
                node.bound.shift_following(index, delta);
                pending.push(next);
                next = node.sibling;
            }

            current = parent;
        }

        while let Some(id) = pending.pop() {
            let Some(first) = self.node(id).child else {
                continue;
            };
            let mut next = first;
            loop {
                let node = self.node_mut(next);
                node.refresh(size, &backing);
                node.bound.shift_following(index, delta);
                pending.push(next);
                next = node.sibling;
                if next == first {
                    break;
                }
            }
        }

        self.assert_settled(size);
        Ok(())
    }

    // --- Bounds ---

    /// Absolute lower bound of `view`.
    pub fn from_index(&self, view: ViewId) -> Result<usize> {
        Ok(self.view(view)?.from_index())
    }

    /// Absolute exclusive upper bound of `view`.
    pub fn to_index(&self, view: ViewId) -> Result<usize> {
        Ok(self.view(view)?.to_index())
    }

    /// Absolute `from..to` of `view`.
    pub fn range(&self, view: ViewId) -> Result<Range<usize>> {
        let node = self.view(view)?;
        Ok(node.from_index()..node.to_index())
    }

    pub fn bound(&self, view: ViewId) -> Result<Bound> {
        Ok(self.view(view)?.bound)
    }

    /// Size of the whole store as last seen by `view`.
    pub fn size(&self, view: ViewId) -> Result<usize> {
        Ok(self.view(view)?.size)
    }

    pub fn version(&self, view: ViewId) -> Result<u64> {
        Ok(self.view(view)?.version)
    }

    pub fn parent(&self, view: ViewId) -> Result<Option<ViewId>> {
        Ok(self.view(view)?.parent)
    }

    /// Number of elements in `view`.
    ///
    /// A view whose upper bound fell below its lower bound is reported as
    /// [`ViewError::NegativeLength`], never as a length.
    pub fn len(&self, view: ViewId) -> Result<usize> {
        let node = self.view(view)?;
        node.bound.len(node.size).ok_or(ViewError::NegativeLength {
            view,
            from: node.from_index(),
            to: node.to_index(),
        })
    }

    pub fn is_empty(&self, view: ViewId) -> Result<bool> {
        Ok(self.len(view)? == 0)
    }

    /// Propagate the removal of every element in `view`.
    ///
    /// The container is expected to have already dropped those elements from
    /// the store. Clearing an empty view still bumps every version.
    pub fn clear(&mut self, view: ViewId) -> Result<()> {
        let len = self.len(view)?;
        let node = self.node(view);
        let from = node.from_index();
        let delta = isize::try_from(len).map_err(|_| ViewError::SizeOverflow {
            size: node.size,
            count: len,
        })?;
        self.propagate(view, from, -delta)
    }

    // --- Backing store ---

    pub fn backing(&self, view: ViewId) -> Result<&S> {
        Ok(&self.view(view)?.backing)
    }

    /// Reseat the backing store on `view`.
    ///
    /// Only `view` changes here. The next propagation from `view` carries the
    /// new backing to every other view.
    pub fn set_backing(&mut self, view: ViewId, backing: S) -> Result<()> {
        self.view(view)?;
        self.node_mut(view).backing = backing;
        Ok(())
    }

    // --- Invariant checking ---

    /// Check the structure of the whole graph.
    ///
    /// Verifies that the root is unique and first, that every view agrees on
    /// the store size, that every range view satisfies
    /// `from <= to <= size`, and that every child ring is closed, duplicate
    /// free and made of views pointing back at their parent.
    pub fn check_invariants(&self) -> Result<()> {
        let root = self.node(ViewId::ROOT);
        let size = root.size;
        if !root.is_root() || root.parent.is_some() {
            return Err(violation(ViewId::ROOT, "arena does not start with the root"));
        }

        let mut linked = 0usize;
        for (index, node) in self.nodes.iter().enumerate() {
            let id = ViewId::from_index(index).ok_or(ViewError::ArenaFull(index))?;

            if index > 0 && (node.is_root() || node.parent.is_none()) {
                return Err(violation(id, "second root in graph"));
            }
            if node.size != size {
                return Err(violation(
                    id,
                    format!("size {} differs from root size {}", node.size, size),
                ));
            }
            if let Bound::Range { from, to } = node.bound {
                if from > to || to > size {
                    return Err(violation(
                        id,
                        format!("range {}..{} outside 0..{}", from, to, size),
                    ));
                }
            }

            linked += self.check_ring(id, node)?;
        }

        if linked + 1 != self.nodes.len() {
            return Err(violation(
                ViewId::ROOT,
                format!("{} views linked into rings, expected {}", linked, self.nodes.len() - 1),
            ));
        }
        Ok(())
    }

    /// Walk the child ring of `id`, returning its length.
    fn check_ring(&self, id: ViewId, node: &ViewNode<S>) -> Result<usize> {
        let Some(first) = node.child else {
            return Ok(0);
        };

        let mut seen = FxHashSet::default();
        let mut next = first;
        loop {
            let child = self
                .nodes
                .get(next.index())
                .ok_or_else(|| violation(id, format!("ring links to unknown view {}", next)))?;
            if child.parent != Some(id) {
                return Err(violation(next, format!("in the ring of {} but not its child", id)));
            }
            if !seen.insert(next) {
                return Err(violation(id, "child ring does not close"));
            }
            next = child.sibling;
            if next == first {
                return Ok(seen.len());
            }
        }
    }

    /// Shared size and ring shape after a propagation. Bounds are left to
    /// `check_invariants`: overlapping removals can legally invert them.
    #[cfg(debug_assertions)]
    fn assert_settled(&self, size: usize) {
        for (index, node) in self.nodes.iter().enumerate() {
            assert_eq!(
                node.size, size,
                "INVARIANT VIOLATED: view #{} holds size {} after propagating size {}",
                index, node.size, size
            );
            let id = ViewId::from_index(index).unwrap_or(ViewId::ROOT);
            if let Err(err) = self.check_ring(id, node) {
                panic!("INVARIANT VIOLATED: {}", err);
            }
        }
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    fn assert_settled(&self, _size: usize) {}
}

fn violation(view: ViewId, reason: impl Into<String>) -> ViewError {
    ViewError::InvariantViolation {
        view,
        reason: reason.into(),
    }
}
