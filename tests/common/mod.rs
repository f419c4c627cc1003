//! Shared helpers for the integration tests.
//!
//! `IntList` is a minimal concrete container on top of the view graph: it
//! owns a `Vec<i64>`, edits it, and propagates every edit. Its backing handle
//! is an allocation generation that changes whenever the vector reallocates.

#![allow(dead_code)]

use viewgraph::Bound;
use viewgraph::ViewError;
use viewgraph::ViewGraph;
use viewgraph::ViewId;
use viewgraph::Stamp;

// =============================================================================
// IntList container
// =============================================================================

pub struct IntList {
    pub data: Vec<i64>,
    pub graph: ViewGraph<u32>,
    generation: u32,
}

impl IntList {
    pub fn new(items: impl IntoIterator<Item = i64>) -> IntList {
        let data: Vec<i64> = items.into_iter().collect();
        let graph = ViewGraph::with_size(0, data.len());
        IntList { data, graph, generation: 0 }
    }

    pub fn root(&self) -> ViewId {
        self.graph.root()
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Carve `[from, to)`, relative to `view`.
    pub fn sub_list(&mut self, view: ViewId, from: usize, to: usize) -> ViewId {
        let base = self.graph.from_index(view).unwrap();
        assert!(from <= to && to <= self.len(view), "sub_list {}..{} out of range", from, to);
        self.graph.create_sub_view(view, base + from, base + to).unwrap()
    }

    pub fn len(&self, view: ViewId) -> usize {
        self.graph.len(view).unwrap()
    }

    pub fn to_vec(&self, view: ViewId) -> Vec<i64> {
        self.data[self.graph.range(view).unwrap()].to_vec()
    }

    pub fn get(&self, view: ViewId, index: usize) -> i64 {
        let base = self.graph.from_index(view).unwrap();
        self.data[base + index]
    }

    /// Insert at `index`, relative to `view`.
    pub fn insert(&mut self, view: ViewId, index: usize, value: i64) {
        assert!(index <= self.len(view));
        let at = self.graph.from_index(view).unwrap() + index;
        if self.data.len() == self.data.capacity() {
            self.generation += 1;
            self.graph.set_backing(view, self.generation).unwrap();
        }
        self.data.insert(at, value);
        self.graph.propagate(view, at, 1).unwrap();
    }

    pub fn insert_all(&mut self, view: ViewId, index: usize, values: &[i64]) {
        assert!(index <= self.len(view));
        let at = self.graph.from_index(view).unwrap() + index;
        if self.data.len() + values.len() > self.data.capacity() {
            self.generation += 1;
            self.graph.set_backing(view, self.generation).unwrap();
        }
        self.data.splice(at..at, values.iter().copied());
        self.graph.propagate(view, at, values.len() as isize).unwrap();
    }

    pub fn remove(&mut self, view: ViewId, index: usize) -> i64 {
        assert!(index < self.len(view));
        let at = self.graph.from_index(view).unwrap() + index;
        let value = self.data.remove(at);
        self.graph.propagate(view, at, -1).unwrap();
        value
    }

    pub fn set(&mut self, view: ViewId, index: usize, value: i64) -> i64 {
        assert!(index < self.len(view));
        let at = self.graph.from_index(view).unwrap() + index;
        let old = std::mem::replace(&mut self.data[at], value);
        self.graph.propagate(view, at, 0).unwrap();
        old
    }

    pub fn clear(&mut self, view: ViewId) {
        let range = self.graph.range(view).unwrap();
        self.data.drain(range);
        self.graph.clear(view).unwrap();
    }

    /// A fail-fast cursor over `view`.
    pub fn cursor(&self, view: ViewId) -> Cursor {
        Cursor {
            stamp: self.graph.stamp(view).unwrap(),
            pos: 0,
        }
    }
}

/// Walks a view one element at a time, failing once the graph changes.
pub struct Cursor {
    stamp: Stamp,
    pos: usize,
}

impl Cursor {
    pub fn next(&mut self, list: &IntList) -> Result<Option<i64>, ViewError> {
        list.graph.check(&self.stamp)?;
        let view = self.stamp.view();
        if self.pos >= list.graph.len(view)? {
            return Ok(None);
        }
        let value = list.get(view, self.pos);
        self.pos += 1;
        Ok(Some(value))
    }

    /// Remove the element last returned, through the cursor's own view.
    pub fn remove(&mut self, list: &mut IntList) -> Result<i64, ViewError> {
        list.graph.check(&self.stamp)?;
        self.pos -= 1;
        let value = list.remove(self.stamp.view(), self.pos);
        self.stamp.refresh(&list.graph)?;
        Ok(value)
    }
}

// =============================================================================
// Bounds oracle
// =============================================================================

/// Expected bound of every view after one edit, computed from the views'
/// relation to the edited view instead of by walking the graph.
///
/// The edited view and its ancestors grow or shrink in place; everything else
/// shifts by `delta` where the edit lies strictly before a bound.
pub fn expected_bounds<S: Clone>(
    graph: &ViewGraph<S>,
    edited: ViewId,
    index: usize,
    delta: isize,
) -> Vec<Bound> {
    let mut containing = vec![false; graph.view_count()];
    let mut current = Some(edited);
    while let Some(id) = current {
        containing[id.raw() as usize] = true;
        current = graph.parent(id).unwrap();
    }

    (0..graph.view_count())
        .map(|i| {
            let bound = graph.bound(ViewId::from_raw(i as u32)).unwrap();
            let Bound::Range { from, to } = bound else {
                return Bound::Root;
            };
            let moved = |b: usize| b.saturating_add_signed(delta);
            if delta == 0 {
                bound
            } else if containing[i] {
                Bound::Range { from, to: if index <= to { moved(to) } else { to } }
            } else {
                Bound::Range {
                    from: if index < from { moved(from) } else { from },
                    to: if index < to { moved(to) } else { to },
                }
            }
        })
        .collect()
}

pub fn all_bounds<S: Clone>(graph: &ViewGraph<S>) -> Vec<Bound> {
    (0..graph.view_count())
        .map(|i| graph.bound(ViewId::from_raw(i as u32)).unwrap())
        .collect()
}

pub fn all_versions<S: Clone>(graph: &ViewGraph<S>) -> Vec<u64> {
    (0..graph.view_count())
        .map(|i| graph.version(ViewId::from_raw(i as u32)).unwrap())
        .collect()
}
