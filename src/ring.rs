//! Iteration over a ring of sibling views.

use crate::graph::ViewGraph;
use crate::node::ViewId;

/// Walks a sibling ring once, starting from a parent's `child` entry point.
///
/// Yields nothing for a view without children.
pub struct Ring<'a, S> {
    graph: &'a ViewGraph<S>,
    first: Option<ViewId>,
    next: Option<ViewId>,
}

impl<'a, S> Ring<'a, S> {
    pub(crate) fn new(graph: &'a ViewGraph<S>, first: Option<ViewId>) -> Ring<'a, S> {
        return Ring {
            graph,
            first,
            next: first,
        };
    }
}

impl<S> Iterator for Ring<'_, S> {
    type Item = ViewId;

    fn next(&mut self) -> Option<ViewId> {
        let current = self.next?;
        let sibling = self.graph.node(current).sibling;
        self.next = if Some(sibling) == self.first {
            None
        } else {
            Some(sibling)
        };
        return Some(current);
    }
}
