//! Errors surfaced by the view graph.
//!
//! Every variant is a broken contract: either the caller handed in something
//! the graph cannot accept, or the graph observed a state it should never
//! reach. Nothing here is retried or recovered internally.

use crate::node::ViewId;

/// Errors returned by [`ViewGraph`](crate::ViewGraph) and
/// [`SharedViewGraph`](crate::SharedViewGraph).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// The handle does not name a view in this graph.
    #[error("unknown view {0}")]
    UnknownView(ViewId),

    /// The arena cannot address another view.
    #[error("view arena is full ({0} views)")]
    ArenaFull(usize),

    /// An edit position past the end of the backing store.
    #[error("edit index {index} is outside 0..={size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// A removal that runs past the end of the backing store.
    #[error("removing {count} elements at {index} runs past size {size}")]
    RemovalOutOfRange {
        index: usize,
        count: usize,
        size: usize,
    },

    /// An edit whose size change cannot be represented: an insertion past
    /// `usize::MAX`, or a clear of more than `isize::MAX` elements.
    #[error("editing {count} elements overflows store size {size}")]
    SizeOverflow { size: usize, count: usize },

    /// A view whose upper bound fell below its lower bound.
    #[error("view {view} has negative length: from {from} > to {to}")]
    NegativeLength { view: ViewId, from: usize, to: usize },

    /// A version stamp no longer matches its view.
    #[error("view {view} was modified: expected version {expected}, found {found}")]
    Stale {
        view: ViewId,
        expected: u64,
        found: u64,
    },

    /// The graph failed a structural consistency check.
    #[error("invariant violated at view {view}: {reason}")]
    InvariantViolation { view: ViewId, reason: String },

    /// A writer panicked while holding the graph lock.
    #[error("view graph lock poisoned")]
    Poisoned,
}

/// Result type for view graph operations.
pub type Result<T> = std::result::Result<T, ViewError>;
