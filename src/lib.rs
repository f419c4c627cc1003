//! Viewgraph - range views over one shared backing store.
//!
//! A list-like container can hand out any number of live sub-lists that all
//! read from the same storage. When an element is inserted or removed through
//! any of them, every other sub-list has to move its bounds so it keeps
//! describing the same elements. This crate keeps that graph of views
//! consistent; the container keeps the elements.
//!
//! # Quick Start
//!
//! ```
//! use viewgraph::ViewGraph;
//!
//! // A store of 10 elements, with two sub-lists side by side.
//! let mut graph = ViewGraph::with_size((), 10);
//! let root = graph.root();
//! let a = graph.create_sub_view(root, 2, 6).unwrap();
//! let b = graph.create_sub_view(root, 6, 10).unwrap();
//!
//! // The container inserted one element at absolute index 5.
//! graph.propagate(root, 5, 1).unwrap();
//!
//! assert_eq!(graph.range(a).unwrap(), 2..7);
//! assert_eq!(graph.range(b).unwrap(), 7..11);
//! assert_eq!(graph.len(root).unwrap(), 11);
//! ```
//!
//! # Contract
//!
//! - The container edits its store first, then calls
//!   [`ViewGraph::propagate`] exactly once per edit with the absolute index
//!   and the signed change in size. A delta of zero marks an in-place
//!   replacement.
//! - Bounds are never written directly; propagation is the only way they
//!   move.
//! - Views are never freed. Every view ever carved keeps receiving
//!   propagation.
//! - Every propagation bumps the version of every view. Iterators take a
//!   [`Stamp`] and call [`ViewGraph::check`] to fail fast.
//! - One edit at a time per graph. [`SharedViewGraph`] enforces this with a
//!   lock when the graph is shared between threads.

#[macro_use]
mod macros;

pub mod bound;
pub mod error;
pub mod graph;
pub mod node;
pub mod ring;
pub mod shared;
pub mod stamp;

pub use bound::Bound;
pub use error::Result;
pub use error::ViewError;
pub use graph::ViewGraph;
pub use node::ViewId;
pub use node::ViewNode;
pub use ring::Ring;
pub use shared::SharedViewGraph;
pub use stamp::Stamp;
