//! AFL fuzz harness for view propagation
//!
//! This harness checks, after every edit:
//! 1. Placement: each view's bounds match what its relation to the edited view
//!    says (the edited view and its ancestors grow in place, everything else
//!    shifts where the edit lies before a bound)
//! 2. Versions: every view's version moved by exactly one
//! 3. Size: every view agrees on the new store size
//!
//! Model: a random forest of views carved inside their parents, edited by
//! insertions, removals, replacements and clears made inside the editing view.

use afl::fuzz;
use viewgraph::Bound;
use viewgraph::ViewGraph;
use viewgraph::ViewId;

/// Operation types the fuzzer can generate
#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    /// Carve a view out of an existing one
    Carve { parent: u8, start_frac: u8, len_frac: u8 },
    /// Insert elements through a view
    Insert { view: u8, pos_frac: u8, count: u8 },
    /// Remove elements through a view
    Remove { view: u8, pos_frac: u8, count: u8 },
    /// Replace an element through a view
    Replace { view: u8, pos_frac: u8 },
    /// Clear a view
    Clear { view: u8 },
}

impl FuzzOp {
    fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        if bytes.is_empty() {
            return None;
        }

        let op_type = bytes[0] % 5;
        let rest = &bytes[1..];

        match op_type {
            0 if rest.len() >= 3 => {
                let op = FuzzOp::Carve { parent: rest[0], start_frac: rest[1], len_frac: rest[2] };
                Some((op, &rest[3..]))
            }
            1 if rest.len() >= 3 => {
                let op = FuzzOp::Insert {
                    view: rest[0],
                    pos_frac: rest[1],
                    count: (rest[2] % 16).saturating_add(1), // 1-16 elements
                };
                Some((op, &rest[3..]))
            }
            2 if rest.len() >= 3 => {
                let op = FuzzOp::Remove {
                    view: rest[0],
                    pos_frac: rest[1],
                    count: (rest[2] % 8).saturating_add(1), // 1-8 elements
                };
                Some((op, &rest[3..]))
            }
            3 if rest.len() >= 2 => {
                let op = FuzzOp::Replace { view: rest[0], pos_frac: rest[1] };
                Some((op, &rest[2..]))
            }
            4 if !rest.is_empty() => Some((FuzzOp::Clear { view: rest[0] }, &rest[1..])),
            _ => None,
        }
    }
}

fn frac(f: u8, len: usize) -> usize {
    (f as usize * len / 256).min(len)
}

fn pick(graph: &ViewGraph<()>, n: u8) -> ViewId {
    ViewId::from_raw(n as u32 % graph.view_count() as u32)
}

/// Resolve an op to `(view, index, delta)`, carving views as a side effect.
fn resolve(graph: &mut ViewGraph<()>, op: FuzzOp) -> Option<(ViewId, usize, isize)> {
    let (view, pos_frac) = match op {
        FuzzOp::Carve { parent, start_frac, len_frac } => {
            let parent = pick(graph, parent);
            let len = graph.len(parent).ok()?;
            let from = graph.from_index(parent).ok()? + frac(start_frac, len);
            let to = from + frac(len_frac, graph.to_index(parent).ok()? - from);
            graph.create_sub_view(parent, from, to).ok()?;
            return None;
        }
        FuzzOp::Insert { view, pos_frac, .. }
        | FuzzOp::Remove { view, pos_frac, .. }
        | FuzzOp::Replace { view, pos_frac } => (pick(graph, view), pos_frac),
        FuzzOp::Clear { view } => (pick(graph, view), 0),
    };

    let len = graph.len(view).ok()?;
    let start = graph.from_index(view).ok()?;
    match op {
        FuzzOp::Insert { count, .. } => Some((view, start + frac(pos_frac, len), count as isize)),
        FuzzOp::Remove { count, .. } if len > 0 => {
            let offset = frac(pos_frac, len - 1);
            let count = (count as usize).min(len - offset);
            Some((view, start + offset, -(count as isize)))
        }
        FuzzOp::Replace { .. } if len > 0 => Some((view, start + frac(pos_frac, len - 1), 0)),
        FuzzOp::Clear { .. } => Some((view, start, -(len as isize))),
        _ => None,
    }
}

/// Bounds every view should hold after the edit.
fn expected(graph: &ViewGraph<()>, edited: ViewId, index: usize, delta: isize) -> Vec<Bound> {
    let mut containing = vec![false; graph.view_count()];
    let mut current = Some(edited);
    while let Some(id) = current {
        containing[id.raw() as usize] = true;
        current = graph.parent(id).unwrap();
    }

    let moved = |b: usize| b.saturating_add_signed(delta);
    (0..graph.view_count())
        .map(|i| match graph.bound(ViewId::from_raw(i as u32)).unwrap() {
            Bound::Root => Bound::Root,
            Bound::Range { from, to } if containing[i] => Bound::Range {
                from,
                to: if delta != 0 && index <= to { moved(to) } else { to },
            },
            Bound::Range { from, to } => Bound::Range {
                from: if delta != 0 && index < from { moved(from) } else { from },
                to: if delta != 0 && index < to { moved(to) } else { to },
            },
        })
        .collect()
}

fn main() {
    fuzz!(|data: &[u8]| {
        let size = data.first().copied().unwrap_or(0) as usize;
        let mut graph = ViewGraph::with_size((), size);
        let mut remaining = data.get(1..).unwrap_or(&[]);

        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            remaining = rest;

            let Some((view, index, delta)) = resolve(&mut graph, op) else {
                continue;
            };

            let want = expected(&graph, view, index, delta);
            let versions: Vec<u64> = (0..graph.view_count())
                .map(|i| graph.version(ViewId::from_raw(i as u32)).unwrap())
                .collect();
            let new_size = graph.size(view).unwrap().saturating_add_signed(delta);

            graph
                .propagate(view, index, delta)
                .unwrap_or_else(|e| panic!("{:?} rejected: {}", op, e));

            for (i, (want, old_version)) in want.iter().zip(&versions).enumerate() {
                let id = ViewId::from_raw(i as u32);
                assert_eq!(graph.bound(id).unwrap(), *want, "Placement failure at {} after {:?}", id, op);
                assert_eq!(graph.version(id).unwrap(), old_version + 1, "Version failure at {}", id);
                assert_eq!(graph.size(id).unwrap(), new_size, "Size failure at {}", id);
            }
        }
    });
}
