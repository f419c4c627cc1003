//! Upper bounds and the clamped shift rule.
//!
//! The root view tracks the live size of the store, so its upper bound is not
//! a number but a tag. Every other view carries an absolute `[from, to)`.
//!
//! # Shifting
//!
//! A structural edit at absolute index `i` with signed delta `d` moves the
//! bounds of a view in one of two ways:
//!
//! - Views that do not contain the edit (`shift_following`): a bound moves by
//!   `d` when `i < bound`.
//! - The edited view and its ancestors (`shift_containing`): only `to` moves,
//!   when `i <= to`.
//!
//! Both use [`shift_clamped`], which never lets a bound go below zero. A
//! removal of `|d|` elements from a bound smaller than `|d|` lands on zero.
//! Growth is never clamped; `ViewGraph::propagate` rejects an insertion
//! whose new store size overflows before any bound moves.

/// The upper bound of a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bound {
    /// The whole store: `[0, size)`.
    Root,
    /// A sub-range `[from, to)` in absolute store indices.
    Range { from: usize, to: usize },
}

impl Bound {
    /// Inclusive lower bound. Always 0 for the root.
    #[inline]
    pub fn from_index(&self) -> usize {
        return match self {
            Bound::Root => 0,
            Bound::Range { from, .. } => *from,
        };
    }

    /// Exclusive upper bound, resolving the root against `size`.
    #[inline]
    pub fn to_index(&self, size: usize) -> usize {
        return match self {
            Bound::Root => size,
            Bound::Range { to, .. } => *to,
        };
    }

    /// Length of the view, or `None` if `to < from`.
    #[inline]
    pub fn len(&self, size: usize) -> Option<usize> {
        return self.to_index(size).checked_sub(self.from_index());
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        return matches!(self, Bound::Root);
    }

    /// Shift a view that does not contain the edit.
    pub fn shift_following(&mut self, index: usize, delta: isize) {
        if delta == 0 {
            return;
        }
        if let Bound::Range { from, to } = self {
            if index < *from {
                *from = shift_clamped(*from, delta);
            }
            if index < *to {
                *to = shift_clamped(*to, delta);
            }
        }
    }

    /// Shift the edited view or one of its ancestors. The root is exempt.
    pub fn shift_containing(&mut self, index: usize, delta: isize) {
        if delta == 0 {
            return;
        }
        if let Bound::Range { to, .. } = self {
            if index <= *to {
                *to = shift_clamped(*to, delta);
            }
        }
    }
}

/// Move `bound` by `delta`, stopping at zero.
///
/// Panics if growth overflows `usize`, which only a bound already past the
/// end of the store can do.
#[inline]
pub fn shift_clamped(bound: usize, delta: isize) -> usize {
    let count = delta.unsigned_abs();
    if delta < 0 {
        return bound.saturating_sub(count);
    }
    return match bound.checked_add(count) {
        Some(shifted) => shifted,
        None => panic!("bound {} shifted by {} overflows", bound, delta),
    };
}
