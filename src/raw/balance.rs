//! Weight-balance policy.
//!
//! A node is balanced when neither child subtree outweighs the other by more
//! than [`DELTA`], where a subtree's weight is its population plus one. When a
//! node is out of balance, [`GAMMA`] decides whether promoting the heavy child
//! (a single rotation) is enough, or whether the heavy child leans back toward
//! the light side and its inner grandchild has to be promoted instead (a double,
//! zig-zag rotation).
//!
//! `(DELTA, GAMMA) = (3, 2)` is the only integer pair for which one corrective
//! rotation per ancestor restores balance after any single insertion or
//! deletion. It caps every child at 3/4 of its parent's weight, so a tree with
//! `n` items is at most `1 + log_{4/3}((n + 1) / 2)` levels deep.

use super::node::Side;

pub(crate) const DELTA: usize = 3;
pub(crate) const GAMMA: usize = 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Balance {
    Balanced,
    /// The child subtree on this side is too heavy.
    Heavy(Side),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Rotation {
    /// Promote the heavy child.
    Single,
    /// Promote the heavy child's inner child over both.
    Double,
}

#[inline]
const fn weight(size: usize) -> usize {
    size + 1
}

/// Classifies a node from its left and right subtree sizes.
#[inline]
pub(crate) const fn classify(left_size: usize, right_size: usize) -> Balance {
    if DELTA * weight(left_size) < weight(right_size) {
        Balance::Heavy(Side::Right)
    } else if DELTA * weight(right_size) < weight(left_size) {
        Balance::Heavy(Side::Left)
    } else {
        Balance::Balanced
    }
}

/// Picks the correction for an out-of-balance node from the sizes of its heavy
/// child's subtrees. `inner` faces the light side, `outer` faces away from it.
#[inline]
pub(crate) const fn rotation(inner_size: usize, outer_size: usize) -> Rotation {
    if weight(inner_size) < GAMMA * weight(outer_size) {
        Rotation::Single
    } else {
        Rotation::Double
    }
}
