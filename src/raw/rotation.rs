use tracing::trace;

use super::balance::{self, Balance, Rotation};
use super::handle::Handle;
use super::node::Side;
use super::raw_wb_tree::RawWBTree;

impl<T> RawWBTree<T> {
    /// Promotes the child on `heavy` side of `handle` into `handle`'s position and
    /// returns it. The promoted child's inner subtree is re-hung under `handle`.
    ///
    /// Only the two rotated nodes change size, and both new counts follow from
    /// the counts before the rotation.
    pub(super) fn rotate(&mut self, handle: Handle, heavy: Side) -> Handle {
        let light = heavy.opposite();
        let node = self.node(handle);
        let parent = node.parent();
        let pivot = node.child(heavy).expect("`RawWBTree::rotate()` - heavy child is missing!");
        let inner = self.node(pivot).child(light);
        let inner_size = self.node(pivot).child_size(light);

        let demoted = self.node_mut(handle);
        demoted.set_child(heavy, inner);
        demoted.set_child_size(heavy, inner_size);
        demoted.set_parent(Some(pivot));
        let demoted_size = demoted.subtree_size();

        if let Some(inner) = inner {
            self.node_mut(inner).set_parent(Some(handle));
        }

        // The parent still points at `handle` until this call.
        self.replace_child(parent, handle, Some(pivot));

        let promoted = self.node_mut(pivot);
        promoted.set_child(light, Some(handle));
        promoted.set_child_size(light, demoted_size);
        promoted.set_parent(parent);

        trace!(?heavy, demoted_size, promoted_size = self.node(pivot).subtree_size(), "single rotation");
        pivot
    }

    /// Zig-zag correction: lifts the heavy child's inner grandchild above both
    /// the heavy child and `handle`, and returns it.
    pub(super) fn rotate_double(&mut self, handle: Handle, heavy: Side) -> Handle {
        let child = self.node(handle).child(heavy).expect("`RawWBTree::rotate_double()` - heavy child is missing!");
        self.rotate(child, heavy.opposite());
        let top = self.rotate(handle, heavy);
        trace!(?heavy, size = self.node(top).subtree_size(), "double rotation");
        top
    }

    /// Restores the weight balance of `handle` if its subtree sizes violate it
    /// and returns the node now rooting that subtree.
    pub(super) fn rebalance(&mut self, handle: Handle) -> Handle {
        let node = self.node(handle);
        match balance::classify(node.left_size(), node.right_size()) {
            Balance::Balanced => handle,
            Balance::Heavy(heavy) => {
                let child = node.child(heavy).expect("`RawWBTree::rebalance()` - heavy child is missing!");
                let child = self.node(child);
                match balance::rotation(child.child_size(heavy.opposite()), child.child_size(heavy)) {
                    Rotation::Single => self.rotate(handle, heavy),
                    Rotation::Double => self.rotate_double(handle, heavy),
                }
            }
        }
    }

    /// Walks from `start` to the root, correcting each ancestor once.
    ///
    /// Sizes along the path must already reflect the mutation. A rotation moves
    /// the walk's position to the node promoted in its place.
    pub(super) fn rebalance_upward(&mut self, start: Option<Handle>) {
        let mut current = start;
        while let Some(handle) = current {
            let top = self.rebalance(handle);
            current = self.node(top).parent();
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn in_order(tree: &RawWBTree<i32>) -> Vec<i32> {
        tree.sorted_handles().into_iter().map(|h| *tree.node(h).item()).collect()
    }

    #[test]
    fn single_rotation_preserves_order_and_sizes() {
        // Balanced seven node tree rooted at 4.
        let mut tree = RawWBTree::from_sorted((1..=7).collect());
        let root = tree.root().unwrap();
        let promoted = tree.rotate(root, Side::Right);

        assert_eq!(tree.root(), Some(promoted));
        assert_eq!(*tree.node(promoted).item(), 6);
        assert_eq!(tree.node(promoted).left_size(), 5);
        assert_eq!(tree.node(promoted).right_size(), 1);
        assert_eq!(tree.node(root).left_size(), 3);
        assert_eq!(tree.node(root).right_size(), 1);
        assert_eq!(tree.node(root).parent(), Some(promoted));
        assert_eq!(in_order(&tree), [1, 2, 3, 4, 5, 6, 7]);
        tree.validate_links();
    }

    #[test]
    fn rotations_are_inverse() {
        let mut tree = RawWBTree::from_sorted((1..=15).collect());
        let root = tree.root().unwrap();
        let promoted = tree.rotate(root, Side::Left);
        let restored = tree.rotate(promoted, Side::Right);

        assert_eq!(restored, root);
        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.node(root).left_size(), 7);
        assert_eq!(tree.node(root).right_size(), 7);
        tree.validate_invariants();
    }

    #[test]
    fn double_rotation_lifts_inner_grandchild() {
        // Reshape 1 <- 2 -> 3 into the zig-zag 1 -> 3 -> 2.
        let mut tree = RawWBTree::from_sorted([1, 2, 3].into());
        let middle = tree.root().unwrap();
        let top = tree.rotate(middle, Side::Left);
        tree.rotate(middle, Side::Right);
        assert_eq!(*tree.node(top).item(), 1);
        assert_eq!(in_order(&tree), [1, 2, 3]);

        let lifted = tree.rotate_double(top, Side::Right);
        assert_eq!(lifted, middle);
        assert_eq!(tree.root(), Some(middle));
        assert_eq!(tree.node(lifted).left_size(), 1);
        assert_eq!(tree.node(lifted).right_size(), 1);
        tree.validate_invariants();
    }

    #[test]
    fn rebalance_leaves_balanced_node_alone() {
        let mut tree = RawWBTree::from_sorted((0..31).collect());
        let root = tree.root().unwrap();
        assert_eq!(tree.rebalance(root), root);
    }
}
