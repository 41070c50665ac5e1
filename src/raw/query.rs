use core::borrow::Borrow;
use core::cmp::Ordering;

use rand::Rng;

use super::handle::Handle;
use super::node::Side;
use super::raw_wb_tree::RawWBTree;

impl<T> RawWBTree<T> {
    /// Number of items strictly on `side` of `key` (`Side::Left` counts smaller
    /// items, `Side::Right` larger ones).
    ///
    /// Walks a single root-to-boundary path. Whenever the walk moves away from
    /// `side`, the node it leaves and its whole subtree on `side` are counted
    /// from the cached size without being visited.
    pub(crate) fn count_beyond<Q>(&self, key: &Q, side: Side) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let toward = ordering_toward(side);
        let mut count = 0;
        let mut current = self.root();
        while let Some(handle) = current {
            let node = self.node(handle);
            let ordering = node.item().borrow().cmp(key);
            if ordering == Ordering::Equal {
                return count + node.child_size(side);
            }
            if ordering == toward {
                count += node.child_size(side) + 1;
                current = node.child(side.opposite());
            } else {
                current = node.child(side);
            }
        }
        count
    }

    /// The closest item strictly on `side` of `key`: the predecessor for
    /// `Side::Left`, the successor for `Side::Right`.
    pub(crate) fn neighbour<Q>(&self, key: &Q, side: Side) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let toward = ordering_toward(side);
        let mut best = None;
        let mut current = self.root();
        while let Some(handle) = current {
            let node = self.node(handle);
            if node.item().borrow().cmp(key) == toward {
                best = Some(handle);
                current = node.child(side.opposite());
            } else {
                current = node.child(side);
            }
        }
        best
    }

    /// The node holding the item at zero-based `rank` in ascending order.
    pub(crate) fn select(&self, rank: usize) -> Option<Handle> {
        if rank >= self.len() {
            return None;
        }

        let mut remaining = rank;
        let mut current = self.root();
        while let Some(handle) = current {
            let node = self.node(handle);
            match remaining.cmp(&node.left_size()) {
                Ordering::Less => current = node.left(),
                Ordering::Equal => return Some(handle),
                Ordering::Greater => {
                    remaining -= node.left_size() + 1;
                    current = node.right();
                }
            }
        }
        None
    }

    /// Zero-based rank of the item comparing equal to `key`.
    pub(crate) fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut rank = 0;
        let mut current = self.root();
        while let Some(handle) = current {
            let node = self.node(handle);
            match node.item().borrow().cmp(key) {
                Ordering::Greater => current = node.left(),
                Ordering::Equal => return Some(rank + node.left_size()),
                Ordering::Less => {
                    rank += node.left_size() + 1;
                    current = node.right();
                }
            }
        }
        None
    }

    /// Picks a node with probability `1 / len`.
    ///
    /// One rank is drawn over the whole tree and resolved by [`select`](Self::select):
    /// at each node the rank lands in the left subtree, on the node itself, or in
    /// the right subtree in proportion to their cached sizes.
    pub(crate) fn random<R>(&self, rng: &mut R) -> Option<Handle>
    where
        R: Rng + ?Sized,
    {
        if self.is_empty() {
            return None;
        }
        self.select(rng.random_range(0..self.len()))
    }
}

/// How an item on `side` of a key compares to that key.
const fn ordering_toward(side: Side) -> Ordering {
    match side {
        Side::Left => Ordering::Less,
        Side::Right => Ordering::Greater,
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::cast_sign_loss)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use alloc::vec::Vec;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn tree_of(items: &[i32]) -> RawWBTree<i32> {
        let mut tree = RawWBTree::new();
        for &item in items {
            tree.insert(item).unwrap();
        }
        tree
    }

    #[test]
    fn scenario_counts_and_neighbours() {
        let tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        assert_eq!(tree.count_beyond(&7, Side::Left), 4);
        assert_eq!(tree.count_beyond(&7, Side::Right), 2);
        assert_eq!(tree.count_beyond(&6, Side::Left), 4);
        assert_eq!(tree.count_beyond(&0, Side::Left), 0);
        assert_eq!(tree.count_beyond(&10, Side::Left), 7);

        let item = |h: Option<Handle>| h.map(|h| *tree.node(h).item());
        assert_eq!(item(tree.neighbour(&4, Side::Right)), Some(5));
        assert_eq!(item(tree.neighbour(&4, Side::Left)), Some(3));
        assert_eq!(item(tree.neighbour(&6, Side::Left)), Some(5));
        assert_eq!(item(tree.neighbour(&9, Side::Right)), None);
        assert_eq!(item(tree.neighbour(&1, Side::Left)), None);
    }

    #[test]
    fn empty_tree_queries() {
        let tree: RawWBTree<i32> = RawWBTree::new();
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(tree.count_beyond(&1, Side::Left), 0);
        assert_eq!(tree.neighbour(&1, Side::Right), None);
        assert_eq!(tree.select(0), None);
        assert_eq!(tree.rank_of(&1), None);
        assert_eq!(tree.random(&mut rng), None);
    }

    #[test]
    fn random_reaches_every_node() {
        let tree = RawWBTree::from_sorted((0..16).collect());
        let mut rng = SmallRng::seed_from_u64(42);
        let mut seen = [false; 16];
        for _ in 0..2000 {
            let handle = tree.random(&mut rng).unwrap();
            seen[*tree.node(handle).item() as usize] = true;
        }
        assert!(seen.iter().all(|&hit| hit));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn counts_match_sorted_model(items in prop::collection::vec(-500i32..500, 0..300), probes in prop::collection::vec(-550i32..550, 1..50)) {
            let unique: BTreeSet<i32> = items.into_iter().collect();
            let sorted: Vec<i32> = unique.into_iter().collect();
            let tree = tree_of(&sorted);

            for probe in probes {
                let less = tree.count_beyond(&probe, Side::Left);
                let greater = tree.count_beyond(&probe, Side::Right);
                prop_assert_eq!(less, sorted.iter().filter(|&&x| x < probe).count());
                prop_assert_eq!(greater, sorted.iter().filter(|&&x| x > probe).count());
                prop_assert_eq!(less + greater + usize::from(tree.search(&probe).is_some()), tree.len());

                let predecessor = tree.neighbour(&probe, Side::Left).map(|h| *tree.node(h).item());
                let successor = tree.neighbour(&probe, Side::Right).map(|h| *tree.node(h).item());
                prop_assert_eq!(predecessor, sorted.iter().rev().find(|&&x| x < probe).copied());
                prop_assert_eq!(successor, sorted.iter().find(|&&x| x > probe).copied());
            }

            for (rank, item) in sorted.iter().enumerate() {
                prop_assert_eq!(tree.select(rank).map(|h| tree.node(h).item()), Some(item));
                prop_assert_eq!(tree.rank_of(item), Some(rank));
            }
            prop_assert_eq!(tree.select(sorted.len()), None);
        }
    }
}
