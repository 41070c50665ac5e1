use core::borrow::Borrow;
use core::ops::{Bound, Index, RangeBounds};

use rand::Rng;

use super::WBTree;
use super::traversal::Range;
use crate::raw::Side;
use crate::{Error, Rank, Result};

/// Panics if `range` is decreasing, or empty with both ends excluded and equal.
fn validate_range_bounds<T, R>(range: &R)
where
    T: ?Sized + Ord,
    R: RangeBounds<T>,
{
    if let (Bound::Included(start) | Bound::Excluded(start), Bound::Included(end) | Bound::Excluded(end)) =
        (range.start_bound(), range.end_bound())
    {
        let valid =
            if matches!(range.start_bound(), Bound::Excluded(_)) && matches!(range.end_bound(), Bound::Excluded(_)) {
                start < end
            } else {
                start <= end
            };
        assert!(valid, "range start is greater than range end in WBTree");
    }
}

impl<T: Ord> WBTree<T> {
    /// Returns how many stored items are strictly less than `key`. `key` need
    /// not be present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_toolkit::WBTree;
    ///
    /// let tree = WBTree::from([1, 3, 4, 5, 7, 8, 9]);
    /// assert_eq!(tree.count_less_than(&7), 4);
    /// assert_eq!(tree.count_less_than(&6), 4);
    /// assert_eq!(tree.count_less_than(&0), 0);
    /// ```
    #[must_use]
    pub fn count_less_than<Q>(&self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.count_beyond(key, Side::Left)
    }

    /// Returns how many stored items are strictly greater than `key`. `key`
    /// need not be present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_toolkit::WBTree;
    ///
    /// let tree = WBTree::from([1, 3, 4, 5, 7, 8, 9]);
    /// assert_eq!(tree.count_greater_than(&7), 2);
    /// assert_eq!(tree.count_greater_than(&9), 0);
    /// ```
    #[must_use]
    pub fn count_greater_than<Q>(&self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.count_beyond(key, Side::Right)
    }

    /// Returns the largest item strictly less than `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_toolkit::WBTree;
    ///
    /// let tree = WBTree::from([1, 3, 4, 5, 7, 8, 9]);
    /// assert_eq!(tree.next_less_than(&4), Some(&3));
    /// assert_eq!(tree.next_less_than(&6), Some(&5));
    /// assert_eq!(tree.next_less_than(&1), None);
    /// ```
    #[must_use]
    pub fn next_less_than<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.neighbour(key, Side::Left).map(|handle| self.raw.node(handle).item())
    }

    /// Returns the smallest item strictly greater than `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_toolkit::WBTree;
    ///
    /// let tree = WBTree::from([1, 3, 4, 5, 7, 8, 9]);
    /// assert_eq!(tree.next_greater_than(&4), Some(&5));
    /// assert_eq!(tree.next_greater_than(&9), None);
    /// ```
    #[must_use]
    pub fn next_greater_than<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.neighbour(key, Side::Right).map(|handle| self.raw.node(handle).item())
    }

    /// Iterates, in ascending order, over every item strictly less than `key`.
    ///
    /// The iterator knows its exact length up front and can be walked from
    /// either end.
    ///
    /// # Complexity
    ///
    /// O(log n) to create, amortized O(1) per item.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_toolkit::WBTree;
    ///
    /// let tree = WBTree::from([1, 3, 4, 5, 7, 8, 9]);
    /// let below: Vec<_> = tree.all_less_than(&5).copied().collect();
    /// assert_eq!(below, [1, 3, 4]);
    /// assert_eq!(tree.all_less_than(&5).len(), 3);
    /// ```
    pub fn all_less_than<Q>(&self, key: &Q) -> Range<'_, T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.range((Bound::Unbounded, Bound::Excluded(key)))
    }

    /// Iterates, in ascending order, over every item strictly greater than `key`.
    ///
    /// # Complexity
    ///
    /// O(log n) to create, amortized O(1) per item.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_toolkit::WBTree;
    ///
    /// let tree = WBTree::from([1, 3, 4, 5, 7, 8, 9]);
    /// let above: Vec<_> = tree.all_greater_than(&5).rev().copied().collect();
    /// assert_eq!(above, [9, 8, 7]);
    /// ```
    pub fn all_greater_than<Q>(&self, key: &Q) -> Range<'_, T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.range((Bound::Excluded(key), Bound::Unbounded))
    }

    /// Iterates, in ascending order, over the items within `range`.
    ///
    /// # Panics
    ///
    /// Panics if range `start > end`, or if `start == end` and both bounds are
    /// `Excluded`.
    ///
    /// # Complexity
    ///
    /// O(log n) to create, amortized O(1) per item.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_toolkit::WBTree;
    ///
    /// let tree: WBTree<u32> = (0..100).collect();
    /// let window: Vec<_> = tree.range(10..15).copied().collect();
    /// assert_eq!(window, [10, 11, 12, 13, 14]);
    /// assert_eq!(tree.range(90..).len(), 10);
    /// ```
    pub fn range<Q, R>(&self, range: R) -> Range<'_, T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
        R: RangeBounds<Q>,
    {
        validate_range_bounds(&range);
        let (start, end) = (range.start_bound(), range.end_bound());

        let before = match start {
            Bound::Unbounded => 0,
            Bound::Included(key) => self.raw.count_beyond(key, Side::Left),
            Bound::Excluded(key) => self.len() - self.raw.count_beyond(key, Side::Right),
        };
        let after = match end {
            Bound::Unbounded => 0,
            Bound::Included(key) => self.raw.count_beyond(key, Side::Right),
            Bound::Excluded(key) => self.len() - self.raw.count_beyond(key, Side::Left),
        };

        let remaining = self.len() - before - after;
        Range::new(&self.raw, start, end, remaining)
    }

    /// Returns the zero-based rank of the item comparing equal to `key`, or
    /// `None` if it is not present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_toolkit::WBTree;
    ///
    /// let tree = WBTree::from([10, 20]);
    /// assert_eq!(tree.rank_of(&20), Some(1));
    /// assert_eq!(tree.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank_of(key)
    }
}

impl<T> WBTree<T> {
    /// Returns the item at position `rank` in ascending order, or `None` if
    /// `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_toolkit::WBTree;
    ///
    /// let tree = WBTree::from([10, 20, 30]);
    /// assert_eq!(tree.get_by_rank(1), Some(&20));
    /// assert!(tree.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&T> {
        self.raw.select(rank).map(|handle| self.raw.node(handle).item())
    }

    /// Returns an item chosen uniformly at random using `rng`.
    ///
    /// A single rank is drawn and resolved with the cached subtree sizes, so
    /// each item is returned with probability `1 / len`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] if the tree is empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use rand::rngs::SmallRng;
    /// use wabi_toolkit::WBTree;
    ///
    /// let tree = WBTree::from([1, 2, 3]);
    /// let mut rng = SmallRng::seed_from_u64(1);
    /// let item = tree.random_item_with(&mut rng)?;
    /// assert!(tree.contains(item));
    /// # Ok::<(), wabi_toolkit::Error>(())
    /// ```
    pub fn random_item_with<R>(&self, rng: &mut R) -> Result<&T>
    where
        R: Rng + ?Sized,
    {
        let handle = self.raw.random(rng).ok_or(Error::EmptyCollection)?;
        Ok(self.raw.node(handle).item())
    }

    /// Returns an item chosen uniformly at random using the thread-local RNG.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] if the tree is empty.
    #[cfg(feature = "std")]
    pub fn random_item(&self) -> Result<&T> {
        self.random_item_with(&mut rand::rng())
    }
}

/// Indexes into the tree by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use wabi_toolkit::{Rank, WBTree};
///
/// let tree = WBTree::from([10, 20, 30]);
/// assert_eq!(tree[Rank(1)], 20);
/// ```
impl<T> Index<Rank> for WBTree<T> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).expect("index out of bounds")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn scenario() -> WBTree<i32> {
        WBTree::from([5, 3, 8, 1, 4, 7, 9])
    }

    #[test]
    fn range_bounds_select_expected_items() {
        let tree = scenario();
        let collect = |range: Range<'_, i32>| range.copied().collect::<Vec<_>>();
        assert_eq!(collect(tree.range(3..=7)), [3, 4, 5, 7]);
        assert_eq!(collect(tree.range((Bound::Excluded(3), Bound::Excluded(7)))), [4, 5]);
        assert!(collect(tree.range(6..7)).is_empty());
        assert_eq!(collect(tree.range::<i32, _>(..)), [1, 3, 4, 5, 7, 8, 9]);
        assert_eq!(tree.range((Bound::Excluded(5), Bound::Included(5))).len(), 0);
    }

    #[test]
    #[should_panic(expected = "range start is greater than range end in WBTree")]
    fn decreasing_range_panics() {
        let _ = scenario().range(7..3);
    }

    #[test]
    #[should_panic(expected = "range start is greater than range end in WBTree")]
    fn empty_excluded_range_panics() {
        let _ = scenario().range((Bound::Excluded(4), Bound::Excluded(4)));
    }

    #[test]
    fn all_less_and_greater_split_the_tree() {
        let tree = scenario();
        for probe in 0..11 {
            let below = tree.all_less_than(&probe).len();
            let above = tree.all_greater_than(&probe).len();
            assert_eq!(below, tree.count_less_than(&probe));
            assert_eq!(above, tree.count_greater_than(&probe));
            assert_eq!(below + above + usize::from(tree.contains(&probe)), tree.len());
        }
    }

    #[test]
    fn random_item_on_empty_tree() {
        let tree: WBTree<i32> = WBTree::new();
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(tree.random_item_with(&mut rng), Err(Error::EmptyCollection));
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn index_past_end_panics() {
        let _ = scenario()[Rank(7)];
    }
}
