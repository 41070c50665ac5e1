use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::raw::{RawWBTree, Side};
use crate::{Error, Result};

mod keyed;
mod order_statistic;
mod traversal;

pub use keyed::Keyed;
pub use traversal::{BreadthFirst, DepthFirst, DepthFirstOrder, IntoIter, Iter, Range};

/// An ordered collection backed by a weight-balanced binary search tree.
///
/// Every node caches how many items live in its left and right subtrees. Those
/// counts keep the tree balanced (no child subtree may outweigh its sibling by
/// more than a factor of three) and answer order-statistic queries, such as how
/// many items are smaller than a given value, in O(log n).
///
/// Items are unique under their [`Ord`] implementation: inserting an item equal
/// to one already stored fails with [`Error::DuplicateItem`]. Only the part of an
/// item that takes part in the comparison needs to match for lookups, so a
/// [`Keyed`] item turns the tree into an ordered map.
///
/// It is a logic error for an item to be modified in such a way that its ordering
/// relative to any other item changes while it is in the tree.
///
/// # Examples
///
/// ```
/// use wabi_toolkit::WBTree;
///
/// let mut tree = WBTree::new();
/// for item in [5, 3, 8, 1, 4, 7, 9] {
///     tree.insert(item)?;
/// }
///
/// assert_eq!(tree.len(), 7);
/// assert_eq!(tree.min()?, &1);
/// assert_eq!(tree.count_less_than(&7), 4);
///
/// assert_eq!(tree.remove(&5)?, 5);
/// assert!(!tree.contains(&5));
/// assert_eq!(tree.next_greater_than(&4), Some(&7));
/// # Ok::<(), wabi_toolkit::Error>(())
/// ```
pub struct WBTree<T> {
    raw: RawWBTree<T>,
}

impl<T> WBTree<T> {
    /// Makes a new, empty `WBTree`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_toolkit::WBTree;
    ///
    /// let tree: WBTree<i32> = WBTree::new();
    /// assert!(tree.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> WBTree<T> {
        WBTree { raw: RawWBTree::new() }
    }

    /// Makes an empty tree with room for at least `capacity` items before the
    /// node store reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_toolkit::WBTree;
    ///
    /// let tree: WBTree<i32> = WBTree::with_capacity(32);
    /// assert!(tree.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> WBTree<T> {
        WBTree {
            raw: RawWBTree::with_capacity(capacity),
        }
    }

    /// Returns how many items the tree can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the number of items in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of levels in the tree: 0 when empty, 1 for a single
    /// item. Never exceeds `1 + log_{4/3}((len + 1) / 2)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_toolkit::WBTree;
    ///
    /// let tree: WBTree<u32> = (0..1000).collect();
    /// assert_eq!(tree.depth(), 10);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n); heights are not cached.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.raw.height()
    }

    /// Removes every item.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_toolkit::WBTree;
    ///
    /// let mut tree = WBTree::from([1, 2, 3]);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the smallest item.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_toolkit::{Error, WBTree};
    ///
    /// let mut tree = WBTree::new();
    /// assert_eq!(tree.min(), Err(Error::EmptyCollection));
    /// tree.insert(2)?;
    /// tree.insert(1)?;
    /// assert_eq!(tree.min(), Ok(&1));
    /// # Ok::<(), Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn min(&self) -> Result<&T> {
        self.extreme(Side::Left)
    }

    /// Returns the largest item.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] if the tree is empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn max(&self) -> Result<&T> {
        self.extreme(Side::Right)
    }

    fn extreme(&self, side: Side) -> Result<&T> {
        let handle = self.raw.first(side).ok_or(Error::EmptyCollection)?;
        Ok(self.raw.node(handle).item())
    }

    /// Removes and returns the smallest item.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_toolkit::WBTree;
    ///
    /// let mut tree = WBTree::from([3, 1, 2]);
    /// assert_eq!(tree.pop_min(), Ok(1));
    /// assert_eq!(tree.len(), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_min(&mut self) -> Result<T> {
        self.raw.pop(Side::Left).ok_or(Error::EmptyCollection)
    }

    /// Removes and returns the largest item.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] if the tree is empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_max(&mut self) -> Result<T> {
        self.raw.pop(Side::Right).ok_or(Error::EmptyCollection)
    }
}

impl<T: Ord> WBTree<T> {
    /// Builds a tree from items that are already sorted, without comparing them
    /// beyond the order check. The result is as shallow as a binary tree can be.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the items are not in strictly ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_toolkit::{Error, WBTree};
    ///
    /// let tree = WBTree::from_sorted(vec![1, 2, 3, 4])?;
    /// assert_eq!(tree.depth(), 3);
    ///
    /// assert!(matches!(WBTree::from_sorted(vec![2, 1]), Err(Error::InvalidArgument(_))));
    /// # Ok::<(), Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn from_sorted(items: Vec<T>) -> Result<Self> {
        if items.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(Error::InvalidArgument("items must be in strictly ascending order"));
        }
        Ok(WBTree {
            raw: RawWBTree::from_sorted(items),
        })
    }

    /// Adds an item to the tree, rebalancing on the way back to the root.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateItem`] if an equal item is already stored. The tree is
    /// left unchanged and the rejected item is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_toolkit::{Error, WBTree};
    ///
    /// let mut tree = WBTree::new();
    /// assert_eq!(tree.insert(2), Ok(()));
    /// assert_eq!(tree.insert(2), Err(Error::DuplicateItem));
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, item: T) -> Result<()> {
        self.raw.insert(item)
    }

    /// Removes the item comparing equal to `key` and returns it.
    ///
    /// # Errors
    ///
    /// [`Error::ItemNotFound`] if no stored item compares equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_toolkit::{Error, WBTree};
    ///
    /// let mut tree = WBTree::from([1, 2, 3]);
    /// assert_eq!(tree.remove(&2), Ok(2));
    /// assert_eq!(tree.remove(&2), Err(Error::ItemNotFound));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, key: &Q) -> Result<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key)
    }

    /// Returns `true` if an item comparing equal to `key` is stored.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).is_some()
    }

    /// Returns the stored item comparing equal to `key`.
    ///
    /// Useful when only part of the item takes part in the comparison:
    ///
    /// ```
    /// use wabi_toolkit::{Keyed, WBTree};
    ///
    /// let mut tree = WBTree::new();
    /// tree.insert(Keyed::new("b", 2))?;
    /// tree.insert(Keyed::new("a", 1))?;
    ///
    /// assert_eq!(tree.get(&"a").map(|entry| entry.value), Some(1));
    /// assert_eq!(tree.get(&"z"), None);
    /// # Ok::<(), wabi_toolkit::Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }
}

impl<T: Clone> Clone for WBTree<T> {
    fn clone(&self) -> Self {
        WBTree { raw: self.raw.clone() }
    }
}

impl<T: fmt::Debug> fmt::Debug for WBTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for WBTree<T> {
    /// Creates an empty `WBTree`.
    fn default() -> WBTree<T> {
        WBTree::new()
    }
}

/// Trees are equal when they hold equal items in the same order, regardless of shape.
impl<T: PartialEq> PartialEq for WBTree<T> {
    fn eq(&self, other: &WBTree<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for WBTree<T> {}

impl<T: Hash> Hash for WBTree<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for item in self {
            item.hash(state);
        }
    }
}

/// Collects into a tree by sorting and bulk building. Of several equal items
/// only the first one encountered is kept, as repeated [`WBTree::insert`] calls would.
impl<T: Ord> FromIterator<T> for WBTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> WBTree<T> {
        let mut items: Vec<T> = iter.into_iter().collect();
        items.sort();
        items.dedup();
        WBTree {
            raw: RawWBTree::from_sorted(items),
        }
    }
}

/// Inserts each item in turn; items equal to one already stored are skipped.
impl<T: Ord> Extend<T> for WBTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            // Duplicates are dropped, as in `FromIterator`.
            let _ = self.insert(item);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for WBTree<T> {
    /// Converts a `[T; N]` into a `WBTree<T>`, keeping the first of any equal items.
    ///
    /// ```
    /// use wabi_toolkit::WBTree;
    ///
    /// let tree = WBTree::from([3, 1, 2, 1]);
    /// assert_eq!(tree.len(), 3);
    /// ```
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}
