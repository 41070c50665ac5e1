use alloc::vec;
use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::Bound;

use super::WBTree;
use crate::raw::{LevelOrder, PostOrder, PreOrder, RawWBTree, Side, Sorted};

/// The visiting order of a depth-first traversal.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum DepthFirstOrder {
    /// Each item before the items below it, left subtree first.
    PreOrder,
    /// Ascending order.
    #[default]
    InOrder,
    /// Each item after the items below it, left subtree first.
    PostOrder,
}

/// Walks a known number of items from both ends of the sorted sequence.
struct Bidirectional<'a, T> {
    tree: &'a RawWBTree<T>,
    front: Sorted<'a, T>,
    back: Sorted<'a, T>,
    remaining: usize,
}

impl<'a, T> Bidirectional<'a, T> {
    fn pop_front(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let tree = self.tree;
        self.front.next().map(|handle| tree.node(handle).item())
    }

    fn pop_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let tree = self.tree;
        self.back.next().map(|handle| tree.node(handle).item())
    }
}

impl<T> Clone for Bidirectional<'_, T> {
    fn clone(&self) -> Self {
        Bidirectional {
            tree: self.tree,
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

/// An iterator over the items of a `WBTree` in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`WBTree`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use wabi_toolkit::WBTree;
///
/// let tree = WBTree::from([1, 2, 3]);
/// let mut iter = tree.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.len(), 1);
/// ```
///
/// [`iter`]: WBTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    inner: Bidirectional<'a, T>,
}

/// An iterator over a contiguous run of items in a `WBTree`, in ascending order.
///
/// This `struct` is created by [`WBTree::range`], [`WBTree::all_less_than`] and
/// [`WBTree::all_greater_than`]. Its length is known before iteration starts.
///
/// # Examples
///
/// ```
/// use wabi_toolkit::WBTree;
///
/// let tree = WBTree::from([1, 2, 3, 4]);
/// let mut range = tree.range(2..=3);
/// assert_eq!(range.len(), 2);
/// assert_eq!(range.next(), Some(&2));
/// assert_eq!(range.next_back(), Some(&3));
/// assert_eq!(range.next(), None);
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, T: 'a> {
    inner: Bidirectional<'a, T>,
}

/// An owning iterator over the items of a `WBTree` in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`WBTree`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: WBTree#method.into_iter
pub struct IntoIter<T> {
    inner: vec::IntoIter<T>,
}

enum DepthFirstWalk<'a, T> {
    Pre(PreOrder<'a, T>),
    In(Sorted<'a, T>),
    Post(PostOrder<'a, T>),
}

/// A depth-first traversal of a `WBTree` following its current shape.
///
/// This `struct` is created by [`WBTree::depth_first`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct DepthFirst<'a, T: 'a> {
    tree: &'a RawWBTree<T>,
    walk: DepthFirstWalk<'a, T>,
    remaining: usize,
}

/// A level-by-level traversal of a `WBTree` following its current shape.
///
/// This `struct` is created by [`WBTree::breadth_first`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct BreadthFirst<'a, T: 'a> {
    tree: &'a RawWBTree<T>,
    walk: LevelOrder<'a, T>,
    remaining: usize,
}

impl<T> WBTree<T> {
    /// Gets an iterator that visits the items in ascending order.
    ///
    /// Any number of iterators may be alive over the same tree; none of them
    /// can outlive a mutation.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_toolkit::WBTree;
    ///
    /// let tree = WBTree::from([3, 1, 2]);
    /// let items: Vec<_> = tree.iter().copied().collect();
    /// assert_eq!(items, [1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: Bidirectional {
                tree: &self.raw,
                front: Sorted::new(&self.raw, Side::Left),
                back: Sorted::new(&self.raw, Side::Right),
                remaining: self.len(),
            },
        }
    }

    /// Walks the tree depth-first in the given order.
    ///
    /// Pre- and post-order expose the current shape of the tree, which depends
    /// on the history of insertions and removals.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_toolkit::{DepthFirstOrder, WBTree};
    ///
    /// let mut tree = WBTree::new();
    /// for item in [5, 3, 8, 1, 4, 7, 9] {
    ///     tree.insert(item)?;
    /// }
    ///
    /// let pre: Vec<_> = tree.depth_first(DepthFirstOrder::PreOrder).copied().collect();
    /// assert_eq!(pre, [5, 3, 1, 4, 8, 7, 9]);
    /// let post: Vec<_> = tree.depth_first(DepthFirstOrder::PostOrder).copied().collect();
    /// assert_eq!(post, [1, 4, 3, 7, 9, 8, 5]);
    /// # Ok::<(), wabi_toolkit::Error>(())
    /// ```
    pub fn depth_first(&self, order: DepthFirstOrder) -> DepthFirst<'_, T> {
        let walk = match order {
            DepthFirstOrder::PreOrder => DepthFirstWalk::Pre(PreOrder::new(&self.raw)),
            DepthFirstOrder::InOrder => DepthFirstWalk::In(Sorted::new(&self.raw, Side::Left)),
            DepthFirstOrder::PostOrder => DepthFirstWalk::Post(PostOrder::new(&self.raw)),
        };
        DepthFirst {
            tree: &self.raw,
            walk,
            remaining: self.len(),
        }
    }

    /// Walks the tree level by level from the root, left to right within a level.
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
    /// let levels: Vec<_> = tree.breadth_first().copied().collect();
    /// assert_eq!(levels, [5, 3, 8, 1, 4, 7, 9]);
    /// # Ok::<(), wabi_toolkit::Error>(())
    /// ```
    pub fn breadth_first(&self) -> BreadthFirst<'_, T> {
        BreadthFirst {
            tree: &self.raw,
            walk: LevelOrder::new(&self.raw),
            remaining: self.len(),
        }
    }
}

impl<'a, T> Range<'a, T> {
    /// `remaining` must be the exact number of items within the bounds.
    pub(super) fn new<Q>(tree: &'a RawWBTree<T>, start: Bound<&Q>, end: Bound<&Q>, remaining: usize) -> Self
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Range {
            inner: Bidirectional {
                tree,
                front: Sorted::seek(tree, start, Side::Left),
                back: Sorted::seek(tree, end, Side::Right),
                remaining,
            },
        }
    }
}

impl<T> IntoIterator for WBTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an owning iterator over the items in ascending order.
    ///
    /// ```
    /// use wabi_toolkit::WBTree;
    ///
    /// let tree = WBTree::from([3, 1, 2]);
    /// let items: Vec<_> = tree.into_iter().collect();
    /// assert_eq!(items, [1, 2, 3]);
    /// ```
    fn into_iter(mut self) -> IntoIter<T> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a WBTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.inner.remaining, Some(self.inner.remaining))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.inner.pop_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.inner.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for Range<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.inner.remaining, Some(self.inner.remaining))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Range<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.inner.pop_back()
    }
}

impl<T> ExactSizeIterator for Range<'_, T> {
    fn len(&self) -> usize {
        self.inner.remaining
    }
}

impl<T> FusedIterator for Range<'_, T> {}

impl<T> Clone for Range<'_, T> {
    fn clone(&self) -> Self {
        Range {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Range<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<'a, T> Iterator for DepthFirst<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let handle = match &mut self.walk {
            DepthFirstWalk::Pre(walk) => walk.next(),
            DepthFirstWalk::In(walk) => walk.next(),
            DepthFirstWalk::Post(walk) => walk.next(),
        }?;
        self.remaining -= 1;
        Some(self.tree.node(handle).item())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for DepthFirst<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for DepthFirst<'_, T> {}

impl<T> Clone for DepthFirst<'_, T> {
    fn clone(&self) -> Self {
        let walk = match &self.walk {
            DepthFirstWalk::Pre(walk) => DepthFirstWalk::Pre(walk.clone()),
            DepthFirstWalk::In(walk) => DepthFirstWalk::In(walk.clone()),
            DepthFirstWalk::Post(walk) => DepthFirstWalk::Post(walk.clone()),
        };
        DepthFirst {
            tree: self.tree,
            walk,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for BreadthFirst<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let handle = self.walk.next()?;
        self.remaining -= 1;
        Some(self.tree.node(handle).item())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for BreadthFirst<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for BreadthFirst<'_, T> {}

impl<T> Clone for BreadthFirst<'_, T> {
    fn clone(&self) -> Self {
        BreadthFirst {
            tree: self.tree,
            walk: self.walk.clone(),
            remaining: self.remaining,
        }
    }
}
