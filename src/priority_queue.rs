//! A double-ended priority queue layered on [`WBTree`].
//!
//! Entries are keyed by `(priority, sequence)`, where `sequence` counts pushes.
//! Equal priorities therefore never collide. Among them, `pop_min` serves the
//! oldest entry first and `pop_max` the newest.

use core::fmt;

use crate::{Keyed, Result, WBTree};

type Entry<T, P> = Keyed<(P, u64), T>;

/// A priority queue that can pop both its lowest and highest priority entry
/// in O(log n).
///
/// # Examples
///
/// ```
/// use wabi_toolkit::PriorityQueue;
///
/// let mut queue = PriorityQueue::new();
/// queue.push("write report", 2);
/// queue.push("fix outage", 9);
/// queue.push("water plants", 1);
///
/// assert_eq!(queue.pop_max()?, ("fix outage", 9));
/// assert_eq!(queue.pop_min()?, ("water plants", 1));
/// assert_eq!(queue.count_below(&5), 1);
/// # Ok::<(), wabi_toolkit::Error>(())
/// ```
pub struct PriorityQueue<T, P> {
    entries: WBTree<Entry<T, P>>,
    sequence: u64,
}

impl<T, P> PriorityQueue<T, P> {
    /// Makes a new, empty queue.
    #[must_use]
    pub const fn new() -> Self {
        PriorityQueue {
            entries: WBTree::new(),
            sequence: 0,
        }
    }

    /// Returns the number of queued entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is queued.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the entry with the lowest priority without removing it.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`](crate::Error::EmptyCollection) if the queue is empty.
    pub fn peek_min(&self) -> Result<(&T, &P)> {
        self.entries.min().map(parts)
    }

    /// Returns the entry with the highest priority without removing it.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`](crate::Error::EmptyCollection) if the queue is empty.
    pub fn peek_max(&self) -> Result<(&T, &P)> {
        self.entries.max().map(parts)
    }

    /// Removes and returns the entry with the lowest priority.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`](crate::Error::EmptyCollection) if the queue is empty.
    pub fn pop_min(&mut self) -> Result<(T, P)> {
        self.entries.pop_min().map(into_parts)
    }

    /// Removes and returns the entry with the highest priority.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`](crate::Error::EmptyCollection) if the queue is empty.
    pub fn pop_max(&mut self) -> Result<(T, P)> {
        self.entries.pop_max().map(into_parts)
    }

    /// Iterates over the entries from lowest to highest priority.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&T, &P)> + ExactSizeIterator {
        self.entries.iter().map(parts)
    }
}

impl<T, P: Ord> PriorityQueue<T, P> {
    /// Queues `item` at `priority`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn push(&mut self, item: T, priority: P) {
        let sequence = self.sequence;
        self.sequence += 1;
        let inserted = self.entries.insert(Keyed::new((priority, sequence), item));
        debug_assert!(inserted.is_ok(), "sequence numbers are unique");
    }
}

impl<T, P: Ord + Clone> PriorityQueue<T, P> {
    /// Counts the entries whose priority is strictly below `priority`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn count_below(&self, priority: &P) -> usize {
        self.entries.count_less_than(&(priority.clone(), 0))
    }

    /// Counts the entries whose priority is strictly above `priority`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn count_above(&self, priority: &P) -> usize {
        self.entries.count_greater_than(&(priority.clone(), u64::MAX))
    }
}

fn parts<T, P>(entry: &Entry<T, P>) -> (&T, &P) {
    (&entry.value, &entry.key.0)
}

fn into_parts<T, P>(entry: Entry<T, P>) -> (T, P) {
    let ((priority, _), item) = entry.into_parts();
    (item, priority)
}

impl<T: Clone, P: Clone> Clone for PriorityQueue<T, P> {
    fn clone(&self) -> Self {
        PriorityQueue {
            entries: self.entries.clone(),
            sequence: self.sequence,
        }
    }
}

impl<T, P> Default for PriorityQueue<T, P> {
    fn default() -> Self {
        PriorityQueue::new()
    }
}

impl<T: fmt::Debug, P: fmt::Debug> fmt::Debug for PriorityQueue<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, P: Ord> Extend<(T, P)> for PriorityQueue<T, P> {
    fn extend<I: IntoIterator<Item = (T, P)>>(&mut self, iter: I) {
        for (item, priority) in iter {
            self.push(item, priority);
        }
    }
}

impl<T, P: Ord> FromIterator<(T, P)> for PriorityQueue<T, P> {
    fn from_iter<I: IntoIterator<Item = (T, P)>>(iter: I) -> Self {
        let mut queue = PriorityQueue::new();
        queue.extend(iter);
        queue
    }
}
