use alloc::collections::VecDeque;
use core::borrow::Borrow;
use core::ops::Bound;

use smallvec::SmallVec;

use super::handle::Handle;
use super::node::Side;
use super::raw_wb_tree::RawWBTree;

/// Inline stack depth. A weight-balanced tree with `u32::MAX` items is at most
/// 77 levels deep, typical trees far less. Must be a length `smallvec::Array`
/// is implemented for.
const STACK: usize = 64;

type Stack = SmallVec<[Handle; STACK]>;

/// In-order walk over handles. Starting from `Side::Left` walks ascending,
/// from `Side::Right` descending.
///
/// Each walker owns its own stack, so any number of them can run over the same
/// tree at once.
pub(crate) struct Sorted<'a, T> {
    tree: &'a RawWBTree<T>,
    stack: Stack,
    from: Side,
}

impl<'a, T> Sorted<'a, T> {
    /// Walks the whole tree starting at its `from` end.
    pub(crate) fn new(tree: &'a RawWBTree<T>, from: Side) -> Self {
        let mut walk = Self {
            tree,
            stack: Stack::new(),
            from,
        };
        walk.push_spine(tree.root());
        walk
    }

    /// Walks starting at the first item on the `from` end that satisfies `bound`,
    /// pruning every subtree that lies entirely outside it.
    ///
    /// With `from == Side::Left`, `bound` is a lower bound; otherwise an upper one.
    pub(crate) fn seek<Q>(tree: &'a RawWBTree<T>, bound: Bound<&Q>, from: Side) -> Self
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut walk = Self {
            tree,
            stack: Stack::new(),
            from,
        };
        let mut current = tree.root();
        while let Some(handle) = current {
            let node = tree.node(handle);
            if admits(node.item().borrow(), bound, from) {
                walk.stack.push(handle);
                current = node.child(from);
            } else {
                current = node.child(from.opposite());
            }
        }
        walk
    }

    fn push_spine(&mut self, mut current: Option<Handle>) {
        while let Some(handle) = current {
            self.stack.push(handle);
            current = self.tree.node(handle).child(self.from);
        }
    }
}

/// Whether `item` lies on the admitted side of `bound` when walking from `from`.
fn admits<Q>(item: &Q, bound: Bound<&Q>, from: Side) -> bool
where
    Q: ?Sized + Ord,
{
    match (bound, from) {
        (Bound::Unbounded, _) => true,
        (Bound::Included(b), Side::Left) => item >= b,
        (Bound::Excluded(b), Side::Left) => item > b,
        (Bound::Included(b), Side::Right) => item <= b,
        (Bound::Excluded(b), Side::Right) => item < b,
    }
}

impl<T> Iterator for Sorted<'_, T> {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        let handle = self.stack.pop()?;
        self.push_spine(self.tree.node(handle).child(self.from.opposite()));
        Some(handle)
    }
}

impl<T> Clone for Sorted<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
            from: self.from,
        }
    }
}

/// Node, then left subtree, then right subtree.
pub(crate) struct PreOrder<'a, T> {
    tree: &'a RawWBTree<T>,
    stack: Stack,
}

impl<'a, T> PreOrder<'a, T> {
    pub(crate) fn new(tree: &'a RawWBTree<T>) -> Self {
        Self {
            tree,
            stack: tree.root().into_iter().collect(),
        }
    }
}

impl<T> Iterator for PreOrder<'_, T> {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        let handle = self.stack.pop()?;
        let node = self.tree.node(handle);
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(handle)
    }
}

impl<T> Clone for PreOrder<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
        }
    }
}

/// Left subtree, then right subtree, then node.
pub(crate) struct PostOrder<'a, T> {
    tree: &'a RawWBTree<T>,
    /// `true` once a node's children have been scheduled.
    stack: SmallVec<[(Handle, bool); STACK]>,
}

impl<'a, T> PostOrder<'a, T> {
    pub(crate) fn new(tree: &'a RawWBTree<T>) -> Self {
        Self {
            tree,
            stack: tree.root().map(|root| (root, false)).into_iter().collect(),
        }
    }
}

impl<T> Iterator for PostOrder<'_, T> {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        loop {
            let (handle, expanded) = self.stack.pop()?;
            if expanded {
                return Some(handle);
            }
            let node = self.tree.node(handle);
            self.stack.push((handle, true));
            self.stack.extend(node.right().map(|right| (right, false)));
            self.stack.extend(node.left().map(|left| (left, false)));
        }
    }
}

impl<T> Clone for PostOrder<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
        }
    }
}

/// Level by level from the root, left to right within a level.
pub(crate) struct LevelOrder<'a, T> {
    tree: &'a RawWBTree<T>,
    queue: VecDeque<Handle>,
}

impl<'a, T> LevelOrder<'a, T> {
    pub(crate) fn new(tree: &'a RawWBTree<T>) -> Self {
        Self {
            tree,
            queue: tree.root().into_iter().collect(),
        }
    }
}

impl<T> Iterator for LevelOrder<'_, T> {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        let handle = self.queue.pop_front()?;
        let node = self.tree.node(handle);
        self.queue.extend(node.left());
        self.queue.extend(node.right());
        Some(handle)
    }
}

impl<T> Clone for LevelOrder<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            queue: self.queue.clone(),
        }
    }
}
