use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;

use tracing::debug;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side};
use crate::{Error, Result};

/// The weight-balanced binary search tree backing `WBTree`.
///
/// Every node caches the populations of both child subtrees. Mutations update
/// those counts on the way back up and then correct each ancestor's balance with
/// at most one single or double rotation.
#[derive(Clone, Debug)]
pub(crate) struct RawWBTree<T> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Total number of items in the tree.
    len: usize,
}

impl<T> RawWBTree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    /// Builds a perfectly balanced tree from items already in strictly ascending
    /// order, in O(n).
    pub(crate) fn from_sorted(items: Vec<T>) -> Self {
        let mut tree = Self::with_capacity(items.len());
        let handles: Vec<Handle> = items.into_iter().map(|item| tree.nodes.alloc(Node::new(item))).collect();
        tree.root = tree.link_balanced(&handles, None);
        tree.len = handles.len();
        debug!(len = tree.len, "bulk built weight-balanced tree");
        tree
    }

    /// Links `handles` (in order) into a subtree hanging below `parent` by
    /// repeatedly promoting the middle element. Recursion depth is log2 n.
    fn link_balanced(&mut self, handles: &[Handle], parent: Option<Handle>) -> Option<Handle> {
        let mid = handles.len() / 2;
        let &handle = handles.get(mid)?;
        let left = self.link_balanced(&handles[..mid], Some(handle));
        let right = self.link_balanced(&handles[mid + 1..], Some(handle));

        let node = self.nodes.get_mut(handle);
        node.set_parent(parent);
        node.set_child(Side::Left, left);
        node.set_child(Side::Right, right);
        node.set_child_size(Side::Left, mid);
        node.set_child_size(Side::Right, handles.len() - mid - 1);
        Some(handle)
    }

    /// Returns the number of items in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no items.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of nodes the tree can hold without reallocating.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Removes every item.
    pub(crate) fn clear(&mut self) {
        debug!(len = self.len, "clearing weight-balanced tree");
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Returns the root handle, if any.
    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Returns a node by handle.
    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(super) fn node_mut(&mut self, handle: Handle) -> &mut Node<T> {
        self.nodes.get_mut(handle)
    }

    /// Returns a mutable reference to a stored item. The caller must not change
    /// how it orders.
    pub(crate) fn item_mut(&mut self, handle: Handle) -> &mut T {
        self.nodes.get_mut(handle).item_mut()
    }

    /// Points whatever referenced `old` (its parent's child slot, or the root) at
    /// `new` instead. `new`'s own parent link is the caller's job.
    pub(super) fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let parent = self.nodes.get_mut(parent);
                let side = parent.side_of(old);
                parent.set_child(side, new);
            }
        }
    }

    /// Descends from `from` along `side` as far as possible.
    pub(crate) fn extreme(&self, from: Handle, side: Side) -> Handle {
        let mut current = from;
        while let Some(next) = self.node(current).child(side) {
            current = next;
        }
        current
    }

    /// Returns the smallest (`Side::Left`) or largest (`Side::Right`) node.
    pub(crate) fn first(&self, side: Side) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, side))
    }

    /// Adds one to (or takes one from) the cached size on every ancestor edge
    /// between `from` and the root.
    fn adjust_ancestors(&mut self, from: Handle, grow: bool) {
        let mut child = from;
        while let Some(parent) = self.node(child).parent() {
            let node = self.nodes.get_mut(parent);
            let side = node.side_of(child);
            if grow {
                node.increment(side);
            } else {
                node.decrement(side);
            }
            child = parent;
        }
    }

    /// Unlinks the item stored at `target`, rebalances, and returns the item.
    ///
    /// A node with two children keeps its slot and takes over the item of its
    /// in-order neighbour from the heavier side; that neighbour is the node that
    /// is physically spliced out.
    pub(crate) fn remove_handle(&mut self, target: Handle) -> T {
        let node = self.node(target);
        let spliced = match (node.left(), node.right()) {
            (Some(left), Some(right)) => {
                if node.left_size() > node.right_size() {
                    self.extreme(left, Side::Right)
                } else {
                    self.extreme(right, Side::Left)
                }
            }
            _ => target,
        };

        self.adjust_ancestors(spliced, false);

        let node = self.node(spliced);
        let parent = node.parent();
        // At most one child by construction.
        let orphan = node.left().or(node.right());
        if let Some(orphan) = orphan {
            self.nodes.get_mut(orphan).set_parent(parent);
        }
        self.replace_child(parent, spliced, orphan);

        let removed = self.nodes.take(spliced).into_item();
        self.len -= 1;
        let item = if spliced == target {
            removed
        } else {
            self.nodes.get_mut(target).replace_item(removed)
        };

        self.rebalance_upward(parent);
        item
    }

    /// Removes and returns the smallest (`Side::Left`) or largest (`Side::Right`) item.
    pub(crate) fn pop(&mut self, side: Side) -> Option<T> {
        let handle = self.first(side)?;
        Some(self.remove_handle(handle))
    }

    /// Number of levels from the root down to the deepest leaf; 0 when empty.
    pub(crate) fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(Handle, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((handle, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.node(handle);
            stack.extend(node.left().map(|left| (left, depth + 1)));
            stack.extend(node.right().map(|right| (right, depth + 1)));
        }
        height
    }

    /// All handles in ascending item order.
    pub(crate) fn sorted_handles(&self) -> Vec<Handle> {
        let mut handles = Vec::with_capacity(self.len);
        let mut stack: Vec<Handle> = Vec::new();
        let mut current = self.root;
        loop {
            while let Some(handle) = current {
                stack.push(handle);
                current = self.node(handle).left();
            }
            let Some(handle) = stack.pop() else { break };
            handles.push(handle);
            current = self.node(handle).right();
        }
        handles
    }

    /// Moves every item out in ascending order, leaving the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<T> {
        let handles = self.sorted_handles();
        let items = handles.into_iter().map(|handle| self.nodes.take(handle).into_item()).collect();
        debug_assert_eq!(self.nodes.len(), 0, "`RawWBTree::drain_to_vec()` - unreachable nodes left behind!");
        self.nodes.clear();
        self.root = None;
        self.len = 0;
        items
    }
}

impl<T: Ord> RawWBTree<T> {
    /// Finds the node whose item compares equal to `key`.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.node(handle);
            current = match key.cmp(node.item().borrow()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    /// Returns the stored item comparing equal to `key`.
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|handle| self.node(handle).item())
    }

    /// Inserts `item` as a new leaf, then fixes sizes and balance on the way up.
    ///
    /// Fails with [`Error::DuplicateItem`] before touching the tree if an equal
    /// item is already stored.
    pub(crate) fn insert(&mut self, item: T) -> Result<()> {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.node(handle);
            side = match item.cmp(node.item()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Err(Error::DuplicateItem),
            };
            parent = Some(handle);
            current = node.child(side);
        }

        let leaf = self.nodes.alloc(Node::new(item));
        self.len += 1;
        let Some(parent) = parent else {
            self.root = Some(leaf);
            return Ok(());
        };

        self.nodes.get_mut(leaf).set_parent(Some(parent));
        self.nodes.get_mut(parent).set_child(side, Some(leaf));
        self.adjust_ancestors(leaf, true);
        self.rebalance_upward(Some(parent));
        Ok(())
    }

    /// Removes and returns the stored item comparing equal to `key`.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Result<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search(key).ok_or(Error::ItemNotFound)?;
        Ok(self.remove_handle(handle))
    }
}
