use super::handle::Handle;
use super::size::Size;

/// Which child slot of a parent a subtree hangs from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// One stored item plus its links and cached subtree populations.
///
/// Children are owned through the arena; `parent` is a back-reference used only
/// to walk upwards while rebalancing.
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    item: T,
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
    left_size: Size,
    right_size: Size,
}

impl<T> Node<T> {
    /// Creates a detached leaf.
    pub(crate) const fn new(item: T) -> Self {
        Self {
            item,
            parent: None,
            left: None,
            right: None,
            left_size: Size::ZERO,
            right_size: Size::ZERO,
        }
    }

    #[inline]
    pub(crate) const fn item(&self) -> &T {
        &self.item
    }

    #[inline]
    pub(crate) const fn item_mut(&mut self) -> &mut T {
        &mut self.item
    }

    /// Swaps in a new item, returning the old one. The caller keeps ordering intact.
    pub(crate) const fn replace_item(&mut self, item: T) -> T {
        core::mem::replace(&mut self.item, item)
    }

    pub(crate) fn into_item(self) -> T {
        self.item
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) const fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) const fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    #[inline]
    pub(crate) const fn left_size(&self) -> usize {
        self.left_size.to_usize()
    }

    #[inline]
    pub(crate) const fn right_size(&self) -> usize {
        self.right_size.to_usize()
    }

    #[inline]
    pub(crate) const fn child_size(&self, side: Side) -> usize {
        match side {
            Side::Left => self.left_size(),
            Side::Right => self.right_size(),
        }
    }

    pub(crate) const fn set_child_size(&mut self, side: Side, size: usize) {
        match side {
            Side::Left => self.left_size = Size::from_usize(size),
            Side::Right => self.right_size = Size::from_usize(size),
        }
    }

    pub(crate) const fn increment(&mut self, side: Side) {
        match side {
            Side::Left => self.left_size = self.left_size.incremented(),
            Side::Right => self.right_size = self.right_size.incremented(),
        }
    }

    pub(crate) const fn decrement(&mut self, side: Side) {
        match side {
            Side::Left => self.left_size = self.left_size.decremented(),
            Side::Right => self.right_size = self.right_size.decremented(),
        }
    }

    /// Population of the subtree rooted here, this node included.
    #[inline]
    pub(crate) const fn subtree_size(&self) -> usize {
        self.left_size() + self.right_size() + 1
    }

    /// The side `child` hangs from. `child` must be one of this node's children.
    pub(crate) fn side_of(&self, child: Handle) -> Side {
        if self.left == Some(child) {
            Side::Left
        } else {
            debug_assert_eq!(self.right, Some(child), "`Node::side_of()` - not a child of this node!");
            Side::Right
        }
    }
}
