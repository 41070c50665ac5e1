use super::handle::Handle;

/// Population of one child subtree, excluding the node that owns the count.
///
/// Shares the handle's width: a subtree can never hold more nodes than the arena
/// can address.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Size(Handle);

impl Size {
    pub(crate) const MAX: usize = Handle::MAX;
    pub(crate) const ZERO: Self = Self::from_usize(0);

    #[inline]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        Self(Handle::from_index(size))
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0.to_index()
    }

    #[inline]
    pub(crate) const fn incremented(self) -> Self {
        Self::from_usize(self.to_usize() + 1)
    }

    #[inline]
    pub(crate) const fn decremented(self) -> Self {
        assert!(self.to_usize() > 0, "`Size::decremented()` - size is already zero!");
        Self::from_usize(self.to_usize() - 1)
    }
}
