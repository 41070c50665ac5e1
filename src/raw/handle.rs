//! Node addresses.
//!
//! Every parent and child link in the tree is an `Option<Handle>`, and cached
//! subtree sizes reuse the same width (see [`Size`](super::size::Size)). Unit
//! tests shrink the width to `u16` so capacity limits are reachable.

use core::num::NonZero;

#[cfg(test)]
type Slot = u16;
#[cfg(not(test))]
type Slot = u32;

/// Arena slot of a node, stored as `slot + 1` so an absent link is free.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<Slot>);

impl Handle {
    /// Highest addressable slot, and so the most nodes one tree can hold.
    pub(crate) const MAX: usize = Slot::MAX as usize - 1;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "node slot out of range for `Handle`");
        #[allow(clippy::cast_possible_truncation)]
        match NonZero::new(index as Slot + 1) {
            Some(slot) => Self(slot),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        self.0.get() as usize - 1
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    // Links cost one slot width whether present or not.
    assert_eq_size!(Option<Handle>, Slot);
    assert_eq_size!(Option<Handle>, Handle);

    #[test]
    #[should_panic(expected = "node slot out of range for `Handle`")]
    fn slot_past_capacity_panics() {
        let _ = Handle::from_index(Handle::MAX + 1);
    }

    #[test]
    fn capacity_is_one_below_slot_width() {
        assert_eq!(Handle::MAX, usize::from(u16::MAX) - 1);
        assert_eq!(Handle::from_index(0).to_index(), 0);
        assert_eq!(Handle::from_index(Handle::MAX).to_index(), Handle::MAX);
        assert_ne!(Handle::from_index(0), Handle::from_index(1));
    }

    proptest! {
        #[test]
        fn slot_survives_encoding(index in 0..=Handle::MAX) {
            prop_assert_eq!(Handle::from_index(index).to_index(), index);
        }
    }
}
