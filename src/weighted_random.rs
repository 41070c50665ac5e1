//! Weighted sampling layered on [`WBTree`].
//!
//! Items are laid end to end on a line of integer weights: the first item covers
//! `[0, w0)`, the next `[w0, w0 + w1)`, and so on. A uniform draw on that line
//! lands inside exactly one item, found by looking up the first interval whose
//! end lies past the draw.

use rand::Rng;

use crate::{Error, Keyed, Result, WBTree};

/// Keyed by the exclusive end of the item's interval on the weight line.
type Slot<T> = Keyed<u64, (T, u64)>;

/// A collection that returns each item with probability proportional to its
/// weight.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use wabi_toolkit::WeightedRandom;
///
/// let mut loot = WeightedRandom::new();
/// loot.push("common", 90)?;
/// loot.push("rare", 9)?;
/// loot.push("legendary", 1)?;
/// assert_eq!(loot.total_weight(), 100);
///
/// let mut rng = SmallRng::seed_from_u64(5);
/// let drop = loot.sample_with(&mut rng)?;
/// assert!(["common", "rare", "legendary"].contains(drop));
/// # Ok::<(), wabi_toolkit::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct WeightedRandom<T> {
    slots: WBTree<Slot<T>>,
    total: u64,
}

impl<T> WeightedRandom<T> {
    /// Makes a new, empty collection.
    #[must_use]
    pub const fn new() -> Self {
        WeightedRandom {
            slots: WBTree::new(),
            total: 0,
        }
    }

    /// Collects `(item, weight)` pairs, failing on the first invalid weight.
    ///
    /// # Errors
    ///
    /// As for [`push`](Self::push).
    pub fn try_from_iter<I>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, u64)>,
    {
        let mut weighted = WeightedRandom::new();
        for (item, weight) in iter {
            weighted.push(item, weight)?;
        }
        Ok(weighted)
    }

    /// Adds `item` with the given relative `weight`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `weight` is zero or the total weight would
    /// overflow `u64`. The collection is left unchanged.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn push(&mut self, item: T, weight: u64) -> Result<()> {
        if weight == 0 {
            return Err(Error::InvalidArgument("weight must be positive"));
        }
        let end = self
            .total
            .checked_add(weight)
            .ok_or(Error::InvalidArgument("total weight overflows u64"))?;
        // Ends grow strictly, so the new slot never collides.
        self.slots.insert(Keyed::new(end, (item, weight)))?;
        self.total = end;
        Ok(())
    }

    /// Returns an item drawn with probability `weight / total_weight`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] if nothing has been pushed.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn sample_with<R>(&self, rng: &mut R) -> Result<&T>
    where
        R: Rng + ?Sized,
    {
        if self.total == 0 {
            return Err(Error::EmptyCollection);
        }
        let point = rng.random_range(0..self.total);
        self.slots
            .next_greater_than(&point)
            .map(|slot| &slot.value.0)
            .ok_or(Error::EmptyCollection)
    }

    /// Returns an item drawn using the thread-local RNG.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] if nothing has been pushed.
    #[cfg(feature = "std")]
    pub fn sample(&self) -> Result<&T> {
        self.sample_with(&mut rand::rng())
    }

    /// Returns the number of items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if nothing has been pushed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the sum of all weights.
    #[must_use]
    pub const fn total_weight(&self) -> u64 {
        self.total
    }

    /// Iterates over `(item, weight)` pairs in the order they were pushed.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&T, u64)> + ExactSizeIterator {
        self.slots.iter().map(|slot| (&slot.value.0, slot.value.1))
    }
}

impl<T> Default for WeightedRandom<T> {
    fn default() -> Self {
        WeightedRandom::new()
    }
}
