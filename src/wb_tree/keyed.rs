use core::borrow::Borrow;
use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use super::WBTree;

/// A key paired with a value that is ignored by comparisons.
///
/// Ordering, equality, hashing and [`Borrow`] all look at `key` only, so a
/// `WBTree<Keyed<K, V>>` behaves as an ordered map from `K` to `V` whose
/// lookups take a plain `&K`.
///
/// # Examples
///
/// ```
/// use wabi_toolkit::{Keyed, WBTree};
///
/// let mut scores = WBTree::new();
/// scores.insert(Keyed::new("carol", 71))?;
/// scores.insert(Keyed::new("alice", 93))?;
///
/// *scores.get_value_mut(&"carol").unwrap() += 5;
/// assert_eq!(scores.get(&"carol").map(|entry| entry.value), Some(76));
/// assert_eq!(scores.min()?.key, "alice");
/// # Ok::<(), wabi_toolkit::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Keyed<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Keyed<K, V> {
    #[must_use]
    pub const fn new(key: K, value: V) -> Self {
        Keyed { key, value }
    }

    #[must_use]
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: PartialEq, V> PartialEq for Keyed<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Eq, V> Eq for Keyed<K, V> {}

impl<K: PartialOrd, V> PartialOrd for Keyed<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.key.partial_cmp(&other.key)
    }
}

impl<K: Ord, V> Ord for Keyed<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<K: Hash, V> Hash for Keyed<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<K, V> Borrow<K> for Keyed<K, V> {
    fn borrow(&self) -> &K {
        &self.key
    }
}

impl<K, V> From<(K, V)> for Keyed<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Keyed { key, value }
    }
}

impl<K: Ord, V> WBTree<Keyed<K, V>> {
    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// The key itself stays read-only, so the tree's ordering cannot be disturbed.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get_value_mut(&mut self, key: &K) -> Option<&mut V> {
        let handle = self.raw.search(key)?;
        Some(&mut self.raw.item_mut(handle).value)
    }
}
