//! Insertion-ordered keyed container.
//!
//! Aggregation buckets are created the first time a key is seen and never removed.
//! Downstream tie-breaks (trending product, top-by-quantity fallback) iterate in
//! first-seen order, so a plain `HashMap` is not enough: we keep the entries in a
//! `Vec` and an index from key to slot.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone)]
pub struct Ledger<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> Default for Ledger<K, V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

// The index is derived from `entries`, so equality only looks at the ordered entries.
impl<K: PartialEq, V: PartialEq> PartialEq for Ledger<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K, V> Ledger<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the entry for `key`, inserting `V::default()` at the end if absent.
    pub fn entry_or_default<Q>(&mut self, key: &Q) -> &mut V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
        V: Default,
    {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                let owned = key.to_owned();
                self.index.insert(owned.clone(), slot);
                self.entries.push((owned, V::default()));
                slot
            }
        };
        &mut self.entries[slot].1
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    /// Entries in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Fold `other` into `self`.
    ///
    /// Keys already present keep their slot; keys new to `self` are appended in
    /// `other`'s order, so merging chunk results left to right reproduces the
    /// insertion order of a single sequential pass.
    pub fn merge_with<F>(&mut self, other: Ledger<K, V>, mut combine: F)
    where
        V: Default,
        F: FnMut(&mut V, V),
    {
        for (key, value) in other.entries {
            let target = self.entry_or_default(&key);
            combine(target, value);
        }
    }
}

impl<K, V> Serialize for Ledger<K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
