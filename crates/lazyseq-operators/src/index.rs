//! Comparer-driven hash index shared by set operations, lookups, joins and
//! `Dictionary`.
//!
//! Keys are bucketed by `EqualityComparer::hash`; `equals` is only consulted
//! inside a bucket. Slots are dense and numbered in first-insertion order,
//! which is what gives lookups and set operations their first-seen ordering.

use std::collections::HashMap;
use std::rc::Rc;

use lazyseq_core::comparer::EqualityComparer;
use lazyseq_core::config;

pub struct KeyIndex<K, C> {
    comparer: Rc<C>,
    keys: Vec<K>,
    buckets: HashMap<u64, Vec<usize>>,
}

impl<K, C: EqualityComparer<K>> KeyIndex<K, C> {
    pub fn new(comparer: Rc<C>) -> Self {
        Self::with_capacity(comparer, config::global().index_capacity_hint)
    }

    pub fn with_capacity(comparer: Rc<C>, capacity: usize) -> Self {
        Self {
            comparer,
            keys: Vec::with_capacity(capacity),
            buckets: HashMap::with_capacity(capacity),
        }
    }

    /// Slot of a key equal (by the comparer) to `key`, if any.
    pub fn find(&self, key: &K) -> Option<usize> {
        let hash = self.comparer.hash(key);
        self.buckets.get(&hash).and_then(|slots| {
            slots
                .iter()
                .copied()
                .find(|&slot| self.comparer.equals(&self.keys[slot], key))
        })
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Insert `key` unless an equal key is present.
    ///
    /// Returns the slot and whether the key was newly inserted. On a hit the
    /// first-seen key is kept and `key` is dropped.
    pub fn insert(&mut self, key: K) -> (usize, bool) {
        let hash = self.comparer.hash(&key);
        let bucket = self.buckets.entry(hash).or_default();
        if let Some(&slot) = bucket
            .iter()
            .find(|&&slot| self.comparer.equals(&self.keys[slot], &key))
        {
            return (slot, false);
        }
        let slot = self.keys.len();
        bucket.push(slot);
        self.keys.push(key);
        (slot, true)
    }

}

impl<K, C> KeyIndex<K, C> {
    pub fn key(&self, slot: usize) -> &K {
        &self.keys[slot]
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazyseq_core::comparer::{DefaultComparer, FnComparer};

    #[test]
    fn slots_follow_first_insertion() {
        let mut idx = KeyIndex::new(Rc::new(DefaultComparer));
        assert_eq!(idx.insert("b"), (0, true));
        assert_eq!(idx.insert("a"), (1, true));
        assert_eq!(idx.insert("b"), (0, false));
        assert_eq!(idx.keys(), &["b", "a"]);
        assert_eq!(idx.find(&"a"), Some(1));
        assert_eq!(idx.find(&"z"), None);
    }

    #[test]
    fn fresh_index_is_empty() {
        let idx: KeyIndex<i32, _> = KeyIndex::with_capacity(Rc::new(DefaultComparer), 4);
        assert!(idx.is_empty());
        assert_eq!(idx.len(), 0);
    }

    #[test]
    fn colliding_hashes_fall_back_to_equals() {
        // Every key lands in one bucket.
        let cmp = FnComparer::new(|a: &i32, b: &i32| a == b, |_: &i32| 0u64);
        let mut idx = KeyIndex::new(Rc::new(cmp));
        for k in [3, 1, 3, 2, 1] {
            idx.insert(k);
        }
        assert_eq!(idx.keys(), &[3, 1, 2]);
        assert_eq!(idx.len(), 3);
        assert!(idx.contains(&2));
        assert!(!idx.contains(&4));
    }
}
