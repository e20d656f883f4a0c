//! Grouping: `Lookup`, `Grouping`, and the deferred `group_by`.
//!
//! A lookup keeps keys in first-occurrence order and values in insertion
//! order within each group. Keys are never sorted.

use std::marker::PhantomData;
use std::ops::Index;
use std::rc::Rc;

use lazyseq_core::comparer::{DefaultComparer, EqualityComparer};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::index::KeyIndex;
use crate::source::VecCursor;
use crate::trace;
use crate::traits::Sequence;

/// One key and the values that projected to it.
#[derive(Debug)]
pub struct Grouping<K, V> {
    key: K,
    values: Rc<[V]>,
}

impl<K: Clone, V> Clone for Grouping<K, V> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            values: Rc::clone(&self.values),
        }
    }
}

impl<K, V> Grouping<K, V> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn shared_values(&self) -> Rc<[V]> {
        Rc::clone(&self.values)
    }
}

impl<K, V: Clone> Sequence for Grouping<K, V> {
    type Item = V;
    type Cursor = VecCursor<V>;

    fn cursor(&self) -> Self::Cursor {
        VecCursor::over(Rc::clone(&self.values))
    }
}

impl<K: Serialize, V: Serialize> Serialize for Grouping<K, V> {
    fn serialize<Se: Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
        let mut state = serializer.serialize_struct("Grouping", 2)?;
        state.serialize_field("key", &self.key)?;
        state.serialize_field("values", &*self.values)?;
        state.end()
    }
}

/// Immutable key → ordered values mapping.
///
/// Indexing an absent key yields an empty slice, never an error.
pub struct Lookup<K, V, C = DefaultComparer> {
    index: KeyIndex<K, C>,
    groups: Rc<[Grouping<K, V>]>,
}

impl<K, V, C> Lookup<K, V, C>
where
    K: Clone,
    C: EqualityComparer<K>,
{
    pub(crate) fn build<I, KF, EF>(items: I, key: &KF, elem: &EF, comparer: Rc<C>) -> Self
    where
        I: IntoIterator,
        KF: Fn(&I::Item) -> K,
        EF: Fn(I::Item) -> V,
    {
        let mut grouper = Grouper::new(comparer);
        for item in items {
            let k = key(&item);
            grouper.push(k, elem(item));
        }
        grouper.finish()
    }

    pub fn get(&self, key: &K) -> &[V] {
        match self.index.find(key) {
            Some(slot) => self.groups[slot].values(),
            None => &[],
        }
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains(key)
    }

    pub(crate) fn slot_of(&self, key: &K) -> Option<usize> {
        self.index.find(key)
    }
}

impl<K, V, C> Lookup<K, V, C> {
    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.iter().map(|g| g.key())
    }

    pub fn groups(&self) -> &[Grouping<K, V>] {
        &self.groups
    }

    pub(crate) fn group_at(&self, slot: usize) -> &Grouping<K, V> {
        &self.groups[slot]
    }
}

/// Serialized as the ordered list of its groups.
impl<K: Serialize, V: Serialize, C> Serialize for Lookup<K, V, C> {
    fn serialize<Se: Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
        serializer.collect_seq(self.groups.iter())
    }
}

impl<K, V, C> Index<&K> for Lookup<K, V, C>
where
    K: Clone,
    C: EqualityComparer<K>,
{
    type Output = [V];

    fn index(&self, key: &K) -> &[V] {
        self.get(key)
    }
}

impl<K: Clone, V, C> Sequence for Lookup<K, V, C> {
    type Item = Grouping<K, V>;
    type Cursor = VecCursor<Grouping<K, V>>;

    fn cursor(&self) -> Self::Cursor {
        VecCursor::over(Rc::clone(&self.groups))
    }
}

/// Incremental lookup builder.
pub(crate) struct Grouper<K, V, C> {
    index: KeyIndex<K, C>,
    groups: Vec<Vec<V>>,
    rows: usize,
}

impl<K, V, C> Grouper<K, V, C>
where
    K: Clone,
    C: EqualityComparer<K>,
{
    pub(crate) fn new(comparer: Rc<C>) -> Self {
        Self {
            index: KeyIndex::new(comparer),
            groups: Vec::new(),
            rows: 0,
        }
    }

    /// Append `value` to the group of `key`; returns the group's slot.
    pub(crate) fn push(&mut self, key: K, value: V) -> usize {
        let (slot, fresh) = self.index.insert(key);
        if fresh {
            self.groups.push(Vec::new());
        }
        self.groups[slot].push(value);
        self.rows += 1;
        slot
    }

    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    pub(crate) fn finish(self) -> Lookup<K, V, C> {
        trace::emit(
            "lookup_built",
            &[("keys", self.index.len()), ("rows", self.rows)],
        );
        let groups: Vec<Grouping<K, V>> = self
            .index
            .keys()
            .iter()
            .cloned()
            .zip(self.groups)
            .map(|(key, values)| Grouping {
                key,
                values: values.into(),
            })
            .collect();
        Lookup {
            index: self.index,
            groups: groups.into(),
        }
    }
}

pub(crate) fn identity<T>(value: T) -> T {
    value
}

/// Deferred grouping. Each traversal makes one pass over the source on its
/// first pull, then yields groups in first-occurrence key order.
pub struct GroupBy<S, K, KF, EF, C> {
    source: S,
    key: Rc<KF>,
    elem: Rc<EF>,
    comparer: Rc<C>,
    _key: PhantomData<fn() -> K>,
}

impl<S, K, KF, EF, C> GroupBy<S, K, KF, EF, C> {
    pub fn new(source: S, key: KF, elem: EF, comparer: C) -> Self {
        Self {
            source,
            key: Rc::new(key),
            elem: Rc::new(elem),
            comparer: Rc::new(comparer),
            _key: PhantomData,
        }
    }
}

impl<S, K, V, KF, EF, C> Sequence for GroupBy<S, K, KF, EF, C>
where
    S: Sequence,
    K: Clone,
    KF: Fn(&S::Item) -> K,
    EF: Fn(S::Item) -> V,
    C: EqualityComparer<K>,
{
    type Item = Grouping<K, V>;
    type Cursor = GroupByCursor<S::Cursor, K, V, KF, EF, C>;

    fn cursor(&self) -> Self::Cursor {
        GroupByCursor {
            pending: Some(self.source.cursor()),
            key: Rc::clone(&self.key),
            elem: Rc::clone(&self.elem),
            comparer: Rc::clone(&self.comparer),
            groups: None,
        }
    }
}

pub struct GroupByCursor<I, K, V, KF, EF, C> {
    pending: Option<I>,
    key: Rc<KF>,
    elem: Rc<EF>,
    comparer: Rc<C>,
    groups: Option<VecCursor<Grouping<K, V>>>,
}

impl<I, K, V, KF, EF, C> Iterator for GroupByCursor<I, K, V, KF, EF, C>
where
    I: Iterator,
    K: Clone,
    KF: Fn(&I::Item) -> K,
    EF: Fn(I::Item) -> V,
    C: EqualityComparer<K>,
{
    type Item = Grouping<K, V>;

    fn next(&mut self) -> Option<Grouping<K, V>> {
        if let Some(upstream) = self.pending.take() {
            let lookup = Lookup::build(
                upstream,
                &*self.key,
                &*self.elem,
                Rc::clone(&self.comparer),
            );
            self.groups = Some(lookup.cursor());
        }
        self.groups.as_mut()?.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::from_vec;

    #[test]
    fn groups_in_first_occurrence_order() {
        let seq = GroupBy::new(
            from_vec((1..=9).collect::<Vec<i32>>()),
            |x: &i32| x % 2 == 0,
            identity,
            DefaultComparer,
        );
        let groups: Vec<_> = seq.cursor().collect();
        assert_eq!(groups.len(), 2);
        assert!(!*groups[0].key());
        assert_eq!(groups[0].values(), &[1, 3, 5, 7, 9]);
        assert!(*groups[1].key());
        assert_eq!(groups[1].values(), &[2, 4, 6, 8]);
    }

    #[test]
    fn lookup_absent_key_is_empty() {
        let words = ["one", "two", "three"];
        let lookup = Lookup::build(
            words,
            &|w: &&str| w.len(),
            &identity,
            Rc::new(DefaultComparer),
        );
        assert_eq!(&lookup[&3], &["one", "two"]);
        assert_eq!(&lookup[&5], &["three"]);
        assert!(lookup[&4].is_empty());
        assert_eq!(lookup.keys().copied().collect::<Vec<_>>(), vec![3, 5]);
    }

    #[test]
    fn lookup_serializes_as_group_list() {
        let lookup = Lookup::build(
            ["one", "two", "three"],
            &|w: &&str| w.len(),
            &identity,
            Rc::new(DefaultComparer),
        );
        let json = serde_json::to_string(&lookup).unwrap();
        assert_eq!(
            json,
            r#"[{"key":3,"values":["one","two"]},{"key":5,"values":["three"]}]"#
        );
    }
}
