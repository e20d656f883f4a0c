//! Eager materialization: vectors, maps, dictionaries and lookups.
//!
//! Every materializer counts what it buffers against
//! `EngineConfig::max_materialized` and fails with `MaterializeLimit` as soon
//! as the cap is crossed, so an unbounded source cannot grow without limit.
//! Key collisions in `to_map*` are hard `DuplicateKey` errors; the first
//! entry is never overwritten.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use lazyseq_core::comparer::{DefaultComparer, EqualityComparer};
use lazyseq_core::config::{self, EngineConfig};
use lazyseq_core::error::{Error, Result};
use serde::ser::{Serialize, Serializer};

use crate::group::{identity, Grouper, Lookup};
use crate::index::KeyIndex;
use crate::trace;
use crate::traits::Sequence;

/// Comparer-aware map with insertion-ordered iteration.
pub struct Dictionary<K, V, C = DefaultComparer> {
    index: KeyIndex<K, C>,
    values: Vec<V>,
}

impl<K, V, C: EqualityComparer<K>> Dictionary<K, V, C> {
    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.find(key).map(|slot| &self.values[slot])
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains(key)
    }
}

impl<K, V, C> Dictionary<K, V, C> {
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn keys(&self) -> &[K] {
        self.index.keys()
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.index.keys().iter().zip(&self.values)
    }
}

/// Serialized as a map in insertion order.
impl<K: Serialize, V: Serialize, C> Serialize for Dictionary<K, V, C> {
    fn serialize<Se: Serializer>(&self, serializer: Se) -> std::result::Result<Se::Ok, Se::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Materializers bound to one configuration.
#[derive(Debug, Clone, Copy)]
pub struct Collector<'c> {
    config: &'c EngineConfig,
}

impl Collector<'static> {
    /// Collector reading the process-wide config.
    pub fn global() -> Self {
        Self {
            config: config::global(),
        }
    }
}

impl<'c> Collector<'c> {
    pub fn new(config: &'c EngineConfig) -> Self {
        Self { config }
    }

    pub fn to_vec<S: Sequence + ?Sized>(&self, source: &S) -> Result<Vec<S::Item>> {
        let mut out = Vec::new();
        for item in source.cursor() {
            out.push(item);
            self.config.check_materialized("to_vec", out.len())?;
        }
        trace::emit("to_vec", &[("rows", out.len())]);
        Ok(out)
    }

    pub fn to_map_values<S, K, V, KF, VF>(
        &self,
        source: &S,
        key: KF,
        value: VF,
    ) -> Result<HashMap<K, V>>
    where
        S: Sequence + ?Sized,
        K: Eq + Hash + Debug,
        KF: Fn(&S::Item) -> K,
        VF: Fn(S::Item) -> V,
    {
        let mut out = HashMap::with_capacity(self.config.index_capacity_hint);
        for item in source.cursor() {
            let k = key(&item);
            if out.contains_key(&k) {
                return Err(Error::duplicate_key(&k));
            }
            out.insert(k, value(item));
            self.config.check_materialized("to_map", out.len())?;
        }
        trace::emit("to_map", &[("rows", out.len())]);
        Ok(out)
    }

    pub fn to_map<S, K, KF>(&self, source: &S, key: KF) -> Result<HashMap<K, S::Item>>
    where
        S: Sequence + ?Sized,
        K: Eq + Hash + Debug,
        KF: Fn(&S::Item) -> K,
    {
        self.to_map_values(source, key, identity)
    }

    pub fn to_map_with<S, K, V, KF, VF, C>(
        &self,
        source: &S,
        key: KF,
        value: VF,
        comparer: C,
    ) -> Result<Dictionary<K, V, C>>
    where
        S: Sequence + ?Sized,
        K: Debug,
        KF: Fn(&S::Item) -> K,
        VF: Fn(S::Item) -> V,
        C: EqualityComparer<K>,
    {
        let mut index =
            KeyIndex::with_capacity(Rc::new(comparer), self.config.index_capacity_hint);
        let mut values = Vec::new();
        for item in source.cursor() {
            let k = key(&item);
            if index.contains(&k) {
                return Err(Error::duplicate_key(&k));
            }
            index.insert(k);
            values.push(value(item));
            self.config.check_materialized("to_map", values.len())?;
        }
        trace::emit("to_map", &[("rows", values.len())]);
        Ok(Dictionary { index, values })
    }

    pub fn to_lookup_with<S, K, V, KF, EF, C>(
        &self,
        source: &S,
        key: KF,
        elem: EF,
        comparer: C,
    ) -> Result<Lookup<K, V, C>>
    where
        S: Sequence + ?Sized,
        K: Clone,
        KF: Fn(&S::Item) -> K,
        EF: Fn(S::Item) -> V,
        C: EqualityComparer<K>,
    {
        let mut grouper = Grouper::new(Rc::new(comparer));
        for item in source.cursor() {
            grouper.push(key(&item), elem(item));
            self.config.check_materialized("to_lookup", grouper.rows())?;
        }
        Ok(grouper.finish())
    }

    pub fn to_lookup<S, K, KF>(&self, source: &S, key: KF) -> Result<Lookup<K, S::Item>>
    where
        S: Sequence + ?Sized,
        K: Clone + Eq + Hash,
        KF: Fn(&S::Item) -> K,
    {
        self.to_lookup_with(source, key, identity, DefaultComparer)
    }
}

pub fn to_vec<S: Sequence + ?Sized>(source: &S) -> Result<Vec<S::Item>> {
    Collector::global().to_vec(source)
}

pub fn to_map<S, K, KF>(source: &S, key: KF) -> Result<HashMap<K, S::Item>>
where
    S: Sequence + ?Sized,
    K: Eq + Hash + Debug,
    KF: Fn(&S::Item) -> K,
{
    Collector::global().to_map(source, key)
}

pub fn to_map_values<S, K, V, KF, VF>(source: &S, key: KF, value: VF) -> Result<HashMap<K, V>>
where
    S: Sequence + ?Sized,
    K: Eq + Hash + Debug,
    KF: Fn(&S::Item) -> K,
    VF: Fn(S::Item) -> V,
{
    Collector::global().to_map_values(source, key, value)
}

pub fn to_map_with<S, K, V, KF, VF, C>(
    source: &S,
    key: KF,
    value: VF,
    comparer: C,
) -> Result<Dictionary<K, V, C>>
where
    S: Sequence + ?Sized,
    K: Debug,
    KF: Fn(&S::Item) -> K,
    VF: Fn(S::Item) -> V,
    C: EqualityComparer<K>,
{
    Collector::global().to_map_with(source, key, value, comparer)
}

pub fn to_lookup<S, K, KF>(source: &S, key: KF) -> Result<Lookup<K, S::Item>>
where
    S: Sequence + ?Sized,
    K: Clone + Eq + Hash,
    KF: Fn(&S::Item) -> K,
{
    Collector::global().to_lookup(source, key)
}

pub fn to_lookup_with<S, K, V, KF, EF, C>(
    source: &S,
    key: KF,
    elem: EF,
    comparer: C,
) -> Result<Lookup<K, V, C>>
where
    S: Sequence + ?Sized,
    K: Clone,
    KF: Fn(&S::Item) -> K,
    EF: Fn(S::Item) -> V,
    C: EqualityComparer<K>,
{
    Collector::global().to_lookup_with(source, key, elem, comparer)
}
