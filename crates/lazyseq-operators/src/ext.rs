//! Method-chaining surface over every `Sequence`.
//!
//! Adapters consume `self` and return a new deferred sequence; terminals
//! borrow `self` and start a fresh traversal. Closure bounds sit on each
//! method so closure argument types are inferred at the call site.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use lazyseq_core::comparer::{DefaultComparer, EqualityComparer};
use lazyseq_core::error::Result;
use lazyseq_core::types::Downcast;

use crate::aggregate;
use crate::collect::{self, Dictionary};
use crate::concat::{Concat, DefaultIfEmpty, Zip};
use crate::filter::{Filter, OfType};
use crate::flatten::FlatMap;
use crate::group::{identity, GroupBy, Lookup};
use crate::join::{CrossJoin, FullOuterJoin, GroupJoin, Join, LeftJoin, RightJoin};
use crate::map::{Cast, Map, MapIndexed};
use crate::partition::{self, Page, Skip, SkipLast, SkipWhile, Take, TakeLast, TakeWhile};
use crate::set::{self, Distinct, Except, Intersect, Union};
use crate::traits::Sequence;

/// Identity element projection used by plain `group_by`.
pub type Identity<T> = fn(T) -> T;

pub trait SequenceExt: Sequence + Sized {
    /// A fresh cursor, usable anywhere an `Iterator` is expected.
    fn iter(&self) -> Self::Cursor {
        self.cursor()
    }

    // ---- filtering and projection ----

    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        P: Fn(&Self::Item) -> bool,
    {
        Filter::new(self, predicate)
    }

    fn of_type<U>(self) -> OfType<Self, U>
    where
        Self::Item: Downcast<U>,
    {
        OfType::new(self)
    }

    fn map<F, R>(self, f: F) -> Map<Self, F>
    where
        F: Fn(Self::Item) -> R,
    {
        Map::new(self, f)
    }

    fn map_indexed<F, R>(self, f: F) -> MapIndexed<Self, F>
    where
        F: Fn(Self::Item, usize) -> R,
    {
        MapIndexed::new(self, f)
    }

    fn cast<U>(self) -> Cast<Self, U>
    where
        Self::Item: Downcast<U>,
    {
        Cast::new(self)
    }

    fn flat_map<F, U>(self, f: F) -> FlatMap<Self, F>
    where
        F: Fn(Self::Item) -> U,
        U: IntoIterator,
    {
        FlatMap::new(self, f)
    }

    // ---- partitioning ----

    fn take(self, n: usize) -> Take<Self> {
        Take::new(self, n)
    }

    fn skip(self, n: usize) -> Skip<Self> {
        Skip::new(self, n)
    }

    fn take_while<P>(self, predicate: P) -> TakeWhile<Self, P>
    where
        P: Fn(&Self::Item) -> bool,
    {
        TakeWhile::new(self, predicate)
    }

    fn skip_while<P>(self, predicate: P) -> SkipWhile<Self, P>
    where
        P: Fn(&Self::Item) -> bool,
    {
        SkipWhile::new(self, predicate)
    }

    fn take_last(self, n: usize) -> TakeLast<Self> {
        TakeLast::new(self, n)
    }

    fn skip_last(self, n: usize) -> SkipLast<Self> {
        SkipLast::new(self, n)
    }

    fn page(self, page_number: usize, page_size: usize) -> Page<Self> {
        partition::page(self, page_number, page_size)
    }

    // ---- combining ----

    fn concat<B>(self, other: B) -> Concat<Self, B>
    where
        B: Sequence<Item = Self::Item>,
    {
        Concat::new(self, other)
    }

    fn zip<B, F, R>(self, other: B, f: F) -> Zip<Self, B, F>
    where
        B: Sequence,
        F: Fn(Self::Item, B::Item) -> R,
    {
        Zip::new(self, other, f)
    }

    fn default_if_empty(self, value: Self::Item) -> DefaultIfEmpty<Self, Self::Item> {
        DefaultIfEmpty::new(self, value)
    }

    // ---- set operations ----

    fn distinct(self) -> Distinct<Self, DefaultComparer> {
        Distinct::new(self, DefaultComparer)
    }

    fn distinct_with<C>(self, comparer: C) -> Distinct<Self, C>
    where
        C: EqualityComparer<Self::Item>,
    {
        Distinct::new(self, comparer)
    }

    fn union<B>(self, other: B) -> Union<Self, B, DefaultComparer>
    where
        B: Sequence<Item = Self::Item>,
    {
        set::union(self, other, DefaultComparer)
    }

    fn union_with<B, C>(self, other: B, comparer: C) -> Union<Self, B, C>
    where
        B: Sequence<Item = Self::Item>,
        C: EqualityComparer<Self::Item>,
    {
        set::union(self, other, comparer)
    }

    fn except<B>(self, other: B) -> Except<Self, B, DefaultComparer>
    where
        B: Sequence<Item = Self::Item>,
    {
        Except::new(self, other, DefaultComparer)
    }

    fn except_with<B, C>(self, other: B, comparer: C) -> Except<Self, B, C>
    where
        B: Sequence<Item = Self::Item>,
        C: EqualityComparer<Self::Item>,
    {
        Except::new(self, other, comparer)
    }

    fn intersect<B>(self, other: B) -> Intersect<Self, B, DefaultComparer>
    where
        B: Sequence<Item = Self::Item>,
    {
        Intersect::new(self, other, DefaultComparer)
    }

    fn intersect_with<B, C>(self, other: B, comparer: C) -> Intersect<Self, B, C>
    where
        B: Sequence<Item = Self::Item>,
        C: EqualityComparer<Self::Item>,
    {
        Intersect::new(self, other, comparer)
    }

    // ---- grouping ----

    fn group_by<K, KF>(
        self,
        key: KF,
    ) -> GroupBy<Self, K, KF, Identity<Self::Item>, DefaultComparer>
    where
        K: Clone + Eq + Hash,
        KF: Fn(&Self::Item) -> K,
    {
        GroupBy::new(self, key, identity as Identity<Self::Item>, DefaultComparer)
    }

    fn group_by_with<K, KF, C>(
        self,
        key: KF,
        comparer: C,
    ) -> GroupBy<Self, K, KF, Identity<Self::Item>, C>
    where
        K: Clone,
        KF: Fn(&Self::Item) -> K,
        C: EqualityComparer<K>,
    {
        GroupBy::new(self, key, identity as Identity<Self::Item>, comparer)
    }

    fn group_by_map<K, V, KF, EF>(
        self,
        key: KF,
        elem: EF,
    ) -> GroupBy<Self, K, KF, EF, DefaultComparer>
    where
        K: Clone + Eq + Hash,
        KF: Fn(&Self::Item) -> K,
        EF: Fn(Self::Item) -> V,
    {
        GroupBy::new(self, key, elem, DefaultComparer)
    }

    // ---- joins ----

    fn join<I, K, OK, IK, F, R>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: F,
    ) -> Join<Self, I, K, OK, IK, F, DefaultComparer>
    where
        I: Sequence,
        K: Clone + Eq + Hash,
        OK: Fn(&Self::Item) -> K,
        IK: Fn(&I::Item) -> K,
        F: Fn(Self::Item, I::Item) -> R,
    {
        Join::new(self, inner, outer_key, inner_key, result, DefaultComparer)
    }

    fn join_with<I, K, OK, IK, F, R, C>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: F,
        comparer: C,
    ) -> Join<Self, I, K, OK, IK, F, C>
    where
        I: Sequence,
        K: Clone,
        OK: Fn(&Self::Item) -> K,
        IK: Fn(&I::Item) -> K,
        F: Fn(Self::Item, I::Item) -> R,
        C: EqualityComparer<K>,
    {
        Join::new(self, inner, outer_key, inner_key, result, comparer)
    }

    fn left_join<I, K, OK, IK, F, R>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: F,
    ) -> LeftJoin<Self, I, K, OK, IK, F, DefaultComparer>
    where
        I: Sequence,
        K: Clone + Eq + Hash,
        OK: Fn(&Self::Item) -> K,
        IK: Fn(&I::Item) -> K,
        F: Fn(Self::Item, Option<I::Item>) -> R,
    {
        LeftJoin::new(self, inner, outer_key, inner_key, result, DefaultComparer)
    }

    fn left_join_with<I, K, OK, IK, F, R, C>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: F,
        comparer: C,
    ) -> LeftJoin<Self, I, K, OK, IK, F, C>
    where
        I: Sequence,
        K: Clone,
        OK: Fn(&Self::Item) -> K,
        IK: Fn(&I::Item) -> K,
        F: Fn(Self::Item, Option<I::Item>) -> R,
        C: EqualityComparer<K>,
    {
        LeftJoin::new(self, inner, outer_key, inner_key, result, comparer)
    }

    fn right_join<I, K, OK, IK, F, R>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: F,
    ) -> RightJoin<Self, I, K, OK, IK, F, DefaultComparer>
    where
        I: Sequence,
        K: Clone + Eq + Hash,
        OK: Fn(&Self::Item) -> K,
        IK: Fn(&I::Item) -> K,
        F: Fn(Option<Self::Item>, I::Item) -> R,
    {
        RightJoin::new(self, inner, outer_key, inner_key, result, DefaultComparer)
    }

    fn right_join_with<I, K, OK, IK, F, R, C>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: F,
        comparer: C,
    ) -> RightJoin<Self, I, K, OK, IK, F, C>
    where
        I: Sequence,
        K: Clone,
        OK: Fn(&Self::Item) -> K,
        IK: Fn(&I::Item) -> K,
        F: Fn(Option<Self::Item>, I::Item) -> R,
        C: EqualityComparer<K>,
    {
        RightJoin::new(self, inner, outer_key, inner_key, result, comparer)
    }

    fn full_outer_join<I, K, OK, IK, F, R>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: F,
    ) -> FullOuterJoin<Self, I, K, OK, IK, F, DefaultComparer>
    where
        I: Sequence,
        K: Clone + Eq + Hash,
        OK: Fn(&Self::Item) -> K,
        IK: Fn(&I::Item) -> K,
        F: Fn(Option<Self::Item>, Option<I::Item>) -> R,
    {
        FullOuterJoin::new(self, inner, outer_key, inner_key, result, DefaultComparer)
    }

    fn full_outer_join_with<I, K, OK, IK, F, R, C>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: F,
        comparer: C,
    ) -> FullOuterJoin<Self, I, K, OK, IK, F, C>
    where
        I: Sequence,
        K: Clone,
        OK: Fn(&Self::Item) -> K,
        IK: Fn(&I::Item) -> K,
        F: Fn(Option<Self::Item>, Option<I::Item>) -> R,
        C: EqualityComparer<K>,
    {
        FullOuterJoin::new(self, inner, outer_key, inner_key, result, comparer)
    }

    fn group_join<I, K, OK, IK, F, R>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: F,
    ) -> GroupJoin<Self, I, K, OK, IK, F, DefaultComparer>
    where
        I: Sequence,
        K: Clone + Eq + Hash,
        OK: Fn(&Self::Item) -> K,
        IK: Fn(&I::Item) -> K,
        F: Fn(Self::Item, Vec<I::Item>) -> R,
    {
        GroupJoin::new(self, inner, outer_key, inner_key, result, DefaultComparer)
    }

    fn group_join_with<I, K, OK, IK, F, R, C>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: F,
        comparer: C,
    ) -> GroupJoin<Self, I, K, OK, IK, F, C>
    where
        I: Sequence,
        K: Clone,
        OK: Fn(&Self::Item) -> K,
        IK: Fn(&I::Item) -> K,
        F: Fn(Self::Item, Vec<I::Item>) -> R,
        C: EqualityComparer<K>,
    {
        GroupJoin::new(self, inner, outer_key, inner_key, result, comparer)
    }

    fn cross_join<B, F, R>(self, other: B, f: F) -> CrossJoin<Self, B, F>
    where
        B: Sequence,
        F: Fn(Self::Item, B::Item) -> R,
    {
        CrossJoin::new(self, other, f)
    }

    // ---- terminals ----

    fn first(&self) -> Result<Self::Item> {
        aggregate::first(self)
    }

    fn first_where<P>(&self, predicate: P) -> Result<Self::Item>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        aggregate::first_where(self, predicate)
    }

    fn first_or_default(&self) -> Self::Item
    where
        Self::Item: Default,
    {
        aggregate::first_or_default(self)
    }

    fn first_or(&self, default: Self::Item) -> Self::Item {
        aggregate::first_or(self, default)
    }

    fn last(&self) -> Result<Self::Item> {
        aggregate::last(self)
    }

    fn last_where<P>(&self, predicate: P) -> Result<Self::Item>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        aggregate::last_where(self, predicate)
    }

    fn last_or_default(&self) -> Self::Item
    where
        Self::Item: Default,
    {
        aggregate::last_or_default(self)
    }

    fn last_or(&self, default: Self::Item) -> Self::Item {
        aggregate::last_or(self, default)
    }

    fn single(&self) -> Result<Self::Item> {
        aggregate::single(self)
    }

    fn single_where<P>(&self, predicate: P) -> Result<Self::Item>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        aggregate::single_where(self, predicate)
    }

    fn single_or_default(&self) -> Result<Self::Item>
    where
        Self::Item: Default,
    {
        aggregate::single_or_default(self)
    }

    fn single_or(&self, default: Self::Item) -> Result<Self::Item> {
        aggregate::single_or(self, default)
    }

    fn any(&self) -> bool {
        aggregate::any(self)
    }

    fn any_where<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&Self::Item) -> bool,
    {
        aggregate::any_where(self, predicate)
    }

    fn all<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&Self::Item) -> bool,
    {
        aggregate::all(self, predicate)
    }

    fn sequence_equal<B>(&self, other: &B) -> bool
    where
        B: Sequence<Item = Self::Item>,
        Self::Item: PartialEq,
    {
        aggregate::sequence_equal(self, other)
    }

    fn sequence_equal_with<B, C>(&self, other: &B, comparer: C) -> bool
    where
        B: Sequence<Item = Self::Item>,
        C: EqualityComparer<Self::Item>,
    {
        aggregate::sequence_equal_with(self, other, comparer)
    }

    fn aggregate<F>(&self, f: F) -> Result<Self::Item>
    where
        F: FnMut(Self::Item, Self::Item) -> Self::Item,
    {
        aggregate::aggregate(self, f)
    }

    fn fold<A, F>(&self, seed: A, f: F) -> A
    where
        F: FnMut(A, Self::Item) -> A,
    {
        aggregate::fold(self, seed, f)
    }

    fn fold_map<A, F, R, M>(&self, seed: A, f: F, result: M) -> R
    where
        F: FnMut(A, Self::Item) -> A,
        M: FnOnce(A) -> R,
    {
        aggregate::fold_map(self, seed, f, result)
    }

    fn sum(&self) -> Self::Item
    where
        Self::Item: std::iter::Sum,
    {
        aggregate::sum(self)
    }

    fn average(&self) -> Result<f64>
    where
        Self::Item: Into<f64>,
    {
        aggregate::average(self)
    }

    fn average_by<F>(&self, f: F) -> Result<f64>
    where
        F: FnMut(Self::Item) -> f64,
    {
        aggregate::average_by(self, f)
    }

    fn count(&self) -> usize {
        aggregate::count(self)
    }

    fn count_where<P>(&self, predicate: P) -> usize
    where
        P: FnMut(&Self::Item) -> bool,
    {
        aggregate::count_where(self, predicate)
    }

    fn element_at(&self, index: usize) -> Option<Self::Item> {
        aggregate::element_at(self, index)
    }

    // ---- materialization ----

    fn to_vec(&self) -> Result<Vec<Self::Item>> {
        collect::to_vec(self)
    }

    fn to_map<K, KF>(&self, key: KF) -> Result<HashMap<K, Self::Item>>
    where
        K: Eq + Hash + Debug,
        KF: Fn(&Self::Item) -> K,
    {
        collect::to_map(self, key)
    }

    fn to_map_values<K, V, KF, VF>(&self, key: KF, value: VF) -> Result<HashMap<K, V>>
    where
        K: Eq + Hash + Debug,
        KF: Fn(&Self::Item) -> K,
        VF: Fn(Self::Item) -> V,
    {
        collect::to_map_values(self, key, value)
    }

    fn to_map_with<K, V, KF, VF, C>(
        &self,
        key: KF,
        value: VF,
        comparer: C,
    ) -> Result<Dictionary<K, V, C>>
    where
        K: Debug,
        KF: Fn(&Self::Item) -> K,
        VF: Fn(Self::Item) -> V,
        C: EqualityComparer<K>,
    {
        collect::to_map_with(self, key, value, comparer)
    }

    fn to_lookup<K, KF>(&self, key: KF) -> Result<Lookup<K, Self::Item>>
    where
        K: Clone + Eq + Hash,
        KF: Fn(&Self::Item) -> K,
    {
        collect::to_lookup(self, key)
    }

    fn to_lookup_with<K, V, KF, EF, C>(
        &self,
        key: KF,
        elem: EF,
        comparer: C,
    ) -> Result<Lookup<K, V, C>>
    where
        K: Clone,
        KF: Fn(&Self::Item) -> K,
        EF: Fn(Self::Item) -> V,
        C: EqualityComparer<K>,
    {
        collect::to_lookup_with(self, key, elem, comparer)
    }
}

impl<S: Sequence> SequenceExt for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{from_vec, range};

    #[test]
    fn chains_read_left_to_right() {
        let evens_squared = range(1, 10)
            .filter(|x| x % 2 == 0)
            .map(|x| x * x)
            .to_vec()
            .unwrap();
        assert_eq!(evens_squared, vec![4, 16, 36, 64, 100]);
    }

    #[test]
    fn totals_from_one_source() {
        let numbers = from_vec(vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        let total = numbers.count();
        let evens = (&numbers).filter(|n| n % 2 == 0).count();
        let fourths = (&numbers)
            .map_indexed(|n, i: usize| (n, i))
            .filter(|(_, i)| (i + 1) % 4 == 0)
            .map(|(n, _)| n)
            .to_vec()
            .unwrap();
        assert_eq!((total, evens, fourths), (12, 6, vec![4, 8, 12]));
    }

    #[test]
    fn group_by_then_project() {
        let summary: Vec<(bool, usize)> = range(1, 9)
            .group_by(|x| x % 2 == 0)
            .map(|g| (*g.key(), g.len()))
            .iter()
            .collect();
        assert_eq!(summary, vec![(false, 5), (true, 4)]);
    }
}
