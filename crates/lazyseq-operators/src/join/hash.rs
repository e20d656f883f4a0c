//! Hash joins that stream the outer side: inner, left, and group joins.

use std::marker::PhantomData;
use std::rc::Rc;

use lazyseq_core::comparer::EqualityComparer;

use super::Probe;
use crate::traits::Sequence;

/// Both inputs of a keyed join with their key selectors.
pub(crate) struct KeyedSides<O, I, K, OK, IK, F, C> {
    pub(crate) outer: O,
    pub(crate) inner: I,
    pub(crate) outer_key: Rc<OK>,
    pub(crate) inner_key: Rc<IK>,
    pub(crate) result: Rc<F>,
    pub(crate) comparer: Rc<C>,
    _key: PhantomData<fn() -> K>,
}

impl<O, I, K, OK, IK, F, C> KeyedSides<O, I, K, OK, IK, F, C> {
    pub(crate) fn new(
        outer: O,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: F,
        comparer: C,
    ) -> Self {
        Self {
            outer,
            inner,
            outer_key: Rc::new(outer_key),
            inner_key: Rc::new(inner_key),
            result: Rc::new(result),
            comparer: Rc::new(comparer),
            _key: PhantomData,
        }
    }
}

impl<O, I, K, OK, IK, F, C> KeyedSides<O, I, K, OK, IK, F, C>
where
    O: Sequence,
    I: Sequence,
    K: Clone,
    OK: Fn(&O::Item) -> K,
    IK: Fn(&I::Item) -> K,
    C: EqualityComparer<K>,
{
    pub(crate) fn probe(&self) -> Probe<O::Cursor, I::Cursor, K, OK, IK, C> {
        Probe::new(
            self.outer.cursor(),
            self.inner.cursor(),
            &self.outer_key,
            &self.inner_key,
            &self.comparer,
        )
    }
}

/// Inner equi-join: one result per matching (outer, inner) pair.
pub struct Join<O, I, K, OK, IK, F, C>(KeyedSides<O, I, K, OK, IK, F, C>);

impl<O, I, K, OK, IK, F, C> Join<O, I, K, OK, IK, F, C> {
    pub fn new(outer: O, inner: I, outer_key: OK, inner_key: IK, result: F, comparer: C) -> Self {
        Self(KeyedSides::new(
            outer, inner, outer_key, inner_key, result, comparer,
        ))
    }
}

impl<O, I, K, OK, IK, F, R, C> Sequence for Join<O, I, K, OK, IK, F, C>
where
    O: Sequence,
    I: Sequence,
    O::Item: Clone,
    I::Item: Clone,
    K: Clone,
    OK: Fn(&O::Item) -> K,
    IK: Fn(&I::Item) -> K,
    F: Fn(O::Item, I::Item) -> R,
    C: EqualityComparer<K>,
{
    type Item = R;
    type Cursor = JoinCursor<O::Cursor, I::Cursor, K, OK, IK, F, C>;

    fn cursor(&self) -> Self::Cursor {
        JoinCursor {
            probe: self.0.probe(),
            result: Rc::clone(&self.0.result),
            current: None,
        }
    }
}

pub struct JoinCursor<OC: Iterator, IC: Iterator, K, OK, IK, F, C> {
    probe: Probe<OC, IC, K, OK, IK, C>,
    result: Rc<F>,
    current: Option<(OC::Item, Rc<[IC::Item]>, usize)>,
}

impl<OC, IC, K, OK, IK, F, R, C> Iterator for JoinCursor<OC, IC, K, OK, IK, F, C>
where
    OC: Iterator,
    IC: Iterator,
    OC::Item: Clone,
    IC::Item: Clone,
    K: Clone,
    OK: Fn(&OC::Item) -> K,
    IK: Fn(&IC::Item) -> K,
    F: Fn(OC::Item, IC::Item) -> R,
    C: EqualityComparer<K>,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        loop {
            if let Some((outer, matches, pos)) = &mut self.current {
                if let Some(inner) = matches.get(*pos) {
                    *pos += 1;
                    return Some((self.result)(outer.clone(), inner.clone()));
                }
                self.current = None;
            }
            let (outer, matches) = self.probe.next_outer()?;
            if let Some(matches) = matches {
                self.current = Some((outer, matches, 0));
            }
        }
    }
}

/// Left outer join: an outer element without matches yields one result
/// paired with `None`.
pub struct LeftJoin<O, I, K, OK, IK, F, C>(KeyedSides<O, I, K, OK, IK, F, C>);

impl<O, I, K, OK, IK, F, C> LeftJoin<O, I, K, OK, IK, F, C> {
    pub fn new(outer: O, inner: I, outer_key: OK, inner_key: IK, result: F, comparer: C) -> Self {
        Self(KeyedSides::new(
            outer, inner, outer_key, inner_key, result, comparer,
        ))
    }
}

impl<O, I, K, OK, IK, F, R, C> Sequence for LeftJoin<O, I, K, OK, IK, F, C>
where
    O: Sequence,
    I: Sequence,
    O::Item: Clone,
    I::Item: Clone,
    K: Clone,
    OK: Fn(&O::Item) -> K,
    IK: Fn(&I::Item) -> K,
    F: Fn(O::Item, Option<I::Item>) -> R,
    C: EqualityComparer<K>,
{
    type Item = R;
    type Cursor = LeftJoinCursor<O::Cursor, I::Cursor, K, OK, IK, F, C>;

    fn cursor(&self) -> Self::Cursor {
        LeftJoinCursor {
            probe: self.0.probe(),
            result: Rc::clone(&self.0.result),
            current: None,
        }
    }
}

pub struct LeftJoinCursor<OC: Iterator, IC: Iterator, K, OK, IK, F, C> {
    probe: Probe<OC, IC, K, OK, IK, C>,
    result: Rc<F>,
    current: Option<(OC::Item, Rc<[IC::Item]>, usize)>,
}

impl<OC, IC, K, OK, IK, F, R, C> Iterator for LeftJoinCursor<OC, IC, K, OK, IK, F, C>
where
    OC: Iterator,
    IC: Iterator,
    OC::Item: Clone,
    IC::Item: Clone,
    K: Clone,
    OK: Fn(&OC::Item) -> K,
    IK: Fn(&IC::Item) -> K,
    F: Fn(OC::Item, Option<IC::Item>) -> R,
    C: EqualityComparer<K>,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        loop {
            if let Some((outer, matches, pos)) = &mut self.current {
                if let Some(inner) = matches.get(*pos) {
                    *pos += 1;
                    return Some((self.result)(outer.clone(), Some(inner.clone())));
                }
                self.current = None;
            }
            match self.probe.next_outer()? {
                (outer, Some(matches)) => self.current = Some((outer, matches, 0)),
                (outer, None) => return Some((self.result)(outer, None)),
            }
        }
    }
}

/// Group join: one result per outer element with all of its inner matches
/// (possibly none).
pub struct GroupJoin<O, I, K, OK, IK, F, C>(KeyedSides<O, I, K, OK, IK, F, C>);

impl<O, I, K, OK, IK, F, C> GroupJoin<O, I, K, OK, IK, F, C> {
    pub fn new(outer: O, inner: I, outer_key: OK, inner_key: IK, result: F, comparer: C) -> Self {
        Self(KeyedSides::new(
            outer, inner, outer_key, inner_key, result, comparer,
        ))
    }
}

impl<O, I, K, OK, IK, F, R, C> Sequence for GroupJoin<O, I, K, OK, IK, F, C>
where
    O: Sequence,
    I: Sequence,
    I::Item: Clone,
    K: Clone,
    OK: Fn(&O::Item) -> K,
    IK: Fn(&I::Item) -> K,
    F: Fn(O::Item, Vec<I::Item>) -> R,
    C: EqualityComparer<K>,
{
    type Item = R;
    type Cursor = GroupJoinCursor<O::Cursor, I::Cursor, K, OK, IK, F, C>;

    fn cursor(&self) -> Self::Cursor {
        GroupJoinCursor {
            probe: self.0.probe(),
            result: Rc::clone(&self.0.result),
        }
    }
}

pub struct GroupJoinCursor<OC, IC: Iterator, K, OK, IK, F, C> {
    probe: Probe<OC, IC, K, OK, IK, C>,
    result: Rc<F>,
}

impl<OC, IC, K, OK, IK, F, R, C> Iterator for GroupJoinCursor<OC, IC, K, OK, IK, F, C>
where
    OC: Iterator,
    IC: Iterator,
    IC::Item: Clone,
    K: Clone,
    OK: Fn(&OC::Item) -> K,
    IK: Fn(&IC::Item) -> K,
    F: Fn(OC::Item, Vec<IC::Item>) -> R,
    C: EqualityComparer<K>,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        let (outer, matches) = self.probe.next_outer()?;
        let group = matches.map(|m| m.to_vec()).unwrap_or_default();
        Some((self.result)(outer, group))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{from_vec, VecSource};
    use lazyseq_core::comparer::DefaultComparer;

    fn sides() -> (VecSource<&'static str>, VecSource<&'static str>) {
        (from_vec(vec!["a", "b", "c"]), from_vec(vec!["a", "c", "d"]))
    }

    #[test]
    fn inner_join_identity_keys() {
        let (left, right) = sides();
        let seq = Join::new(
            left,
            right,
            |l: &&'static str| *l,
            |r: &&'static str| *r,
            |l: &'static str, r: &'static str| (l, r),
            DefaultComparer,
        );
        assert_eq!(seq.cursor().collect::<Vec<_>>(), vec![("a", "a"), ("c", "c")]);
    }

    #[test]
    fn left_join_pairs_unmatched_with_none() {
        let (left, right) = sides();
        let seq = LeftJoin::new(
            left,
            right,
            |l: &&'static str| *l,
            |r: &&'static str| *r,
            |l: &'static str, r: Option<&'static str>| (l, r),
            DefaultComparer,
        );
        assert_eq!(
            seq.cursor().collect::<Vec<_>>(),
            vec![("a", Some("a")), ("b", None), ("c", Some("c"))]
        );
    }

    #[test]
    fn group_join_collects_matches() {
        let users = from_vec(vec![(1, "333@qq.com"), (2, "444@qq.com")]);
        let orders = from_vec(vec![(1, "order-1", 1), (2, "order-2", 1)]);
        let seq = GroupJoin::new(
            users,
            orders,
            |u: &(i32, &str)| u.0,
            |o: &(i32, &str, i32)| o.2,
            |u: (i32, &str), os: Vec<(i32, &str, i32)>| (u.0, os.len()),
            DefaultComparer,
        );
        assert_eq!(seq.cursor().collect::<Vec<_>>(), vec![(1, 2), (2, 0)]);
    }
}
