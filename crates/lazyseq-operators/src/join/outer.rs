//! Joins that keep every inner element: right and full outer.

use std::rc::Rc;
use std::vec;

use lazyseq_core::comparer::EqualityComparer;

use super::hash::KeyedSides;
use super::Probe;
use crate::group::{Grouper, Lookup};
use crate::traits::Sequence;

/// Right outer join. The outer side is indexed and the inner side streamed,
/// so results follow inner order; an unmatched inner element is paired
/// with `None`.
pub struct RightJoin<O, I, K, OK, IK, F, C>(KeyedSides<O, I, K, OK, IK, F, C>);

impl<O, I, K, OK, IK, F, C> RightJoin<O, I, K, OK, IK, F, C> {
    pub fn new(outer: O, inner: I, outer_key: OK, inner_key: IK, result: F, comparer: C) -> Self {
        Self(KeyedSides::new(
            outer, inner, outer_key, inner_key, result, comparer,
        ))
    }
}

impl<O, I, K, OK, IK, F, R, C> Sequence for RightJoin<O, I, K, OK, IK, F, C>
where
    O: Sequence,
    I: Sequence,
    O::Item: Clone,
    I::Item: Clone,
    K: Clone,
    OK: Fn(&O::Item) -> K,
    IK: Fn(&I::Item) -> K,
    F: Fn(Option<O::Item>, I::Item) -> R,
    C: EqualityComparer<K>,
{
    type Item = R;
    type Cursor = RightJoinCursor<O::Cursor, I::Cursor, K, OK, IK, F, C>;

    fn cursor(&self) -> Self::Cursor {
        let sides = &self.0;
        RightJoinCursor {
            probe: Probe::new(
                sides.inner.cursor(),
                sides.outer.cursor(),
                &sides.inner_key,
                &sides.outer_key,
                &sides.comparer,
            ),
            result: Rc::clone(&sides.result),
            current: None,
        }
    }
}

pub struct RightJoinCursor<OC: Iterator, IC: Iterator, K, OK, IK, F, C> {
    probe: Probe<IC, OC, K, IK, OK, C>,
    result: Rc<F>,
    current: Option<(IC::Item, Rc<[OC::Item]>, usize)>,
}

impl<OC, IC, K, OK, IK, F, R, C> Iterator for RightJoinCursor<OC, IC, K, OK, IK, F, C>
where
    OC: Iterator,
    IC: Iterator,
    OC::Item: Clone,
    IC::Item: Clone,
    K: Clone,
    OK: Fn(&OC::Item) -> K,
    IK: Fn(&IC::Item) -> K,
    F: Fn(Option<OC::Item>, IC::Item) -> R,
    C: EqualityComparer<K>,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        loop {
            if let Some((inner, matches, pos)) = &mut self.current {
                if let Some(outer) = matches.get(*pos) {
                    *pos += 1;
                    return Some((self.result)(Some(outer.clone()), inner.clone()));
                }
                self.current = None;
            }
            match self.probe.next_outer()? {
                (inner, Some(matches)) => self.current = Some((inner, matches, 0)),
                (inner, None) => return Some((self.result)(None, inner)),
            }
        }
    }
}

/// Full outer join: the left join in outer order, then every inner element
/// that matched nothing, in inner order. A matched pair appears once.
pub struct FullOuterJoin<O, I, K, OK, IK, F, C>(KeyedSides<O, I, K, OK, IK, F, C>);

impl<O, I, K, OK, IK, F, C> FullOuterJoin<O, I, K, OK, IK, F, C> {
    pub fn new(outer: O, inner: I, outer_key: OK, inner_key: IK, result: F, comparer: C) -> Self {
        Self(KeyedSides::new(
            outer, inner, outer_key, inner_key, result, comparer,
        ))
    }
}

impl<O, I, K, OK, IK, F, R, C> Sequence for FullOuterJoin<O, I, K, OK, IK, F, C>
where
    O: Sequence,
    I: Sequence,
    O::Item: Clone,
    I::Item: Clone,
    K: Clone,
    OK: Fn(&O::Item) -> K,
    IK: Fn(&I::Item) -> K,
    F: Fn(Option<O::Item>, Option<I::Item>) -> R,
    C: EqualityComparer<K>,
{
    type Item = R;
    type Cursor = FullOuterJoinCursor<O::Cursor, I::Cursor, K, OK, IK, F, C>;

    fn cursor(&self) -> Self::Cursor {
        let sides = &self.0;
        FullOuterJoinCursor {
            outer: sides.outer.cursor(),
            pending: Some(sides.inner.cursor()),
            outer_key: Rc::clone(&sides.outer_key),
            inner_key: Rc::clone(&sides.inner_key),
            result: Rc::clone(&sides.result),
            comparer: Rc::clone(&sides.comparer),
            table: None,
            current: None,
            tail: None,
        }
    }
}

/// Inner rows in arrival order, indexed by key, with a matched flag per row.
struct InnerRows<T, K, C> {
    rows: Vec<T>,
    matched: Vec<bool>,
    by_key: Lookup<K, usize, C>,
}

pub struct FullOuterJoinCursor<OC: Iterator, IC: Iterator, K, OK, IK, F, C> {
    outer: OC,
    pending: Option<IC>,
    outer_key: Rc<OK>,
    inner_key: Rc<IK>,
    result: Rc<F>,
    comparer: Rc<C>,
    table: Option<InnerRows<IC::Item, K, C>>,
    current: Option<(OC::Item, Rc<[usize]>, usize)>,
    tail: Option<std::iter::Zip<vec::IntoIter<IC::Item>, vec::IntoIter<bool>>>,
}

impl<OC, IC, K, OK, IK, F, R, C> Iterator for FullOuterJoinCursor<OC, IC, K, OK, IK, F, C>
where
    OC: Iterator,
    IC: Iterator,
    OC::Item: Clone,
    IC::Item: Clone,
    K: Clone,
    OK: Fn(&OC::Item) -> K,
    IK: Fn(&IC::Item) -> K,
    F: Fn(Option<OC::Item>, Option<IC::Item>) -> R,
    C: EqualityComparer<K>,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        if let Some(inner) = self.pending.take() {
            let mut grouper = Grouper::new(Rc::clone(&self.comparer));
            let mut rows = Vec::new();
            for item in inner {
                grouper.push((self.inner_key)(&item), rows.len());
                rows.push(item);
            }
            self.table = Some(InnerRows {
                matched: vec![false; rows.len()],
                rows,
                by_key: grouper.finish(),
            });
        }

        if let Some(tail) = &mut self.tail {
            let (item, _) = tail.find(|(_, matched)| !matched)?;
            return Some((self.result)(None, Some(item)));
        }

        let table = self.table.as_mut()?;
        loop {
            if let Some((outer, hits, pos)) = &mut self.current {
                if let Some(&row) = hits.get(*pos) {
                    *pos += 1;
                    table.matched[row] = true;
                    let inner = table.rows[row].clone();
                    return Some((self.result)(Some(outer.clone()), Some(inner)));
                }
                self.current = None;
            }
            let Some(outer) = self.outer.next() else {
                break;
            };
            let key = (self.outer_key)(&outer);
            match table.by_key.slot_of(&key) {
                Some(slot) => {
                    let hits = table.by_key.group_at(slot).shared_values();
                    self.current = Some((outer, hits, 0));
                }
                None => return Some((self.result)(Some(outer), None)),
            }
        }

        let InnerRows { rows, matched, .. } = self.table.take()?;
        self.tail = Some(rows.into_iter().zip(matched));
        self.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::from_vec;
    use lazyseq_core::comparer::DefaultComparer;

    fn key(s: &&'static str) -> &'static str {
        *s
    }

    #[test]
    fn right_join_follows_inner_order() {
        let seq = RightJoin::new(
            from_vec(vec!["a", "b", "c"]),
            from_vec(vec!["a", "c", "d"]),
            key,
            key,
            |l: Option<&'static str>, r: &'static str| (l, r),
            DefaultComparer,
        );
        assert_eq!(
            seq.cursor().collect::<Vec<_>>(),
            vec![(Some("a"), "a"), (Some("c"), "c"), (None, "d")]
        );
    }

    #[test]
    fn full_outer_join_appends_unmatched_inner() {
        let seq = FullOuterJoin::new(
            from_vec(vec!["a", "b", "c"]),
            from_vec(vec!["a", "c", "d"]),
            key,
            key,
            |l: Option<&'static str>, r: Option<&'static str>| (l, r),
            DefaultComparer,
        );
        let expected = vec![
            (Some("a"), Some("a")),
            (Some("b"), None),
            (Some("c"), Some("c")),
            (None, Some("d")),
        ];
        assert_eq!(seq.cursor().collect::<Vec<_>>(), expected);
        // restartable
        assert_eq!(seq.cursor().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn full_outer_join_with_duplicate_keys() {
        let seq = FullOuterJoin::new(
            from_vec(vec![1, 2]),
            from_vec(vec![2, 3, 2]),
            |x: &i32| *x,
            |x: &i32| *x,
            |l: Option<i32>, r: Option<i32>| (l, r),
            DefaultComparer,
        );
        assert_eq!(
            seq.cursor().collect::<Vec<_>>(),
            vec![(Some(1), None), (Some(2), Some(2)), (Some(2), Some(2)), (None, Some(3))]
        );
    }
}
