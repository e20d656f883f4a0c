//! Set operators over the pluggable equality contract.
//!
//! Every operator here yields each distinct value (by the comparer) at most
//! once, in first-seen order. For `except` and `intersect` the second operand
//! is drained into an index on the first pull of a traversal.

use std::rc::Rc;

use lazyseq_core::comparer::EqualityComparer;

use crate::concat::Concat;
use crate::index::KeyIndex;
use crate::traits::Sequence;

pub struct Distinct<S, C> {
    source: S,
    comparer: Rc<C>,
}

impl<S, C> Distinct<S, C> {
    pub fn new(source: S, comparer: C) -> Self {
        Self {
            source,
            comparer: Rc::new(comparer),
        }
    }
}

impl<S, C> Sequence for Distinct<S, C>
where
    S: Sequence,
    S::Item: Clone,
    C: EqualityComparer<S::Item>,
{
    type Item = S::Item;
    type Cursor = DistinctCursor<S::Cursor, C>;

    fn cursor(&self) -> Self::Cursor {
        DistinctCursor {
            upstream: self.source.cursor(),
            seen: KeyIndex::new(Rc::clone(&self.comparer)),
        }
    }
}

pub struct DistinctCursor<I: Iterator, C> {
    upstream: I,
    seen: KeyIndex<I::Item, C>,
}

impl<I, C> Iterator for DistinctCursor<I, C>
where
    I: Iterator,
    I::Item: Clone,
    C: EqualityComparer<I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        for item in self.upstream.by_ref() {
            if self.seen.insert(item.clone()).1 {
                return Some(item);
            }
        }
        None
    }
}

/// Distinct values of `a` then the values of `b` not already seen.
pub type Union<A, B, C> = Distinct<Concat<A, B>, C>;

pub fn union<A, B, C>(first: A, second: B, comparer: C) -> Union<A, B, C> {
    Distinct::new(Concat::new(first, second), comparer)
}

/// Which side of the second operand an element must fall on to survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Membership {
    Absent,
    Present,
}

/// Distinct elements of `first` that do not occur in `second`.
pub struct Except<A, B, C> {
    first: A,
    second: B,
    comparer: Rc<C>,
}

impl<A, B, C> Except<A, B, C> {
    pub fn new(first: A, second: B, comparer: C) -> Self {
        Self {
            first,
            second,
            comparer: Rc::new(comparer),
        }
    }
}

impl<A, B, C> Sequence for Except<A, B, C>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
    A::Item: Clone,
    C: EqualityComparer<A::Item>,
{
    type Item = A::Item;
    type Cursor = SetCursor<A::Cursor, B::Cursor, C>;

    fn cursor(&self) -> Self::Cursor {
        SetCursor::new(
            self.first.cursor(),
            self.second.cursor(),
            &self.comparer,
            Membership::Absent,
        )
    }
}

/// Distinct elements of `first` that also occur in `second`.
pub struct Intersect<A, B, C> {
    first: A,
    second: B,
    comparer: Rc<C>,
}

impl<A, B, C> Intersect<A, B, C> {
    pub fn new(first: A, second: B, comparer: C) -> Self {
        Self {
            first,
            second,
            comparer: Rc::new(comparer),
        }
    }
}

impl<A, B, C> Sequence for Intersect<A, B, C>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
    A::Item: Clone,
    C: EqualityComparer<A::Item>,
{
    type Item = A::Item;
    type Cursor = SetCursor<A::Cursor, B::Cursor, C>;

    fn cursor(&self) -> Self::Cursor {
        SetCursor::new(
            self.first.cursor(),
            self.second.cursor(),
            &self.comparer,
            Membership::Present,
        )
    }
}

pub struct SetCursor<IA: Iterator, IB, C> {
    upstream: IA,
    pending: Option<IB>,
    other: KeyIndex<IA::Item, C>,
    emitted: KeyIndex<IA::Item, C>,
    keep: Membership,
}

impl<IA, IB, C> SetCursor<IA, IB, C>
where
    IA: Iterator,
    IB: Iterator<Item = IA::Item>,
    C: EqualityComparer<IA::Item>,
{
    fn new(upstream: IA, second: IB, comparer: &Rc<C>, keep: Membership) -> Self {
        Self {
            upstream,
            pending: Some(second),
            other: KeyIndex::new(Rc::clone(comparer)),
            emitted: KeyIndex::new(Rc::clone(comparer)),
            keep,
        }
    }
}

impl<IA, IB, C> Iterator for SetCursor<IA, IB, C>
where
    IA: Iterator,
    IA::Item: Clone,
    IB: Iterator<Item = IA::Item>,
    C: EqualityComparer<IA::Item>,
{
    type Item = IA::Item;

    fn next(&mut self) -> Option<IA::Item> {
        if let Some(second) = self.pending.take() {
            for item in second {
                self.other.insert(item);
            }
        }
        for item in self.upstream.by_ref() {
            let present = self.other.contains(&item);
            let wanted = match self.keep {
                Membership::Absent => !present,
                Membership::Present => present,
            };
            if wanted && self.emitted.insert(item.clone()).1 {
                return Some(item);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::from_vec;
    use lazyseq_core::comparer::DefaultComparer;

    fn collect<S: Sequence>(s: S) -> Vec<S::Item> {
        s.cursor().collect()
    }

    #[test]
    fn distinct_keeps_first_occurrence() {
        let s = from_vec(vec![1, 2, 3, 4, 2, 5, 3, 2, 1]);
        assert_eq!(collect(Distinct::new(s, DefaultComparer)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn except_collapses_first_operand_duplicates() {
        let first = from_vec(vec![1, 1, 1, 2, 3, 4]);
        let second = from_vec(vec![0, 2, 3, 5]);
        assert_eq!(collect(Except::new(first, second, DefaultComparer)), vec![1, 4]);
    }

    #[test]
    fn intersect_and_union() {
        let a = from_vec(vec![1, 2, 4]);
        let b = from_vec(vec![1, 2, 3, 4]);
        assert_eq!(
            collect(Intersect::new(a.clone(), b.clone(), DefaultComparer)),
            vec![1, 2, 4]
        );
        assert_eq!(
            collect(union(from_vec(vec![1, 2, 3]), from_vec(vec![3, 4, 5]), DefaultComparer)),
            vec![1, 2, 3, 4, 5]
        );
    }
}
