//! Filtering operators: `filter` and the type-filtering `of_type`.
//!
//! The predicate is re-evaluated on every traversal; nothing is memoized.

use std::marker::PhantomData;
use std::rc::Rc;

use lazyseq_core::types::Downcast;

use crate::traits::Sequence;

pub struct Filter<S, P> {
    source: S,
    predicate: Rc<P>,
}

impl<S, P> Filter<S, P> {
    pub fn new(source: S, predicate: P) -> Self {
        Self {
            source,
            predicate: Rc::new(predicate),
        }
    }
}

impl<S, P> Sequence for Filter<S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;
    type Cursor = FilterCursor<S::Cursor, P>;

    fn cursor(&self) -> Self::Cursor {
        FilterCursor {
            upstream: self.source.cursor(),
            predicate: Rc::clone(&self.predicate),
        }
    }
}

pub struct FilterCursor<C, P> {
    upstream: C,
    predicate: Rc<P>,
}

impl<C, P> Iterator for FilterCursor<C, P>
where
    C: Iterator,
    P: Fn(&C::Item) -> bool,
{
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        let predicate = &self.predicate;
        self.upstream.find(|item| predicate(item))
    }
}

/// Keeps the elements whose shape downcasts to `U`; others are skipped.
pub struct OfType<S, U> {
    source: S,
    _target: PhantomData<fn() -> U>,
}

impl<S, U> OfType<S, U> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            _target: PhantomData,
        }
    }
}

impl<S, U> Sequence for OfType<S, U>
where
    S: Sequence,
    S::Item: Downcast<U>,
{
    type Item = U;
    type Cursor = OfTypeCursor<S::Cursor, U>;

    fn cursor(&self) -> Self::Cursor {
        OfTypeCursor {
            upstream: self.source.cursor(),
            _target: PhantomData,
        }
    }
}

pub struct OfTypeCursor<C, U> {
    upstream: C,
    _target: PhantomData<fn() -> U>,
}

impl<C, U> Iterator for OfTypeCursor<C, U>
where
    C: Iterator,
    C::Item: Downcast<U>,
{
    type Item = U;

    fn next(&mut self) -> Option<U> {
        self.upstream
            .find_map(|item| Downcast::<U>::downcast(item).ok())
    }
}
