//! Sequence-combining operators that keep every element: `concat`, `zip`,
//! and `default_if_empty`.

use std::rc::Rc;

use crate::traits::Sequence;

pub struct Concat<A, B> {
    first: A,
    second: B,
}

impl<A, B> Concat<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> Sequence for Concat<A, B>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
{
    type Item = A::Item;
    type Cursor = std::iter::Chain<A::Cursor, B::Cursor>;

    fn cursor(&self) -> Self::Cursor {
        self.first.cursor().chain(self.second.cursor())
    }
}

/// Pairs elements by position; stops when either side runs out.
pub struct Zip<A, B, F> {
    first: A,
    second: B,
    f: Rc<F>,
}

impl<A, B, F> Zip<A, B, F> {
    pub fn new(first: A, second: B, f: F) -> Self {
        Self {
            first,
            second,
            f: Rc::new(f),
        }
    }
}

impl<A, B, F, R> Sequence for Zip<A, B, F>
where
    A: Sequence,
    B: Sequence,
    F: Fn(A::Item, B::Item) -> R,
{
    type Item = R;
    type Cursor = ZipCursor<A::Cursor, B::Cursor, F>;

    fn cursor(&self) -> Self::Cursor {
        ZipCursor {
            first: self.first.cursor(),
            second: self.second.cursor(),
            f: Rc::clone(&self.f),
        }
    }
}

pub struct ZipCursor<CA, CB, F> {
    first: CA,
    second: CB,
    f: Rc<F>,
}

impl<CA, CB, F, R> Iterator for ZipCursor<CA, CB, F>
where
    CA: Iterator,
    CB: Iterator,
    F: Fn(CA::Item, CB::Item) -> R,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        let a = self.first.next()?;
        let b = self.second.next()?;
        Some((self.f)(a, b))
    }
}

/// Yields the source unchanged, or exactly one `value` when it is empty.
pub struct DefaultIfEmpty<S, T> {
    source: S,
    value: T,
}

impl<S, T> DefaultIfEmpty<S, T> {
    pub fn new(source: S, value: T) -> Self {
        Self { source, value }
    }
}

impl<S> Sequence for DefaultIfEmpty<S, S::Item>
where
    S: Sequence,
    S::Item: Clone,
{
    type Item = S::Item;
    type Cursor = DefaultIfEmptyCursor<S::Cursor>;

    fn cursor(&self) -> Self::Cursor {
        DefaultIfEmptyCursor {
            upstream: self.source.cursor(),
            fallback: Some(self.value.clone()),
        }
    }
}

pub struct DefaultIfEmptyCursor<C: Iterator> {
    upstream: C,
    fallback: Option<C::Item>,
}

impl<C: Iterator> Iterator for DefaultIfEmptyCursor<C> {
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        match self.upstream.next() {
            Some(item) => {
                self.fallback = None;
                Some(item)
            }
            None => self.fallback.take(),
        }
    }
}
