//! Sources and generators: the leaves of every operator chain.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::traits::Sequence;

/// Owned, restartable source. Cloning the source shares the buffer.
#[derive(Debug)]
pub struct VecSource<T> {
    items: Rc<[T]>,
}

impl<T> Clone for VecSource<T> {
    fn clone(&self) -> Self {
        Self {
            items: Rc::clone(&self.items),
        }
    }
}

pub fn from_vec<T>(items: Vec<T>) -> VecSource<T> {
    VecSource {
        items: items.into(),
    }
}

impl<T> VecSource<T> {
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Clone> Sequence for VecSource<T> {
    type Item = T;
    type Cursor = VecCursor<T>;

    fn cursor(&self) -> Self::Cursor {
        VecCursor::over(Rc::clone(&self.items))
    }
}

pub struct VecCursor<T> {
    items: Rc<[T]>,
    pos: usize,
}

impl<T> VecCursor<T> {
    pub(crate) fn over(items: Rc<[T]>) -> Self {
        Self { items, pos: 0 }
    }
}

impl<T: Clone> Iterator for VecCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.items.get(self.pos)?.clone();
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.items.len().saturating_sub(self.pos);
        (rest, Some(rest))
    }
}

/// Borrowing, restartable source.
#[derive(Debug, Clone, Copy)]
pub struct SliceSource<'a, T> {
    items: &'a [T],
}

pub fn from_slice<T>(items: &[T]) -> SliceSource<'_, T> {
    SliceSource { items }
}

impl<'a, T: Clone> Sequence for SliceSource<'a, T> {
    type Item = T;
    type Cursor = std::iter::Cloned<std::slice::Iter<'a, T>>;

    fn cursor(&self) -> Self::Cursor {
        self.items.iter().cloned()
    }
}

/// Restartable source over a cloneable iterator; each cursor clones the
/// pristine iterator.
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    iter: I,
}

pub fn from_iter<I: Iterator + Clone>(iter: I) -> IterSource<I> {
    IterSource { iter }
}

impl<I: Iterator + Clone> Sequence for IterSource<I> {
    type Item = I::Item;
    type Cursor = I;

    fn cursor(&self) -> Self::Cursor {
        self.iter.clone()
    }
}

/// Single-use source wrapping an external producer. The first cursor takes
/// the producer; later cursors are empty.
pub struct OnceSource<I> {
    iter: RefCell<Option<I>>,
}

pub fn from_iter_once<I: Iterator>(iter: I) -> OnceSource<I> {
    OnceSource {
        iter: RefCell::new(Some(iter)),
    }
}

impl<I: Iterator> Sequence for OnceSource<I> {
    type Item = I::Item;
    type Cursor = std::iter::Flatten<std::option::IntoIter<I>>;

    fn cursor(&self) -> Self::Cursor {
        self.iter.borrow_mut().take().into_iter().flatten()
    }
}

pub struct Empty<T> {
    _item: PhantomData<fn() -> T>,
}

pub fn empty<T>() -> Empty<T> {
    Empty { _item: PhantomData }
}

impl<T> Clone for Empty<T> {
    fn clone(&self) -> Self {
        empty()
    }
}

impl<T> Sequence for Empty<T> {
    type Item = T;
    type Cursor = std::iter::Empty<T>;

    fn cursor(&self) -> Self::Cursor {
        std::iter::empty()
    }
}

/// `count` consecutive integers starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    start: i64,
    end: i64,
}

/// The range stops early at `i64::MAX` rather than wrapping.
pub fn range(start: i64, count: usize) -> Range {
    let count = i64::try_from(count).unwrap_or(i64::MAX);
    Range {
        start,
        end: start.saturating_add(count),
    }
}

impl Sequence for Range {
    type Item = i64;
    type Cursor = std::ops::Range<i64>;

    fn cursor(&self) -> Self::Cursor {
        self.start..self.end
    }
}

/// Unbounded counter starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeFrom {
    start: i64,
}

pub fn range_from(start: i64) -> RangeFrom {
    RangeFrom { start }
}

impl Sequence for RangeFrom {
    type Item = i64;
    type Cursor = std::ops::RangeFrom<i64>;

    fn cursor(&self) -> Self::Cursor {
        self.start..
    }
}

/// `count` copies of `value`; `count == None` repeats forever.
#[derive(Debug, Clone)]
pub struct Repeat<T> {
    value: T,
    count: Option<usize>,
}

pub fn repeat<T: Clone>(value: T, count: usize) -> Repeat<T> {
    Repeat {
        value,
        count: Some(count),
    }
}

pub fn repeat_forever<T: Clone>(value: T) -> Repeat<T> {
    Repeat { value, count: None }
}

impl<T: Clone> Sequence for Repeat<T> {
    type Item = T;
    type Cursor = RepeatCursor<T>;

    fn cursor(&self) -> Self::Cursor {
        RepeatCursor {
            value: self.value.clone(),
            remaining: self.count,
        }
    }
}

pub struct RepeatCursor<T> {
    value: T,
    remaining: Option<usize>,
}

impl<T: Clone> Iterator for RepeatCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match &mut self.remaining {
            Some(0) => None,
            Some(n) => {
                *n -= 1;
                Some(self.value.clone())
            }
            None => Some(self.value.clone()),
        }
    }
}
