//! Index- and predicate-bounded partitioning: take/skip and friends.
//!
//! `take` must never pull upstream more than `n` times; infinite and
//! side-effecting sources depend on it.

use std::collections::VecDeque;
use std::rc::Rc;

use crate::traits::Sequence;

pub struct Take<S> {
    source: S,
    n: usize,
}

impl<S> Take<S> {
    pub fn new(source: S, n: usize) -> Self {
        Self { source, n }
    }
}

impl<S: Sequence> Sequence for Take<S> {
    type Item = S::Item;
    // std's Take checks its budget before pulling, so it never over-consumes.
    type Cursor = std::iter::Take<S::Cursor>;

    fn cursor(&self) -> Self::Cursor {
        self.source.cursor().take(self.n)
    }
}

pub struct Skip<S> {
    source: S,
    n: usize,
}

impl<S> Skip<S> {
    pub fn new(source: S, n: usize) -> Self {
        Self { source, n }
    }
}

impl<S: Sequence> Sequence for Skip<S> {
    type Item = S::Item;
    type Cursor = std::iter::Skip<S::Cursor>;

    fn cursor(&self) -> Self::Cursor {
        self.source.cursor().skip(self.n)
    }
}

/// One page of `page_size` elements; pages are numbered from 1.
pub type Page<S> = Take<Skip<S>>;

pub fn page<S>(source: S, page_number: usize, page_size: usize) -> Page<S> {
    let start = page_number.saturating_sub(1).saturating_mul(page_size);
    Take::new(Skip::new(source, start), page_size)
}

pub struct TakeWhile<S, P> {
    source: S,
    predicate: Rc<P>,
}

impl<S, P> TakeWhile<S, P> {
    pub fn new(source: S, predicate: P) -> Self {
        Self {
            source,
            predicate: Rc::new(predicate),
        }
    }
}

impl<S, P> Sequence for TakeWhile<S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;
    type Cursor = TakeWhileCursor<S::Cursor, P>;

    fn cursor(&self) -> Self::Cursor {
        TakeWhileCursor {
            upstream: self.source.cursor(),
            predicate: Rc::clone(&self.predicate),
            done: false,
        }
    }
}

pub struct TakeWhileCursor<C, P> {
    upstream: C,
    predicate: Rc<P>,
    done: bool,
}

impl<C, P> Iterator for TakeWhileCursor<C, P>
where
    C: Iterator,
    P: Fn(&C::Item) -> bool,
{
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        if self.done {
            return None;
        }
        let item = self.upstream.next()?;
        if (self.predicate)(&item) {
            Some(item)
        } else {
            // Stop for good; later matching elements are never reached.
            self.done = true;
            None
        }
    }
}

pub struct SkipWhile<S, P> {
    source: S,
    predicate: Rc<P>,
}

impl<S, P> SkipWhile<S, P> {
    pub fn new(source: S, predicate: P) -> Self {
        Self {
            source,
            predicate: Rc::new(predicate),
        }
    }
}

impl<S, P> Sequence for SkipWhile<S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;
    type Cursor = SkipWhileCursor<S::Cursor, P>;

    fn cursor(&self) -> Self::Cursor {
        SkipWhileCursor {
            upstream: self.source.cursor(),
            predicate: Rc::clone(&self.predicate),
            skipping: true,
        }
    }
}

pub struct SkipWhileCursor<C, P> {
    upstream: C,
    predicate: Rc<P>,
    skipping: bool,
}

impl<C, P> Iterator for SkipWhileCursor<C, P>
where
    C: Iterator,
    P: Fn(&C::Item) -> bool,
{
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        if !self.skipping {
            return self.upstream.next();
        }
        let predicate = &self.predicate;
        let first = self.upstream.find(|item| !predicate(item));
        self.skipping = false;
        first
    }
}

/// The last `n` elements. Drains the source on the first pull.
pub struct TakeLast<S> {
    source: S,
    n: usize,
}

impl<S> TakeLast<S> {
    pub fn new(source: S, n: usize) -> Self {
        Self { source, n }
    }
}

impl<S: Sequence> Sequence for TakeLast<S> {
    type Item = S::Item;
    type Cursor = TakeLastCursor<S::Cursor>;

    fn cursor(&self) -> Self::Cursor {
        TakeLastCursor {
            pending: Some(self.source.cursor()),
            n: self.n,
            buffer: VecDeque::new(),
        }
    }
}

pub struct TakeLastCursor<C: Iterator> {
    pending: Option<C>,
    n: usize,
    buffer: VecDeque<C::Item>,
}

impl<C: Iterator> Iterator for TakeLastCursor<C> {
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        if let Some(upstream) = self.pending.take() {
            if self.n == 0 {
                return None;
            }
            self.buffer.reserve(self.n.min(1024));
            for item in upstream {
                if self.buffer.len() == self.n {
                    self.buffer.pop_front();
                }
                self.buffer.push_back(item);
            }
        }
        self.buffer.pop_front()
    }
}

/// Everything except the last `n` elements. Streams with an `n`-element lag.
pub struct SkipLast<S> {
    source: S,
    n: usize,
}

impl<S> SkipLast<S> {
    pub fn new(source: S, n: usize) -> Self {
        Self { source, n }
    }
}

impl<S: Sequence> Sequence for SkipLast<S> {
    type Item = S::Item;
    type Cursor = SkipLastCursor<S::Cursor>;

    fn cursor(&self) -> Self::Cursor {
        SkipLastCursor {
            upstream: self.source.cursor(),
            n: self.n,
            buffer: VecDeque::new(),
        }
    }
}

pub struct SkipLastCursor<C: Iterator> {
    upstream: C,
    n: usize,
    buffer: VecDeque<C::Item>,
}

impl<C: Iterator> Iterator for SkipLastCursor<C> {
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        loop {
            let item = self.upstream.next()?;
            if self.n == 0 {
                return Some(item);
            }
            self.buffer.push_back(item);
            if self.buffer.len() > self.n {
                return self.buffer.pop_front();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::from_vec;

    fn collect<S: Sequence>(s: S) -> Vec<S::Item> {
        s.cursor().collect()
    }

    #[test]
    fn skip_and_take() {
        let values = from_vec(vec![5, 4, 3, 2, 1]);
        assert_eq!(collect(Skip::new(values.clone(), 2)), vec![3, 2, 1]);
        assert_eq!(collect(Take::new(values.clone(), 3)), vec![5, 4, 3]);
        assert_eq!(collect(Take::new(Skip::new(values.clone(), 1), 2)), vec![4, 3]);
        assert_eq!(collect(Take::new(values, 10)).len(), 5);
    }

    #[test]
    fn while_variants_stop_permanently() {
        let s = from_vec(vec![42, 42, 6, 6, 6, 42]);
        assert_eq!(collect(SkipWhile::new(s, |x: &i32| *x == 42)), vec![6, 6, 6, 42]);

        let t = from_vec(vec![1, 10, 40, 50, 44, 70, 4]);
        assert_eq!(collect(TakeWhile::new(t, |x: &i32| *x < 50)), vec![1, 10, 40]);
    }

    #[test]
    fn last_variants() {
        let s = from_vec(vec![1, 10, 40, 50, 44, 70, 4]);
        assert_eq!(collect(SkipLast::new(s.clone(), 2)), vec![1, 10, 40, 50, 44]);
        assert_eq!(collect(TakeLast::new(s.clone(), 2)), vec![70, 4]);
        assert_eq!(collect(TakeLast::new(s.clone(), 0)), Vec::<i32>::new());
        assert_eq!(collect(SkipLast::new(s.clone(), 0)).len(), 7);
        assert!(collect(SkipLast::new(s, 9)).is_empty());
    }

    #[test]
    fn pages_are_one_based() {
        let s = from_vec((1..=10).collect::<Vec<_>>());
        assert_eq!(collect(page(s.clone(), 1, 4)), vec![1, 2, 3, 4]);
        assert_eq!(collect(page(s.clone(), 3, 4)), vec![9, 10]);
        assert!(collect(page(s, 4, 4)).is_empty());
    }
}
