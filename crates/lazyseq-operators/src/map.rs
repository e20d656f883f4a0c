//! Projection operators: `map`, `map_indexed`, and the checked `cast`.

use std::marker::PhantomData;
use std::rc::Rc;

use lazyseq_core::error::{Error, Result};
use lazyseq_core::types::Downcast;

use crate::traits::Sequence;

pub struct Map<S, F> {
    source: S,
    f: Rc<F>,
}

impl<S, F> Map<S, F> {
    pub fn new(source: S, f: F) -> Self {
        Self {
            source,
            f: Rc::new(f),
        }
    }
}

impl<S, F, U> Sequence for Map<S, F>
where
    S: Sequence,
    F: Fn(S::Item) -> U,
{
    type Item = U;
    type Cursor = MapCursor<S::Cursor, F>;

    fn cursor(&self) -> Self::Cursor {
        MapCursor {
            upstream: self.source.cursor(),
            f: Rc::clone(&self.f),
        }
    }
}

pub struct MapCursor<C, F> {
    upstream: C,
    f: Rc<F>,
}

impl<C, F, U> Iterator for MapCursor<C, F>
where
    C: Iterator,
    F: Fn(C::Item) -> U,
{
    type Item = U;

    fn next(&mut self) -> Option<U> {
        self.upstream.next().map(|item| (self.f)(item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.upstream.size_hint()
    }
}

/// `map` with the zero-based position of the element within this traversal.
pub struct MapIndexed<S, F> {
    source: S,
    f: Rc<F>,
}

impl<S, F> MapIndexed<S, F> {
    pub fn new(source: S, f: F) -> Self {
        Self {
            source,
            f: Rc::new(f),
        }
    }
}

impl<S, F, U> Sequence for MapIndexed<S, F>
where
    S: Sequence,
    F: Fn(S::Item, usize) -> U,
{
    type Item = U;
    type Cursor = MapIndexedCursor<S::Cursor, F>;

    fn cursor(&self) -> Self::Cursor {
        MapIndexedCursor {
            upstream: self.source.cursor(),
            f: Rc::clone(&self.f),
            index: 0,
        }
    }
}

pub struct MapIndexedCursor<C, F> {
    upstream: C,
    f: Rc<F>,
    index: usize,
}

impl<C, F, U> Iterator for MapIndexedCursor<C, F>
where
    C: Iterator,
    F: Fn(C::Item, usize) -> U,
{
    type Item = U;

    fn next(&mut self) -> Option<U> {
        let item = self.upstream.next()?;
        let index = self.index;
        self.index += 1;
        Some((self.f)(item, index))
    }
}

/// Converts every element to `U`; an element of another shape yields
/// `Err(TypeMismatch)` at its position. Later elements are still reachable.
pub struct Cast<S, U> {
    source: S,
    _target: PhantomData<fn() -> U>,
}

impl<S, U> Cast<S, U> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            _target: PhantomData,
        }
    }
}

impl<S, U> Sequence for Cast<S, U>
where
    S: Sequence,
    S::Item: Downcast<U>,
{
    type Item = Result<U>;
    type Cursor = CastCursor<S::Cursor, U>;

    fn cursor(&self) -> Self::Cursor {
        CastCursor {
            upstream: self.source.cursor(),
            _target: PhantomData,
        }
    }
}

pub struct CastCursor<C, U> {
    upstream: C,
    _target: PhantomData<fn() -> U>,
}

impl<C, U> Iterator for CastCursor<C, U>
where
    C: Iterator,
    C::Item: Downcast<U>,
{
    type Item = Result<U>;

    fn next(&mut self) -> Option<Result<U>> {
        let item = self.upstream.next()?;
        Some(
            Downcast::<U>::downcast(item).map_err(|found| Error::TypeMismatch {
                expected: <C::Item as Downcast<U>>::target(),
                found: Downcast::<U>::shape(&found),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::from_vec;
    use lazyseq_core::types::Scalar;

    #[test]
    fn index_restarts_per_traversal() {
        let seq = MapIndexed::new(from_vec(vec!["a", "b"]), |s: &str, i: usize| {
            format!("{i}:{s}")
        });
        assert_eq!(seq.cursor().collect::<Vec<_>>(), vec!["0:a", "1:b"]);
        assert_eq!(seq.cursor().collect::<Vec<_>>(), vec!["0:a", "1:b"]);
    }

    #[test]
    fn cast_reports_offending_shape() {
        let src = from_vec(vec![Scalar::F64(1.5), Scalar::Bool(true)]);
        let out: Vec<Result<f64>> = Cast::<_, f64>::new(src).cursor().collect();
        assert_eq!(out[0], Ok(1.5));
        assert_eq!(
            out[1],
            Err(Error::TypeMismatch {
                expected: "f64",
                found: "bool"
            })
        );
    }
}
