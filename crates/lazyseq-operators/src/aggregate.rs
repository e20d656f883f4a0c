//! Terminal operators that reduce a sequence to one value.
//!
//! All of these drive a fresh cursor to completion or stop at the first
//! element that decides the answer. Nothing past that element is pulled,
//! so they are safe on unbounded sequences whenever the answer is reachable.

use lazyseq_core::comparer::EqualityComparer;
use lazyseq_core::error::{Error, Result};

use crate::traits::Sequence;

pub fn first<S: Sequence + ?Sized>(source: &S) -> Result<S::Item> {
    source
        .cursor()
        .next()
        .ok_or(Error::EmptyResult { op: "first" })
}

pub fn first_where<S, P>(source: &S, predicate: P) -> Result<S::Item>
where
    S: Sequence + ?Sized,
    P: FnMut(&S::Item) -> bool,
{
    source
        .cursor()
        .find(predicate)
        .ok_or(Error::EmptyResult { op: "first_where" })
}

pub fn first_or_default<S>(source: &S) -> S::Item
where
    S: Sequence + ?Sized,
    S::Item: Default,
{
    source.cursor().next().unwrap_or_default()
}

pub fn first_or<S: Sequence + ?Sized>(source: &S, default: S::Item) -> S::Item {
    source.cursor().next().unwrap_or(default)
}

pub fn last<S: Sequence + ?Sized>(source: &S) -> Result<S::Item> {
    source
        .cursor()
        .last()
        .ok_or(Error::EmptyResult { op: "last" })
}

pub fn last_where<S, P>(source: &S, mut predicate: P) -> Result<S::Item>
where
    S: Sequence + ?Sized,
    P: FnMut(&S::Item) -> bool,
{
    source
        .cursor()
        .filter(|item| predicate(item))
        .last()
        .ok_or(Error::EmptyResult { op: "last_where" })
}

pub fn last_or_default<S>(source: &S) -> S::Item
where
    S: Sequence + ?Sized,
    S::Item: Default,
{
    source.cursor().last().unwrap_or_default()
}

pub fn last_or<S: Sequence + ?Sized>(source: &S, default: S::Item) -> S::Item {
    source.cursor().last().unwrap_or(default)
}

/// At most one match. Stops pulling as soon as a second match is seen.
fn only_match<I, P>(mut cursor: I, mut predicate: P, op: &'static str) -> Result<Option<I::Item>>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    let Some(found) = cursor.find(|item| predicate(item)) else {
        return Ok(None);
    };
    if cursor.any(|item| predicate(&item)) {
        return Err(Error::MultipleMatches { op });
    }
    Ok(Some(found))
}

pub fn single<S: Sequence + ?Sized>(source: &S) -> Result<S::Item> {
    only_match(source.cursor(), |_| true, "single")?.ok_or(Error::EmptyResult { op: "single" })
}

pub fn single_where<S, P>(source: &S, predicate: P) -> Result<S::Item>
where
    S: Sequence + ?Sized,
    P: FnMut(&S::Item) -> bool,
{
    only_match(source.cursor(), predicate, "single_where")?
        .ok_or(Error::EmptyResult { op: "single_where" })
}

/// Like `single`, but zero elements yields `Default`. More than one is
/// still `MultipleMatches`.
pub fn single_or_default<S>(source: &S) -> Result<S::Item>
where
    S: Sequence + ?Sized,
    S::Item: Default,
{
    Ok(only_match(source.cursor(), |_| true, "single_or_default")?.unwrap_or_default())
}

pub fn single_or<S: Sequence + ?Sized>(source: &S, default: S::Item) -> Result<S::Item> {
    Ok(only_match(source.cursor(), |_| true, "single_or")?.unwrap_or(default))
}

pub fn any<S: Sequence + ?Sized>(source: &S) -> bool {
    source.cursor().next().is_some()
}

pub fn any_where<S, P>(source: &S, mut predicate: P) -> bool
where
    S: Sequence + ?Sized,
    P: FnMut(&S::Item) -> bool,
{
    source.cursor().any(|item| predicate(&item))
}

/// Vacuously true on an empty sequence.
pub fn all<S, P>(source: &S, mut predicate: P) -> bool
where
    S: Sequence + ?Sized,
    P: FnMut(&S::Item) -> bool,
{
    source.cursor().all(|item| predicate(&item))
}

pub fn sequence_equal<A, B>(first: &A, second: &B) -> bool
where
    A: Sequence + ?Sized,
    B: Sequence<Item = A::Item> + ?Sized,
    A::Item: PartialEq,
{
    first.cursor().eq(second.cursor())
}

/// Positional equality under `comparer`; stops at the first mismatch or
/// length difference.
pub fn sequence_equal_with<A, B, C>(first: &A, second: &B, comparer: C) -> bool
where
    A: Sequence + ?Sized,
    B: Sequence<Item = A::Item> + ?Sized,
    C: EqualityComparer<A::Item>,
{
    let mut a = first.cursor();
    let mut b = second.cursor();
    loop {
        match (a.next(), b.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if comparer.equals(&x, &y) => {}
            _ => return false,
        }
    }
}

/// Left fold seeded with the first element.
pub fn aggregate<S, F>(source: &S, f: F) -> Result<S::Item>
where
    S: Sequence + ?Sized,
    F: FnMut(S::Item, S::Item) -> S::Item,
{
    source
        .cursor()
        .reduce(f)
        .ok_or(Error::EmptyResult { op: "aggregate" })
}

pub fn fold<S, A, F>(source: &S, seed: A, f: F) -> A
where
    S: Sequence + ?Sized,
    F: FnMut(A, S::Item) -> A,
{
    source.cursor().fold(seed, f)
}

/// `fold` followed by a projection of the final accumulator.
pub fn fold_map<S, A, F, R, M>(source: &S, seed: A, f: F, result: M) -> R
where
    S: Sequence + ?Sized,
    F: FnMut(A, S::Item) -> A,
    M: FnOnce(A) -> R,
{
    result(fold(source, seed, f))
}

pub fn sum<S>(source: &S) -> S::Item
where
    S: Sequence + ?Sized,
    S::Item: std::iter::Sum,
{
    source.cursor().sum()
}

/// Arithmetic mean. An empty sequence has no mean and fails with `EmptyResult`.
pub fn average<S>(source: &S) -> Result<f64>
where
    S: Sequence + ?Sized,
    S::Item: Into<f64>,
{
    mean(source, |item| item.into(), "average")
}

/// Mean of `f` over the elements, for items with no lossless `f64` conversion.
pub fn average_by<S, F>(source: &S, f: F) -> Result<f64>
where
    S: Sequence + ?Sized,
    F: FnMut(S::Item) -> f64,
{
    mean(source, f, "average_by")
}

fn mean<S, F>(source: &S, mut f: F, op: &'static str) -> Result<f64>
where
    S: Sequence + ?Sized,
    F: FnMut(S::Item) -> f64,
{
    let (total, n) = source
        .cursor()
        .fold((0.0, 0usize), |(total, n), item| (total + f(item), n + 1));
    if n == 0 {
        return Err(Error::EmptyResult { op });
    }
    Ok(total / n as f64)
}

pub fn count<S: Sequence + ?Sized>(source: &S) -> usize {
    source.cursor().count()
}

pub fn count_where<S, P>(source: &S, mut predicate: P) -> usize
where
    S: Sequence + ?Sized,
    P: FnMut(&S::Item) -> bool,
{
    source.cursor().filter(|item| predicate(item)).count()
}

pub fn element_at<S: Sequence + ?Sized>(source: &S, index: usize) -> Option<S::Item> {
    source.cursor().nth(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{empty, from_vec, range, range_from};
    use lazyseq_core::comparer::IgnoreAsciiCase;

    #[test]
    fn first_and_last() {
        let seq = from_vec(vec![3, 8, 5, 10]);
        assert_eq!(first(&seq), Ok(3));
        assert_eq!(first_where(&seq, |x| x % 2 == 0), Ok(8));
        assert_eq!(last(&seq), Ok(10));
        assert_eq!(last_where(&seq, |x| x % 2 == 1), Ok(5));
        assert_eq!(
            first_where(&seq, |x| *x > 100),
            Err(Error::EmptyResult { op: "first_where" })
        );
    }

    #[test]
    fn defaults_on_empty() {
        let none = empty::<i32>();
        assert_eq!(first(&none), Err(Error::EmptyResult { op: "first" }));
        assert_eq!(first_or_default(&none), 0);
        assert_eq!(first_or(&none, 7), 7);
        assert_eq!(last_or_default(&none), 0);
        assert_eq!(last_or(&none, -1), -1);
    }

    #[test]
    fn single_cardinality() {
        assert_eq!(single(&from_vec(vec![42])), Ok(42));
        assert_eq!(
            single(&empty::<i32>()),
            Err(Error::EmptyResult { op: "single" })
        );
        assert_eq!(
            single(&from_vec(vec![1, 2])),
            Err(Error::MultipleMatches { op: "single" })
        );
        assert_eq!(single_or_default(&empty::<i32>()), Ok(0));
        assert!(single_or_default(&from_vec(vec![1, 2])).is_err());
        assert_eq!(single_where(&range(1, 10), |x| *x == 4), Ok(4));
    }

    #[test]
    fn single_stops_at_second_match() {
        // Unbounded, but the second match is reachable.
        assert_eq!(
            single_where(&range_from(0), |x| x % 5 == 0),
            Err(Error::MultipleMatches {
                op: "single_where"
            })
        );
    }

    #[test]
    fn short_circuit_on_unbounded() {
        let naturals = range_from(1);
        assert!(any(&naturals));
        assert!(any_where(&naturals, |x| *x > 1_000));
        assert!(!all(&naturals, |x| *x < 10));
        assert!(all(&empty::<i32>(), |_| false));
    }

    #[test]
    fn folds() {
        let numbers = range(1, 10);
        assert_eq!(aggregate(&numbers, |a, b| a + b), Ok(55));
        assert_eq!(
            aggregate(&empty::<i64>(), |a, b| a + b),
            Err(Error::EmptyResult { op: "aggregate" })
        );
        let words = from_vec(vec!["Hello", "World", "!"]);
        assert_eq!(
            fold(&words, String::new(), |mut acc, w| {
                acc.push_str(w);
                acc
            }),
            "HelloWorld!"
        );
        let shout = fold_map(&words, String::new(), |acc, w| acc + w, |s| s.to_uppercase());
        assert_eq!(shout, "HELLOWORLD!");
    }

    #[test]
    fn sums_and_means() {
        let numbers = from_vec((0..10).collect::<Vec<i32>>());
        assert_eq!(sum(&numbers), 45);
        assert_eq!(average(&numbers), Ok(4.5));
        assert_eq!(average_by(&range(1, 4), |x| x as f64), Ok(2.5));
        assert_eq!(sum(&empty::<i32>()), 0);
        assert_eq!(
            average(&empty::<i32>()),
            Err(Error::EmptyResult { op: "average" })
        );
        assert_eq!(
            average_by(&empty::<i64>(), |x| x as f64),
            Err(Error::EmptyResult { op: "average_by" })
        );
    }

    #[test]
    fn sequence_equality() {
        let a = from_vec(vec!["a", "B"]);
        let b = from_vec(vec!["A", "b"]);
        assert!(!sequence_equal(&a, &b));
        assert!(sequence_equal(&a, &a));
        assert!(sequence_equal_with(&a, &b, IgnoreAsciiCase));
        assert!(!sequence_equal_with(&a, &from_vec(vec!["a"]), IgnoreAsciiCase));
    }

    #[test]
    fn counting() {
        let seq = range(1, 10);
        assert_eq!(count(&seq), 10);
        assert_eq!(count_where(&seq, |x| x % 2 == 0), 5);
        assert_eq!(element_at(&seq, 3), Some(4));
        assert_eq!(element_at(&seq, 10), None);
    }
}
