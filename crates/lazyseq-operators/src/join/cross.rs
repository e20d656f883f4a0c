use std::rc::Rc;

use crate::traits::Sequence;

/// Every (left, right) pair, left order outermost.
///
/// The right side is restarted once per left element.
pub struct CrossJoin<A, B, F> {
    left: A,
    right: Rc<B>,
    f: Rc<F>,
}

impl<A, B, F> CrossJoin<A, B, F> {
    pub fn new(left: A, right: B, f: F) -> Self {
        Self {
            left,
            right: Rc::new(right),
            f: Rc::new(f),
        }
    }
}

impl<A, B, F, R> Sequence for CrossJoin<A, B, F>
where
    A: Sequence,
    B: Sequence,
    A::Item: Clone,
    F: Fn(A::Item, B::Item) -> R,
{
    type Item = R;
    type Cursor = CrossJoinCursor<A::Cursor, B, F>;

    fn cursor(&self) -> Self::Cursor {
        CrossJoinCursor {
            left: self.left.cursor(),
            right: Rc::clone(&self.right),
            f: Rc::clone(&self.f),
            current: None,
        }
    }
}

pub struct CrossJoinCursor<L: Iterator, B: Sequence, F> {
    left: L,
    right: Rc<B>,
    f: Rc<F>,
    current: Option<(L::Item, B::Cursor)>,
}

impl<L, B, F, R> Iterator for CrossJoinCursor<L, B, F>
where
    L: Iterator,
    L::Item: Clone,
    B: Sequence,
    F: Fn(L::Item, B::Item) -> R,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        loop {
            if let Some((left, rights)) = &mut self.current {
                if let Some(right) = rights.next() {
                    return Some((self.f)(left.clone(), right));
                }
                self.current = None;
            }
            let left = self.left.next()?;
            self.current = Some((left, self.right.cursor()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::from_vec;

    #[test]
    fn pairs_in_left_major_order() {
        let seq = CrossJoin::new(
            from_vec(vec!["a", "b", "c"]),
            from_vec(vec!["a", "c", "d"]),
            |l: &'static str, r: &'static str| format!("{l}{r}"),
        );
        assert_eq!(
            seq.cursor().collect::<Vec<_>>(),
            vec!["aa", "ac", "ad", "ba", "bc", "bd", "ca", "cc", "cd"]
        );
    }

    #[test]
    fn empty_right_yields_nothing() {
        let seq = CrossJoin::new(
            from_vec(vec![1, 2]),
            from_vec(Vec::<i32>::new()),
            |l: i32, r: i32| l + r,
        );
        assert_eq!(seq.cursor().count(), 0);
    }
}
