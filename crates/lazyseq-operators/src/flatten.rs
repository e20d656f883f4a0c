//! One-to-many expansion: `flat_map` and the N-way `cross_product`.

use std::rc::Rc;

use crate::traits::Sequence;

pub struct FlatMap<S, F> {
    source: S,
    f: Rc<F>,
}

impl<S, F> FlatMap<S, F> {
    pub fn new(source: S, f: F) -> Self {
        Self {
            source,
            f: Rc::new(f),
        }
    }
}

impl<S, F, U> Sequence for FlatMap<S, F>
where
    S: Sequence,
    F: Fn(S::Item) -> U,
    U: IntoIterator,
{
    type Item = U::Item;
    type Cursor = FlatMapCursor<S::Cursor, F, U>;

    fn cursor(&self) -> Self::Cursor {
        FlatMapCursor {
            upstream: self.source.cursor(),
            f: Rc::clone(&self.f),
            current: None,
        }
    }
}

pub struct FlatMapCursor<C, F, U: IntoIterator> {
    upstream: C,
    f: Rc<F>,
    current: Option<U::IntoIter>,
}

impl<C, F, U> Iterator for FlatMapCursor<C, F, U>
where
    C: Iterator,
    F: Fn(C::Item) -> U,
    U: IntoIterator,
{
    type Item = U::Item;

    fn next(&mut self) -> Option<U::Item> {
        loop {
            if let Some(inner) = &mut self.current {
                if let Some(item) = inner.next() {
                    return Some(item);
                }
                // Sub-sequence drained; only now advance the outer cursor.
                self.current = None;
            }
            let outer = self.upstream.next()?;
            self.current = Some((self.f)(outer).into_iter());
        }
    }
}

/// Cartesian product of an ordered list of sequences, as `Vec` tuples.
///
/// Lexicographic order: the first sequence varies slowest. Zero inputs yield
/// exactly one empty tuple (the identity of the product); any empty input
/// yields nothing. Evaluation is lazy: an odometer of cursors, where each
/// exhausted position restarts its sequence and carries into the previous one.
/// Inner sequences are therefore traversed once per combination of the
/// positions before them and must be restartable.
pub struct CrossProduct<S> {
    sequences: Rc<[S]>,
}

pub fn cross_product<S: Sequence>(sequences: Vec<S>) -> CrossProduct<S> {
    CrossProduct {
        sequences: sequences.into(),
    }
}

impl<S> Sequence for CrossProduct<S>
where
    S: Sequence,
    S::Item: Clone,
{
    type Item = Vec<S::Item>;
    type Cursor = CrossProductCursor<S>;

    fn cursor(&self) -> Self::Cursor {
        CrossProductCursor {
            sequences: Rc::clone(&self.sequences),
            cursors: Vec::new(),
            current: Vec::new(),
            state: State::Fresh,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fresh,
    Running,
    Done,
}

pub struct CrossProductCursor<S: Sequence> {
    sequences: Rc<[S]>,
    cursors: Vec<S::Cursor>,
    current: Vec<S::Item>,
    state: State,
}

impl<S> CrossProductCursor<S>
where
    S: Sequence,
    S::Item: Clone,
{
    /// Restart every position from `from` onwards at its first element.
    fn reset_from(&mut self, from: usize) -> bool {
        self.cursors.truncate(from);
        self.current.truncate(from);
        for seq in &self.sequences[from..] {
            let mut cursor = seq.cursor();
            match cursor.next() {
                Some(item) => {
                    self.cursors.push(cursor);
                    self.current.push(item);
                }
                None => return false,
            }
        }
        true
    }

    fn advance(&mut self) -> bool {
        let mut pos = self.cursors.len();
        while pos > 0 {
            pos -= 1;
            if let Some(item) = self.cursors[pos].next() {
                self.current[pos] = item;
                return self.reset_from(pos + 1);
            }
        }
        false
    }
}

impl<S> Iterator for CrossProductCursor<S>
where
    S: Sequence,
    S::Item: Clone,
{
    type Item = Vec<S::Item>;

    fn next(&mut self) -> Option<Vec<S::Item>> {
        let ok = match self.state {
            State::Done => return None,
            State::Fresh => self.reset_from(0),
            State::Running => self.advance(),
        };
        if ok {
            self.state = State::Running;
            Some(self.current.clone())
        } else {
            self.state = State::Done;
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{from_vec, VecSource};

    #[test]
    fn flat_map_drains_each_inner_in_order() {
        let rows = from_vec(vec![vec![1, 2, 3], vec![], vec![4, 5, 6]]);
        let s = FlatMap::new(rows, |v: Vec<i32>| v);
        assert_eq!(s.cursor().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn cross_product_first_varies_slowest() {
        let lists: Vec<VecSource<&str>> = vec![
            from_vec(vec!["a1", "a2"]),
            from_vec(vec!["b1", "b2", "b3"]),
            from_vec(vec!["c1"]),
        ];
        let out: Vec<String> = cross_product(lists).cursor().map(|t| t.concat()).collect();
        assert_eq!(
            out,
            vec!["a1b1c1", "a1b2c1", "a1b3c1", "a2b1c1", "a2b2c1", "a2b3c1"]
        );
    }

    #[test]
    fn cross_product_edge_arities() {
        let none: Vec<VecSource<i32>> = vec![];
        assert_eq!(
            cross_product(none).cursor().collect::<Vec<_>>(),
            vec![Vec::<i32>::new()]
        );

        let one = cross_product(vec![from_vec(vec![1, 2])]);
        assert_eq!(one.cursor().collect::<Vec<_>>(), vec![vec![1], vec![2]]);

        let with_empty = cross_product(vec![from_vec(vec![1, 2]), from_vec(vec![])]);
        assert_eq!(with_empty.cursor().count(), 0);
    }
}
