//! Join operators.
//!
//! Keyed joins index one side into a `Lookup` on the first pull of a
//! traversal and stream the other side against it, so output follows the
//! streamed side's order and, within one streamed element, the indexed
//! side's order. Multi-key joins use tuple keys; a tuple matches only if
//! every component matches.
//!
//! Unmatched elements are paired with `None`, the type-neutral default.

pub mod cross;
pub mod hash;
pub mod outer;

pub use cross::CrossJoin;
pub use hash::{GroupJoin, Join, LeftJoin};
pub use outer::{FullOuterJoin, RightJoin};

use std::rc::Rc;

use lazyseq_core::comparer::EqualityComparer;

use crate::group::{identity, Lookup};

/// Streams `outer` against a lookup of `inner` that is built on first use.
pub(crate) struct Probe<O, I: Iterator, K, OK, IK, C> {
    outer: O,
    pending: Option<I>,
    outer_key: Rc<OK>,
    inner_key: Rc<IK>,
    comparer: Rc<C>,
    table: Option<Lookup<K, I::Item, C>>,
}

impl<O, I, K, OK, IK, C> Probe<O, I, K, OK, IK, C>
where
    O: Iterator,
    I: Iterator,
    K: Clone,
    OK: Fn(&O::Item) -> K,
    IK: Fn(&I::Item) -> K,
    C: EqualityComparer<K>,
{
    pub(crate) fn new(
        outer: O,
        inner: I,
        outer_key: &Rc<OK>,
        inner_key: &Rc<IK>,
        comparer: &Rc<C>,
    ) -> Self {
        Self {
            outer,
            pending: Some(inner),
            outer_key: Rc::clone(outer_key),
            inner_key: Rc::clone(inner_key),
            comparer: Rc::clone(comparer),
            table: None,
        }
    }

    /// Next outer element and the inner elements sharing its key, if any.
    pub(crate) fn next_outer(&mut self) -> Option<(O::Item, Option<Rc<[I::Item]>>)> {
        if let Some(inner) = self.pending.take() {
            self.table = Some(Lookup::build(
                inner,
                &*self.inner_key,
                &identity,
                Rc::clone(&self.comparer),
            ));
        }
        let table = self.table.as_ref()?;
        let outer = self.outer.next()?;
        let key = (self.outer_key)(&outer);
        let matches = table
            .slot_of(&key)
            .map(|slot| table.group_at(slot).shared_values());
        Some((outer, matches))
    }
}
