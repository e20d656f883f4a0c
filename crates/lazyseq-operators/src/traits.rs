//! The sequence capability every operator consumes and produces.
//!
//! A `Sequence` is a recipe, not a buffer: `cursor()` starts a fresh,
//! independent traversal and the returned `Iterator` is the pull protocol.
//! Building an adapter never pulls upstream and never calls caller code;
//! work only happens when a cursor is driven.

use std::rc::Rc;

pub trait Sequence {
    type Item;
    type Cursor: Iterator<Item = Self::Item>;

    /// Start a new traversal.
    ///
    /// Restartable sources hand out independent cursors on every call.
    /// Single-use sources (see `source::from_iter_once`) yield their elements
    /// to the first cursor only.
    fn cursor(&self) -> Self::Cursor;
}

impl<S: Sequence + ?Sized> Sequence for &S {
    type Item = S::Item;
    type Cursor = S::Cursor;

    fn cursor(&self) -> Self::Cursor {
        (**self).cursor()
    }
}

impl<S: Sequence + ?Sized> Sequence for Rc<S> {
    type Item = S::Item;
    type Cursor = S::Cursor;

    fn cursor(&self) -> Self::Cursor {
        (**self).cursor()
    }
}

impl<S: Sequence + ?Sized> Sequence for Box<S> {
    type Item = S::Item;
    type Cursor = S::Cursor;

    fn cursor(&self) -> Self::Cursor {
        (**self).cursor()
    }
}
