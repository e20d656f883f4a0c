#![forbid(unsafe_code)]
//! lazyseq-operators: deferred, chainable query operators over sequences.
//!
//! Design intent:
//! - Every adapter is a recipe; `Sequence::cursor()` starts an independent
//!   pull-based traversal and nothing runs before that.
//! - Single-threaded and synchronous. Shared caller closures sit behind `Rc`,
//!   so sequences are deliberately `!Send`.
//! - Operators that need a prior pass (set ops, grouping, joins, `take_last`)
//!   do it on the first pull of each traversal, never at construction.
//! - Eager materializers honour `EngineConfig::max_materialized`.

pub mod traits;

pub mod source;

pub mod concat;
pub mod filter;
pub mod flatten;
pub mod map;
pub mod partition;
pub mod set;

pub mod group;
pub mod index;
pub mod join;

pub mod aggregate;
pub mod collect;

pub mod ext;
pub mod trace;

pub use collect::{Collector, Dictionary};
pub use ext::SequenceExt;
pub use flatten::cross_product;
pub use group::{Grouping, Lookup};
pub use source::{
    empty, from_iter, from_iter_once, from_slice, from_vec, range, range_from, repeat,
    repeat_forever,
};
pub use traits::Sequence;
