#![forbid(unsafe_code)]
//! lazyseq: a lazy, LINQ-style sequence-query engine.
//!
//! ```
//! use lazyseq::prelude::*;
//!
//! let evens: Vec<i64> = range(1, 10).filter(|x| x % 2 == 0).to_vec().unwrap();
//! assert_eq!(evens, vec![2, 4, 6, 8, 10]);
//! ```

pub use lazyseq_core as engine_core;
pub use lazyseq_operators as operators;

pub use lazyseq_core::{Error, Result};

pub mod prelude {
    pub use lazyseq_core::prelude::*;
    pub use lazyseq_operators::{
        cross_product, empty, from_iter, from_iter_once, from_slice, from_vec, range, range_from,
        repeat, repeat_forever, Collector, Dictionary, Grouping, Lookup, Sequence, SequenceExt,
    };
}
