#![forbid(unsafe_code)]
//! lazyseq-core: error kinds, equality comparers, tagged values and engine
//! configuration shared by the lazy sequence engine.
//!
//! No iteration machinery lives here; see `lazyseq-operators`.

pub mod comparer;
pub mod config;
pub mod error;
pub mod prelude;
pub mod types;

pub use error::{Error, Result};
