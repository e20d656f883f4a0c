//! Convenient re-exports for downstream crates.

pub use crate::comparer::{
    DefaultComparer, EqualityComparer, FnComparer, IgnoreAsciiCase, KeyComparer,
};
pub use crate::config::EngineConfig;
pub use crate::error::{Error, Result};
pub use crate::types::{Downcast, Scalar};
