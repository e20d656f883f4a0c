//! Engine configuration that downstream crates can serialize/deserialize.
//!
//! A process-wide config can be installed once at startup; operators read it
//! through `global()` when they build indices or materialize.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

static GLOBAL: OnceCell<EngineConfig> = OnceCell::new();
static ENV_DEFAULT: OnceCell<EngineConfig> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Initial capacity of the hash indices built by set operations, grouping,
    /// joins and keyed materialization.
    pub index_capacity_hint: usize,

    /// Upper bound on elements an eager materializer (`to_vec`, `to_lookup`,
    /// `to_map`) may buffer. `None` means unbounded; a bound turns an
    /// accidental materialization of an unbounded sequence into an error.
    pub max_materialized: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            index_capacity_hint: 16,
            max_materialized: None,
        }
    }
}

impl EngineConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `LAZYSEQ_INDEX_CAPACITY_HINT`: initial hash index capacity
    /// - `LAZYSEQ_MAX_MATERIALIZED`: materialization cap (elements)
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("LAZYSEQ_INDEX_CAPACITY_HINT") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.index_capacity_hint = v;
            }
        }

        if let Ok(s) = std::env::var("LAZYSEQ_MAX_MATERIALIZED") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.max_materialized = Some(v);
            }
        }

        cfg
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn with_max_materialized(mut self, limit: usize) -> Self {
        self.max_materialized = Some(limit);
        self
    }

    /// Fails with `MaterializeLimit` once `buffered` exceeds the cap.
    pub fn check_materialized(&self, op: &'static str, buffered: usize) -> Result<()> {
        match self.max_materialized {
            Some(limit) if buffered > limit => Err(Error::MaterializeLimit { op, limit }),
            _ => Ok(()),
        }
    }
}

/// Install the process-wide config. May only be called once.
pub fn install(cfg: EngineConfig) -> Result<()> {
    GLOBAL
        .set(cfg)
        .map_err(|_| Error::Config("engine config already installed".into()))
}

/// The installed config, or one read from the environment on first use.
///
/// Reading the environment fallback does not count as an install; a later
/// `install` still takes effect.
pub fn global() -> &'static EngineConfig {
    GLOBAL
        .get()
        .unwrap_or_else(|| ENV_DEFAULT.get_or_init(EngineConfig::from_env))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let cfg = EngineConfig::from_json_str(r#"{ "max_materialized": 10 }"#).unwrap();
        assert_eq!(cfg.max_materialized, Some(10));
        assert_eq!(cfg.index_capacity_hint, 16);
    }

    #[test]
    fn bad_json_is_config_error() {
        let err = EngineConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn from_env_reads_lazyseq_vars() {
        std::env::set_var("LAZYSEQ_INDEX_CAPACITY_HINT", "64");
        std::env::set_var("LAZYSEQ_MAX_MATERIALIZED", "500");
        let cfg = EngineConfig::from_env();
        assert_eq!(cfg.index_capacity_hint, 64);
        assert_eq!(cfg.max_materialized, Some(500));

        // Unparseable values keep the defaults.
        std::env::set_var("LAZYSEQ_INDEX_CAPACITY_HINT", "lots");
        std::env::remove_var("LAZYSEQ_MAX_MATERIALIZED");
        let cfg = EngineConfig::from_env();
        std::env::remove_var("LAZYSEQ_INDEX_CAPACITY_HINT");
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn materialize_cap_is_inclusive() {
        let cfg = EngineConfig::default().with_max_materialized(3);
        assert!(cfg.check_materialized("to_vec", 3).is_ok());
        assert_eq!(
            cfg.check_materialized("to_vec", 4),
            Err(Error::MaterializeLimit {
                op: "to_vec",
                limit: 3
            })
        );
    }
}
