use thiserror::Error;

/// Canonical result for the engine.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("{op}: sequence contains no matching element")]
    EmptyResult { op: &'static str },

    #[error("{op}: sequence contains more than one matching element")]
    MultipleMatches { op: &'static str },

    #[error("duplicate key: {key}")]
    DuplicateKey { key: String },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{op}: materialization exceeded the configured limit of {limit} elements")]
    MaterializeLimit { op: &'static str, limit: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn duplicate_key<K: std::fmt::Debug + ?Sized>(key: &K) -> Self {
        Error::DuplicateKey {
            key: format!("{:?}", key),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
