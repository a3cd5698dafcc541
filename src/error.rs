//! Error types for storage backends and the persisted value utility.
//!
//! None of these escape [`Persisted`](crate::persisted::Persisted): they are
//! logged and kept for inspection, and the value keeps working in memory.

use std::fmt;

use thiserror::Error;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Which store operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Read,
    Write,
    Remove,
}

impl StoreOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreOp::Read => "read",
            StoreOp::Write => "write",
            StoreOp::Remove => "remove",
        }
    }
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures reported by a [`KeyValueStore`](crate::storage::KeyValueStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing store could not be reached (no window, storage disabled, ...).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Write would exceed the store's capacity.
    #[error("quota exceeded writing {key} (limit {limit} bytes)")]
    QuotaExceeded { key: String, limit: usize },

    /// Filesystem failure in a file-backed store.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be encoded before writing.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Recovered errors of the persisted value utility.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Stored string could not be parsed back into the value type.
    #[error("slot {key} holds unreadable data: {source}")]
    Deserialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Store read, write or remove failed.
    #[error("{op} of slot {key} failed: {source}")]
    Persistence {
        key: String,
        op: StoreOp,
        #[source]
        source: StoreError,
    },
}

impl PersistError {
    pub fn key(&self) -> &str {
        match self {
            PersistError::Deserialization { key, .. } | PersistError::Persistence { key, .. } => {
                key
            }
        }
    }

    /// Operation that failed; deserialization happens on read.
    pub fn op(&self) -> StoreOp {
        match self {
            PersistError::Deserialization { .. } => StoreOp::Read,
            PersistError::Persistence { op, .. } => *op,
        }
    }
}
