//! Error taxonomy for the memory store.
//!
//! Collaborator failures (embedding provider, SQLite) surface unchanged through
//! [`MemoryError`]. Gate rejections are not errors; see [`crate::gate::GateDecision`].

use thiserror::Error;

/// Result alias used across the library.
pub type Result<T, E = MemoryError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum MemoryError {
    /// Invalid or missing storage path / provider configuration. Fatal at startup.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The embedding provider failed or returned a malformed vector.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Persistence failure outside SQLite itself (poisoned lock, aborted worker).
    #[error("storage error: {0}")]
    Storage(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The store was closed; every later operation on the same instance fails.
    #[error("memory store is closed")]
    Closed,
}

impl MemoryError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn embedding(msg: impl Into<String>) -> Self {
        Self::Embedding(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// `true` for every failure of the persistence layer.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Sqlite(_) | Self::Io(_))
    }
}
