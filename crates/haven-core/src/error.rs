//! Error taxonomy for the core crate.
//!
//! Read failures never appear here: a missing or unreadable record
//! degrades to an empty/default value at the typed storage layer. Every
//! other failure is explicit so callers can retry or report instead of
//! silently losing data.

use thiserror::Error;

/// Core error types
#[derive(Error, Debug)]
pub enum CoreError {
    /// A storage mutation failed. The data was NOT persisted.
    #[error("Storage write failed for {key}: {source}")]
    StorageWrite {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Invalid configuration (unknown style, template drift, bad credential).
    /// Fatal to the operation; never silently defaulted.
    #[error("Configuration error: {0}")]
    Config(String),

    /// LLM or network failure. Recoverable; nothing was persisted.
    #[error("Upstream error: {0}")]
    Upstream(#[from] haven_ai::AiError),

    /// The send was cancelled before the reply was persisted.
    #[error("Operation cancelled")]
    Cancelled,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    pub(crate) fn write(key: impl Into<String>, source: anyhow::Error) -> Self {
        Self::StorageWrite {
            key: key.into(),
            source,
        }
    }
}
