//! Error types for the LLM boundary

use thiserror::Error;

/// LLM boundary error types
#[derive(Error, Debug)]
pub enum AiError {
    /// Missing or rejected credentials. Fatal to the request; never retried.
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("LLM API error: {0}")]
    Api(String),

    #[error("Empty completion response")]
    EmptyResponse,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for LLM operations
pub type Result<T> = std::result::Result<T, AiError>;
