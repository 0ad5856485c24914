//! Error types for CiteGraph.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Rejected before any provider call (e.g. an empty paper ID).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Fetch failed after the retry budget, or the response was unusable.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The provider answered but had no identifier-bearing record.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
