//! Shared error types for the analysis engine

use thiserror::Error;

/// Main error type for archmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// A fact bundle was malformed beyond local recovery
    #[error("Malformed input facts: {0}")]
    MalformedFacts(String),

    /// Analysis stage failure
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The hosting application cancelled the in-flight analysis
    #[error("Analysis cancelled")]
    Cancelled,

    /// Wrapped external errors
    #[error(transparent)]
    External(#[from] anyhow::Error),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
