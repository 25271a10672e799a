//! Error types for the search crate.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while configuring or feeding the search engine.
///
/// Matching, filtering, and suggesting themselves never fail.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Threshold settings that cannot be applied
    #[error("Invalid match options: {0}")]
    InvalidOptions(String),

    /// Input that could not be decoded
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] serde_json::Error),
}
