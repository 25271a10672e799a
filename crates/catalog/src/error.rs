//! Error types for the catalog crate.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while loading or updating the catalog and cart.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No book with this id
    #[error("Book not found: {0}")]
    BookNotFound(u64),

    /// Two books share an id in the catalog source
    #[error("Duplicate book id in catalog: {0}")]
    DuplicateId(u64),

    /// Star value outside the rating widget's range
    #[error("Rating must be between 1 and 5 stars, got {0}")]
    InvalidRating(u8),

    /// Detail operation attempted with no book open
    #[error("No book is open")]
    NoSelection,

    /// Configuration or storage failure
    #[error(transparent)]
    Core(#[from] rimas_core::Error),

    /// JSON encoding or decoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A book's comment ids have reached the top of the id range
    #[error("No comment id left for book {0}")]
    CommentIdsExhausted(u64),

    /// Search settings rejected
    #[error(transparent)]
    Search(#[from] rimas_search::SearchError),
}

/// Error code for integration with rimas-core error handling.
/// Range: 11xxx for catalog errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogErrorCode {
    /// No book with this id
    BookNotFound = 11001,
    /// Duplicate id in the source
    DuplicateId = 11002,
    /// Star value out of range
    InvalidRating = 11003,
    /// No book open
    NoSelection = 11004,
    /// Wrapped core error
    Core = 11005,
    /// JSON failure
    Json = 11006,
    /// Invalid search settings
    Search = 11007,
    /// Comment ids exhausted
    CommentIdsExhausted = 11008,
}

impl CatalogError {
    /// Returns the error code for this error.
    pub fn code(&self) -> CatalogErrorCode {
        match self {
            CatalogError::BookNotFound(_) => CatalogErrorCode::BookNotFound,
            CatalogError::DuplicateId(_) => CatalogErrorCode::DuplicateId,
            CatalogError::InvalidRating(_) => CatalogErrorCode::InvalidRating,
            CatalogError::NoSelection => CatalogErrorCode::NoSelection,
            CatalogError::Core(_) => CatalogErrorCode::Core,
            CatalogError::Json(_) => CatalogErrorCode::Json,
            CatalogError::Search(_) => CatalogErrorCode::Search,
            CatalogError::CommentIdsExhausted(_) => CatalogErrorCode::CommentIdsExhausted,
        }
    }
}
