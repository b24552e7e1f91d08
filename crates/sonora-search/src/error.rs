//! Retrieval error types.

use thiserror::Error;

/// Errors raised while building indexes or answering queries.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A configured feature column is missing or not numeric. Fatal at
    /// index-build time.
    #[error("invalid feature '{feature}': {reason}")]
    InvalidFeature { feature: String, reason: String },

    /// No track carries the requested name.
    #[error("track not found: {track_name}")]
    NotFound { track_name: String },

    /// An error propagated from the catalog layer.
    #[error("corpus error: {0}")]
    Corpus(#[from] sonora_core::Error),
}

impl SearchError {
    /// Returns `true` when the error means the requested track does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` when the error came from a bad feature column.
    pub fn is_invalid_feature(&self) -> bool {
        matches!(self, Self::InvalidFeature { .. })
    }
}

/// Convenience alias for retrieval results.
pub type SearchResult<T> = std::result::Result<T, SearchError>;
