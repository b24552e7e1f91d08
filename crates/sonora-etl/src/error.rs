//! Ingestion error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The catalog file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The CSV data is malformed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The file has a header but no data rows.
    #[error("catalog is empty: {0}")]
    Empty(String),

    /// A column every track needs is absent from the header.
    #[error("required column missing: {0}")]
    MissingColumn(&'static str),
}

/// Convenience alias for ingestion results.
pub type LoadResult<T> = std::result::Result<T, LoadError>;
