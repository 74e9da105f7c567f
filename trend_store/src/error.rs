//! Error types for the trend_store crate

use thiserror::Error;
use trend_math::MathError;

/// Custom error types for the trend_store crate
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The history database cannot be read or written
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Error from invalid parameters or configuration
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A stored row could not be decoded
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from forecaster configuration
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error encoding or decoding JSON
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl HistoryError {
    /// Whether the error came from the storage layer.
    ///
    /// Ingestion loops log these and carry on with the next entity.
    pub fn is_storage(&self) -> bool {
        matches!(self, HistoryError::StorageUnavailable(_))
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, HistoryError>;

impl From<rusqlite::Error> for HistoryError {
    fn from(err: rusqlite::Error) -> Self {
        HistoryError::StorageUnavailable(err.to_string())
    }
}

impl From<std::io::Error> for HistoryError {
    fn from(err: std::io::Error) -> Self {
        HistoryError::StorageUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for HistoryError {
    fn from(err: serde_json::Error) -> Self {
        HistoryError::Serialization(err.to_string())
    }
}
