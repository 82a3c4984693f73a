//! Error and Result types for binding operations.

use common::StorageError;
use common::serde::DeserializeError;
use thiserror::Error;

/// A convenience `Result` type for binding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for binding operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A stored value could not be decoded into a record.
    #[error("Corrupt encoding: {0}")]
    CorruptEncoding(String),

    /// The backend could not be reached or failed the request.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The scan start key has no object or no scan index annotation.
    #[error("Scan start not found: {bucket}/{key}")]
    ScanStartNotFound {
        /// Bucket that was scanned.
        bucket: String,
        /// Requested start key.
        key: String,
    },

    /// The operation is disabled by configuration.
    #[error("Not supported: {0}")]
    NotSupported(String),

    /// Invalid configuration or parameter.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Config(msg) => Error::InvalidInput(msg),
            other => Error::BackendUnavailable(other.to_string()),
        }
    }
}

impl From<DeserializeError> for Error {
    fn from(err: DeserializeError) -> Self {
        Error::CorruptEncoding(err.message)
    }
}
