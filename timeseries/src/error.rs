//! Error and Result types for row building.

use thiserror::Error;

/// A convenience `Result` type for row building.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for row building.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A key could not be parsed into its parts.
    #[error("Invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// The batch count of a batch key is zero.
    #[error("Invalid batch count in key '{0}': must be at least 1")]
    InvalidBatchCount(String),
}

impl Error {
    pub(crate) fn invalid_key(key: &str, reason: impl Into<String>) -> Self {
        Error::InvalidKey {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
