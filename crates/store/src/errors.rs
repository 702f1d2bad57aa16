//! Error types for the store layer

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    ConnectionError(String),

    #[error("Store migration error: {0}")]
    MigrationError(String),

    #[error("Store query error: {0}")]
    QueryError(String),

    /// The stored value exists but does not decode as the expected record.
    #[error("Malformed record under '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode record under '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, StoreError::Malformed { .. })
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::QueryError(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
