//! Cache error types.

use thiserror::Error;

/// Errors that can occur when using the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open the store.
    #[error("Failed to open store at {path}: {source}")]
    OpenError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to perform store operation.
    #[error("Store operation on '{key}' failed: {source}")]
    StoreError {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Key is empty or contains characters the backend cannot represent.
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    /// The store's lock was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    Poisoned,
}
