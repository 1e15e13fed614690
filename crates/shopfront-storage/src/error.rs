//! Storage error types.

use thiserror::Error;

/// Errors that can occur when reading or writing a storage slot.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing store.
    #[error("Failed to open storage at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Key contains characters that cannot name a slot.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed to read or write a slot.
    #[error("I/O error on slot {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}
