//! Key-value persistence.
//!
//! A durable store of opaque string blobs addressed by string keys. Each operation is atomic for
//! its key, there is no transaction spanning several keys.

mod file_store;
mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use std::path::PathBuf;

/// Failures of a `KeyValueStore`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Unable to read '{key}' from {}: {source}", path.display())]
    Read {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to write '{key}' to {}: {source}", path.display())]
    Write {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to remove '{key}' at {}: {source}", path.display())]
    Remove {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to (de)serialize the value stored at '{key}': {source}")]
    Serde {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("The storage backend is unavailable: {0}")]
    Unavailable(String),
}

/// A durable, process-independent string-keyed store.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the blob stored at `key`, or `None` if nothing was ever stored there.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` at `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Deletes the value at `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
