//! Implements the `KeyValueStore` trait using in-memory data.
//!
//! Note: this is compiled even in the "production" version of this app so that the ledger can be
//! driven top-to-bottom without touching the disk.

use crate::storage::{KeyValueStore, StoreError};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// An implementation of `KeyValueStore` that holds everything in a map. Nothing survives the
/// process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `data`.
    pub fn with_data(data: HashMap<String, String>) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.data.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.data
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.data.write().await.remove(key);
        Ok(())
    }
}
