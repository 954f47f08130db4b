//! # Key-Value Store Port
//!
//! String-keyed persistence boundary shared by the registry and ledger
//! crates. Values are JSON documents; each mutation rewrites the whole
//! document for its key.

use thiserror::Error;

/// Persistence failure at the store boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Store error: {0}")]
pub struct StoreError(pub String);

/// A namespaced string-keyed document store.
pub trait KeyValueStore: Send + Sync {
    /// Load the document under `key`, `None` when absent.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the document under `key`.
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Volatile in-memory store, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: parking_lot::Mutex<std::collections::HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
