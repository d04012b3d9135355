//! Key-value slots that a cart persists into.
//!
//! The cart is written wholesale under a single fixed key. Implementations
//! decide where that key lives: an in-memory map (request-scoped copies of a
//! session value, tests) or a directory of files (the CLI).

use std::collections::HashMap;

use thiserror::Error;

/// Errors from a key-value slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing medium could not be read or written.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key is not usable by this store (e.g. contains a path separator).
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// A string-to-string store with whole-value reads and writes.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing medium fails.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing medium fails.
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
}

/// In-memory key-value store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with one value, e.g. a slot copied out of a session.
    #[must_use]
    pub fn with_value(key: &str, value: Option<String>) -> Self {
        let mut store = Self::new();
        if let Some(value) = value {
            store.values.insert(key.to_string(), value);
        }
        store
    }

    /// Take the value stored under `key` out of the store.
    #[must_use]
    pub fn take(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
