//! Key-value persistence and the JSON adapter layered on top of it.

pub mod json_backend;
pub mod memory;

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;

/// Store key holding the category list.
pub const CATEGORIES_KEY: &str = "categories";
/// Store key holding the expense list.
pub const EXPENSES_KEY: &str = "expenses";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Minimal string key-value store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// JSON adapter over a [`KeyValueStore`].
///
/// Reads never fail: missing or malformed values are replaced by the caller's
/// fallback, which is written back so the next load is stable. Writes are
/// best-effort and only logged on failure.
pub struct Persistence {
    store: Box<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load<T>(&self, key: &str, fallback: T) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        let raw = match self.store.get(key) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(key, error = %err, "store read failed; using fallback");
                None
            }
        };

        if let Some(raw) = raw {
            match serde_json::from_str::<T>(&raw) {
                Ok(value) => return value,
                Err(err) => {
                    tracing::warn!(key, error = %err, "stored value is malformed; reseeding");
                }
            }
        }

        self.save(key, &fallback);
        fallback
    }

    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(err) => {
                tracing::error!(key, error = %err, "failed to encode value");
                return;
            }
        };
        if let Err(err) = self.store.set(key, &json) {
            tracing::error!(key, error = %err, "failed to persist value");
        }
    }

    pub fn remove(&self, key: &str) {
        if let Err(err) = self.store.remove(key) {
            tracing::error!(key, error = %err, "failed to remove value");
        }
    }
}
