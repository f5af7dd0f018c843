use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A scalar stored under a preference key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreferenceValue {
    Integer(i64),
    Date(DateTime<Utc>),
}

impl PreferenceValue {
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PreferenceValue::Integer(v) => Some(*v),
            PreferenceValue::Date(_) => None,
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            PreferenceValue::Date(v) => Some(*v),
            PreferenceValue::Integer(_) => None,
        }
    }
}

impl From<i64> for PreferenceValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<DateTime<Utc>> for PreferenceValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

/// Key/value capability for small durable scalars (user preferences, counters).
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Read a single value. Missing keys are `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<PreferenceValue>, StorageError>;

    /// Write a single value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn set(&self, key: &str, value: PreferenceValue) -> Result<(), StorageError>;

    /// Delete a key. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Read several keys at once. Missing keys are absent from the map.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if any read fails.
    async fn get_many(
        &self,
        keys: &[&str],
    ) -> Result<HashMap<String, PreferenceValue>, StorageError> {
        let mut found = HashMap::with_capacity(keys.len());
        for key in keys {
            if let Some(value) = self.get(key).await? {
                found.insert((*key).to_owned(), value);
            }
        }
        Ok(found)
    }

    /// Write several values as one batch.
    ///
    /// Backends that can apply the batch atomically should override this; the
    /// default writes the entries one by one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if any write fails.
    async fn set_many(&self, entries: &[(&str, PreferenceValue)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.set(key, *value).await?;
        }
        Ok(())
    }
}

/// Process-local preference store for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryPreferenceStore {
    values: Arc<Mutex<HashMap<String, PreferenceValue>>>,
}

impl InMemoryPreferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of keys currently stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn len(&self) -> Result<usize, StorageError> {
        let guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.len())
    }

    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<PreferenceValue>, StorageError> {
        let guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).copied())
    }

    async fn set(&self, key: &str, value: PreferenceValue) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }

    async fn set_many(&self, entries: &[(&str, PreferenceValue)]) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        for (key, value) in entries {
            guard.insert((*key).to_owned(), *value);
        }
        Ok(())
    }
}

/// Storage backends behind trait objects for easy swapping.
#[derive(Clone)]
pub struct Storage {
    pub preferences: Arc<dyn PreferenceStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let preferences: Arc<dyn PreferenceStore> = Arc::new(InMemoryPreferenceStore::new());
        Self { preferences }
    }
}
