//! Local key-value persistence for session state.
//!
//! The session layer only ever talks to [`KeyValueStore`]; which backend sits
//! behind it is decided by configuration.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use crate::config::{StorageBackend, StorageConfig};
use crate::db::DatabaseError;

pub mod sqlite;

pub use sqlite::SqliteStore;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("No storage path configured and no home directory found")]
    NoPath,
}

/// A single write in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KvOp {
    Set { key: String, value: String },
    Remove { key: String },
}

impl KvOp {
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        KvOp::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn remove(key: impl Into<String>) -> Self {
        KvOp::Remove { key: key.into() }
    }
}

/// Synchronous string-keyed storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Applies all operations or none of them.
    fn apply(&self, ops: &[KvOp]) -> Result<(), StorageError>;
}

/// Process-local store. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, String>> {
        match self.entries.read() {
            Ok(g) => g,
            Err(poisoned) => {
                log::warn!("Memory store lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, String>> {
        match self.entries.write() {
            Ok(g) => g,
            Err(poisoned) => {
                log::warn!("Memory store lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.write().remove(key);
        Ok(())
    }

    fn apply(&self, ops: &[KvOp]) -> Result<(), StorageError> {
        // One guard for the whole batch so readers never see half of it.
        let mut entries = self.write();
        for op in ops {
            match op {
                KvOp::Set { key, value } => {
                    entries.insert(key.clone(), value.clone());
                }
                KvOp::Remove { key } => {
                    entries.remove(key);
                }
            }
        }
        Ok(())
    }
}

/// Opens the backend named by the configuration.
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn KeyValueStore>, StorageError> {
    match config.backend {
        StorageBackend::Memory => {
            log::debug!("Using in-memory session storage");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Sqlite => {
            let path = config.resolved_path().ok_or(StorageError::NoPath)?;
            Ok(Arc::new(SqliteStore::open(&path)?))
        }
    }
}
