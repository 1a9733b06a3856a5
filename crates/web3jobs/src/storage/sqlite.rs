use std::path::Path;

use super::{KeyValueStore, KvOp, StorageError};
use crate::db::{kv_repo, Database};

/// Key-value store persisted in a SQLite file, surviving restarts.
#[derive(Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            db: Database::open(path)?,
        })
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self {
            db: Database::open_in_memory()?,
        })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(kv_repo::get(&self.db, key)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Ok(kv_repo::set(&self.db, key, value)?)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Ok(kv_repo::remove(&self.db, key)?)
    }

    fn apply(&self, ops: &[KvOp]) -> Result<(), StorageError> {
        Ok(kv_repo::apply(&self.db, ops)?)
    }
}
