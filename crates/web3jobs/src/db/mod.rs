//! The SQLite file behind [`SqliteStore`](crate::storage::SqliteStore).
//!
//! One connection per process. The CLI may run several commands against the
//! same file at once, so the connection waits on a locked file instead of
//! failing straight away.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::Connection;

pub mod error;
pub mod kv_repo;
pub mod migrations;

pub use error::DatabaseError;

/// How long a write waits for another process to release the file.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared handle to the session file. Clones share one connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens the session file at `path`, creating it and its directory on
    /// first use, and brings its schema up to date.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| DatabaseError::CreateDir {
                dir: dir.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let db = Self::prepare(conn)?;
        log::debug!("Session database ready at {}", path.display());
        Ok(db)
    }

    /// Private database that disappears with the handle.
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        Self::prepare(Connection::open_in_memory()?)
    }

    fn prepare(conn: Connection) -> Result<Self, DatabaseError> {
        migrations::upgrade(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Exclusive access to the connection for one repository call.
    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Connection>, DatabaseError> {
        self.conn.lock().map_err(|_| DatabaseError::Poisoned)
    }
}

/// `~/.web3jobs/data/session.db`, or `None` without a home directory.
pub fn default_session_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".web3jobs").join("data").join("session.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles").join("alice").join("session.db");

        Database::open(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_open_file_uses_wal() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(&dir.path().join("session.db")).unwrap();
        let mode: String = db
            .lock()
            .unwrap()
            .query_row("PRAGMA journal_mode", [], |r| r.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_clones_share_entries() {
        let db = Database::open_in_memory().unwrap();
        let other = db.clone();
        kv_repo::set(&db, "session.user", "{}").unwrap();
        assert_eq!(
            kv_repo::get(&other, "session.user").unwrap().as_deref(),
            Some("{}")
        );
    }

    #[test]
    fn test_default_session_path_under_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                default_session_path(),
                Some(home.join(".web3jobs/data/session.db"))
            );
        }
    }
}
