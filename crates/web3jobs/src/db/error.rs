//! Failures of the SQLite session file.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Cannot create session directory '{dir}': {source}")]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file's schema is newer than this build, or an upgrade step failed.
    #[error("Session schema v{version}: {reason}")]
    Schema { version: u32, reason: String },

    /// A writer panicked while holding the connection.
    #[error("Session database is unusable after a panic in another writer")]
    Poisoned,
}
