//! Schema upgrades for the session file, tracked in `PRAGMA user_version`.

use rusqlite::Connection;

use super::error::DatabaseError;

/// Upgrade steps; step `i` moves the file from version `i` to `i + 1`.
const STEPS: &[&str] = &[include_str!("sql/001_create_kv_entries.sql")];

/// Schema version this build writes.
pub const SCHEMA_VERSION: u32 = STEPS.len() as u32;

fn user_version(conn: &Connection) -> Result<u32, DatabaseError> {
    Ok(conn.query_row("PRAGMA user_version", [], |r| r.get(0))?)
}

/// Applies every step the file has not seen yet, each in its own transaction.
///
/// A file written by a newer build is refused rather than guessed at.
pub fn upgrade(conn: &Connection) -> Result<(), DatabaseError> {
    let found = user_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(DatabaseError::Schema {
            version: found,
            reason: format!("this build only understands up to v{}", SCHEMA_VERSION),
        });
    }

    for (index, sql) in STEPS.iter().enumerate().skip(found as usize) {
        let version = index as u32 + 1;
        let schema_err = |e: rusqlite::Error| DatabaseError::Schema {
            version,
            reason: e.to_string(),
        };

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(sql).map_err(schema_err)?;
        tx.pragma_update(None, "user_version", version)
            .map_err(schema_err)?;
        tx.commit()?;
        log::info!("Session schema upgraded to v{}", version);
    }

    Ok(())
}
