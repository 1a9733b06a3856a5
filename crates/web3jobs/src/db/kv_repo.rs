//! Key-value repository: CRUD operations for the `kv_entries` table.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use super::{Database, DatabaseError};
use crate::storage::KvOp;

const UPSERT_SQL: &str = "INSERT INTO kv_entries (key, value, updated_at) VALUES (?1, ?2, ?3)
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";

const DELETE_SQL: &str = "DELETE FROM kv_entries WHERE key = ?1";

fn now() -> String {
    Utc::now().to_rfc3339()
}

/// Finds the value stored under `key`.
pub fn get(db: &Database, key: &str) -> Result<Option<String>, DatabaseError> {
    let conn = db.lock()?;
    Ok(conn
        .query_row(
            "SELECT value FROM kv_entries WHERE key = ?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?)
}

/// Inserts or overwrites `key`.
pub fn set(db: &Database, key: &str, value: &str) -> Result<(), DatabaseError> {
    db.lock()?.execute(UPSERT_SQL, params![key, value, now()])?;
    Ok(())
}

/// Deletes `key`. Missing keys are not an error.
pub fn remove(db: &Database, key: &str) -> Result<(), DatabaseError> {
    db.lock()?.execute(DELETE_SQL, params![key])?;
    Ok(())
}

/// Applies every operation inside one transaction.
pub fn apply(db: &Database, ops: &[KvOp]) -> Result<(), DatabaseError> {
    let conn = db.lock()?;
    apply_in_transaction(&conn, ops)
}

fn apply_in_transaction(conn: &Connection, ops: &[KvOp]) -> Result<(), DatabaseError> {
    let tx = conn.unchecked_transaction()?;
    let stamp = now();
    for op in ops {
        match op {
            KvOp::Set { key, value } => {
                tx.execute(UPSERT_SQL, params![key, value, stamp])?;
            }
            KvOp::Remove { key } => {
                tx.execute(DELETE_SQL, params![key])?;
            }
        }
    }
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_set_and_get() {
        let db = db();
        assert_eq!(get(&db, "session.user").unwrap(), None);
        set(&db, "session.user", "{}").unwrap();
        assert_eq!(get(&db, "session.user").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_set_overwrites() {
        let db = db();
        set(&db, "k", "one").unwrap();
        set(&db, "k", "two").unwrap();
        assert_eq!(get(&db, "k").unwrap().as_deref(), Some("two"));
        let rows: u32 = db
            .lock()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM kv_entries", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let db = db();
        remove(&db, "nope").unwrap();
        set(&db, "k", "v").unwrap();
        remove(&db, "k").unwrap();
        assert_eq!(get(&db, "k").unwrap(), None);
    }

    #[test]
    fn test_apply_batch() {
        let db = db();
        set(&db, "stale", "x").unwrap();
        apply(
            &db,
            &[
                KvOp::set("a", "1"),
                KvOp::set("b", "2"),
                KvOp::remove("stale"),
            ],
        )
        .unwrap();
        assert_eq!(get(&db, "a").unwrap().as_deref(), Some("1"));
        assert_eq!(get(&db, "b").unwrap().as_deref(), Some("2"));
        assert_eq!(get(&db, "stale").unwrap(), None);
    }

    #[test]
    fn test_apply_rolls_back_on_failure() {
        let db = db();
        // Reject any write of the value 'boom' to force a mid-batch failure.
        db.lock()
            .unwrap()
            .execute_batch(
                "CREATE TRIGGER reject_boom BEFORE INSERT ON kv_entries
                 WHEN NEW.value = 'boom'
                 BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
            )
            .unwrap();

        let result = apply(&db, &[KvOp::set("first", "ok"), KvOp::set("second", "boom")]);
        assert!(result.is_err());
        assert_eq!(get(&db, "first").unwrap(), None);
    }
}
