//! SQLite-backed key-value storage.
//!
//! # Responsibility
//! - Persist serialized collections into the `kv_entries` table.
//! - Keep SQL details inside the storage boundary.
//!
//! # Invariants
//! - Only migrated connections are accepted.
//! - `save` is a single upsert statement, so a collection write is atomic.

use super::{KeyValueStorage, StorageResult};
use crate::db::migrations::{current_user_version, latest_version};
use crate::db::{open_db, open_db_in_memory, DbError};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Key-value storage over one SQLite connection.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens (and migrates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    pub fn open_in_memory() -> StorageResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps an existing connection after checking it is fully migrated.
    pub fn try_new(conn: Connection) -> StorageResult<Self> {
        let db_version = current_user_version(&conn)?;
        let expected = latest_version();
        if db_version != expected {
            return Err(DbError::SchemaNotMigrated {
                db_version,
                expected,
            }
            .into());
        }
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn into_connection(self) -> Connection {
        self.conn
    }
}

impl KeyValueStorage for SqliteStorage {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, CAST(strftime('%s', 'now') AS INTEGER) * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        debug!(
            "event=kv_save module=storage status=ok backend=sqlite key={} bytes={}",
            key,
            value.len()
        );
        Ok(())
    }
}
