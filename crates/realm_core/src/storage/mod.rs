//! Key-value persistence backends.
//!
//! # Responsibility
//! - Define the storage contract the post store persists through.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - `load` distinguishes "absent" (`Ok(None)`) from failures (`Err`).
//! - `save` replaces the whole value stored under a key in one write.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure raised by a storage backend.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// Backend refused or failed the operation for a non-SQL reason.
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Local key-value storage holding serialized collections.
pub trait KeyValueStorage {
    /// Reads the value under `key`. Absence is `Ok(None)`, not an error.
    fn load(&self, key: &str) -> StorageResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &mut S {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).save(key, value)
    }
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Box<S> {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).save(key, value)
    }
}
