//! Key-value blob store contract and SQLite implementation.
//!
//! # Responsibility
//! - Store opaque byte payloads under string keys.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - A write replaces the whole record in one statement; readers never see
//!   a partially written payload.
//! - Keys are non-empty and carry no surrounding whitespace; keys are
//!   stored exactly as given.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for blob persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidKey(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidKey(key) => write!(f, "invalid blob key: `{key}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidKey(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable key-value storage for whole-state snapshots.
pub trait BlobStore {
    /// Returns the payload stored under `key`, if any.
    fn read_blob(&self, key: &str) -> RepoResult<Option<Vec<u8>>>;
    /// Inserts or replaces the payload stored under `key`.
    fn write_blob(&self, key: &str, value: &[u8]) -> RepoResult<()>;
    /// Removes `key`. Returns whether a record existed.
    fn remove_blob(&self, key: &str) -> RepoResult<bool>;
}

/// SQLite-backed blob store over the `blobs` table.
pub struct SqliteBlobStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBlobStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BlobStore for SqliteBlobStore<'_> {
    fn read_blob(&self, key: &str) -> RepoResult<Option<Vec<u8>>> {
        let key = check_key(key)?;
        let value = self
            .conn
            .query_row("SELECT value FROM blobs WHERE key = ?1;", [key], |row| {
                row.get::<_, Vec<u8>>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write_blob(&self, key: &str, value: &[u8]) -> RepoResult<()> {
        let key = check_key(key)?;
        self.conn.execute(
            "INSERT INTO blobs (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_blob(&self, key: &str) -> RepoResult<bool> {
        let key = check_key(key)?;
        let changed = self
            .conn
            .execute("DELETE FROM blobs WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}

fn check_key(key: &str) -> RepoResult<&str> {
    if key.is_empty() || key.trim() != key {
        return Err(RepoError::InvalidKey(key.to_string()));
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::{BlobStore, RepoError, SqliteBlobStore};
    use crate::db::open_db_in_memory;

    #[test]
    fn write_replaces_existing_value() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteBlobStore::new(&conn);

        store.write_blob("state", b"first").unwrap();
        store.write_blob("state", b"second").unwrap();

        assert_eq!(store.read_blob("state").unwrap(), Some(b"second".to_vec()));
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM blobs;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn remove_reports_whether_key_existed() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteBlobStore::new(&conn);

        store.write_blob("state", b"x").unwrap();
        assert!(store.remove_blob("state").unwrap());
        assert!(!store.remove_blob("state").unwrap());
        assert_eq!(store.read_blob("state").unwrap(), None);
    }

    #[test]
    fn blank_key_is_rejected() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteBlobStore::new(&conn);

        let err = store.write_blob("  ", b"x").unwrap_err();
        assert!(matches!(err, RepoError::InvalidKey(_)));
    }

    #[test]
    fn padded_key_is_rejected_instead_of_aliasing() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteBlobStore::new(&conn);
        store.write_blob("state", b"kept").unwrap();

        for padded in [" state", "state ", "\tstate\n"] {
            let err = store.write_blob(padded, b"other").unwrap_err();
            assert!(matches!(err, RepoError::InvalidKey(key) if key == padded));
            assert!(store.read_blob(padded).is_err());
            assert!(store.remove_blob(padded).is_err());
        }
        assert_eq!(store.read_blob("state").unwrap(), Some(b"kept".to_vec()));
    }
}
