//! # Persistence Provider
//!
//! SQLite-backed relational store. Opening a database creates the schema
//! when it does not exist yet and turns foreign key enforcement on, so a
//! fresh file is immediately usable.

pub mod models;

use std::path::Path;

use rusqlite::Connection;
use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage errors surfaced by the persistence provider and repository
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying SQLite failure (constraint violation, I/O, ...)
    #[error("storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection mutex poisoned by a panicking holder
    #[error("storage connection poisoned")]
    Poisoned,
}

/// Schema applied at startup. `AUTOINCREMENT` keeps row ids from being
/// reused after deletes.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS test_case (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS asset (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS execution (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    test_case_id INTEGER NOT NULL REFERENCES test_case(id),
    asset_id     INTEGER NOT NULL REFERENCES asset(id),
    timestamp    TEXT NOT NULL,
    status       INTEGER NOT NULL,
    details      TEXT NOT NULL
);
";

/// An open database with the schema in place.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database file
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Open a transient in-memory database
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> StorageResult<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Hand the connection over to the repository layer
    pub fn into_connection(self) -> Connection {
        self.conn
    }
}
