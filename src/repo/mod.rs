//! # Repository Layer
//!
//! Typed accessors over the persistence provider. The repository owns the
//! single SQLite connection; it is constructed once at startup and injected
//! into the route layer through shared state. Absent rows are returned as
//! `Ok(None)` so callers can branch on them instead of catching errors.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::models::{Asset, Execution, ExecutionSummary, TestCase, TestCaseRef};
use crate::db::{Database, StorageError, StorageResult};

/// Repository over the relational store
pub struct Repository {
    conn: Mutex<Connection>,
}

impl Repository {
    pub fn new(db: Database) -> Self {
        Self {
            conn: Mutex::new(db.into_connection()),
        }
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::Poisoned)
    }

    // ==================
    // Test cases
    // ==================

    /// All test cases, ordered by id ascending
    pub fn list_test_cases(&self) -> StorageResult<Vec<TestCase>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT id, name, description FROM test_case ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok(TestCase {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn count_test_cases(&self) -> StorageResult<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM test_case", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn get_test_case(&self, id: i64) -> StorageResult<Option<TestCase>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT id, name, description FROM test_case WHERE id = ?1",
                params![id],
                |row| {
                    Ok(TestCase {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        description: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    /// Insert a test case and return it with the store-assigned id
    pub fn create_test_case(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> StorageResult<TestCase> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO test_case (name, description) VALUES (?1, ?2)",
            params![name, description],
        )?;
        Ok(TestCase {
            id: conn.last_insert_rowid(),
            name: name.to_owned(),
            description: description.map(str::to_owned),
        })
    }

    /// Partial update: name is always written, description only when supplied.
    /// Returns `Ok(None)` when the id does not exist.
    pub fn update_test_case(
        &self,
        id: i64,
        name: &str,
        description: Option<&str>,
    ) -> StorageResult<Option<TestCase>> {
        let changed = {
            let conn = self.conn()?;
            match description {
                Some(description) => conn.execute(
                    "UPDATE test_case SET name = ?1, description = ?2 WHERE id = ?3",
                    params![name, description, id],
                )?,
                None => conn.execute(
                    "UPDATE test_case SET name = ?1 WHERE id = ?2",
                    params![name, id],
                )?,
            }
        };
        if changed == 0 {
            return Ok(None);
        }
        self.get_test_case(id)
    }

    /// Returns `Ok(false)` when the id does not exist, so a second delete of
    /// the same id reads as not found.
    pub fn delete_test_case(&self, id: i64) -> StorageResult<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM test_case WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    // ==================
    // Assets
    // ==================

    pub fn get_asset(&self, id: i64) -> StorageResult<Option<Asset>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT id, name FROM asset WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Asset {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    /// Seeding path only; assets have no HTTP creation surface
    pub fn create_asset(&self, name: &str) -> StorageResult<Asset> {
        let conn = self.conn()?;
        conn.execute("INSERT INTO asset (name) VALUES (?1)", params![name])?;
        Ok(Asset {
            id: conn.last_insert_rowid(),
            name: name.to_owned(),
        })
    }

    // ==================
    // Executions
    // ==================

    pub fn count_executions(&self) -> StorageResult<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM execution", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Insert an execution with a repository-assigned timestamp
    pub fn create_execution(
        &self,
        test_case_id: i64,
        asset_id: i64,
        status: bool,
        details: &str,
    ) -> StorageResult<Execution> {
        let timestamp = Utc::now().naive_utc();
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO execution (test_case_id, asset_id, timestamp, status, details)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![test_case_id, asset_id, timestamp, status, details],
        )?;
        Ok(Execution {
            id: conn.last_insert_rowid(),
            test_case_id,
            asset_id,
            timestamp,
            status,
            details: details.to_owned(),
        })
    }

    /// Executions recorded against one asset, each joined with its test
    /// case, ordered by execution id ascending. One query, no per-row
    /// round trips.
    pub fn list_executions_for_asset(&self, asset_id: i64) -> StorageResult<Vec<ExecutionSummary>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT e.id, e.status, e.details, e.timestamp, t.id, t.name
             FROM execution e
             JOIN test_case t ON t.id = e.test_case_id
             WHERE e.asset_id = ?1
             ORDER BY e.id ASC",
        )?;
        let rows = stmt.query_map(params![asset_id], |row| {
            Ok(ExecutionSummary {
                id: row.get(0)?,
                status: row.get(1)?,
                details: row.get(2)?,
                execution_date: row.get(3)?,
                test_case: TestCaseRef {
                    id: row.get(4)?,
                    name: row.get(5)?,
                },
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}
