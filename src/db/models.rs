//! Domain entities and their JSON projections.
//!
//! Each struct serializes to exactly the public field set returned by the
//! API. Execution timestamps are rendered as `"YYYY-MM-DD HH:MM:SS"`.

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

/// Timestamp format used in all JSON projections.
pub const SQL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn sql_datetime<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&timestamp.format(SQL_DATETIME_FORMAT))
}

/// A named, described test scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// A target that test cases are executed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    pub id: i64,
    pub name: String,
}

/// The recorded outcome of running one test case against one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Execution {
    pub id: i64,
    pub test_case_id: i64,
    pub asset_id: i64,
    #[serde(serialize_with = "sql_datetime")]
    pub timestamp: NaiveDateTime,
    pub status: bool,
    pub details: String,
}

/// Denormalized test case reference carried by execution listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCaseRef {
    pub id: i64,
    pub name: String,
}

/// One row of the execution listing: execution fields joined with the
/// owning test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionSummary {
    pub id: i64,
    pub status: bool,
    pub details: String,
    #[serde(serialize_with = "sql_datetime")]
    pub execution_date: NaiveDateTime,
    pub test_case: TestCaseRef,
}
