//! Log entry as stored in SQLite.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, Row, sqlite::SqliteRow};

/// One persisted message. Rows are never updated after commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: u64,
    pub ts: DateTime<Utc>,
    pub message: String,
}

// SQLite integers are signed; ids are stored bit-for-bit as i64.
impl FromRow<'_, SqliteRow> for LogEntry {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(LogEntry {
            id: row.try_get::<i64, _>("id")? as u64,
            ts: row.try_get("ts")?,
            message: row.try_get("message")?,
        })
    }
}
