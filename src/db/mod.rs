//! Database helpers: schema setup, path handling and pool creation.

use crate::store::StoreError;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::path::Path;

/// Create the `logs` table and its timestamp index if absent.
///
/// `id` is declared `BIGINT` rather than `INTEGER` so it does not alias the
/// implicit `rowid`; `rowid` then follows insertion order and breaks ties
/// between rows of the same batch.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), StoreError> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS logs (
            id BIGINT NOT NULL PRIMARY KEY,
            ts TEXT NOT NULL,
            message TEXT NOT NULL
        )"#,
    )
    .execute(pool)
    .await
    .map_err(StoreError::schema)?;

    sqlx::query("CREATE INDEX IF NOT EXISTS logs_ts_idx ON logs (ts)")
        .execute(pool)
        .await
        .map_err(StoreError::schema)?;
    Ok(())
}

/// Ensure SQLite file and parent folder exist for a given sqlx URL.
pub fn ensure_sqlite_path(db_url: &str) -> String {
    if !db_url.starts_with("sqlite:") {
        return db_url.to_string();
    }
    let path_part = db_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    if path_part == ":memory:" {
        return db_url.to_string();
    }
    let path_only = match path_part.split_once('?') {
        Some((p, _)) => p,
        None => path_part,
    };
    if !path_only.is_empty() {
        let p = Path::new(path_only);
        if let Some(parent) = p.parent() {
            if !parent.as_os_str().is_empty() {
                let _ = std::fs::create_dir_all(parent);
            }
        }
        let _ = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(p);
    }
    db_url.to_string()
}

/// Open a pool against `db_url`, creating the file first when needed.
pub async fn connect(db_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let db_url = ensure_sqlite_path(db_url);
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(&db_url)
        .await
}
