//! SQLite-backed log store.

use super::{Clock, IdGenerator, LogStore, StoreError, SystemClock};
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::debug;

pub struct SqliteLogStore {
    pool: SqlitePool,
    ids: IdGenerator,
    clock: Arc<dyn Clock>,
}

impl SqliteLogStore {
    /// Wrap an existing pool. The schema must already exist, see
    /// [`ensure_schema`](crate::db::ensure_schema).
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_parts(pool, IdGenerator::new(), Arc::new(SystemClock))
    }

    pub fn with_parts(pool: SqlitePool, ids: IdGenerator, clock: Arc<dyn Clock>) -> Self {
        Self { pool, ids, clock }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl LogStore for SqliteLogStore {
    async fn append(&self, messages: &[String]) -> Result<(), StoreError> {
        if messages.is_empty() {
            return Ok(());
        }
        // Dropping `tx` without commit rolls it back, which also covers a
        // cancelled future.
        let mut tx = self.pool.begin().await.map_err(StoreError::transaction)?;
        let ts = self.clock.now();
        for message in messages {
            sqlx::query("INSERT INTO logs (id, ts, message) VALUES (?, ?, ?)")
                .bind(self.ids.next_id() as i64)
                .bind(ts)
                .bind(message)
                .execute(&mut *tx)
                .await
                .map_err(StoreError::transaction)?;
        }
        tx.commit().await.map_err(StoreError::transaction)?;
        debug!(rows = messages.len(), "appended batch");
        Ok(())
    }

    async fn find(&self, limit: Option<u64>) -> Result<Vec<String>, StoreError> {
        let rows: Result<Vec<String>, sqlx::Error> = match limit {
            Some(n) => {
                sqlx::query_scalar(
                    "SELECT message FROM logs ORDER BY ts DESC, rowid DESC LIMIT ?",
                )
                .bind(i64::try_from(n).unwrap_or(i64::MAX))
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_scalar("SELECT message FROM logs ORDER BY ts ASC, rowid ASC")
                    .fetch_all(&self.pool)
                    .await
            }
        };
        rows.map_err(StoreError::query)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let c: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM logs")
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::query)?;
        Ok(c as u64)
    }
}
