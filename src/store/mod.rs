//! Log storage: the write, read and count paths.
//!
//! [`LogStore`] is the capability the HTTP layer depends on. Two variants
//! implement it:
//!
//! - [`SqliteLogStore`]: the real store, one row per message in SQLite
//! - [`MemoryLogStore`]: an in-process substitute that records calls and can
//!   be told to fail, for tests
//!
//! The variant is picked when [`AppState`](crate::app::AppState) is built.

use async_trait::async_trait;

pub mod clock;
pub mod error;
pub mod id;
pub mod memory;
pub mod sqlite;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::StoreError;
pub use id::IdGenerator;
pub use memory::MemoryLogStore;
pub use sqlite::SqliteLogStore;

#[async_trait]
pub trait LogStore: Send + Sync {
    /// Persist `messages` as one batch.
    ///
    /// Every row of the batch shares one timestamp and gets its own id.
    /// Either all rows are committed or none are. An empty batch is a no-op.
    async fn append(&self, messages: &[String]) -> Result<(), StoreError>;

    /// Fetch stored messages.
    ///
    /// With `Some(n)`: at most `n` messages, newest first.
    /// With `None`: every message, oldest first.
    async fn find(&self, limit: Option<u64>) -> Result<Vec<String>, StoreError>;

    /// Number of stored rows.
    async fn count(&self) -> Result<u64, StoreError>;

    /// Fetch stored messages using a limit as received on the wire.
    ///
    /// An empty `limit` means no limit. Anything that is not a non-negative
    /// integer fails with [`StoreError::InvalidArgument`] without reaching
    /// storage.
    async fn query(&self, limit: &str) -> Result<Vec<String>, StoreError> {
        let limit = parse_limit(limit)?;
        self.find(limit).await
    }
}

/// Parse a textual read limit. Empty input means "no limit".
pub fn parse_limit(raw: &str) -> Result<Option<u64>, StoreError> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u64>()
        .map(Some)
        .map_err(|e| StoreError::InvalidArgument(format!("{raw:?}: {e}")))
}
