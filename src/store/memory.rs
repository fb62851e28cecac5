//! In-memory log store.
//!
//! Mirrors the SQLite store's semantics (shared batch timestamp,
//! all-or-nothing batches, ordering rules) without a database. It also counts
//! calls per operation and can be told to fail, which is what the HTTP tests
//! rely on.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::trace;

use super::{Clock, IdGenerator, LogStore, StoreError, SystemClock};
use crate::models::log::log_entry::LogEntry;

#[derive(Debug, Default)]
pub struct CallCounts {
    append: AtomicUsize,
    find: AtomicUsize,
    count: AtomicUsize,
}

impl CallCounts {
    pub fn append(&self) -> usize {
        self.append.load(Ordering::SeqCst)
    }

    pub fn find(&self) -> usize {
        self.find.load(Ordering::SeqCst)
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.append() + self.find() + self.count()
    }
}

pub struct MemoryLogStore {
    entries: Mutex<Vec<LogEntry>>,
    ids: IdGenerator,
    clock: Arc<dyn Clock>,
    calls: CallCounts,
    fail_with: Mutex<Option<String>>,
}

impl Default for MemoryLogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            ids: IdGenerator::new(),
            clock,
            calls: CallCounts::default(),
            fail_with: Mutex::new(None),
        }
    }

    /// Make every following operation fail with `message`, or stop failing
    /// with `None`.
    pub fn fail_with(&self, message: Option<&str>) {
        *self.fail_with.lock().unwrap_or_else(|e| e.into_inner()) = message.map(str::to_string);
    }

    pub fn calls(&self) -> &CallCounts {
        &self.calls
    }

    /// Snapshot of stored rows in insertion order.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn injected_failure(&self) -> Option<String> {
        self.fail_with
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl LogStore for MemoryLogStore {
    async fn append(&self, messages: &[String]) -> Result<(), StoreError> {
        self.calls.append.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = self.injected_failure() {
            return Err(StoreError::Transaction(msg));
        }
        if messages.is_empty() {
            return Ok(());
        }
        let ts = self.clock.now();
        let batch = messages.iter().map(|message| LogEntry {
            id: self.ids.next_id(),
            ts,
            message: message.clone(),
        });
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend(batch);
        trace!(rows = messages.len(), "appended batch in memory");
        Ok(())
    }

    async fn find(&self, limit: Option<u64>) -> Result<Vec<String>, StoreError> {
        self.calls.find.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = self.injected_failure() {
            return Err(StoreError::Query(msg));
        }
        let mut rows = self.entries();
        // Stable sort keeps insertion order between equal timestamps.
        rows.sort_by_key(|r| r.ts);
        let out = match limit {
            Some(n) => rows
                .into_iter()
                .rev()
                .take(usize::try_from(n).unwrap_or(usize::MAX))
                .map(|r| r.message)
                .collect(),
            None => rows.into_iter().map(|r| r.message).collect(),
        };
        Ok(out)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.calls.count.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = self.injected_failure() {
            return Err(StoreError::Query(msg));
        }
        Ok(self.entries.lock().unwrap_or_else(|e| e.into_inner()).len() as u64)
    }
}
