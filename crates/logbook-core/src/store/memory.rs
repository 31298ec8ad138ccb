//! In-memory log store backend.

use std::collections::VecDeque;
use std::sync::Mutex;

use tracing::debug;

use super::{FetchCallback, LogStore, Pending};
use crate::types::{LogEntry, MonotonicClock, StoreKind};

/// Volatile log store backed by a `Mutex<VecDeque>`.
///
/// Every operation completes before it returns, and `fetch_all` calls its
/// callback inline. Entries live as long as the store does.
#[derive(Debug, Default)]
pub struct MemoryLogStore {
    logs: Mutex<VecDeque<LogEntry>>,
    clock: MonotonicClock,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.logs.lock().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn snapshot(&self) -> Vec<LogEntry> {
        self.logs.lock().expect("lock poisoned").iter().cloned().collect()
    }
}

impl LogStore for MemoryLogStore {
    fn append(&self, message: &str) -> Pending<()> {
        let mut logs = self.logs.lock().expect("lock poisoned");
        // Stamp under the lock so list order and timestamp order agree.
        logs.push_front(LogEntry::at(message, self.clock.now()));
        debug!(len = logs.len(), "appended entry in memory");
        Pending::ready(Ok(()))
    }

    fn fetch_all(&self, on_complete: FetchCallback) {
        let entries = self.snapshot();
        on_complete(Ok(entries));
    }

    fn clear(&self) -> Pending<()> {
        self.logs.lock().expect("lock poisoned").clear();
        debug!("cleared in-memory entries");
        Pending::ready(Ok(()))
    }

    fn flush(&self) -> Pending<()> {
        Pending::ready(Ok(()))
    }

    fn kind(&self) -> StoreKind {
        StoreKind::Volatile
    }
}
