//! Store: the newest-first log of [`LogEntry`] values and its two backends.
//!
//! - [`MemoryLogStore`] keeps entries in process memory and answers
//!   synchronously on the caller's context.
//! - [`DatabaseLogStore`] persists entries to SQLite and runs every operation
//!   on a fixed worker pool, delivering fetch results back through the
//!   caller's [`MainLoop`](crate::main_loop::MainLoop).
//!
//! Callers hold an `Arc<dyn LogStore>` and never need to know which one is
//! active. [`open`] picks the backend from configuration.

mod database;
mod memory;
mod pending;

use std::sync::Arc;

pub use database::DatabaseLogStore;
pub use memory::MemoryLogStore;
pub use pending::Pending;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::main_loop::{MainLoop, MainLoopHandle};
use crate::types::{LogEntry, StoreKind};
use tokio::sync::oneshot;

/// Result delivered to a [`LogStore::fetch_all`] callback.
pub type FetchResult = Result<Vec<LogEntry>, StoreError>;

/// Completion callback for [`LogStore::fetch_all`].
pub type FetchCallback = Box<dyn FnOnce(FetchResult) + Send + 'static>;

/// An append-only, newest-first log of short messages.
///
/// Writes return a [`Pending`] that can be awaited for the outcome or simply
/// dropped. `fetch_all` invokes its callback exactly once, on the caller's
/// context, after the full snapshot has been read.
pub trait LogStore: Send + Sync {
    /// Stamp `message` with the current time and insert it at the front.
    fn append(&self, message: &str) -> Pending<()>;

    /// Deliver every entry, newest first, to `on_complete`.
    fn fetch_all(&self, on_complete: FetchCallback);

    /// Remove every entry.
    fn clear(&self) -> Pending<()>;

    /// Resolves once every operation issued before it has completed.
    fn flush(&self) -> Pending<()>;

    fn kind(&self) -> StoreKind;
}

/// Open the backend named by `config`.
///
/// The durable backend must be opened from inside a tokio runtime; its
/// fetch callbacks are posted to `main_loop`.
pub fn open(config: &StoreConfig, main_loop: MainLoopHandle) -> Result<Arc<dyn LogStore>, StoreError> {
    let store: Arc<dyn LogStore> = match config.backend {
        StoreKind::Durable => Arc::new(DatabaseLogStore::open(
            config.database_path(),
            config.workers,
            main_loop,
        )?),
        StoreKind::Volatile => Arc::new(MemoryLogStore::new()),
    };
    tracing::debug!(kind = %store.kind(), "log store opened");
    Ok(store)
}

/// Issue `fetch_all` and pump `main_loop` until its callback has run.
///
/// The callback still executes on the loop owner's context; this only saves
/// callers from wiring a channel by hand.
pub async fn snapshot(store: &dyn LogStore, main_loop: &mut MainLoop) -> FetchResult {
    let (tx, rx) = oneshot::channel();
    store.fetch_all(Box::new(move |res| {
        let _ = tx.send(res);
    }));
    main_loop.run_until(rx).await.unwrap_or(Err(StoreError::Closed))
}
