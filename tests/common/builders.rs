//! Test builders: ready-to-use stores of either kind plus their main loop.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on setup failure rather than returning `Result`.

use std::path::Path;
use std::sync::Arc;

use logbook_core::config::StoreConfig;
use logbook_core::store::{self, snapshot};
use logbook_core::{LogEntry, LogStore, MainLoop, StoreKind};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// TestStore
// ---------------------------------------------------------------------------

/// A store, the main loop its callbacks are delivered on, and (for durable
/// stores) the temp directory holding the database.
///
/// Durable stores must be built inside a tokio runtime.
///
/// # Example
///
/// ```rust
/// let mut t = TestStore::new(StoreKind::Durable);
/// t.store.append("A").await.unwrap();
/// assert_eq!(t.messages().await, vec!["A"]);
/// ```
pub struct TestStore {
    pub store: Arc<dyn LogStore>,
    pub main_loop: MainLoop,
    dir: Option<TempDir>,
}

impl TestStore {
    pub fn new(kind: StoreKind) -> Self {
        match kind {
            StoreKind::Durable => {
                let dir = tempfile::tempdir().expect("create temp dir");
                let path = dir.path().join("logging.db");
                let mut t = Self::at_path(kind, &path);
                t.dir = Some(dir);
                t
            }
            StoreKind::Volatile => Self::at_path(kind, Path::new("unused.db")),
        }
    }

    /// Open a store whose database lives at `path` (ignored for volatile).
    pub fn at_path(kind: StoreKind, path: &Path) -> Self {
        let main_loop = MainLoop::new();
        let config = StoreConfig {
            backend: kind,
            path: path.to_path_buf(),
            workers: 4,
        };
        let store = store::open(&config, main_loop.handle()).expect("open store");
        Self {
            store,
            main_loop,
            dir: None,
        }
    }

    /// Fetch a snapshot, pumping the main loop until it arrives.
    pub async fn fetch(&mut self) -> Vec<LogEntry> {
        snapshot(self.store.as_ref(), &mut self.main_loop)
            .await
            .expect("fetch_all succeeds")
    }

    /// Fetch a snapshot and keep only the messages.
    pub async fn messages(&mut self) -> Vec<String> {
        self.fetch().await.into_iter().map(|e| e.message).collect()
    }
}

// ---------------------------------------------------------------------------
// Runtime helper
// ---------------------------------------------------------------------------

/// Run `f` to completion on a fresh current-thread runtime. For tests that
/// are not themselves async (proptest bodies).
pub fn block_on<F: std::future::Future>(f: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("build runtime")
        .block_on(f)
}
