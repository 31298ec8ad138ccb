//! SQLite-backed log store.
//!
//! Operations are queued in call order and admitted by a single dispatcher
//! task. Each admitted operation takes a worker from the pool and runs on a
//! blocking thread. A read/write gate keeps the queue order observable:
//! writes (`append`, `clear`, `flush`) run one at a time in submission
//! order, reads may overlap each other but never a write. So a `fetch_all`
//! issued after `clear()` always sees the cleared table, whether or not the
//! caller awaited the clear.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rusqlite::{params, Connection, OpenFlags};
use tokio::sync::{mpsc, oneshot, RwLock};
use tracing::{debug, info, warn};

use super::{FetchCallback, LogStore, Pending};
use crate::error::StoreError;
use crate::main_loop::MainLoopHandle;
use crate::pool::WorkerPool;
use crate::types::{LogEntry, MonotonicClock, StoreKind};

type Done = oneshot::Sender<Result<(), StoreError>>;

/// Durable log store persisted in a single SQLite table.
///
/// Must be opened inside a tokio runtime. `fetch_all` callbacks are posted
/// to the [`MainLoopHandle`] given at construction, never run on a worker.
#[derive(Debug)]
pub struct DatabaseLogStore {
    ops: mpsc::UnboundedSender<Op>,
    main_loop: MainLoopHandle,
    path: PathBuf,
}

enum Op {
    Append { message: String, done: Done },
    Clear { done: Done },
    Flush { done: Done },
    Query { on_complete: FetchCallback },
}

impl Op {
    fn is_write(&self) -> bool {
        !matches!(self, Op::Query { .. })
    }

    fn name(&self) -> &'static str {
        match self {
            Op::Append { .. } => "append",
            Op::Clear { .. } => "clear",
            Op::Flush { .. } => "flush",
            Op::Query { .. } => "fetch_all",
        }
    }

    fn execute(self, conn: &Mutex<Connection>, clock: &MonotonicClock, main_loop: &MainLoopHandle) {
        let name = self.name();
        match self {
            Op::Append { message, done } => {
                // Writes run one at a time in admission order, so stamping
                // here keeps rowid order and timestamp order in agreement.
                let entry = LogEntry::at(message, clock.now());
                let res = insert(&conn.lock().expect("lock poisoned"), &entry);
                complete(name, done, res);
            }
            Op::Clear { done } => {
                let res = delete_all(&conn.lock().expect("lock poisoned"));
                complete(name, done, res);
            }
            Op::Flush { done } => complete(name, done, Ok(())),
            Op::Query { on_complete } => {
                let res = query_all(&conn.lock().expect("lock poisoned"));
                match &res {
                    Ok(entries) => debug!(count = entries.len(), "fetched entries"),
                    Err(e) => warn!(error = %e, "fetch_all failed"),
                }
                main_loop.post(Box::new(move || on_complete(res)));
            }
        }
    }

    /// Complete the operation with `err` without touching the database.
    fn fail(self, err: StoreError, main_loop: &MainLoopHandle) {
        let name = self.name();
        match self {
            Op::Append { done, .. } | Op::Clear { done } | Op::Flush { done } => {
                complete(name, done, Err(err))
            }
            Op::Query { on_complete } => main_loop.post(Box::new(move || on_complete(Err(err)))),
        }
    }
}

fn complete(op: &'static str, done: Done, res: Result<(), StoreError>) {
    if let Err(Err(e)) = done.send(res) {
        warn!(op, error = %e, "log store write failed with no observer");
    }
}

impl DatabaseLogStore {
    /// Open (creating if needed) the database at `path` with a pool of
    /// `workers` blocking workers.
    pub fn open(
        path: impl Into<PathBuf>,
        workers: usize,
        main_loop: MainLoopHandle,
    ) -> Result<Self, StoreError> {
        let path = path.into();
        let pool = WorkerPool::new(workers)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )?;
        configure_connection(&conn)?;
        init_schema(&conn)?;

        let (tx, rx) = mpsc::unbounded_channel();
        pool.spawn(dispatch(
            rx,
            Arc::new(Mutex::new(conn)),
            pool.clone(),
            main_loop.clone(),
        ));

        info!(path = %path.display(), workers = pool.size(), "opened durable log store");

        Ok(Self {
            ops: tx,
            main_loop,
            path,
        })
    }

    /// Location of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn submit(&self, op: Op) {
        if let Err(mpsc::error::SendError(op)) = self.ops.send(op) {
            op.fail(StoreError::Closed, &self.main_loop);
        }
    }

    fn submit_write(&self, make: impl FnOnce(Done) -> Op) -> Pending<()> {
        let (done, pending) = Pending::channel();
        self.submit(make(done));
        pending
    }
}

impl LogStore for DatabaseLogStore {
    fn append(&self, message: &str) -> Pending<()> {
        let message = message.to_string();
        self.submit_write(|done| Op::Append { message, done })
    }

    fn fetch_all(&self, on_complete: FetchCallback) {
        self.submit(Op::Query { on_complete });
    }

    fn clear(&self) -> Pending<()> {
        self.submit_write(|done| Op::Clear { done })
    }

    fn flush(&self) -> Pending<()> {
        self.submit_write(|done| Op::Flush { done })
    }

    fn kind(&self) -> StoreKind {
        StoreKind::Durable
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

async fn dispatch(
    mut ops: mpsc::UnboundedReceiver<Op>,
    conn: Arc<Mutex<Connection>>,
    pool: WorkerPool,
    main_loop: MainLoopHandle,
) {
    let gate = Arc::new(RwLock::new(()));
    let clock = Arc::new(MonotonicClock::new());

    while let Some(op) = ops.recv().await {
        let permit = match pool.acquire().await {
            Ok(permit) => permit,
            Err(e) => {
                op.fail(e, &main_loop);
                continue;
            }
        };

        let guard: Box<dyn Send> = if op.is_write() {
            Box::new(gate.clone().write_owned().await)
        } else {
            Box::new(gate.clone().read_owned().await)
        };

        let conn = conn.clone();
        let clock = clock.clone();
        let main_loop = main_loop.clone();
        let job = permit.run(move || {
            let _guard = guard;
            op.execute(&conn, &clock, &main_loop);
        });
        // Results travel through the op's own channel; this only reports panics.
        pool.spawn(async move {
            if let Err(e) = job.await {
                warn!(error = %StoreError::from(e), "log store operation aborted");
            }
        });
    }

    debug!("log store dispatcher stopped");
}

// ---------------------------------------------------------------------------
// SQL
// ---------------------------------------------------------------------------

fn configure_connection(conn: &Connection) -> Result<(), StoreError> {
    conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    Ok(())
}

fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS logs (
            message   TEXT    NOT NULL,
            timestamp INTEGER NOT NULL
        )",
        [],
    )?;
    Ok(())
}

fn insert(conn: &Connection, entry: &LogEntry) -> Result<(), StoreError> {
    conn.prepare_cached("INSERT INTO logs (message, timestamp) VALUES (?1, ?2)")?
        .execute(params![entry.message, entry.created_at_millis()])?;
    Ok(())
}

fn delete_all(conn: &Connection) -> Result<(), StoreError> {
    let removed = conn.execute("DELETE FROM logs", [])?;
    debug!(removed, "cleared durable entries");
    Ok(())
}

fn query_all(conn: &Connection) -> Result<Vec<LogEntry>, StoreError> {
    let mut stmt = conn.prepare_cached("SELECT message, timestamp FROM logs ORDER BY rowid DESC")?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?;

    let mut entries = Vec::new();
    for row in rows {
        let (message, millis) = row?;
        entries.push(LogEntry::from_millis(message, millis).ok_or(StoreError::InvalidTimestamp(millis))?);
    }
    Ok(entries)
}
