//! logbook-core: the log store behind logbook.
//!
//! This crate exposes the store contract and its two backends, plus the
//! pieces they are built from.
//!
//! # Architecture
//!
//! ```text
//!  caller ──append/clear──► LogStore ──► MemoryLogStore   (inline)
//!    ▲                         │
//!    │                         └───────► DatabaseLogStore ──► WorkerPool ──► SQLite
//!    │                                                            │
//!    └──────── MainLoop ◄──────── fetch_all callback ◄─────────────┘
//! ```
//!
//! Fetch results from the durable store are posted to the caller's
//! [`MainLoop`](main_loop::MainLoop) instead of running on a worker.

pub mod config;
pub mod error;
pub mod main_loop;
pub mod pool;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use main_loop::{MainLoop, MainLoopHandle};
pub use store::{DatabaseLogStore, FetchCallback, FetchResult, LogStore, MemoryLogStore, Pending};
pub use types::{LogEntry, MonotonicClock, ParseStoreKindError, StoreKind};
