//! logbook: timestamped message log with durable and in-memory stores.
//!
//! The binary is a thin shell over [`logbook_core`]. This crate exposes its
//! front-end layers as public modules so integration tests can drive them
//! without spawning a process.
//!
//! # Architecture
//!
//! ```text
//! cli ──► app::execute ──► LogStore (logbook-core)
//!              │
//!              └──► shell ──► commands / navigator
//! ```

pub mod app;
pub mod cli;
pub mod commands;
pub mod navigator;
pub mod shell;

pub use logbook_core::{LogEntry, LogStore, StoreKind};
