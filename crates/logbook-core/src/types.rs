//! Core types for logbook-core.
//!
//! This module defines the record every store hands out, [`LogEntry`], the
//! [`StoreKind`] discriminant used to pick a backend, and the
//! [`MonotonicClock`] that stamps new entries.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One immutable, timestamped message.
///
/// Timestamps carry millisecond precision regardless of which store produced
/// the entry, so snapshots from either backend compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// The logged message text.
    pub message: String,
    /// Wall-clock time at which the entry was appended (UTC).
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl LogEntry {
    /// Build an entry stamped with an explicit time, truncated to milliseconds.
    pub fn at(message: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        let millis = created_at.timestamp_millis();
        Self {
            message: message.into(),
            created_at: DateTime::from_timestamp_millis(millis).unwrap_or(created_at),
        }
    }

    /// Rebuild an entry from its stored millisecond timestamp.
    ///
    /// Returns `None` when `millis` is outside the range chrono can represent.
    pub fn from_millis(message: impl Into<String>, millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(|created_at| Self {
            message: message.into(),
            created_at,
        })
    }

    /// Milliseconds since the Unix epoch.
    pub fn created_at_millis(&self) -> i64 {
        self.created_at.timestamp_millis()
    }

    /// Render as `"{message}\n\t{timestamp}"` in the local time zone.
    pub fn render(&self, timestamp_format: &str) -> String {
        self.render_in(timestamp_format, &chrono::Local)
    }

    /// Render as `"{message}\n\t{timestamp}"` in the given time zone.
    pub fn render_in<Tz>(&self, timestamp_format: &str, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        format!(
            "{}\n\t{}",
            self.message,
            self.created_at.with_timezone(tz).format(timestamp_format)
        )
    }
}

/// Which storage strategy backs a [`LogStore`](crate::store::LogStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// SQLite file, survives restarts.
    #[serde(alias = "database")]
    Durable,
    /// In-process list, gone when the store is dropped.
    #[serde(alias = "memory")]
    Volatile,
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreKind::Durable => write!(f, "durable"),
            StoreKind::Volatile => write!(f, "volatile"),
        }
    }
}

/// Returned when a string names no [`StoreKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown store kind {0:?} (expected durable, volatile, database or memory)")]
pub struct ParseStoreKindError(pub String);

impl std::str::FromStr for StoreKind {
    type Err = ParseStoreKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "durable" | "database" | "db" => Ok(StoreKind::Durable),
            "volatile" | "memory" | "mem" => Ok(StoreKind::Volatile),
            _ => Err(ParseStoreKindError(s.to_string())),
        }
    }
}

/// Millisecond clock that never runs backwards.
///
/// Each store owns one, so a single writer always sees non-decreasing
/// timestamps even if the system clock is stepped back.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last_millis: AtomicI64,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current wall-clock time, clamped to be `>=` every earlier stamp.
    pub fn now(&self) -> DateTime<Utc> {
        self.stamp(Utc::now().timestamp_millis())
    }

    fn stamp(&self, wall_millis: i64) -> DateTime<Utc> {
        let prev = self.last_millis.fetch_max(wall_millis, Ordering::AcqRel);
        let millis = prev.max(wall_millis);
        DateTime::from_timestamp_millis(millis).unwrap_or_else(Utc::now)
    }
}
