//! Domain-specific assertion macros for logbook harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* store invariant was violated.

/// Assert that a snapshot is ordered newest first: every timestamp is `>=`
/// the one after it.
///
/// ```rust
/// assert_newest_first!(entries);
/// ```
#[macro_export]
macro_rules! assert_newest_first {
    ($entries:expr) => {{
        let entries: &[logbook_core::LogEntry] = &$entries;
        for (i, pair) in entries.windows(2).enumerate() {
            if pair[0].created_at < pair[1].created_at {
                panic!(
                    "assert_newest_first! failed at index {}:\n  [{}] {:?} @ {}\n  [{}] {:?} @ {}",
                    i,
                    i,
                    pair[0].message,
                    pair[0].created_at_millis(),
                    i + 1,
                    pair[1].message,
                    pair[1].created_at_millis(),
                );
            }
        }
    }};
}

/// Assert that a snapshot holds exactly `expected` messages, in order.
///
/// ```rust
/// assert_messages!(entries, ["B", "A"]);
/// ```
#[macro_export]
macro_rules! assert_messages {
    ($entries:expr, $expected:expr) => {{
        let entries: &[logbook_core::LogEntry] = &$entries;
        let actual: Vec<&str> = entries.iter().map(|e| e.message.as_str()).collect();
        let expected: Vec<&str> = $expected.iter().map(|s| AsRef::<str>::as_ref(s)).collect();
        pretty_assertions::assert_eq!(actual, expected, "snapshot messages differ");
    }};
}

/// Assert that no message appears more than once in a snapshot.
pub fn assert_no_duplicates(entries: &[logbook_core::LogEntry]) {
    let mut seen = std::collections::HashSet::new();
    for entry in entries {
        assert!(
            seen.insert(entry.message.as_str()),
            "duplicate entry in snapshot: {:?}",
            entry.message
        );
    }
}
