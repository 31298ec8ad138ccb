//! Message corpora used across harnesses.

/// The three messages the buttons screen records.
pub const BUTTON_MESSAGES: &[&str] = &[
    "Interaction with 'Button 1'",
    "Interaction with 'Button 2'",
    "Interaction with 'Button 3'",
];

/// Messages with awkward content: quotes, SQL metacharacters, unicode,
/// embedded newlines, and the empty string.
pub const CORPUS_AWKWARD: &[&str] = &[
    "",
    "it's a 'quoted' \"message\"",
    "'); DROP TABLE logs; --",
    "naïve café — 日本語 🚀",
    "line one\nline two",
    "\ttabbed",
];

/// `n` distinct numbered messages in append order.
pub fn numbered(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("log line {i}")).collect()
}
