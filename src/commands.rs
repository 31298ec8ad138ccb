//! Shell commands.
//!
//! One command per input line. Button presses are bare digits so the shell
//! reads like a three-button screen.

/// A parsed, validated shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Record an interaction with button 1, 2 or 3
    Press(u8),
    // Open the logs screen (or refresh it if already there)
    Logs,
    // Delete every log
    Clear,
    // Pop the current screen; leaving the last one exits
    Back,
    Help,
    // Exit regardless of the back stack
    Quit,
}

/// Highest numbered button on the buttons screen.
pub const BUTTON_COUNT: u8 = 3;

impl Command {
    /// Parse a raw input line.
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// line returns `Err("")` as a sentinel meaning "ignore".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word.to_ascii_lowercase().as_str() {
            "press" => parse_button(rest).ok_or_else(|| "usage: press <1-3>".to_string()),
            "logs" | "all" | "l" => Ok(Command::Logs),
            "clear" | "delete" => Ok(Command::Clear),
            "back" | "b" => Ok(Command::Back),
            "help" | "?" | "h" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            other => parse_button(other).ok_or_else(|| format!("unknown command: {other}")),
        }
    }
}

fn parse_button(s: &str) -> Option<Command> {
    match s.parse::<u8>() {
        Ok(n) if (1..=BUTTON_COUNT).contains(&n) => Some(Command::Press(n)),
        _ => None,
    }
}

/// The message recorded when button `n` is pressed.
pub fn button_message(n: u8) -> String {
    format!("Interaction with 'Button {n}'")
}

pub const HELP: &str = "\
commands:
  1 | 2 | 3    record a button interaction
  logs         show every log, newest first
  clear        delete every log
  back         previous screen (exits from the first one)
  help         this text
  quit         exit";
