//! Screen back stack for the interactive shell.

/// The two screens of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Record interactions and clear the log.
    Buttons,
    /// List every log, newest first.
    Logs,
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Screen::Buttons => write!(f, "buttons"),
            Screen::Logs => write!(f, "logs"),
        }
    }
}

/// Stack of visited screens. Every navigation pushes; `back` pops.
#[derive(Debug, Default)]
pub struct Navigator {
    stack: Vec<Screen>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigate_to(&mut self, screen: Screen) {
        tracing::debug!(%screen, depth = self.stack.len() + 1, "navigate");
        self.stack.push(screen);
    }

    /// Pop the current screen and return the one underneath, if any.
    /// `None` means the stack is empty and the shell should exit.
    pub fn back(&mut self) -> Option<Screen> {
        self.stack.pop();
        self.current()
    }

    pub fn current(&self) -> Option<Screen> {
        self.stack.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
