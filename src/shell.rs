//! Interactive shell: a buttons screen and a logs screen over one store.
//!
//! The shell starts on [`Screen::Buttons`]. Pressing a button appends a log
//! without waiting for it to land; opening [`Screen::Logs`] fetches every
//! entry and prints it. `back` walks the [`Navigator`] stack and leaving the
//! last screen exits. Queued writes are flushed before [`Shell::run`] returns.

use std::io::Write;

use logbook_core::store::snapshot;
use logbook_core::{LogStore, MainLoop};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::app::write_entries;
use crate::commands::{button_message, Command, HELP};
use crate::navigator::{Navigator, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct Shell<'a, W: Write> {
    store: &'a dyn LogStore,
    main_loop: &'a mut MainLoop,
    timestamp_format: &'a str,
    out: W,
    navigator: Navigator,
}

impl<'a, W: Write> Shell<'a, W> {
    pub fn new(
        store: &'a dyn LogStore,
        main_loop: &'a mut MainLoop,
        timestamp_format: &'a str,
        out: W,
    ) -> Self {
        Self {
            store,
            main_loop,
            timestamp_format,
            out,
            navigator: Navigator::new(),
        }
    }

    /// Read commands from `input` until `quit`, end of input, or `back` past
    /// the first screen.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> anyhow::Result<()> {
        self.navigator.navigate_to(Screen::Buttons);
        self.show(Screen::Buttons).await?;

        let mut lines = input.lines();
        loop {
            self.main_loop.run_pending();
            self.prompt()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(self.out)?;
                break;
            };

            match Command::parse(&line) {
                Ok(cmd) => {
                    if self.execute(cmd).await? == Flow::Exit {
                        break;
                    }
                }
                Err(msg) if msg.is_empty() => {}
                Err(msg) => writeln!(self.out, "{msg}")?,
            }
        }

        self.store.flush().await?;
        tracing::debug!("shell exited");
        Ok(())
    }

    async fn execute(&mut self, cmd: Command) -> anyhow::Result<Flow> {
        let screen = self.navigator.current().unwrap_or(Screen::Buttons);
        match cmd {
            Command::Quit => return Ok(Flow::Exit),
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Back => match self.navigator.back() {
                Some(previous) => self.show(previous).await?,
                None => return Ok(Flow::Exit),
            },
            Command::Logs => {
                if screen != Screen::Logs {
                    self.navigator.navigate_to(Screen::Logs);
                }
                self.show(Screen::Logs).await?;
            }
            Command::Press(_) | Command::Clear if screen != Screen::Buttons => {
                writeln!(self.out, "not on the buttons screen (type `back`)")?;
            }
            Command::Press(n) => {
                self.store.append(&button_message(n)).detach();
                writeln!(self.out, "recorded button {n}")?;
            }
            Command::Clear => {
                self.store.clear().detach();
                writeln!(self.out, "logs deleted")?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Print `screen`. The logs screen re-reads the store every time it is shown.
    async fn show(&mut self, screen: Screen) -> anyhow::Result<()> {
        match screen {
            Screen::Buttons => {
                writeln!(self.out, "== buttons ==")?;
                writeln!(self.out, "[1] [2] [3]   logs   clear   help")?;
            }
            Screen::Logs => {
                writeln!(self.out, "== logs ==")?;
                let entries = snapshot(self.store, self.main_loop).await?;
                write_entries(&mut self.out, &entries, self.timestamp_format)?;
            }
        }
        Ok(())
    }

    fn prompt(&mut self) -> std::io::Result<()> {
        let screen = self.navigator.current().unwrap_or(Screen::Buttons);
        write!(self.out, "{screen}> ")?;
        self.out.flush()
    }
}
