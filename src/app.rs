//! One-shot command execution and entry output.

use std::io::Write;

use logbook_core::config::UiConfig;
use logbook_core::store::snapshot;
use logbook_core::{LogEntry, LogStore, MainLoop};
use tokio::io::AsyncBufRead;

use crate::cli::CliCommand;
use crate::commands::button_message;
use crate::shell::Shell;

/// Run `command` against `store`, writing any output to `out`.
///
/// Writes are awaited, so a one-shot invocation never exits with its
/// append or clear still queued. `input` is only read by the shell.
pub async fn execute<R, W>(
    command: CliCommand,
    store: &dyn LogStore,
    main_loop: &mut MainLoop,
    ui: &UiConfig,
    input: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    match command {
        CliCommand::Add { message } => store.append(&message).await?,
        CliCommand::Press { button } => store.append(&button_message(button)).await?,
        CliCommand::Logs { json } => {
            let entries = snapshot(store, main_loop).await?;
            if json {
                write_json(out, &entries)?;
            } else {
                write_entries(out, &entries, &ui.timestamp_format)?;
            }
        }
        CliCommand::Clear => store.clear().await?,
        CliCommand::Shell => {
            Shell::new(store, main_loop, &ui.timestamp_format, out)
                .run(input)
                .await?
        }
    }
    Ok(())
}

/// Text rendering: each entry as `"{message}\n\t{timestamp}"`, one per line.
pub fn write_entries<W: Write>(out: &mut W, entries: &[LogEntry], timestamp_format: &str) -> std::io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "No logs.");
    }
    for entry in entries {
        writeln!(out, "{}", entry.render(timestamp_format))?;
    }
    Ok(())
}

/// JSON lines rendering.
pub fn write_json<W: Write>(out: &mut W, entries: &[LogEntry]) -> anyhow::Result<()> {
    for entry in entries {
        serde_json::to_writer(&mut *out, entry)?;
        writeln!(out)?;
    }
    Ok(())
}
