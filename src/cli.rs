//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use logbook_core::config::Config;
use logbook_core::StoreKind;

#[derive(Debug, Parser)]
#[command(name = "logbook", about = "Timestamped message log")]
pub struct Cli {
    /// Write debug logs to /tmp/logbook-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    pub debug: bool,

    /// Storage backend: durable (SQLite) or volatile (memory). Overrides config.
    #[arg(long, value_name = "KIND", global = true)]
    pub store: Option<StoreKind>,

    /// Database file for the durable store, relative to the working directory. Overrides config.
    #[arg(long, value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    /// Config file to use instead of ~/.config/logbook/config.toml.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CliCommand {
    /// Append a message and wait for it to be stored.
    Add { message: String },
    /// Record an interaction with button 1, 2 or 3.
    Press {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=3))]
        button: u8,
    },
    /// Print every log, newest first.
    Logs {
        /// One JSON object per line instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Delete every log.
    Clear,
    /// Interactive two-screen shell reading commands from stdin.
    Shell,
}

impl Cli {
    /// Load the config file and apply command-line overrides on top.
    pub fn settings(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        if let Some(kind) = self.store {
            config.store.backend = kind;
        }
        // A path typed on the command line is relative to where it was typed.
        if let Some(db) = &self.db {
            config.store.path = if db.is_absolute() {
                db.clone()
            } else {
                std::env::current_dir()?.join(db)
            };
        }
        Ok(config)
    }
}
