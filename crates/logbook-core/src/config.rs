//! Configuration types for logbook.
//!
//! [`Config::load`] reads `~/.config/logbook/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::types::StoreKind;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[store]
backend = "durable"
path    = "logging.db"
workers = 4

[ui]
timestamp_format = "%-d %b %Y %H:%M:%S"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/logbook/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[store]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_backend")]
    pub backend: StoreKind,
    /// Database file. Relative paths resolve under the data directory.
    #[serde(default = "default_path")]
    pub path: PathBuf,
    /// Size of the worker pool that runs durable operations.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_backend() -> StoreKind { StoreKind::Durable }
fn default_path() -> PathBuf { PathBuf::from("logging.db") }
fn default_workers() -> usize { 4 }

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_path(),
            workers: default_workers(),
        }
    }
}

impl StoreConfig {
    /// Absolute location of the database file.
    pub fn database_path(&self) -> PathBuf {
        resolve_under(&data_dir(), &self.path)
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

fn default_timestamp_format() -> String { "%-d %b %Y %H:%M:%S".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/logbook/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path())
    }

    /// Same as [`Config::load`] but for an explicit file.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, DEFAULT_CONFIG.trim_start())?;
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config")
        .join("logbook")
        .join("config.toml")
}

fn data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", ".local/share").join("logbook")
}

fn xdg_dir(var: &str, home_fallback: &str) -> PathBuf {
    std::env::var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(home_fallback)
        })
}

fn resolve_under(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.store.backend, StoreKind::Durable);
        assert_eq!(cfg.store.path, PathBuf::from("logging.db"));
        assert_eq!(cfg.store.workers, 4);
        assert_eq!(cfg.ui.timestamp_format, "%-d %b %Y %H:%M:%S");
    }

    #[test]
    fn load_from_creates_file_and_layers_user_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.store.backend, StoreKind::Durable);

        std::fs::write(&path, "[store]\nbackend = \"memory\"\nworkers = 2\n").unwrap();
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.store.backend, StoreKind::Volatile);
        assert_eq!(cfg.store.workers, 2);
        assert_eq!(cfg.store.path, PathBuf::from("logging.db"));
        assert_eq!(cfg.ui.timestamp_format, "%-d %b %Y %H:%M:%S");
    }

    #[test]
    fn absolute_paths_are_kept() {
        let base = Path::new("/data/logbook");
        assert_eq!(
            resolve_under(base, Path::new("/tmp/x.db")),
            PathBuf::from("/tmp/x.db")
        );
        assert_eq!(
            resolve_under(base, Path::new("logging.db")),
            PathBuf::from("/data/logbook/logging.db")
        );
    }
}
