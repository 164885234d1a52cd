//! CLI command implementations.

pub mod config;
pub mod export;
pub mod init;
pub mod parse;
pub mod run;
pub mod runs;
pub mod search;
pub mod show;
pub mod stats;

use anyhow::{Context as _, Result};
use faqsync_config::{AppPaths, Config};
use faqsync_db::{Database, MEMORY_URI};
use std::path::PathBuf;

/// Global options shared by every command.
pub struct Context {
    config_override: Option<PathBuf>,
    database_override: Option<String>,
}

impl Context {
    pub fn new(config: Option<PathBuf>, database: Option<String>) -> Self {
        Self {
            config_override: config,
            database_override: database,
        }
    }

    pub fn paths(&self) -> Result<AppPaths> {
        AppPaths::new().context("Failed to determine application directories")
    }

    /// The config file in effect.
    pub fn config_file(&self) -> Result<PathBuf> {
        match &self.config_override {
            Some(path) => Ok(path.clone()),
            None => Ok(self.paths()?.config_file),
        }
    }

    /// Load configuration; a missing file yields the built-in defaults.
    pub fn load_config(&self) -> Result<Config> {
        let path = self.config_file()?;
        Config::load_from(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    /// Database location: the `--database` flag, then the config, then the
    /// platform data dir.
    pub fn database_uri(&self, config: &Config) -> Result<String> {
        if let Some(uri) = &self.database_override {
            return Ok(uri.clone());
        }
        let path = config.database_path(&self.paths()?);
        Ok(path.to_string_lossy().to_string())
    }

    pub fn open_database(&self, config: &Config) -> Result<Database> {
        let uri = self.database_uri(config)?;
        Database::connect(&uri).with_context(|| format!("Failed to open database at {}", uri))
    }

    /// File path of the database, if it lives on disk.
    pub fn database_file(&self, config: &Config) -> Result<Option<PathBuf>> {
        let uri = self.database_uri(config)?;
        if uri == MEMORY_URI {
            Ok(None)
        } else {
            Ok(Some(PathBuf::from(uri)))
        }
    }
}

/// Format a file size in human-readable form.
pub fn format_size(bytes: i64) -> String {
    const KB: i64 = 1024;
    const MB: i64 = KB * 1024;
    const GB: i64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Shorten `text` to at most `max` characters, adding an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= max {
        flat
    } else {
        let cut: String = flat.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("line one\nline two", 100), "line one line two");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
    }

    #[test]
    fn test_database_override() {
        let ctx = Context::new(None, Some(MEMORY_URI.to_string()));
        let config = Config::default_with_sources();
        assert_eq!(ctx.database_uri(&config).unwrap(), MEMORY_URI);
        assert!(ctx.database_file(&config).unwrap().is_none());
        assert!(ctx.open_database(&config).is_ok());
    }

    #[test]
    fn test_config_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faqsync.toml");
        let ctx = Context::new(Some(path.clone()), None);

        assert_eq!(ctx.config_file().unwrap(), path);
        // Missing file falls back to defaults.
        let config = ctx.load_config().unwrap();
        assert_eq!(config.sources.len(), 3);
    }
}
