//! Configuration structures and loading.

use crate::error::{ConfigError, ConfigResult};
use crate::paths::AppPaths;
use faqsync_core::SourceSpec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default export endpoint for hosted documents.
pub const DEFAULT_URL_TEMPLATE: &str = "https://docs.google.com/document/d/{id}/export?format=docx";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub styles: StyleConfig,

    #[serde(default = "default_sources")]
    pub sources: Vec<SourceSpec>,
}

impl Config {
    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default_with_sources());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Default settings plus the bundled course list.
    pub fn default_with_sources() -> Self {
        Self {
            sources: default_sources(),
            ..Self::default()
        }
    }

    /// Create a default config file with comments.
    pub fn create_default_file(path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Self::default_config_string())?;
        Ok(())
    }

    /// Generate a default config file with helpful comments.
    pub fn default_config_string() -> String {
        r#"# faqsync Configuration
# Turns heading-structured FAQ documents into question/answer records.

[storage]
# SQLite database holding the latest run
# database = "~/.local/share/faqsync/faqsync.db"

[fetch]
# Export URL for bare document ids; {id} is replaced with the locator
url_template = "https://docs.google.com/document/d/{id}/export?format=docx"

# Request timeout in seconds (0 = wait forever)
timeout_seconds = 120

user_agent = "faqsync"

[styles]
# Paragraph style that starts a new section
section = "Heading 1"

# Paragraph style that starts a new question
question = "Heading 2"

# Sources are processed in the order listed here.
# A locator is a document id, an http(s) URL, or a path to a .docx file.
[[sources]]
id = "data-engineering-zoomcamp"
locator = "19bnYs80DwuUimHM65UV3sylsCn2j1vziPOwzBwQrebw"

[[sources]]
id = "machine-learning-zoomcamp"
locator = "1LpPanc33QJJ6BSsyxVg-pWNMplal84TdZtq10naIhD8"

[[sources]]
id = "mlops-zoomcamp"
locator = "12TlBfhIiKtyBv8RnsoJR6F72bkPDGEvPOItJIxaEzE0"
"#
        .to_string()
    }

    /// Check the settings that would otherwise fail halfway through a run.
    pub fn validate(&self) -> ConfigResult<()> {
        let mut seen = HashSet::new();
        for source in &self.sources {
            if source.id.trim().is_empty() {
                return Err(ConfigError::Invalid("source with empty id".to_string()));
            }
            if source.locator.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "source '{}' has an empty locator",
                    source.id
                )));
            }
            if !seen.insert(source.id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate source id '{}'",
                    source.id
                )));
            }
        }

        if !self.fetch.url_template.contains("{id}") {
            return Err(ConfigError::Invalid(
                "fetch.url_template must contain {id}".to_string(),
            ));
        }

        if style_key(&self.styles.section) == style_key(&self.styles.question) {
            return Err(ConfigError::Invalid(format!(
                "section and question styles are both '{}'",
                self.styles.section
            )));
        }

        Ok(())
    }

    /// Sources restricted to the given ids, keeping configured order.
    pub fn select_sources(&self, ids: &[String]) -> ConfigResult<Vec<SourceSpec>> {
        if ids.is_empty() {
            return Ok(self.sources.clone());
        }

        for id in ids {
            if !self.sources.iter().any(|s| &s.id == id) {
                return Err(ConfigError::Invalid(format!("unknown source '{}'", id)));
            }
        }

        Ok(self
            .sources
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect())
    }

    /// Resolve the database file, falling back to the platform data dir.
    pub fn database_path(&self, paths: &AppPaths) -> PathBuf {
        self.storage
            .database
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| paths.database_file.clone())
    }
}

/// Lowercased style name with whitespace removed, so `Heading1` and
/// `heading 1` compare equal.
pub fn style_key(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn default_sources() -> Vec<SourceSpec> {
    vec![
        SourceSpec::new(
            "data-engineering-zoomcamp",
            "19bnYs80DwuUimHM65UV3sylsCn2j1vziPOwzBwQrebw",
        ),
        SourceSpec::new(
            "machine-learning-zoomcamp",
            "1LpPanc33QJJ6BSsyxVg-pWNMplal84TdZtq10naIhD8",
        ),
        SourceSpec::new(
            "mlops-zoomcamp",
            "12TlBfhIiKtyBv8RnsoJR6F72bkPDGEvPOItJIxaEzE0",
        ),
    ]
}

/// Record store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub database: Option<String>,
}

/// Document download settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub url_template: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            timeout_seconds: 120,
            user_agent: "faqsync".to_string(),
        }
    }
}

/// Paragraph style names that mark structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub section: String,
    pub question: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            section: "Heading 1".to_string(),
            question: "Heading 2".to_string(),
        }
    }
}
