//! Core domain types for faqsync.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Unique identifier for a source (e.g. one course's FAQ).
pub type SourceId = String;

/// Unique identifier for ingestion runs.
pub type RunId = String;

/// Generate a new unique ID.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Structural role of a paragraph, derived from its style.
///
/// Only the two heading labels drive the parser; `Body` and `Other` are both
/// treated as answer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleLabel {
    SectionHeading,
    QuestionHeading,
    Body,
    Other,
}

impl StyleLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleLabel::SectionHeading => "section_heading",
            StyleLabel::QuestionHeading => "question_heading",
            StyleLabel::Body => "body",
            StyleLabel::Other => "other",
        }
    }
}

impl std::fmt::Display for StyleLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single paragraph as produced by a document decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
    pub style: StyleLabel,
}

impl Paragraph {
    pub fn new(style: StyleLabel, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn section(text: impl Into<String>) -> Self {
        Self::new(StyleLabel::SectionHeading, text)
    }

    pub fn question(text: impl Into<String>) -> Self {
        Self::new(StyleLabel::QuestionHeading, text)
    }

    pub fn body(text: impl Into<String>) -> Self {
        Self::new(StyleLabel::Body, text)
    }
}

/// One question/answer entry extracted from a source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqRecord {
    pub text: String,
    pub section: String,
    pub question: String,
}

impl FaqRecord {
    pub fn new(
        section: impl Into<String>,
        question: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            section: section.into(),
            question: question.into(),
        }
    }
}

/// All records parsed from one source, plus where they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceBundle {
    pub source_id: SourceId,
    pub records: Vec<FaqRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl SourceBundle {
    pub fn new(source_id: impl Into<String>, records: Vec<FaqRecord>) -> Self {
        Self {
            source_id: source_id.into(),
            records,
            locator: None,
            content_hash: None,
            fetched_at: None,
        }
    }

    pub fn with_locator(mut self, locator: impl Into<String>) -> Self {
        self.locator = Some(locator.into());
        self
    }

    pub fn with_content_hash(mut self, hash: impl Into<String>) -> Self {
        self.content_hash = Some(hash.into());
        self
    }

    pub fn with_fetched_at(mut self, fetched_at: DateTime<Utc>) -> Self {
        self.fetched_at = Some(fetched_at);
        self
    }

    /// Distinct section names, in first-seen order.
    pub fn sections(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.section.as_str()) {
                seen.push(&record.section);
            }
        }
        seen
    }
}

/// The full output of one ingestion run, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Aggregate {
    pub bundles: Vec<SourceBundle>,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bundle: SourceBundle) {
        self.bundles.push(bundle);
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SourceBundle> {
        self.bundles.iter()
    }

    pub fn total_records(&self) -> usize {
        self.bundles.iter().map(|b| b.records.len()).sum()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<Vec<SourceBundle>> for Aggregate {
    fn from(bundles: Vec<SourceBundle>) -> Self {
        Self { bundles }
    }
}

impl<'a> IntoIterator for &'a Aggregate {
    type Item = &'a SourceBundle;
    type IntoIter = std::slice::Iter<'a, SourceBundle>;

    fn into_iter(self) -> Self::IntoIter {
        self.bundles.iter()
    }
}

/// One entry of the batch input: a source id and where to find its document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub id: SourceId,
    pub locator: String,
}

impl SourceSpec {
    pub fn new(id: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            locator: locator.into(),
        }
    }
}

/// Resolved form of a document locator string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// A fully qualified http(s) URL.
    Url(String),
    /// A `.docx` file on the local filesystem.
    File(PathBuf),
    /// A hosted document id, expanded through the export URL template.
    DocumentId(String),
}

impl Locator {
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::InvalidInput("empty document locator".to_string()));
        }

        if raw.starts_with("http://") || raw.starts_with("https://") {
            return Ok(Locator::Url(raw.to_string()));
        }

        if let Some(path) = raw.strip_prefix("file://") {
            if path.is_empty() {
                return Err(Error::InvalidInput(format!("missing path in locator: {}", raw)));
            }
            return Ok(Locator::File(PathBuf::from(path)));
        }

        if raw.to_lowercase().ends_with(".docx") {
            return Ok(Locator::File(PathBuf::from(raw)));
        }

        Ok(Locator::DocumentId(raw.to_string()))
    }

    /// Expand into a URL. File locators have none.
    pub fn to_url(&self, template: &str) -> Option<String> {
        match self {
            Locator::Url(url) => Some(url.clone()),
            Locator::DocumentId(id) => Some(template.replace("{id}", id)),
            Locator::File(_) => None,
        }
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locator::Url(url) => write!(f, "{}", url),
            Locator::File(path) => write!(f, "file://{}", path.display()),
            Locator::DocumentId(id) => write!(f, "{}", id),
        }
    }
}

/// Bookkeeping for one persisted run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub id: RunId,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub source_count: i64,
    pub record_count: i64,
}

impl RunSummary {
    pub fn new(started_at: DateTime<Utc>, aggregate: &Aggregate) -> Self {
        Self {
            id: new_id(),
            started_at,
            finished_at: None,
            source_count: aggregate.len() as i64,
            record_count: aggregate.total_records() as i64,
        }
    }

    pub fn mark_finished(&mut self) {
        self.finished_at = Some(Utc::now());
    }
}
