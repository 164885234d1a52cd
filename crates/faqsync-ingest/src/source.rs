//! Paragraph sources: locator in, styled paragraphs out.

use crate::error::IngestResult;
use crate::fetch::DocumentFetcher;
use crate::parsers::DocxParser;
use chrono::{DateTime, Utc};
use faqsync_core::{Locator, Paragraph};
use sha2::{Digest, Sha256};
use tracing::debug;

/// A fetched and decoded document.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub paragraphs: Vec<Paragraph>,
    /// SHA-256 of the raw bytes, when the source saw any.
    pub content_hash: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl From<Vec<Paragraph>> for FetchedDocument {
    fn from(paragraphs: Vec<Paragraph>) -> Self {
        Self {
            paragraphs,
            content_hash: None,
            fetched_at: Utc::now(),
        }
    }
}

/// Produces the ordered paragraphs of the document behind a locator.
pub trait ParagraphSource {
    fn fetch(&self, locator: &str) -> IngestResult<FetchedDocument>;
}

/// Fetches `.docx` bytes and decodes them.
pub struct DocxSource<F> {
    fetcher: F,
    parser: DocxParser,
}

impl<F: DocumentFetcher> DocxSource<F> {
    pub fn new(fetcher: F, parser: DocxParser) -> Self {
        Self { fetcher, parser }
    }
}

impl<F: DocumentFetcher> ParagraphSource for DocxSource<F> {
    fn fetch(&self, locator: &str) -> IngestResult<FetchedDocument> {
        let parsed = Locator::parse(locator)?;
        let bytes = self.fetcher.fetch_bytes(&parsed)?;
        let fetched_at = Utc::now();

        let content_hash = hash_bytes(&bytes);
        debug!("Content hash for {}: {}", parsed, content_hash);

        let paragraphs = self.parser.decode(&bytes, &parsed.to_string())?;

        Ok(FetchedDocument {
            paragraphs,
            content_hash: Some(content_hash),
            fetched_at,
        })
    }
}

fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes
            .as_ref()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }
}
