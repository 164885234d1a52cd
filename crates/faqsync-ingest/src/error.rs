//! Error types for the ingestion pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for ingestion operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors that can occur during ingestion.
///
/// The parser itself never fails; every variant comes from fetching,
/// decoding or storage.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Fetch error for {locator}: {message}")]
    Fetch { locator: String, message: String },

    #[error("Fetch error for {locator}: server returned status {status}")]
    HttpStatus { locator: String, status: u16 },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Decode error for {locator}: {message}")]
    Decode { locator: String, message: String },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] faqsync_db::DbError),

    #[error("{0}")]
    Core(#[from] faqsync_core::Error),

    #[error("Source '{source_id}' failed: {source}")]
    Source {
        source_id: String,
        #[source]
        source: Box<IngestError>,
    },
}

/// Coarse failure category, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Fetch,
    Decode,
    Storage,
    Other,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Fetch => "fetch",
            ErrorKind::Decode => "decode",
            ErrorKind::Storage => "storage",
            ErrorKind::Other => "other",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl IngestError {
    /// Attach the id of the source being processed.
    pub fn for_source(self, source_id: impl Into<String>) -> Self {
        IngestError::Source {
            source_id: source_id.into(),
            source: Box::new(self),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            IngestError::Fetch { .. }
            | IngestError::HttpStatus { .. }
            | IngestError::HttpClient(_)
            | IngestError::FileNotFound(_)
            | IngestError::Io(_) => ErrorKind::Fetch,
            IngestError::Decode { .. } => ErrorKind::Decode,
            IngestError::Storage(_) => ErrorKind::Storage,
            IngestError::Source { source, .. } => source.kind(),
            IngestError::Core(_) => ErrorKind::Other,
        }
    }

    /// The failing source id, when known.
    pub fn source_id(&self) -> Option<&str> {
        match self {
            IngestError::Source { source_id, .. } => Some(source_id),
            _ => None,
        }
    }
}
