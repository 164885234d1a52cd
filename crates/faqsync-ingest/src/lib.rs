//! faqsync Ingest - turning FAQ documents into question/answer records.
//!
//! This crate provides:
//! - Document fetching over HTTP or from local files
//! - DOCX decoding into styled paragraphs
//! - Text normalization and the heading-driven hierarchy parser
//! - The batch orchestrator and the persistence sink seam

mod error;
mod fetch;
mod hierarchy;
mod normalize;
mod orchestrator;
mod parsers;
mod sink;
mod source;

pub use error::{ErrorKind, IngestError, IngestResult};
pub use fetch::{DocumentFetcher, FileFetcher, HttpFetcher, LocatorFetcher};
pub use hierarchy::{parse_paragraphs, HierarchyParser, ParseReport, SkipReason, SkippedQuestion};
pub use normalize::normalize;
pub use orchestrator::BatchOrchestrator;
pub use parsers::{DocxParser, StyleMap};
pub use sink::FaqSink;
pub use source::{DocxSource, FetchedDocument, ParagraphSource};
