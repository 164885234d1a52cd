//! Batch ingestion across configured sources.

use crate::error::IngestResult;
use crate::hierarchy::HierarchyParser;
use crate::sink::FaqSink;
use crate::source::ParagraphSource;
use faqsync_core::{Aggregate, RunSummary, SourceBundle, SourceSpec};
use tracing::{error, info};

/// Fetches and parses every source, then hands the result to a sink.
///
/// Sources are processed one at a time in the given order. The first failure
/// aborts the batch and nothing is written.
pub struct BatchOrchestrator<P> {
    source: P,
    parser: HierarchyParser,
}

impl<P: ParagraphSource> BatchOrchestrator<P> {
    pub fn new(source: P) -> Self {
        Self {
            source,
            parser: HierarchyParser::new(),
        }
    }

    /// Build the aggregate for `specs` without persisting it.
    pub fn collect(&self, specs: &[SourceSpec]) -> IngestResult<Aggregate> {
        self.collect_with(specs, |_| {})
    }

    /// Like [`collect`](Self::collect), calling `on_bundle` after each source.
    pub fn collect_with<F>(&self, specs: &[SourceSpec], mut on_bundle: F) -> IngestResult<Aggregate>
    where
        F: FnMut(&SourceBundle),
    {
        let mut aggregate = Aggregate::new();

        for spec in specs {
            let bundle = self.process(spec).map_err(|e| {
                error!("Failed to process source {}: {}", spec.id, e);
                e.for_source(&spec.id)
            })?;
            on_bundle(&bundle);
            aggregate.push(bundle);
        }

        Ok(aggregate)
    }

    /// Collect every source, then replace the sink's contents in one call.
    pub fn run(&self, specs: &[SourceSpec], sink: &impl FaqSink) -> IngestResult<RunSummary> {
        self.run_with(specs, sink, |_| {})
    }

    pub fn run_with<F>(
        &self,
        specs: &[SourceSpec],
        sink: &impl FaqSink,
        on_bundle: F,
    ) -> IngestResult<RunSummary>
    where
        F: FnMut(&SourceBundle),
    {
        let aggregate = self.collect_with(specs, on_bundle)?;
        sink.replace_all(&aggregate)
    }

    fn process(&self, spec: &SourceSpec) -> IngestResult<SourceBundle> {
        info!("Processing source: {}", spec.id);

        let document = self.source.fetch(&spec.locator)?;
        let records = self.parser.parse(&document.paragraphs);
        info!("Parsed {} questions from {}", records.len(), spec.id);

        let mut bundle = SourceBundle::new(spec.id.clone(), records)
            .with_locator(spec.locator.clone())
            .with_fetched_at(document.fetched_at);
        if let Some(hash) = document.content_hash {
            bundle = bundle.with_content_hash(hash);
        }

        Ok(bundle)
    }
}
