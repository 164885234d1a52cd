//! Persistence target for a completed batch.

use crate::error::IngestResult;
use faqsync_core::{Aggregate, RunSummary};
use faqsync_db::Database;

/// Replaces everything previously stored with a new aggregate.
pub trait FaqSink {
    fn replace_all(&self, aggregate: &Aggregate) -> IngestResult<RunSummary>;
}

impl FaqSink for Database {
    fn replace_all(&self, aggregate: &Aggregate) -> IngestResult<RunSummary> {
        Ok(Database::replace_all(self, aggregate)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faqsync_core::{FaqRecord, SourceBundle};

    #[test]
    fn test_database_sink() {
        let db = Database::open_in_memory().unwrap();
        let aggregate = Aggregate::from(vec![SourceBundle::new(
            "llm-zoomcamp",
            vec![FaqRecord::new("General", "What is X?", "X is a thing.")],
        )]);

        let sink: &dyn FaqSink = &db;
        let summary = sink.replace_all(&aggregate).unwrap();

        assert_eq!(summary.record_count, 1);
        assert_eq!(db.load_aggregate().unwrap().total_records(), 1);
    }
}
