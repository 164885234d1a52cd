//! Full-text search over stored records.

use crate::database::Database;
use crate::error::DbResult;
use faqsync_core::FaqRecord;
use rusqlite::params;
use serde::Serialize;

/// A record matching a search query.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub source_id: String,
    pub record: FaqRecord,
    /// BM25 rank; lower is better.
    pub rank: f64,
}

impl Database {
    /// Search questions and answers. Each whitespace-separated term is
    /// matched as a quoted FTS5 phrase, so user input cannot break the query
    /// syntax.
    pub fn search_records(&self, query: &str, limit: i64) -> DbResult<Vec<SearchHit>> {
        let fts_query = to_fts_query(query);
        if fts_query.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT r.source_id, r.section, r.question, r.text, bm25(faq_records_fts) AS score
            FROM faq_records_fts
            JOIN faq_records r ON r.id = faq_records_fts.rowid
            WHERE faq_records_fts MATCH ?1
            ORDER BY score
            LIMIT ?2
            "#,
        )?;

        let hits = stmt
            .query_map(params![fts_query, limit], |row| {
                Ok(SearchHit {
                    source_id: row.get(0)?,
                    record: FaqRecord {
                        section: row.get(1)?,
                        question: row.get(2)?,
                        text: row.get(3)?,
                    },
                    rank: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(hits)
    }
}

fn to_fts_query(query: &str) -> String {
    query
        .split_whitespace()
        .map(|term| format!("\"{}\"", term.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use faqsync_core::{Aggregate, SourceBundle};

    #[test]
    fn test_to_fts_query() {
        assert_eq!(to_fts_query("docker  compose"), "\"docker\" \"compose\"");
        assert_eq!(to_fts_query("say \"hi\""), "\"say\" \"\"\"hi\"\"\"");
        assert_eq!(to_fts_query("   "), "");
    }

    #[test]
    fn test_search_records() {
        let db = Database::open_in_memory().unwrap();
        db.replace_all(&Aggregate::from(vec![SourceBundle::new(
            "data-engineering-zoomcamp",
            vec![
                FaqRecord::new("Docker", "How do I install Docker?", "Use the official installer."),
                FaqRecord::new("GCP", "How do I create a bucket?", "Use gsutil mb."),
            ],
        )]))
        .unwrap();

        let hits = db.search_records("docker", 10).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].record.section, "Docker");
        assert_eq!(hits[0].source_id, "data-engineering-zoomcamp");

        let hits = db.search_records("gsutil", 10).unwrap();
        assert_eq!(hits.len(), 1);

        assert!(db.search_records("", 10).unwrap().is_empty());
    }

    #[test]
    fn test_search_sees_only_latest_run() {
        let db = Database::open_in_memory().unwrap();
        db.replace_all(&Aggregate::from(vec![SourceBundle::new(
            "old",
            vec![FaqRecord::new("S", "Obsolete question?", "Obsolete answer.")],
        )]))
        .unwrap();
        db.replace_all(&Aggregate::from(vec![SourceBundle::new(
            "new",
            vec![FaqRecord::new("S", "Fresh question?", "Fresh answer.")],
        )]))
        .unwrap();

        assert!(db.search_records("obsolete", 10).unwrap().is_empty());
        assert_eq!(db.search_records("fresh", 10).unwrap().len(), 1);
    }
}
