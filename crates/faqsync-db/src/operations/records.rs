//! Replace-all writes and record listing.

use crate::database::Database;
use crate::error::{DbError, DbResult};
use chrono::{DateTime, Utc};
use faqsync_core::{Aggregate, FaqRecord, RunSummary, SourceBundle};
use rusqlite::{params, OptionalExtension, Transaction};
use serde::Serialize;
use tracing::{debug, info};

/// A source row as currently stored.
#[derive(Debug, Clone, Serialize)]
pub struct StoredSource {
    pub id: String,
    pub locator: Option<String>,
    pub content_hash: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub record_count: i64,
}

impl Database {
    /// Swap the stored records for `aggregate`.
    ///
    /// Deletion and insertion share one transaction, so readers see either the
    /// previous run or this one, never an empty store.
    pub fn replace_all(&self, aggregate: &Aggregate) -> DbResult<RunSummary> {
        let started_at = Utc::now();
        let mut summary = RunSummary::new(started_at, aggregate);

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        info!("Clearing stored FAQ records");
        tx.execute("DELETE FROM faq_records", [])?;
        tx.execute("DELETE FROM sources", [])?;

        summary.mark_finished();
        tx.execute(
            r#"
            INSERT INTO runs (id, started_at, finished_at, source_count, record_count)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                summary.id,
                summary.started_at.to_rfc3339(),
                summary.finished_at.map(|dt| dt.to_rfc3339()),
                summary.source_count,
                summary.record_count,
            ],
        )?;

        for (position, bundle) in aggregate.iter().enumerate() {
            insert_bundle(&tx, &summary.id, position as i64, bundle)?;
        }

        tx.commit()?;

        info!(
            "Saved {} sources ({} records)",
            summary.source_count, summary.record_count
        );
        Ok(summary)
    }

    /// List stored sources in batch order.
    pub fn list_sources(&self) -> DbResult<Vec<StoredSource>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT s.id, s.locator, s.content_hash, s.fetched_at,
                   (SELECT COUNT(*) FROM faq_records r WHERE r.source_id = s.id)
            FROM sources s
            ORDER BY s.position
            "#,
        )?;

        let sources = stmt
            .query_map([], |row| {
                let fetched_at: Option<String> = row.get(3)?;
                Ok(StoredSource {
                    id: row.get(0)?,
                    locator: row.get(1)?,
                    content_hash: row.get(2)?,
                    fetched_at: fetched_at.and_then(|s| parse_timestamp(&s)),
                    record_count: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(sources)
    }

    /// Records of one source in document order, optionally for one section.
    pub fn list_records(&self, source_id: &str, section: Option<&str>) -> DbResult<Vec<FaqRecord>> {
        let conn = self.conn()?;

        let exists: Option<String> = conn
            .query_row(
                "SELECT id FROM sources WHERE id = ?1",
                params![source_id],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_none() {
            return Err(DbError::NotFound(format!("Source not found: {}", source_id)));
        }

        let records = match section {
            Some(section) => {
                let mut stmt = conn.prepare(
                    "SELECT section, question, text FROM faq_records
                     WHERE source_id = ?1 AND section = ?2 ORDER BY position",
                )?;
                let rows = stmt.query_map(params![source_id, section], row_to_record)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = conn.prepare(
                    "SELECT section, question, text FROM faq_records
                     WHERE source_id = ?1 ORDER BY position",
                )?;
                let rows = stmt.query_map(params![source_id], row_to_record)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };

        Ok(records)
    }

    /// Rebuild the aggregate written by the last run.
    pub fn load_aggregate(&self) -> DbResult<Aggregate> {
        let mut aggregate = Aggregate::new();

        for source in self.list_sources()? {
            let records = self.list_records(&source.id, None)?;
            let mut bundle = SourceBundle::new(source.id, records);
            bundle.locator = source.locator;
            bundle.content_hash = source.content_hash;
            bundle.fetched_at = source.fetched_at;
            aggregate.push(bundle);
        }

        Ok(aggregate)
    }
}

fn insert_bundle(
    tx: &Transaction<'_>,
    run_id: &str,
    position: i64,
    bundle: &SourceBundle,
) -> DbResult<()> {
    tx.execute(
        r#"
        INSERT INTO sources (id, position, locator, content_hash, fetched_at, run_id)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        params![
            bundle.source_id,
            position,
            bundle.locator,
            bundle.content_hash,
            bundle.fetched_at.map(|dt| dt.to_rfc3339()),
            run_id,
        ],
    )?;

    let mut stmt = tx.prepare_cached(
        r#"
        INSERT INTO faq_records (source_id, position, section, question, text)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )?;

    for (index, record) in bundle.records.iter().enumerate() {
        stmt.execute(params![
            bundle.source_id,
            index as i64,
            record.section,
            record.question,
            record.text,
        ])?;
    }

    debug!(
        "Inserted {} records for source {}",
        bundle.records.len(),
        bundle.source_id
    );
    Ok(())
}

fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<FaqRecord> {
    Ok(FaqRecord {
        section: row.get(0)?,
        question: row.get(1)?,
        text: row.get(2)?,
    })
}

pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_aggregate() -> Aggregate {
        Aggregate::from(vec![
            SourceBundle::new(
                "data-engineering-zoomcamp",
                vec![
                    FaqRecord::new("General", "What is X?", "X is a thing."),
                    FaqRecord::new("Module 1", "What is Y?", "Y is another."),
                ],
            )
            .with_locator("abc")
            .with_content_hash("deadbeef")
            .with_fetched_at(Utc::now()),
            SourceBundle::new("mlops-zoomcamp", vec![]),
        ])
    }

    #[test]
    fn test_replace_all_and_read_back() {
        let db = Database::open_in_memory().unwrap();
        let aggregate = sample_aggregate();

        let summary = db.replace_all(&aggregate).unwrap();
        assert_eq!(summary.source_count, 2);
        assert_eq!(summary.record_count, 2);
        assert!(summary.finished_at.is_some());

        let sources = db.list_sources().unwrap();
        let ids: Vec<_> = sources.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["data-engineering-zoomcamp", "mlops-zoomcamp"]);
        assert_eq!(sources[0].record_count, 2);
        assert_eq!(sources[0].content_hash.as_deref(), Some("deadbeef"));
        assert_eq!(sources[1].record_count, 0);

        let records = db.list_records("data-engineering-zoomcamp", None).unwrap();
        assert_eq!(records, aggregate.bundles[0].records);

        let module = db
            .list_records("data-engineering-zoomcamp", Some("Module 1"))
            .unwrap();
        assert_eq!(module.len(), 1);
        assert_eq!(module[0].question, "What is Y?");
    }

    #[test]
    fn test_replace_all_discards_previous_run() {
        let db = Database::open_in_memory().unwrap();
        db.replace_all(&sample_aggregate()).unwrap();

        let second = Aggregate::from(vec![SourceBundle::new(
            "machine-learning-zoomcamp",
            vec![FaqRecord::new("Intro", "Where?", "Here.")],
        )]);
        db.replace_all(&second).unwrap();

        let loaded = db.load_aggregate().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.bundles[0].source_id, "machine-learning-zoomcamp");
        assert_eq!(loaded.total_records(), 1);
        assert!(db.list_records("mlops-zoomcamp", None).is_err());
    }

    #[test]
    fn test_load_aggregate_roundtrip() {
        let db = Database::open_in_memory().unwrap();
        let aggregate = sample_aggregate();
        db.replace_all(&aggregate).unwrap();

        let loaded = db.load_aggregate().unwrap();
        assert_eq!(loaded.len(), aggregate.len());
        assert_eq!(loaded.bundles[0].records, aggregate.bundles[0].records);
        assert_eq!(loaded.bundles[0].locator.as_deref(), Some("abc"));
        assert!(loaded.bundles[1].records.is_empty());
    }

    #[test]
    fn test_list_records_unknown_source() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(
            db.list_records("missing", None),
            Err(DbError::NotFound(_))
        ));
    }
}
