//! Run history.

use super::records::parse_timestamp;
use crate::database::Database;
use crate::error::DbResult;
use chrono::Utc;
use faqsync_core::RunSummary;
use rusqlite::{params, OptionalExtension};

impl Database {
    /// The most recently persisted run, if any.
    pub fn last_run(&self) -> DbResult<Option<RunSummary>> {
        let conn = self.conn()?;
        let run = conn
            .query_row(
                "SELECT id, started_at, finished_at, source_count, record_count
                 FROM runs ORDER BY rowid DESC LIMIT 1",
                [],
                row_to_run,
            )
            .optional()?;
        Ok(run)
    }

    /// Recent runs, newest first.
    pub fn list_runs(&self, limit: i64) -> DbResult<Vec<RunSummary>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, started_at, finished_at, source_count, record_count
             FROM runs ORDER BY rowid DESC LIMIT ?1",
        )?;
        let runs = stmt
            .query_map(params![limit], row_to_run)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(runs)
    }
}

fn row_to_run(row: &rusqlite::Row) -> rusqlite::Result<RunSummary> {
    let started_at: String = row.get(1)?;
    let finished_at: Option<String> = row.get(2)?;

    Ok(RunSummary {
        id: row.get(0)?,
        started_at: parse_timestamp(&started_at).unwrap_or_else(Utc::now),
        finished_at: finished_at.and_then(|s| parse_timestamp(&s)),
        source_count: row.get(3)?,
        record_count: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use faqsync_core::{Aggregate, FaqRecord, SourceBundle};

    #[test]
    fn test_run_history() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.last_run().unwrap().is_none());

        let first = db.replace_all(&Aggregate::new()).unwrap();
        let aggregate = Aggregate::from(vec![SourceBundle::new(
            "course",
            vec![FaqRecord::new("S", "Q", "A")],
        )]);
        let second = db.replace_all(&aggregate).unwrap();

        let last = db.last_run().unwrap().unwrap();
        assert_eq!(last.id, second.id);
        assert_eq!(last.record_count, 1);

        let runs = db.list_runs(10).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].id, first.id);
    }
}
