//! Store statistics.

use crate::database::Database;
use crate::error::DbResult;
use faqsync_core::RunSummary;
use serde::Serialize;

/// Summary counts for the stored run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    pub total_sources: i64,
    pub total_records: i64,
    pub total_sections: i64,
    /// (source id, record count) in batch order.
    pub records_by_source: Vec<(String, i64)>,
    pub total_runs: i64,
    pub last_run: Option<RunSummary>,
}

impl Database {
    /// Get store statistics.
    pub fn get_stats(&self) -> DbResult<StoreStats> {
        // Fetch before taking a connection; in-memory pools hold only one.
        let last_run = self.last_run()?;

        let conn = self.conn()?;

        let total_sources: i64 =
            conn.query_row("SELECT COUNT(*) FROM sources", [], |row| row.get(0))?;

        let total_records: i64 =
            conn.query_row("SELECT COUNT(*) FROM faq_records", [], |row| row.get(0))?;

        let total_sections: i64 = conn.query_row(
            "SELECT COUNT(*) FROM (SELECT DISTINCT source_id, section FROM faq_records)",
            [],
            |row| row.get(0),
        )?;

        let total_runs: i64 = conn.query_row("SELECT COUNT(*) FROM runs", [], |row| row.get(0))?;

        let mut records_by_source = Vec::new();
        {
            let mut stmt = conn.prepare(
                "SELECT s.id, COUNT(r.id) FROM sources s
                 LEFT JOIN faq_records r ON r.source_id = s.id
                 GROUP BY s.id ORDER BY s.position",
            )?;
            let rows = stmt.query_map([], |row| {
                let id: String = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok((id, count))
            })?;
            for row in rows {
                records_by_source.push(row?);
            }
        }

        Ok(StoreStats {
            total_sources,
            total_records,
            total_sections,
            records_by_source,
            total_runs,
            last_run,
        })
    }
}
