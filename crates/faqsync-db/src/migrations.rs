//! Database migrations and schema management.

use crate::error::{DbError, DbResult};
use rusqlite::Connection;
use tracing::info;

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema.
pub fn initialize_schema(conn: &Connection) -> DbResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        info!("Creating initial database schema...");
        create_initial_schema(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version > SCHEMA_VERSION {
        return Err(DbError::Migration(format!(
            "database schema version {} is newer than supported version {}",
            current_version, SCHEMA_VERSION
        )));
    }

    Ok(())
}

fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> DbResult<()> {
    conn.pragma_update(None, "user_version", version)?;
    Ok(())
}

fn create_initial_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- One row per persisted run
        CREATE TABLE IF NOT EXISTS runs (
            id TEXT PRIMARY KEY,
            started_at TEXT NOT NULL,
            finished_at TEXT,
            source_count INTEGER NOT NULL,
            record_count INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_runs_started ON runs(started_at);

        -- Sources of the latest run, in batch order
        CREATE TABLE IF NOT EXISTS sources (
            id TEXT PRIMARY KEY,
            position INTEGER NOT NULL,
            locator TEXT,
            content_hash TEXT,
            fetched_at TEXT,
            run_id TEXT REFERENCES runs(id) ON DELETE SET NULL
        );

        -- Question/answer records, in document order per source
        CREATE TABLE IF NOT EXISTS faq_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            source_id TEXT NOT NULL REFERENCES sources(id) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            section TEXT NOT NULL,
            question TEXT NOT NULL,
            text TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_records_source ON faq_records(source_id, position);
        CREATE INDEX IF NOT EXISTS idx_records_section ON faq_records(source_id, section);

        -- Full-text search over questions and answers
        CREATE VIRTUAL TABLE IF NOT EXISTS faq_records_fts USING fts5(
            question,
            text,
            content='faq_records',
            content_rowid='id'
        );

        -- Triggers to keep FTS in sync
        CREATE TRIGGER IF NOT EXISTS faq_records_ai AFTER INSERT ON faq_records BEGIN
            INSERT INTO faq_records_fts(rowid, question, text)
            VALUES (NEW.id, NEW.question, NEW.text);
        END;

        CREATE TRIGGER IF NOT EXISTS faq_records_ad AFTER DELETE ON faq_records BEGIN
            INSERT INTO faq_records_fts(faq_records_fts, rowid, question, text)
            VALUES ('delete', OLD.id, OLD.question, OLD.text);
        END;

        CREATE TRIGGER IF NOT EXISTS faq_records_au AFTER UPDATE ON faq_records BEGIN
            INSERT INTO faq_records_fts(faq_records_fts, rowid, question, text)
            VALUES ('delete', OLD.id, OLD.question, OLD.text);
            INSERT INTO faq_records_fts(rowid, question, text)
            VALUES (NEW.id, NEW.question, NEW.text);
        END;
        "#,
    )?;

    Ok(())
}

/// Drop all tables (for testing).
#[cfg(test)]
pub fn drop_all_tables(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        DROP TABLE IF EXISTS faq_records_fts;
        DROP TABLE IF EXISTS faq_records;
        DROP TABLE IF EXISTS sources;
        DROP TABLE IF EXISTS runs;
        "#,
    )?;
    set_schema_version(conn, 0)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_reentrant() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        initialize_schema(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_recreate_after_drop() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        drop_all_tables(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), 0);

        initialize_schema(&conn).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM faq_records", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_newer_schema_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        set_schema_version(&conn, SCHEMA_VERSION + 1).unwrap();
        assert!(matches!(
            initialize_schema(&conn),
            Err(DbError::Migration(_))
        ));
    }
}
