//! Runs command - list persisted sync runs, newest first.

use super::Context;
use anyhow::Result;
use colored::Colorize;
use faqsync_db::Database;

pub fn run(ctx: &Context, limit: i64) -> Result<()> {
    let config = ctx.load_config()?;
    let db = ctx.open_database(&config)?;
    run_with_db(&db, limit)
}

/// Run with an existing database connection.
pub fn run_with_db(db: &Database, limit: i64) -> Result<()> {
    let runs = db.list_runs(limit)?;

    println!("{}", "Sync Runs".cyan().bold());
    println!("{}", "─".repeat(70));

    if runs.is_empty() {
        println!("{}", "No runs yet. Use 'faqsync run' to sync documents.".dimmed());
        return Ok(());
    }

    for run in &runs {
        let duration = run
            .finished_at
            .map(|end| format!("{:.1}s", (end - run.started_at).num_milliseconds() as f64 / 1000.0))
            .unwrap_or_else(|| "unfinished".to_string());

        println!(
            "  {}  {}  {} sources, {} questions  ({})",
            run.id[..8].yellow(),
            run.started_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S"),
            run.source_count,
            run.record_count,
            duration.dimmed()
        );
    }

    Ok(())
}
