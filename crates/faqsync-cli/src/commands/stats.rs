//! Stats command - show store statistics.

use super::{format_size, Context};
use anyhow::Result;
use colored::Colorize;
use faqsync_db::Database;

pub fn run(ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;
    let db = ctx.open_database(&config)?;

    let size = match ctx.database_file(&config)? {
        Some(path) => Database::file_size(path).ok(),
        None => None,
    };

    run_with_db(&db, size)
}

/// Run stats with an existing database connection.
pub fn run_with_db(db: &Database, database_size_bytes: Option<i64>) -> Result<()> {
    let stats = db.get_stats()?;

    println!("{}", "faqsync Statistics".cyan().bold());
    println!("{}", "─".repeat(50));

    println!();
    println!("{}", "Records".white().bold());
    println!("  Sources: {}", stats.total_sources.to_string().green());
    println!("  Sections: {}", stats.total_sections);
    println!("  Questions: {}", stats.total_records.to_string().green());
    for (source_id, count) in &stats.records_by_source {
        println!("    {}: {}", source_id, count);
    }

    println!();
    println!("{}", "Runs".white().bold());
    println!("  Total: {}", stats.total_runs);
    match &stats.last_run {
        Some(run) => {
            let finished = run.finished_at.unwrap_or(run.started_at);
            println!(
                "  Last: {} ({} sources, {} questions)",
                finished
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M:%S"),
                run.source_count,
                run.record_count
            );
        }
        None => println!("  Last: {}", "never".dimmed()),
    }

    println!();
    println!("{}", "Storage".white().bold());
    if let Some(bytes) = database_size_bytes {
        println!("  Database size: {}", format_size(bytes));
    }
    let integrity = if db.integrity_check()? {
        "ok".green()
    } else {
        "FAILED".red().bold()
    };
    println!("  Integrity: {}", integrity);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_on_empty_store() {
        let db = Database::open_in_memory().unwrap();
        assert!(run_with_db(&db, None).is_ok());
        assert!(db.integrity_check().unwrap());
    }
}
