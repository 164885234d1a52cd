//! Search command - full-text search over stored records.

use super::{truncate, Context};
use anyhow::Result;
use colored::Colorize;
use faqsync_db::Database;

pub fn run(ctx: &Context, query: &str, limit: i64) -> Result<()> {
    let config = ctx.load_config()?;
    let db = ctx.open_database(&config)?;
    run_with_db(&db, query, limit)
}

/// Run search with an existing database connection.
pub fn run_with_db(db: &Database, query: &str, limit: i64) -> Result<()> {
    println!("{} \"{}\"", "Searching for:".cyan().bold(), query);
    println!("{}", "─".repeat(70));

    let hits = db.search_records(query, limit)?;

    if hits.is_empty() {
        println!();
        println!("{}", "No results found.".dimmed());
        println!();
        println!("Tips:");
        println!("  • Try different keywords");
        println!("  • Use 'faqsync show <source>' to browse records");
        println!("  • Make sure 'faqsync run' has completed");
        return Ok(());
    }

    println!();
    println!(
        "Found {} result{}",
        hits.len().to_string().green(),
        if hits.len() == 1 { "" } else { "s" }
    );
    println!();

    for hit in hits {
        println!("{}", hit.record.question.white().bold());
        println!(
            "  {} › {}",
            hit.source_id.dimmed(),
            hit.record.section.cyan()
        );
        println!("  {}", truncate(&hit.record.text, 160));
        println!();
    }

    Ok(())
}
