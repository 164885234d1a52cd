//! Export command - dump the stored aggregate as JSON.

use super::Context;
use anyhow::{Context as _, Result};
use colored::Colorize;
use faqsync_db::Database;
use std::path::Path;

pub fn run(ctx: &Context, output: Option<&Path>) -> Result<()> {
    let config = ctx.load_config()?;
    let db = ctx.open_database(&config)?;
    let json = render(&db)?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} {}", "Exported to:".green().bold(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Pretty JSON array of `{source_id, records}` bundles, in stored order.
fn render(db: &Database) -> Result<String> {
    let aggregate = db.load_aggregate()?;
    Ok(aggregate.to_json_pretty()?)
}
