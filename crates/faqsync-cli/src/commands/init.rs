//! Initialize faqsync.

use super::Context;
use anyhow::{Context as _, Result};
use colored::Colorize;
use faqsync_config::Config;

pub fn run(ctx: &Context) -> Result<()> {
    let config_file = ctx.config_file()?;

    if config_file.exists() {
        println!("{} faqsync is already initialized.", "Note:".yellow().bold());
        println!("  Config: {}", config_file.display());
        return Ok(());
    }

    println!("{}", "Initializing faqsync...".cyan().bold());

    ctx.paths()?
        .ensure_dirs()
        .context("Failed to create directories")?;
    println!("  {} Created directories", "✓".green());

    Config::create_default_file(&config_file).context("Failed to create config file")?;
    println!("  {} Created config: {}", "✓".green(), config_file.display());

    let config = ctx.load_config()?;
    let _db = ctx.open_database(&config)?;
    println!(
        "  {} Created database: {}",
        "✓".green(),
        ctx.database_uri(&config)?
    );

    println!();
    println!("{}", "faqsync initialized successfully!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Review sources: {}", "faqsync config show".cyan());
    println!("  2. Sync documents: {}", "faqsync run".cyan());
    println!("  3. Search answers: {}", "faqsync search docker".cyan());

    Ok(())
}
