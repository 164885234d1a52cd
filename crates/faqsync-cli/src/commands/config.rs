//! Configuration commands.

use super::Context;
use anyhow::{Context as _, Result};
use colored::Colorize;
use faqsync_config::Config;

pub fn show(ctx: &Context) -> Result<()> {
    let config_file = ctx.config_file()?;

    println!("{}", "Current Configuration".cyan().bold());
    println!("{}", "─".repeat(50));

    if config_file.exists() {
        let contents =
            std::fs::read_to_string(&config_file).context("Failed to read config file")?;
        println!("{}", contents);
    } else {
        println!(
            "{} No config file at {}; built-in defaults are in use.",
            "Note:".yellow().bold(),
            config_file.display()
        );
        println!();
        println!("{}", Config::default_config_string());
    }

    let config = ctx.load_config()?;
    println!("{}", "Sources".white().bold());
    for spec in &config.sources {
        println!("  {} {}", spec.id.green(), spec.locator.dimmed());
    }
    println!("  Database: {}", ctx.database_uri(&config)?);

    Ok(())
}

pub fn path(ctx: &Context) -> Result<()> {
    println!("{}", ctx.config_file()?.display());
    Ok(())
}
