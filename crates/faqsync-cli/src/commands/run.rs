//! Run command - fetch, parse and store every configured FAQ document.

use super::Context;
use anyhow::{Context as _, Result};
use colored::Colorize;
use faqsync_core::SourceBundle;
use faqsync_ingest::{
    BatchOrchestrator, DocxParser, DocxSource, IngestError, LocatorFetcher, StyleMap,
};
use indicatif::{ProgressBar, ProgressStyle};

pub fn run(ctx: &Context, only: &[String], dry_run: bool) -> Result<()> {
    let config = ctx.load_config()?;
    let specs = config.select_sources(only)?;

    if specs.is_empty() {
        println!("{}", "No sources configured.".yellow());
        return Ok(());
    }

    let fetcher =
        LocatorFetcher::from_config(&config.fetch).context("Failed to set up document fetcher")?;
    let parser = DocxParser::new(StyleMap::from_config(&config.styles));
    let orchestrator = BatchOrchestrator::new(DocxSource::new(fetcher, parser));

    let pb = ProgressBar::new(specs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    if let Some(first) = specs.first() {
        pb.set_message(first.id.clone());
    }

    let mut report = |bundle: &SourceBundle| {
        pb.println(format!(
            "  {} {} ({} questions)",
            "✓".green(),
            bundle.source_id,
            bundle.records.len()
        ));
        pb.inc(1);
    };

    if dry_run {
        let aggregate = orchestrator.collect_with(&specs, &mut report);
        pb.finish_and_clear();
        let aggregate = aggregate.map_err(describe_failure)?;

        println!();
        println!(
            "{} {} sources, {} questions",
            "Parsed:".cyan().bold(),
            aggregate.len(),
            aggregate.total_records()
        );
        for bundle in &aggregate {
            println!(
                "  {}: {} questions in {} sections",
                bundle.source_id,
                bundle.records.len(),
                bundle.sections().len()
            );
        }
        println!("\n{}", "Dry run - the store was not modified.".cyan());
        return Ok(());
    }

    let db = ctx.open_database(&config)?;
    let summary = orchestrator.run_with(&specs, &db, &mut report);
    pb.finish_and_clear();
    let summary = summary.map_err(describe_failure)?;

    println!();
    println!(
        "{} {} sources, {} questions",
        "Stored:".green().bold(),
        summary.source_count,
        summary.record_count
    );
    println!("  Run: {}", &summary.id[..8]);

    Ok(())
}

/// Name the failing source and failure kind; the batch never writes partially.
fn describe_failure(err: IngestError) -> anyhow::Error {
    let message = match err.source_id() {
        Some(id) => format!(
            "{} failure in source '{}'; the store was not modified",
            err.kind(),
            id
        ),
        None => format!("{} failure; the store was not modified", err.kind()),
    };
    anyhow::Error::new(err).context(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_failure_names_source_and_kind() {
        let err = IngestError::HttpStatus {
            locator: "abc".to_string(),
            status: 404,
        }
        .for_source("mlops-zoomcamp");

        let rendered = format!("{:#}", describe_failure(err));
        assert!(rendered.starts_with("fetch failure in source 'mlops-zoomcamp'"));
        assert!(rendered.contains("404"));
    }
}
