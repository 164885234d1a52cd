//! Show command - display stored records for a source.

use super::Context;
use anyhow::Result;
use colored::Colorize;
use faqsync_db::{Database, DbError};

pub fn run(ctx: &Context, source_id: &str, section: Option<&str>) -> Result<()> {
    let config = ctx.load_config()?;
    let db = ctx.open_database(&config)?;
    run_with_db(&db, source_id, section)
}

/// Run show with an existing database connection.
pub fn run_with_db(db: &Database, source_id: &str, section: Option<&str>) -> Result<()> {
    let records = match db.list_records(source_id, section) {
        Ok(records) => records,
        Err(DbError::NotFound(_)) => {
            let known: Vec<String> = db.list_sources()?.into_iter().map(|s| s.id).collect();
            if known.is_empty() {
                anyhow::bail!("No records stored yet. Run 'faqsync run' first.");
            }
            anyhow::bail!(
                "Unknown source '{}'. Stored sources: {}",
                source_id,
                known.join(", ")
            );
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", source_id.white().bold());
    println!("{}", "─".repeat(70));

    if records.is_empty() {
        println!("{}", "No records found.".dimmed());
        return Ok(());
    }

    let mut current_section = "";
    for record in &records {
        if record.section != current_section {
            current_section = record.section.as_str();
            println!();
            println!("{}", current_section.cyan().bold());
        }
        println!();
        println!("  {}", record.question.green().bold());
        for line in record.text.lines() {
            println!("    {}", line);
        }
    }

    println!();
    println!(
        "{} record{}",
        records.len(),
        if records.len() == 1 { "" } else { "s" }
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use faqsync_core::{Aggregate, FaqRecord, SourceBundle};

    #[test]
    fn test_show_known_and_unknown_source() {
        let db = Database::open_in_memory().unwrap();
        assert!(run_with_db(&db, "llm-zoomcamp", None).is_err());

        db.replace_all(&Aggregate::from(vec![SourceBundle::new(
            "llm-zoomcamp",
            vec![FaqRecord::new("General", "What is X?", "X is a thing.")],
        )]))
        .unwrap();

        assert!(run_with_db(&db, "llm-zoomcamp", None).is_ok());
        assert!(run_with_db(&db, "llm-zoomcamp", Some("Missing")).is_ok());

        let err = run_with_db(&db, "other", None).unwrap_err();
        assert!(err.to_string().contains("llm-zoomcamp"));
    }
}
