//! Parse command - decode local .docx files without touching the store.

use super::{truncate, Context};
use anyhow::{Context as _, Result};
use colored::Colorize;
use faqsync_core::{Aggregate, SourceBundle};
use faqsync_ingest::{DocxParser, HierarchyParser, ParseReport, SkipReason, StyleMap};
use std::path::{Path, PathBuf};

pub fn run(ctx: &Context, path: &Path, json: bool) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let config = ctx.load_config()?;
    let decoder = DocxParser::new(StyleMap::from_config(&config.styles));
    let parser = HierarchyParser::new();

    let files = find_docx_files(path);
    if files.is_empty() {
        println!("{}", "No .docx files found.".yellow());
        return Ok(());
    }

    let mut aggregate = Aggregate::new();
    let mut reports = Vec::new();

    for file in &files {
        let paragraphs = decoder
            .parse_file(file)
            .with_context(|| format!("Failed to parse {}", file.display()))?;
        let report = parser.parse_with_report(&paragraphs);

        let bundle = SourceBundle::new(source_name(file), report.records.clone())
            .with_locator(file.display().to_string());
        aggregate.push(bundle);
        reports.push(report);
    }

    if json {
        println!("{}", render_json(&aggregate, &reports)?);
        return Ok(());
    }

    for (bundle, report) in aggregate.iter().zip(&reports) {
        print_bundle(bundle, report);
    }

    Ok(())
}

/// One entry per file: the bundle plus what the parser dropped.
fn render_json(aggregate: &Aggregate, reports: &[ParseReport]) -> Result<String> {
    let mut files = Vec::with_capacity(reports.len());
    for (bundle, report) in aggregate.iter().zip(reports) {
        let mut entry = serde_json::to_value(bundle)?;
        if let Some(fields) = entry.as_object_mut() {
            fields.insert("skipped".to_string(), serde_json::to_value(&report.skipped)?);
            fields.insert(
                "orphan_body_lines".to_string(),
                serde_json::Value::from(report.orphan_body_lines),
            );
        }
        files.push(entry);
    }
    Ok(serde_json::to_string_pretty(&files)?)
}

/// A single file, or every non-hidden `.docx` under a directory.
fn find_docx_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| {
            // Skip hidden files and Word lock files
            !e.file_name()
                .to_str()
                .map(|n| n.starts_with('.') || n.starts_with("~$"))
                .unwrap_or(false)
        })
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("docx"))
                .unwrap_or(false)
        })
        .map(|e| e.into_path())
        .collect();

    files.sort();
    files
}

fn source_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document")
        .to_string()
}

fn print_bundle(bundle: &SourceBundle, report: &ParseReport) {
    println!(
        "📄 {} ({} questions)",
        bundle.source_id.white().bold(),
        bundle.records.len()
    );
    println!("{}", "─".repeat(70));

    let mut current_section = "";
    for record in &bundle.records {
        if record.section != current_section {
            current_section = record.section.as_str();
            println!();
            println!("{}", current_section.cyan().bold());
        }
        println!("  {} {}", "Q:".green(), record.question);
        println!("     {}", truncate(&record.text, 100).dimmed());
    }

    if !report.skipped.is_empty() {
        println!();
        println!(
            "{} {} question(s) dropped",
            "Warning:".yellow().bold(),
            report.skipped.len()
        );
        for skipped in &report.skipped {
            let reason = match skipped.reason {
                SkipReason::EmptyBody => "no answer text",
                SkipReason::MissingSection => "no section heading",
            };
            println!("  • {} ({})", skipped.question, reason);
        }
    }

    if report.orphan_body_lines > 0 {
        println!(
            "  {} {} paragraph(s) before the first question were ignored",
            "Note:".dimmed(),
            report.orphan_body_lines
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_docx_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.docx"), b"").unwrap();
        std::fs::write(dir.path().join("a.DOCX"), b"").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"").unwrap();
        std::fs::write(dir.path().join("~$a.docx"), b"").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("c.docx"), b"").unwrap();

        let names: Vec<_> = find_docx_files(dir.path())
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.DOCX", "b.docx", "c.docx"]);
    }

    #[test]
    fn test_render_json_keeps_diagnostics() {
        use faqsync_core::Paragraph;

        let report = HierarchyParser::new().parse_with_report(&[
            Paragraph::body("Preamble"),
            Paragraph::section("General"),
            Paragraph::question("What is X?"),
            Paragraph::body("X is a thing."),
            Paragraph::question("Unanswered?"),
        ]);
        let aggregate = Aggregate::from(vec![SourceBundle::new(
            "faq",
            report.records.clone(),
        )]);

        let rendered = render_json(&aggregate, &[report]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        let file = &value[0];
        assert_eq!(file["source_id"], "faq");
        assert_eq!(file["records"].as_array().unwrap().len(), 1);
        assert_eq!(file["skipped"][0]["question"], "Unanswered?");
        assert_eq!(file["skipped"][0]["reason"], "empty_body");
        assert_eq!(file["orphan_body_lines"], 1);
    }

    #[test]
    fn test_source_name() {
        assert_eq!(source_name(Path::new("/tmp/llm-zoomcamp.docx")), "llm-zoomcamp");
    }
}
