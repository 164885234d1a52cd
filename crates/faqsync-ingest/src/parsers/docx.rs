//! DOCX paragraph decoder.

use super::StyleMap;
use crate::error::{IngestError, IngestResult};
use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use faqsync_core::Paragraph;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Decodes `.docx` bytes into the top-level body paragraphs, in order.
///
/// Paragraphs are classified by style *name*, not style id: localized Word
/// stores `heading 1` under ids such as `berschrift1`. Tables, headers and
/// footers are not visited.
#[derive(Debug, Clone, Default)]
pub struct DocxParser {
    styles: StyleMap,
}

impl DocxParser {
    pub fn new(styles: StyleMap) -> Self {
        Self { styles }
    }

    /// Decode an in-memory document. `locator` is only used in errors.
    pub fn decode(&self, bytes: &[u8], locator: &str) -> IngestResult<Vec<Paragraph>> {
        let docx = docx_rs::read_docx(bytes).map_err(|e| IngestError::Decode {
            locator: locator.to_string(),
            message: e.to_string(),
        })?;

        let names = style_names(&docx.styles);
        let paragraphs: Vec<Paragraph> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(para) => Some(self.convert(para, &names)),
                _ => None,
            })
            .collect();

        debug!("Decoded {} paragraphs from {}", paragraphs.len(), locator);
        Ok(paragraphs)
    }

    /// Read and decode a file on disk.
    pub fn parse_file(&self, path: &Path) -> IngestResult<Vec<Paragraph>> {
        if !path.exists() {
            return Err(IngestError::FileNotFound(path.to_path_buf()));
        }

        let bytes = std::fs::read(path)?;
        self.decode(&bytes, &path.display().to_string())
    }

    fn convert(&self, para: &docx_rs::Paragraph, names: &HashMap<&str, String>) -> Paragraph {
        let style = para.property.style.as_ref().map(|s| {
            let id = s.val.as_str();
            names.get(id).map(String::as_str).unwrap_or(id)
        });
        let mut text = String::new();
        collect_text(&para.children, &mut text);

        Paragraph::new(self.styles.classify(style), text)
    }
}

/// Style id to display name, for styles that declare one.
fn style_names(styles: &docx_rs::Styles) -> HashMap<&str, String> {
    styles
        .styles
        .iter()
        .filter_map(|style| match serde_json::to_value(&style.name) {
            Ok(serde_json::Value::String(n)) if !n.trim().is_empty() => {
                Some((style.style_id.as_str(), n))
            }
            _ => None,
        })
        .collect()
}

fn collect_text(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for rc in &run.children {
                    match rc {
                        RunChild::Text(t) => out.push_str(&t.text),
                        RunChild::Tab(_) => out.push('\t'),
                        RunChild::Break(_) => out.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => collect_text(&link.children, out),
            _ => {}
        }
    }
}

/// Single-run paragraph with an optional style id, for building fixtures.
#[cfg(test)]
pub(crate) fn styled(style: Option<&str>, text: &str) -> docx_rs::Paragraph {
    let para = docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text(text));
    match style {
        Some(s) => para.style(s),
        None => para,
    }
}

/// Pack paragraphs into `.docx` bytes.
#[cfg(test)]
pub(crate) fn build_docx(paragraphs: Vec<docx_rs::Paragraph>) -> Vec<u8> {
    build_docx_with_styles(Vec::new(), paragraphs)
}

/// Pack paragraphs into `.docx` bytes, declaring extra styles.
#[cfg(test)]
pub(crate) fn build_docx_with_styles(
    styles: Vec<docx_rs::Style>,
    paragraphs: Vec<docx_rs::Paragraph>,
) -> Vec<u8> {
    let mut docx = docx_rs::Docx::new();
    for style in styles {
        docx = docx.add_style(style);
    }
    for para in paragraphs {
        docx = docx.add_paragraph(para);
    }
    let mut buf = Vec::new();
    docx.build()
        .pack(std::io::Cursor::new(&mut buf))
        .unwrap();
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Run, Style, StyleType};
    use faqsync_core::StyleLabel;

    #[test]
    fn test_decode_heading_styles() {
        let bytes = build_docx(vec![
            styled(Some("Heading1"), "General"),
            styled(Some("Heading2"), "What is X?"),
            styled(None, "X is a thing."),
            styled(Some("Heading3"), "Aside"),
        ]);

        let paragraphs = DocxParser::default().decode(&bytes, "memory").unwrap();

        assert_eq!(
            paragraphs,
            vec![
                Paragraph::new(StyleLabel::SectionHeading, "General"),
                Paragraph::new(StyleLabel::QuestionHeading, "What is X?"),
                Paragraph::new(StyleLabel::Body, "X is a thing."),
                Paragraph::new(StyleLabel::Other, "Aside"),
            ]
        );
    }

    #[test]
    fn test_localized_style_ids_resolve_by_name() {
        let bytes = build_docx_with_styles(
            vec![
                Style::new("berschrift1", StyleType::Paragraph).name("heading 1"),
                Style::new("berschrift2", StyleType::Paragraph).name("heading 2"),
            ],
            vec![
                styled(Some("berschrift1"), "General"),
                styled(Some("berschrift2"), "What is X?"),
                styled(None, "X is a thing."),
            ],
        );

        let paragraphs = DocxParser::default().decode(&bytes, "memory").unwrap();
        let styles: Vec<_> = paragraphs.iter().map(|p| p.style).collect();
        assert_eq!(
            styles,
            vec![
                StyleLabel::SectionHeading,
                StyleLabel::QuestionHeading,
                StyleLabel::Body
            ]
        );

        let records = crate::hierarchy::parse_paragraphs(&paragraphs);
        assert_eq!(
            records,
            vec![faqsync_core::FaqRecord::new("General", "What is X?", "X is a thing.")]
        );
    }

    #[test]
    fn test_style_name_wins_over_matching_id() {
        // A style whose id looks like a heading but whose name does not.
        let bytes = build_docx_with_styles(
            vec![Style::new("Heading2", StyleType::Paragraph).name("Quote")],
            vec![styled(Some("Heading2"), "Not a question")],
        );

        let paragraphs = DocxParser::default().decode(&bytes, "memory").unwrap();
        assert_eq!(paragraphs[0].style, StyleLabel::Other);
    }

    #[test]
    fn test_runs_are_concatenated() {
        let para = docx_rs::Paragraph::new()
            .add_run(Run::new().add_text("Use "))
            .add_run(Run::new().add_text("docker compose"))
            .add_run(Run::new().add_text(" up."));
        let bytes = build_docx(vec![para]);

        let paragraphs = DocxParser::default().decode(&bytes, "memory").unwrap();
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].text, "Use docker compose up.");
    }

    #[test]
    fn test_invalid_bytes_fail_with_decode_error() {
        let result = DocxParser::default().decode(b"not a zip archive", "bad.docx");
        match result {
            Err(IngestError::Decode { locator, .. }) => assert_eq!(locator, "bad.docx"),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faq.docx");
        std::fs::write(
            &path,
            build_docx(vec![styled(Some("Heading1"), "General")]),
        )
        .unwrap();

        let paragraphs = DocxParser::default().parse_file(&path).unwrap();
        assert_eq!(paragraphs, vec![Paragraph::section("General")]);

        let missing = DocxParser::default().parse_file(&dir.path().join("missing.docx"));
        assert!(matches!(missing, Err(IngestError::FileNotFound(_))));
    }
}
