//! Heading-driven FAQ structure parser.
//!
//! Section and question boundaries are implied by paragraph styles only:
//!
//! ```text
//! SectionHeading   "General"            -> section = General
//! QuestionHeading  "What is X?"         -> flush, question = What is X?
//! Body             "X is a thing."      -> body += X is a thing.
//! QuestionHeading  "What is Y?"         -> flush (emits X), question = What is Y?
//! Body             "Y is another."
//! <end>                                 -> flush (emits Y)
//! ```
//!
//! A section heading does not close the open question. Body that follows it
//! is still appended to that question, and the record is emitted under the
//! new section name when the next question heading arrives.

use crate::normalize::normalize;
use faqsync_core::{FaqRecord, Paragraph, StyleLabel};
use serde::Serialize;
use std::mem;
use tracing::{debug, warn};

/// Why a question heading produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No body text between the heading and the next question or the end.
    EmptyBody,
    /// The question appeared before any section heading.
    MissingSection,
}

/// A question heading that was dropped at a flush point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedQuestion {
    pub section: String,
    pub question: String,
    pub reason: SkipReason,
}

/// Parser output with the diagnostics that plain parsing discards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    pub records: Vec<FaqRecord>,
    pub skipped: Vec<SkippedQuestion>,
    /// Body paragraphs seen before the first question heading.
    pub orphan_body_lines: usize,
}

#[derive(Debug)]
enum Phase {
    AwaitingQuestion,
    AccumulatingBody { question: String, body: String },
}

#[derive(Debug)]
struct ParseState {
    section: String,
    phase: Phase,
    report: ParseReport,
}

impl ParseState {
    fn new() -> Self {
        Self {
            section: String::new(),
            phase: Phase::AwaitingQuestion,
            report: ParseReport::default(),
        }
    }

    fn step(mut self, paragraph: &Paragraph) -> Self {
        let text = normalize(&paragraph.text);
        if text.is_empty() {
            return self;
        }

        match paragraph.style {
            StyleLabel::SectionHeading => {
                debug!("Found section heading: {}", text);
                self.section = text;
            }
            StyleLabel::QuestionHeading => {
                self.flush();
                self.phase = Phase::AccumulatingBody {
                    question: text,
                    body: String::new(),
                };
            }
            StyleLabel::Body | StyleLabel::Other => match &mut self.phase {
                Phase::AccumulatingBody { body, .. } => {
                    body.push('\n');
                    body.push_str(&text);
                }
                Phase::AwaitingQuestion => self.report.orphan_body_lines += 1,
            },
        }

        self
    }

    /// Emit the open question if section, question and body are all present.
    fn flush(&mut self) {
        let Phase::AccumulatingBody { question, body } =
            mem::replace(&mut self.phase, Phase::AwaitingQuestion)
        else {
            return;
        };

        let text = body.trim();
        let reason = if text.is_empty() {
            Some(SkipReason::EmptyBody)
        } else if self.section.is_empty() {
            Some(SkipReason::MissingSection)
        } else {
            None
        };

        match reason {
            None => {
                debug!("Added question: {} under section: {}", question, self.section);
                self.report.records.push(FaqRecord {
                    text: text.to_string(),
                    section: self.section.clone(),
                    question,
                });
            }
            Some(reason) => {
                debug!("Skipping question {:?}: {:?}", question, reason);
                self.report.skipped.push(SkippedQuestion {
                    section: self.section.clone(),
                    question,
                    reason,
                });
            }
        }
    }

    fn finish(mut self) -> ParseReport {
        self.flush();
        self.report
    }
}

/// Rebuilds section/question/answer structure from styled paragraphs.
#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchyParser;

impl HierarchyParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse paragraphs into records, dropping incomplete questions.
    pub fn parse(&self, paragraphs: &[Paragraph]) -> Vec<FaqRecord> {
        self.parse_with_report(paragraphs).records
    }

    /// Parse paragraphs and report which questions were dropped.
    pub fn parse_with_report(&self, paragraphs: &[Paragraph]) -> ParseReport {
        let report = paragraphs
            .iter()
            .fold(ParseState::new(), ParseState::step)
            .finish();

        if !report.skipped.is_empty() {
            warn!(
                "Dropped {} question(s) without a section or answer text",
                report.skipped.len()
            );
        }

        report
    }
}

/// Parse paragraphs into FAQ records.
pub fn parse_paragraphs(paragraphs: &[Paragraph]) -> Vec<FaqRecord> {
    HierarchyParser::new().parse(paragraphs)
}
