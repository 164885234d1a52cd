//! Document decoders producing styled paragraphs.

mod docx;

pub use docx::DocxParser;

#[cfg(test)]
pub(crate) use docx::{build_docx, styled};

use faqsync_config::{style_key, StyleConfig};
use faqsync_core::StyleLabel;

/// Maps paragraph style names onto structural labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleMap {
    section: String,
    question: String,
}

impl StyleMap {
    /// Build a map from the style names of the section and question headings.
    pub fn new(section: &str, question: &str) -> Self {
        Self {
            section: style_key(section),
            question: style_key(question),
        }
    }

    pub fn from_config(config: &StyleConfig) -> Self {
        Self::new(&config.section, &config.question)
    }

    /// Classify a style name. Unstyled and `Normal` paragraphs are body text.
    pub fn classify(&self, style: Option<&str>) -> StyleLabel {
        let key = match style {
            Some(s) => style_key(s),
            None => return StyleLabel::Body,
        };

        if key == self.section {
            StyleLabel::SectionHeading
        } else if key == self.question {
            StyleLabel::QuestionHeading
        } else if key.is_empty() || key == "normal" {
            StyleLabel::Body
        } else {
            StyleLabel::Other
        }
    }
}

impl Default for StyleMap {
    fn default() -> Self {
        Self::from_config(&StyleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_default_styles() {
        let map = StyleMap::default();
        assert_eq!(map.classify(Some("Heading1")), StyleLabel::SectionHeading);
        assert_eq!(map.classify(Some("heading 1")), StyleLabel::SectionHeading);
        assert_eq!(map.classify(Some("Heading2")), StyleLabel::QuestionHeading);
        assert_eq!(map.classify(Some("Heading3")), StyleLabel::Other);
        assert_eq!(map.classify(Some("Title")), StyleLabel::Other);
        assert_eq!(map.classify(Some("Normal")), StyleLabel::Body);
        assert_eq!(map.classify(None), StyleLabel::Body);
    }

    #[test]
    fn test_classify_custom_styles() {
        let map = StyleMap::new("Title", "Heading 3");
        assert_eq!(map.classify(Some("Title")), StyleLabel::SectionHeading);
        assert_eq!(map.classify(Some("Heading3")), StyleLabel::QuestionHeading);
        assert_eq!(map.classify(Some("Heading1")), StyleLabel::Other);
    }
}
