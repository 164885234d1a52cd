//! Line cleanup applied to every paragraph before parsing.

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Trim surrounding whitespace and stray byte-order marks from a line.
///
/// Both are stripped in the same pass, so a BOM hidden behind whitespace (or
/// the reverse) is removed too and the result is a fixed point.
pub fn normalize(line: &str) -> String {
    line.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(normalize("  What is X?\t\n"), "What is X?");
        assert_eq!(normalize("inner  spaces stay"), "inner  spaces stay");
    }

    #[test]
    fn test_strips_byte_order_mark() {
        assert_eq!(normalize("\u{FEFF}General"), "General");
        assert_eq!(normalize(" \u{FEFF} General \u{FEFF}"), "General");
        assert_eq!(normalize("\u{FEFF}"), "");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t \n"), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "plain",
            "  padded  ",
            "\u{FEFF} mixed \u{FEFF}",
            "\u{FEFF}\u{FEFF}double",
            "\u{a0}non-breaking\u{a0}",
            "keeps \u{FEFF} inside",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
