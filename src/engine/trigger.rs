//! Answer shape scanning.
//!
//! A cheap pre-classification of the raw answer string. The splitter uses it
//! to skip stages that cannot apply: JSON decoding is only attempted on
//! bracketed input, range expansion only on input with a single dash.
//! False positives are fine since every stage still validates its input.
//!
//! Only `JSON_ARRAYISH` and `RANGEISH` gate a stage. The other flags are
//! diagnostics: they travel in `ResolutionDetails::shape` and are printed by
//! `answerkey explain`.

bitflags::bitflags! {
    /// Coarse features of a raw answer string.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AnswerShape: u8 {
        const HAS_DIGITS    = 1 << 0;
        const HAS_LETTERS   = 1 << 1;
        const HAS_SEPARATOR = 1 << 2;
        /// Gates JSON array decoding.
        const JSON_ARRAYISH = 1 << 3;
        /// Gates range expansion.
        const RANGEISH      = 1 << 4;
        const WRAPPED       = 1 << 5;
    }
}

impl AnswerShape {
    /// Classify an already trimmed answer.
    pub fn scan(answer: &str) -> Self {
        let mut shape = AnswerShape::empty();

        if answer.bytes().any(|b| b.is_ascii_digit()) {
            shape |= AnswerShape::HAS_DIGITS;
        }
        if answer.chars().any(char::is_alphabetic) {
            shape |= AnswerShape::HAS_LETTERS;
        }
        if answer.chars().any(|c| matches!(c, ',' | ';' | '/' | '|' | '&') || c.is_whitespace()) {
            shape |= AnswerShape::HAS_SEPARATOR;
        }
        if answer.starts_with('[') && answer.ends_with(']') {
            shape |= AnswerShape::JSON_ARRAYISH;
        }
        if answer.matches('-').count() == 1 {
            shape |= AnswerShape::RANGEISH;
        }
        if answer.starts_with(['(', '"', '\'']) {
            shape |= AnswerShape::WRAPPED;
        }

        shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_flags() {
        assert_eq!(AnswerShape::scan("B"), AnswerShape::HAS_LETTERS);
        assert_eq!(AnswerShape::scan("1-3"), AnswerShape::HAS_DIGITS | AnswerShape::RANGEISH);

        let json = AnswerShape::scan(r#"["B","D"]"#);
        assert!(json.contains(AnswerShape::JSON_ARRAYISH | AnswerShape::HAS_SEPARATOR | AnswerShape::HAS_LETTERS));

        assert!(AnswerShape::scan("(2)").contains(AnswerShape::WRAPPED | AnswerShape::HAS_DIGITS));
        assert!(!AnswerShape::scan("1-2-3").contains(AnswerShape::RANGEISH));
        assert!(AnswerShape::scan("").is_empty());
    }
}
