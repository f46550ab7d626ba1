//! Option cleaning and comparison normalization.
//!
//! Two different views of an option exist:
//!
//! - the *clean* text (`strip_enum_prefix`), which is displayed and persisted;
//! - the *normalized* text (`normalize_text`), which is only ever compared.

/// Strip one leading enumeration marker such as `"A) "`, `"(B). "` or `"2: "`.
///
/// The marker is an optional `(`, a single letter or a one/two digit number,
/// one or more of `)` `.` `:` `-`, then whitespace. Only the first marker is
/// removed, so punctuation later in the option survives.
///
/// ```
/// use answerkey::strip_enum_prefix;
///
/// assert_eq!(strip_enum_prefix("(B). Paris"), "Paris");
/// assert_eq!(strip_enum_prefix("2: London"), "London");
/// assert_eq!(strip_enum_prefix("3.14"), "3.14");
/// ```
pub fn strip_enum_prefix(option: &str) -> String {
    let re = regex!(r"^\s*\(?(?:[A-Za-z]|[0-9]{1,2})[).:\-]+\s+");
    re.replace(option, "").trim().to_string()
}

/// Comparison form of a string: NBSP to space, lowercase, whitespace runs
/// collapsed, trimmed, and one trailing sentence-ending mark dropped.
///
/// ```
/// use answerkey::normalize_text;
///
/// assert_eq!(normalize_text("  New\u{a0}\u{a0}Delhi. "), "new delhi");
/// ```
pub fn normalize_text(text: &str) -> String {
    let lowered = text.replace('\u{a0}', " ").to_lowercase();
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.strip_suffix(|c: char| matches!(c, '.' | '!' | '?' | ';' | ':')) {
        Some(rest) => rest.trim_end().to_string(),
        None => collapsed,
    }
}

/// An option in both display and comparison form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CleanOption {
    pub text: String,
    pub normalized: String,
}

impl CleanOption {
    pub fn new(raw: &str) -> Self {
        let text = strip_enum_prefix(raw);
        let normalized = normalize_text(&text);
        CleanOption { text, normalized }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_common_markers() {
        let cases: Vec<(&str, &str)> = vec![
            ("Paris", "A) Paris"),
            ("Paris", "a) Paris"),
            ("Paris", "(B). Paris"),
            ("Paris", "(B) Paris"),
            ("London", "2: London"),
            ("London", "2. London"),
            ("London", "12- London"),
            ("London", "  C-  London "),
            ("Madrid", "D.\u{a0}Madrid"),
        ];
        for (expected, raw) in cases {
            assert_eq!(strip_enum_prefix(raw), expected, "raw {:?}", raw);
        }
    }

    #[test]
    fn leaves_unmarked_text_alone() {
        let cases = ["Paris", "3.14", "A", "1.5 kg", "e.g. something", "x-ray", "(sic)", "A)Paris"];
        for raw in cases {
            assert_eq!(strip_enum_prefix(raw), raw, "raw {:?}", raw);
        }
    }

    #[test]
    fn strips_only_the_first_marker() {
        assert_eq!(strip_enum_prefix("A) B. Smith"), "B. Smith");
    }

    #[test]
    fn strip_is_idempotent_for_single_marker() {
        for raw in ["A) Paris", "(2). London", "3: 4 apples", "Berlin", "b- well-known"] {
            let once = strip_enum_prefix(raw);
            assert_eq!(strip_enum_prefix(&once), once, "raw {:?}", raw);
        }
    }

    #[test]
    fn normalize_collapses_and_trims_one_mark() {
        let cases: Vec<(&str, &str)> = vec![
            ("paris", "Paris"),
            ("paris", "  PARIS. "),
            ("new delhi", "New \t Delhi"),
            ("new delhi", "New\u{a0}Delhi!"),
            ("wait.", "Wait.."),
            ("why", "why?"),
            ("", "   "),
        ];
        for (expected, raw) in cases {
            assert_eq!(normalize_text(raw), expected, "raw {:?}", raw);
        }
    }
}
