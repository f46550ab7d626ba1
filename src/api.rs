use crate::engine::{self, AnswerShape, MatchRule, TokenOrigin};
use crate::{QuestionDraft, QuestionType, RawRow, csv};
use serde::Serialize;
use std::time::{Duration, Instant};

/// How a resolution ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// At least one token matched. `indices` are the selected option indices
    /// (one for MCQ, every distinct match for MSQ) in token order.
    Resolved { indices: Vec<usize> },
    /// Nothing matched; the trimmed raw answer is kept as the answer text.
    Fallback { raw: String },
}

/// Canonical answer for one question.
///
/// `correct_index`, when present, is a valid index into `option_texts`. It is
/// always `None` for MSQ and for fallbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Options with enumeration markers stripped, in input order.
    pub option_texts: Vec<String>,
    pub answer_text: String,
    pub correct_index: Option<usize>,
    pub outcome: Outcome,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self.outcome, Outcome::Resolved { .. })
    }

    /// Diagnostic record for a fallback, `None` when resolved.
    pub fn unresolved_entry(&self) -> Option<UnresolvedEntry> {
        match &self.outcome {
            Outcome::Fallback { raw } => Some(UnresolvedEntry { raw: raw.clone(), options: self.option_texts.clone() }),
            Outcome::Resolved { .. } => None,
        }
    }
}

/// A raw answer that matched no option. Diagnostic only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedEntry {
    pub raw: String,
    pub options: Vec<String>,
}

/// What happened to a single answer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTrace {
    pub token: String,
    pub origin: TokenOrigin,
    pub index: Option<usize>,
    pub rule: Option<MatchRule>,
    /// Matched an option that an earlier token already selected.
    pub duplicate: bool,
}

/// Result of [`resolve_verbose`]: the resolution plus how it was reached.
#[derive(Debug, Clone)]
pub struct ResolutionDetails {
    pub resolution: Resolution,
    pub shape: AnswerShape,
    pub tokens: Vec<TokenTrace>,
    pub elapsed: Duration,
}

/// Tokenize a whole CSV text into non-blank rows.
///
/// A leading BOM is dropped, `\r` is ignored everywhere and an unterminated
/// quote runs to the end of input. This never fails.
///
/// # Example
/// ```
/// let rows = answerkey::tokenize("a,\"b,c\",\"d\"\"e\"\nf,g,h\n");
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0].fields, ["a", "b,c", "d\"e"]);
/// ```
pub fn tokenize(text: &str) -> Vec<RawRow> {
    csv::scan(text)
}

/// Tokenize one physical line. `line` is the 1-based number to report.
///
/// Returns `None` when the line is blank. Quoted newlines cannot occur on a
/// single line, so a quote still open at the end is closed there.
pub fn tokenize_line(text: &str, line: usize) -> Option<RawRow> {
    csv::scan_line(text, line)
}

/// Resolve `raw_answer` against `options`.
///
/// Options may still carry enumeration markers (`"A) Paris"`); they are
/// cleaned here. When nothing matches, the result falls back to the trimmed
/// raw answer and one [`UnresolvedEntry`] is appended to `unresolved`.
///
/// # Example
/// ```
/// use answerkey::{QuestionType, resolve};
///
/// let mut unresolved = Vec::new();
/// let res = resolve(&["A", "B", "C", "D"], "1-3", QuestionType::Msq, &mut unresolved);
/// assert_eq!(res.answer_text, "A | B | C");
/// assert_eq!(res.correct_index, None);
/// ```
pub fn resolve<S: AsRef<str>>(
    options: &[S],
    raw_answer: &str,
    qtype: QuestionType,
    unresolved: &mut Vec<UnresolvedEntry>,
) -> Resolution {
    let resolution = engine::resolve_options(options, raw_answer, qtype).resolution;
    if let Some(entry) = resolution.unresolved_entry() {
        unresolved.push(entry);
    }
    resolution
}

/// [`resolve`] for a [`QuestionDraft`].
pub fn resolve_draft(draft: &QuestionDraft, unresolved: &mut Vec<UnresolvedEntry>) -> Resolution {
    resolve(&draft.raw_options, &draft.raw_answer, draft.qtype, unresolved)
}

/// Resolve and also return the per-token trace. Does not record diagnostics.
pub fn resolve_verbose<S: AsRef<str>>(options: &[S], raw_answer: &str, qtype: QuestionType) -> ResolutionDetails {
    let started = Instant::now();
    let resolved = engine::resolve_options(options, raw_answer, qtype);
    ResolutionDetails {
        resolution: resolved.resolution,
        shape: resolved.shape,
        tokens: resolved.traces,
        elapsed: started.elapsed(),
    }
}
