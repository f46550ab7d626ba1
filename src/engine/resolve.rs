//! Resolution assembly.
//!
//! Runs every answer token through the matcher, drops repeats, then applies
//! the question-type policy:
//!
//! ```text
//! matched indices (token order, deduped)
//!        │
//!        ├─ empty       -> Fallback { raw }   answer_text = trimmed raw, no index
//!        ├─ MCQ         -> first index        answer_text = its clean text
//!        └─ MSQ         -> all indices        answer_text = texts joined " | ", no index
//! ```
//!
//! Repeats are detected on the *normalized* option text, so two options that
//! read the same count once. A repeated token is still a match; it is just not
//! selected twice.

use super::clean::{CleanOption, normalize_text};
use super::matcher::match_token;
use super::split::{AnswerToken, IndexBase, TokenOrigin, split_answer};
use super::trigger::AnswerShape;
use crate::{Outcome, QuestionType, Resolution, TokenTrace};
use std::collections::HashSet;

const MSQ_JOINER: &str = " | ";

/// Engine output before the caller decides what to do with diagnostics.
#[derive(Debug, Clone)]
pub(crate) struct Resolved {
    pub resolution: Resolution,
    pub shape: AnswerShape,
    pub traces: Vec<TokenTrace>,
}

pub(crate) fn resolve_options<S: AsRef<str>>(options: &[S], raw_answer: &str, qtype: QuestionType) -> Resolved {
    let clean: Vec<CleanOption> = options.iter().map(|o| CleanOption::new(o.as_ref())).collect();
    let raw = raw_answer.trim();
    let shape = AnswerShape::scan(raw);
    let tokens = compact_run_guard(split_answer(raw), &clean);

    let mut selected: Vec<usize> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut traces = Vec::with_capacity(tokens.len());

    for token in tokens {
        let found = match_token(&token, &clean);
        let duplicate = match found {
            Some(m) => {
                let fresh = seen.insert(clean[m.index].normalized.as_str());
                if fresh {
                    selected.push(m.index);
                }
                !fresh
            }
            None => false,
        };

        tracing::debug!(
            target: "answerkey::engine",
            token = %token.text,
            origin = ?token.origin,
            index = ?found.map(|m| m.index),
            rule = found.map(|m| m.rule.as_str()).unwrap_or("none"),
            duplicate,
            "token matched"
        );

        traces.push(TokenTrace {
            token: token.text,
            origin: token.origin,
            index: found.map(|m| m.index),
            rule: found.map(|m| m.rule),
            duplicate,
        });
    }

    let resolution = assemble(&clean, &selected, raw, qtype);
    Resolved { resolution, shape, traces }
}

/// Decide whether a compact letter run is a word or a list of letters.
///
/// The run is read back as one word when its normalized form equals an
/// option (`"Berlin"`, `"(Berlin)"`), or when it sits inside an option and at
/// least one of its letters is past the last option (`"Lond"` on four
/// options). A run whose letters all name options (`"ACD"`) stays exploded.
fn compact_run_guard(tokens: Vec<AnswerToken>, options: &[CleanOption]) -> Vec<AnswerToken> {
    let exploded = !tokens.is_empty() && tokens.iter().all(|t| t.origin == TokenOrigin::Letters);
    if !exploded {
        return tokens;
    }

    let word: String = tokens.iter().map(|t| t.text.as_str()).collect();
    let needle = normalize_text(&word);
    let equal = options.iter().any(|o| o.normalized == needle);
    let letters_fit = tokens.iter().all(|t| letter_in_range(&t.text, options.len()));
    let inside = !letters_fit && options.iter().any(|o| !o.normalized.is_empty() && o.normalized.contains(&needle));

    if equal || inside {
        vec![AnswerToken { text: word, origin: TokenOrigin::Split, base: IndexBase::ZeroThenOne }]
    } else {
        tokens
    }
}

fn letter_in_range(letter: &str, len: usize) -> bool {
    match letter.as_bytes() {
        [b] if b.is_ascii_alphabetic() => usize::from(b.to_ascii_uppercase() - b'A') < len,
        _ => false,
    }
}

fn assemble(options: &[CleanOption], selected: &[usize], raw: &str, qtype: QuestionType) -> Resolution {
    let option_texts: Vec<String> = options.iter().map(|o| o.text.clone()).collect();

    let Some(&first) = selected.first() else {
        return Resolution {
            option_texts,
            answer_text: raw.to_string(),
            correct_index: None,
            outcome: Outcome::Fallback { raw: raw.to_string() },
        };
    };

    match qtype {
        QuestionType::Mcq => Resolution {
            answer_text: option_texts[first].clone(),
            option_texts,
            correct_index: Some(first),
            outcome: Outcome::Resolved { indices: vec![first] },
        },
        QuestionType::Msq => Resolution {
            answer_text: selected.iter().map(|&i| option_texts[i].as_str()).collect::<Vec<_>>().join(MSQ_JOINER),
            option_texts,
            correct_index: None,
            outcome: Outcome::Resolved { indices: selected.to_vec() },
        },
    }
}
