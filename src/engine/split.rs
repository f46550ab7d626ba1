//! Answer tokenization.
//!
//! Priority, highest first:
//!
//! ```text
//! 1. whole string is a JSON array   -> one token per element (short-circuit)
//! 2. split on [,;/|&\s]+            -> tokens
//! 3. exactly one all-letter token   -> one token per letter   ("ACD")
//! 4. whole string is X-Y            -> inclusive range of at most 64 tokens, replaces 2-3
//! ```
//!
//! Every token then loses wrapping punctuation (`(2)` -> `2`, `B.` -> `B`) and
//! empty tokens are dropped.

use super::trigger::AnswerShape;
use serde_json::Value;

/// A range may expand to at most this many tokens (`"1-64"`). Anything wider
/// (`"1-65"`) is not a range and goes through the separator split.
const MAX_RANGE_SPAN: u64 = 64;

/// Where a token came from. Matching treats some origins differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenOrigin {
    Json,
    Split,
    /// One letter of a compact run such as `"ACD"`.
    Letters,
    Range,
}

/// How an all-digit token is read as an option index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexBase {
    /// Zero-based when in range, otherwise one-based.
    ZeroThenOne,
    ZeroBased,
    OneBased,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerToken {
    pub text: String,
    pub origin: TokenOrigin,
    pub base: IndexBase,
}

impl AnswerToken {
    fn new(text: impl Into<String>, origin: TokenOrigin) -> Self {
        AnswerToken { text: text.into(), origin, base: IndexBase::ZeroThenOne }
    }
}

/// Split a raw answer cell into candidate tokens.
///
/// ```
/// use answerkey::split_answer;
///
/// let texts = |raw: &str| split_answer(raw).into_iter().map(|t| t.text).collect::<Vec<_>>();
/// assert_eq!(texts("A, C"), ["A", "C"]);
/// assert_eq!(texts("ACD"), ["A", "C", "D"]);
/// assert_eq!(texts("B-D"), ["B", "C", "D"]);
/// assert_eq!(texts(r#"["B","D"]"#), ["B", "D"]);
/// ```
pub fn split_answer(raw: &str) -> Vec<AnswerToken> {
    let trimmed = raw.trim();
    let shape = AnswerShape::scan(trimmed);

    let json = if shape.contains(AnswerShape::JSON_ARRAYISH) { json_tokens(trimmed) } else { None };
    let range = || if shape.contains(AnswerShape::RANGEISH) { expand_range(trimmed) } else { None };
    let tokens = json.or_else(range).unwrap_or_else(|| separator_tokens(trimmed));

    tokens
        .into_iter()
        .filter_map(|mut t| {
            t.text = unwrap_token(&t.text).to_string();
            if t.text.is_empty() { None } else { Some(t) }
        })
        .collect()
}

fn json_tokens(answer: &str) -> Option<Vec<AnswerToken>> {
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(answer) else {
        return None;
    };
    let tokens = items
        .into_iter()
        .filter_map(|item| match item {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        })
        .map(|s| AnswerToken::new(s, TokenOrigin::Json))
        .collect();
    Some(tokens)
}

fn separator_tokens(answer: &str) -> Vec<AnswerToken> {
    let parts: Vec<&str> = regex!(r"[,;/|&\s]+").split(answer).map(unwrap_token).filter(|p| !p.is_empty()).collect();

    if let [only] = parts.as_slice() {
        if only.chars().count() > 1 && only.chars().all(char::is_alphabetic) {
            return only.chars().map(|c| AnswerToken::new(c.to_string(), TokenOrigin::Letters)).collect();
        }
    }

    parts.into_iter().map(|p| AnswerToken::new(p, TokenOrigin::Split)).collect()
}

/// Expand `X-Y` where both ends are single letters or both are integers.
///
/// Endpoints are ordered ascending. Numeric ranges starting at 0 read their
/// numbers zero-based, all others one-based (`"1-3"` is first to third).
fn expand_range(answer: &str) -> Option<Vec<AnswerToken>> {
    let caps = regex!(r"^([A-Za-z]|[0-9]+)\s*-\s*([A-Za-z]|[0-9]+)$").captures(answer)?;
    let (lo, hi) = (caps.get(1)?.as_str(), caps.get(2)?.as_str());

    if let (Ok(a), Ok(b)) = (lo.parse::<u64>(), hi.parse::<u64>()) {
        let (start, end) = (a.min(b), a.max(b));
        if end - start >= MAX_RANGE_SPAN {
            return None;
        }
        let base = if start == 0 { IndexBase::ZeroBased } else { IndexBase::OneBased };
        let tokens = (start..=end)
            .map(|n| AnswerToken { text: n.to_string(), origin: TokenOrigin::Range, base })
            .collect();
        return Some(tokens);
    }

    let (a, b) = (single_ascii_letter(lo)?, single_ascii_letter(hi)?);
    let (start, end) = (a.min(b), a.max(b));
    Some((start..=end).map(|c| AnswerToken::new((c as char).to_string(), TokenOrigin::Range)).collect())
}

fn single_ascii_letter(s: &str) -> Option<u8> {
    match s.as_bytes() {
        [b] if b.is_ascii_alphabetic() => Some(b.to_ascii_uppercase()),
        _ => None,
    }
}

/// Trim wrapping punctuation authors put around a choice: `(2)`, `"B"`, `C.`.
fn unwrap_token(token: &str) -> &str {
    token.trim_matches(|c: char| matches!(c, '(' | ')' | '[' | ']' | '{' | '}' | '"' | '\'' | '.') || c.is_whitespace())
}
