//! Token to option index matching.
//!
//! Rules are tried in a fixed order and the first hit wins:
//!
//! ```text
//! token ──┬─ single ASCII letter  -> A=0, B=1, ...           (Letter)
//!         ├─ all digits           -> zero-based, then one-based (ZeroBased / OneBased)
//!         ├─ normalized equality  -> first equal option       (ExactText)
//!         └─ containment          -> first overlapping option (Substring)
//! ```
//!
//! A rule that yields an index outside the option list does not count as a
//! hit; the next rule is tried. Every token goes through every rule, including
//! single letters produced by exploding a compact run (`"ACD"`).
//!
//! The digit rule is ambiguous by construction: with four options `"3"` is the
//! fourth option, with three options it is the third. Zero-based is tried
//! first to stay compatible with existing answer keys.

use super::clean::{CleanOption, normalize_text};
use super::split::{AnswerToken, IndexBase};

/// Which rule produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchRule {
    Letter,
    ZeroBased,
    OneBased,
    ExactText,
    Substring,
}

impl MatchRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchRule::Letter => "letter",
            MatchRule::ZeroBased => "zero_based",
            MatchRule::OneBased => "one_based",
            MatchRule::ExactText => "exact_text",
            MatchRule::Substring => "substring",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TokenMatch {
    pub index: usize,
    pub rule: MatchRule,
}

pub(crate) fn match_token(token: &AnswerToken, options: &[CleanOption]) -> Option<TokenMatch> {
    by_letter(&token.text, options.len())
        .or_else(|| by_number(&token.text, token.base, options.len()))
        .or_else(|| by_text(&token.text, options))
}

fn by_letter(text: &str, len: usize) -> Option<TokenMatch> {
    let [b] = text.as_bytes() else {
        return None;
    };
    if !b.is_ascii_alphabetic() {
        return None;
    }
    let index = usize::from(b.to_ascii_uppercase() - b'A');
    (index < len).then_some(TokenMatch { index, rule: MatchRule::Letter })
}

fn by_number(text: &str, base: IndexBase, len: usize) -> Option<TokenMatch> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: usize = text.parse().ok()?;

    let zero_based = || (n < len).then_some(TokenMatch { index: n, rule: MatchRule::ZeroBased });
    let one_based = || (n >= 1 && n <= len).then(|| TokenMatch { index: n - 1, rule: MatchRule::OneBased });

    match base {
        IndexBase::ZeroThenOne => zero_based().or_else(one_based),
        IndexBase::ZeroBased => zero_based(),
        IndexBase::OneBased => one_based(),
    }
}

fn by_text(text: &str, options: &[CleanOption]) -> Option<TokenMatch> {
    let needle = normalize_text(text);
    if needle.is_empty() {
        return None;
    }

    if let Some(index) = options.iter().position(|o| o.normalized == needle) {
        return Some(TokenMatch { index, rule: MatchRule::ExactText });
    }

    options
        .iter()
        .position(|o| !o.normalized.is_empty() && (needle.contains(&o.normalized) || o.normalized.contains(&needle)))
        .map(|index| TokenMatch { index, rule: MatchRule::Substring })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenOrigin;

    fn options(raw: &[&str]) -> Vec<CleanOption> {
        raw.iter().map(|s| CleanOption::new(s)).collect()
    }

    fn token(text: &str) -> AnswerToken {
        AnswerToken { text: text.to_string(), origin: TokenOrigin::Split, base: IndexBase::ZeroThenOne }
    }

    fn hit(text: &str, opts: &[CleanOption]) -> Option<(usize, MatchRule)> {
        match_token(&token(text), opts).map(|m| (m.index, m.rule))
    }

    #[test]
    fn rule_order() {
        let opts = options(&["A) Paris", "B) London", "C) Berlin", "D) Madrid"]);
        let cases: Vec<(Option<(usize, MatchRule)>, &str)> = vec![
            (Some((0, MatchRule::Letter)), "a"),
            (Some((2, MatchRule::Letter)), "C"),
            (Some((1, MatchRule::ZeroBased)), "1"),
            (Some((3, MatchRule::ZeroBased)), "3"),
            (Some((3, MatchRule::OneBased)), "4"),
            (None, "5"),
            (Some((2, MatchRule::ExactText)), "berlin"),
            (Some((3, MatchRule::ExactText)), "Madrid."),
            (Some((1, MatchRule::Substring)), "Lond"),
            (Some((0, MatchRule::Substring)), "Paris, France"),
            (None, "Rome"),
        ];
        for (expected, text) in cases {
            assert_eq!(hit(text, &opts), expected, "token {:?}", text);
        }
    }

    #[test]
    fn out_of_range_letter_falls_through_to_text() {
        let opts = options(&["x", "y", "z"]);
        assert_eq!(hit("z", &opts), Some((2, MatchRule::ExactText)));
    }

    #[test]
    fn exploded_letter_out_of_range_reaches_text_rules() {
        let opts = options(&["zebra", "quail"]);
        let exploded = AnswerToken { text: "Q".into(), origin: TokenOrigin::Letters, base: IndexBase::ZeroThenOne };
        assert_eq!(match_token(&exploded, &opts), Some(TokenMatch { index: 1, rule: MatchRule::Substring }));

        let in_range = AnswerToken { text: "b".into(), origin: TokenOrigin::Letters, base: IndexBase::ZeroThenOne };
        assert_eq!(match_token(&in_range, &opts), Some(TokenMatch { index: 1, rule: MatchRule::Letter }));
    }

    #[test]
    fn explicit_bases() {
        let opts = options(&["a1", "a2", "a3"]);
        let one = AnswerToken { text: "1".into(), origin: TokenOrigin::Range, base: IndexBase::OneBased };
        let zero = AnswerToken { text: "3".into(), origin: TokenOrigin::Range, base: IndexBase::ZeroBased };
        assert_eq!(match_token(&one, &opts), Some(TokenMatch { index: 0, rule: MatchRule::OneBased }));
        // "3" is out of range zero-based and must not fall back to one-based;
        // it still reaches the text rules and matches "a3" by containment.
        assert_eq!(match_token(&zero, &opts), Some(TokenMatch { index: 2, rule: MatchRule::Substring }));
    }

    #[test]
    fn empty_options_never_match_by_containment() {
        let opts = options(&["", "A) "]);
        assert_eq!(hit("anything", &opts), None);
    }

    #[test]
    fn no_options_no_match() {
        assert_eq!(hit("A", &[]), None);
        assert_eq!(hit("0", &[]), None);
    }
}
