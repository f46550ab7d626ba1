//! Answer resolution engine.
//!
//! Resolution turns one row's raw options and raw answer into a canonical
//! [`Resolution`](crate::Resolution). The work is split into small stages:
//!
//! ```text
//! raw options ── strip_enum_prefix ──▶ CleanOption { text, normalized }
//!                  (clean.rs)                        │
//!                                                     │
//! raw answer ── AnswerShape::scan ──▶ split_answer ──┼──▶ match_token (per token)
//!                (trigger.rs)         (split.rs)     │     (matcher.rs)
//!                                                     v
//!                                            resolve_options (resolve.rs)
//!                                              - dedup by normalized text
//!                                              - MCQ: first match wins
//!                                              - MSQ: " | "-joined set
//!                                              - no match: raw fallback
//! ```
//!
//! ## Responsibilities by module
//!
//! - `clean.rs`: enumeration-prefix stripping for display, text normalization
//!   for comparisons.
//! - `trigger.rs`: cheap shape scan of the raw answer used to skip stages that
//!   cannot apply (JSON decoding, range expansion).
//! - `split.rs`: answer tokenization (JSON array, separator split, compact
//!   letter runs, `X-Y` ranges).
//! - `matcher.rs`: the ordered token → option index rules.
//! - `resolve.rs`: assembly under MCQ/MSQ policy, plus a per-token trace.
//!
//! Everything in here is pure. Nothing panics on malformed input and nothing
//! returns an error: the worst case is the raw-text fallback.
//!
//! ## Debugging
//!
//! Per-token decisions are emitted as `tracing` events at `debug` level under
//! the `answerkey::engine` target.

#[path = "engine/clean.rs"]
mod clean;
#[path = "engine/matcher.rs"]
mod matcher;
#[path = "engine/resolve.rs"]
mod resolve;
#[path = "engine/split.rs"]
mod split;
#[path = "engine/trigger.rs"]
mod trigger;


pub use clean::{normalize_text, strip_enum_prefix};
pub use matcher::MatchRule;
pub(crate) use resolve::resolve_options;
pub use split::{AnswerToken, IndexBase, TokenOrigin, split_answer};
pub use trigger::AnswerShape;
