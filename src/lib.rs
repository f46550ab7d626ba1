//! Answer-key resolution for question-bank seeding.
//!
//! The crate has two leaf components and a thin driver on top:
//!
//! - [`tokenize`] / [`tokenize_line`]: a lenient CSV scanner that never fails.
//! - [`resolve`] / [`resolve_verbose`]: maps a hand-written answer cell
//!   (`"A"`, `"1-3"`, `["B","D"]`, free text, ...) onto a cleaned option list.
//! - [`Seeder`]: header mapping, option decoding, scoring policy and record
//!   hand-off to a [`RecordSink`].
//!
//! ```
//! use answerkey::{QuestionType, resolve};
//!
//! let mut unresolved = Vec::new();
//! let res = resolve(&["A) Paris", "B) London", "C) Berlin"], "c", QuestionType::Mcq, &mut unresolved);
//! assert_eq!(res.correct_index, Some(2));
//! assert_eq!(res.answer_text, "Berlin");
//! assert!(unresolved.is_empty());
//! ```

#[macro_use]
mod macros;
mod api;
mod csv;
mod engine;
mod error;
mod seed;

pub use api::{
    Outcome, Resolution, ResolutionDetails, TokenTrace, UnresolvedEntry, resolve, resolve_draft, resolve_verbose,
    tokenize, tokenize_line,
};
pub use csv::HeaderMap;
pub use engine::{
    AnswerShape, AnswerToken, IndexBase, MatchRule, TokenOrigin, normalize_text, split_answer, strip_enum_prefix,
};
pub use error::{Result, SeedError};
pub use seed::{
    ColumnLayout, JsonLinesSink, Marks, MemorySink, QuestionDraft, QuestionRecord, RecordSink, ScoringPolicy,
    SeedConfig, SeedReport, Seeder, decode_options,
};

use serde::{Deserialize, Serialize};
use std::fmt;

// --- Shared types -------------------------------------------------------------

/// Declared kind of a question.
///
/// Only `"msq"` (case-insensitive) selects [`QuestionType::Msq`]; every other
/// value, including an empty cell, is treated as single-correct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    #[default]
    Mcq,
    Msq,
}

impl QuestionType {
    pub fn from_cell(cell: &str) -> Self {
        if cell.trim().eq_ignore_ascii_case("msq") { QuestionType::Msq } else { QuestionType::Mcq }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Mcq => "mcq",
            QuestionType::Msq => "msq",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Literal fields of one CSV record, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based physical line the record starts on.
    pub line: usize,
    pub fields: Vec<String>,
}

impl RawRow {
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.fields.get(idx).map(String::as_str)
    }

    /// True when every field is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|f| f.trim().is_empty())
    }
}
