use crate::{QuestionType, UnresolvedEntry};
use std::time::Duration;

/// Outcome of seeding one source.
#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    pub source: String,
    /// Data rows processed (header and blank rows excluded).
    pub rows: usize,
    pub resolved: usize,
    pub mcq: usize,
    pub msq: usize,
    /// Answers that matched no option, in row order.
    pub unresolved: Vec<UnresolvedEntry>,
    pub elapsed: Duration,
}

impl SeedReport {
    pub fn new(source: &str) -> Self {
        SeedReport { source: source.to_string(), ..SeedReport::default() }
    }

    pub(crate) fn record(&mut self, qtype: QuestionType, resolved: bool) {
        self.rows += 1;
        if resolved {
            self.resolved += 1;
        }
        match qtype {
            QuestionType::Mcq => self.mcq += 1,
            QuestionType::Msq => self.msq += 1,
        }
    }

    /// One operator-facing line: count plus the first example, or `None` when
    /// every answer resolved.
    pub fn warning_line(&self) -> Option<String> {
        let first = self.unresolved.first()?;
        let shown: Vec<String> = first.options.iter().take(6).map(|o| format!("{o:?}")).collect();
        let more = if first.options.len() > shown.len() { ", ..." } else { "" };
        Some(format!(
            "{}: {} unresolved answer(s); e.g. {:?} against [{}{}]. Fix the CSV and re-run.",
            self.source,
            self.unresolved.len(),
            first.raw,
            shown.join(", "),
            more
        ))
    }
}
