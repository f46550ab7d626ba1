//! Seeding driver.
//!
//! Glue between a CSV file and whatever stores questions:
//!
//! ```text
//! text ── tokenize ──▶ header row ── ColumnLayout::from_headers
//!                      data rows  ── QuestionDraft::from_row ──▶ resolve_draft
//!                                                                   │
//!                                     ScoringPolicy ──▶ QuestionRecord ──▶ RecordSink
//!                                                                   │
//!                                                     unresolved ──▶ SeedReport
//! ```
//!
//! Rows never abort a batch. Only a missing header or a missing required
//! column fails the whole file, since no row could be interpreted.

#[path = "seed/draft.rs"]
mod draft;
#[path = "seed/policy.rs"]
mod policy;
#[path = "seed/report.rs"]
mod report;
#[path = "seed/sink.rs"]
mod sink;

pub use draft::{ColumnLayout, QuestionDraft, decode_options};
pub use policy::{Marks, ScoringPolicy};
pub use report::SeedReport;
pub use sink::{JsonLinesSink, MemorySink, RecordSink};

use crate::error::{Result, SeedError};
use crate::{HeaderMap, QuestionType, Resolution, resolve_draft, tokenize};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

/// Driver settings.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub scoring: ScoringPolicy,
    /// Trim whitespace around question text before building records.
    pub trim_fields: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        SeedConfig { scoring: ScoringPolicy::default(), trim_fields: true }
    }
}

/// One question ready to persist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionRecord {
    /// Name of the file or stream the row came from.
    pub source: String,
    pub line: usize,
    pub text: String,
    #[serde(rename = "type")]
    pub qtype: QuestionType,
    pub options: Vec<String>,
    pub answer_text: String,
    pub correct_index: Option<usize>,
    pub marks: f64,
    pub negative_marks: f64,
}

impl QuestionRecord {
    fn build(source: &str, draft: &QuestionDraft, resolution: Resolution, marks: Marks, trim: bool) -> Self {
        let text = if trim { draft.text.trim().to_string() } else { draft.text.clone() };
        QuestionRecord {
            source: source.to_string(),
            line: draft.line,
            text,
            qtype: draft.qtype,
            options: resolution.option_texts,
            answer_text: resolution.answer_text,
            correct_index: resolution.correct_index,
            marks: marks.marks,
            negative_marks: marks.negative,
        }
    }
}

/// Runs CSV answer keys through the resolver and into a sink.
#[derive(Debug, Clone, Default)]
pub struct Seeder {
    config: SeedConfig,
}

impl Seeder {
    pub fn new(config: SeedConfig) -> Self {
        Seeder { config }
    }

    pub fn config(&self) -> &SeedConfig {
        &self.config
    }

    /// Read `path` and seed its contents. The file name is used as the source.
    pub fn seed_file(&self, path: &Path, sink: &mut dyn RecordSink) -> Result<SeedReport> {
        let text =
            std::fs::read_to_string(path).map_err(|source| SeedError::Io { path: path.to_path_buf(), source })?;
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.seed_text(&source, &text, sink)
    }

    /// Seed already loaded CSV text.
    pub fn seed_text(&self, source: &str, text: &str, sink: &mut dyn RecordSink) -> Result<SeedReport> {
        let started = Instant::now();
        let mut rows = tokenize(text).into_iter();

        let header = rows.next().ok_or_else(|| SeedError::EmptyInput { source_name: source.to_string() })?;
        let headers = HeaderMap::from_row(&header);
        let layout = ColumnLayout::from_headers(&headers)
            .map_err(|column| SeedError::MissingColumn { source_name: source.to_string(), column })?;
        tracing::debug!(source, ?layout, "seed: column layout");

        let mut report = SeedReport::new(source);
        for row in rows {
            let draft = QuestionDraft::from_row(&layout, &row);
            let resolution = resolve_draft(&draft, &mut report.unresolved);
            report.record(draft.qtype, resolution.is_resolved());

            let marks = self.config.scoring.marks_for(draft.qtype);
            let record = QuestionRecord::build(source, &draft, resolution, marks, self.config.trim_fields);
            sink.upsert(&record)?;
        }

        report.elapsed = started.elapsed();
        if let Some(line) = report.warning_line() {
            tracing::warn!("{line}");
        }
        tracing::info!(source, rows = report.rows, unresolved = report.unresolved.len(), "seed: done");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GATE_CSV: &str = "\u{feff}Question,Type,Options_JSON,Answer\r\n\
        \"Capital of France?\",mcq,\"[\"\"A) Paris\"\",\"\"B) London\"\"]\",A\r\n\
        \"Primes?\",MSQ,2|3|4|5,\"A, B, D\"\r\n\
        \"Broken\",mcq,\"[oops\",Zzzqqq\r\n\
        \r\n\
        \"Untyped\",,Red|Green|Blue,(2)\r\n";

    #[test]
    fn seeds_mixed_rows() {
        let mut sink = MemorySink::default();
        let report = Seeder::default().seed_text("gate.csv", GATE_CSV, &mut sink).unwrap();

        assert_eq!(report.rows, 4);
        assert_eq!(report.resolved, 3);
        assert_eq!(report.mcq, 3);
        assert_eq!(report.msq, 1);
        assert_eq!(report.unresolved.len(), 1);
        assert_eq!(report.unresolved[0].raw, "Zzzqqq");

        let records = &sink.records;
        assert_eq!(records.len(), 4);

        assert_eq!(records[0].text, "Capital of France?");
        assert_eq!(records[0].options, vec!["Paris", "London"]);
        assert_eq!(records[0].correct_index, Some(0));
        assert_eq!(records[0].line, 2);

        assert_eq!(records[1].qtype, QuestionType::Msq);
        assert_eq!(records[1].answer_text, "2 | 3 | 5");
        assert_eq!(records[1].correct_index, None);
        assert_eq!(records[1].negative_marks, 0.0);

        // "[oops" is not JSON, so it is split on pipes into a single option.
        assert_eq!(records[2].options, vec!["[oops"]);
        assert_eq!(records[2].answer_text, "Zzzqqq");
        assert_eq!(records[2].correct_index, None);

        assert_eq!(records[3].qtype, QuestionType::Mcq);
        assert_eq!(records[3].answer_text, "Blue");
        assert_eq!(records[3].line, 6);
    }

    #[test]
    fn scoring_follows_type() {
        let config = SeedConfig {
            scoring: ScoringPolicy {
                mcq: Marks { marks: 2.0, negative: 0.66 },
                msq: Marks { marks: 2.0, negative: 0.0 },
            },
            ..SeedConfig::default()
        };
        let mut sink = MemorySink::default();
        Seeder::new(config).seed_text("s.csv", GATE_CSV, &mut sink).unwrap();
        assert_eq!(sink.records[0].marks, 2.0);
        assert_eq!(sink.records[0].negative_marks, 0.66);
        assert_eq!(sink.records[1].negative_marks, 0.0);
    }

    #[test]
    fn empty_input_is_an_error() {
        let mut sink = MemorySink::default();
        let err = Seeder::default().seed_text("empty.csv", "\u{feff}\r\n\r\n", &mut sink).unwrap_err();
        assert!(matches!(err, SeedError::EmptyInput { .. }));
    }

    #[test]
    fn missing_answer_column_is_an_error() {
        let mut sink = MemorySink::default();
        let err = Seeder::default().seed_text("x.csv", "type,options_json\nmcq,A|B\n", &mut sink).unwrap_err();
        match err {
            SeedError::MissingColumn { column, .. } => assert_eq!(column, "answer"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_only_file_is_an_empty_batch() {
        let mut sink = MemorySink::default();
        let report = Seeder::default().seed_text("h.csv", "type,options_json,answer\n", &mut sink).unwrap();
        assert_eq!(report.rows, 0);
        assert!(report.warning_line().is_none());
        assert!(sink.records.is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut sink = MemorySink::default();
        let err = Seeder::default().seed_file(Path::new("/definitely/not/here.csv"), &mut sink).unwrap_err();
        assert!(matches!(err, SeedError::Io { .. }));
    }
}
