//! Record sinks.
//!
//! Persistence lives outside this crate. A sink is the seam where records
//! leave: a database upsert in production, JSON lines for the CLI, a vector
//! in tests.

use super::QuestionRecord;
use crate::error::{Result, SeedError};
use std::io::Write;

pub trait RecordSink {
    fn upsert(&mut self, record: &QuestionRecord) -> Result<()>;
}

/// Collects records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<QuestionRecord>,
}

impl RecordSink for MemorySink {
    fn upsert(&mut self, record: &QuestionRecord) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

/// Writes one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        JsonLinesSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn upsert(&mut self, record: &QuestionRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record).map_err(|e| SeedError::Sink(e.to_string()))?;
        self.writer.write_all(b"\n").map_err(|e| SeedError::Sink(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuestionType;

    fn record() -> QuestionRecord {
        QuestionRecord {
            source: "s.csv".into(),
            line: 2,
            text: "Q".into(),
            qtype: QuestionType::Msq,
            options: vec!["x".into(), "y".into()],
            answer_text: "x | y".into(),
            correct_index: None,
            marks: 1.0,
            negative_marks: 0.0,
        }
    }

    #[test]
    fn json_lines_shape() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.upsert(&record()).unwrap();
        sink.upsert(&record()).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["type"], "msq");
        assert_eq!(value["answer_text"], "x | y");
        assert!(value["correct_index"].is_null());
    }
}
