//! Character scanner for the lenient CSV dialect.
//!
//! The scanner keeps only the field being built, the row being built and the
//! quoting flag. Each character is looked at once; the only lookahead is a
//! single `peek` to tell an escaped `""` from a closing quote.

use crate::RawRow;
use std::iter::Peekable;
use std::str::Chars;

const BOM: char = '\u{feff}';

/// Scanner state for one run over some text.
#[derive(Debug)]
struct Scanner {
    field: String,
    row: Vec<String>,
    in_quotes: bool,
    /// Current physical line (1-based).
    line: usize,
    /// Line on which the row being built started.
    row_start: usize,
    rows: Vec<RawRow>,
}

impl Scanner {
    fn new(first_line: usize) -> Self {
        Scanner {
            field: String::new(),
            row: Vec::new(),
            in_quotes: false,
            line: first_line,
            row_start: first_line,
            rows: Vec::new(),
        }
    }

    fn end_field(&mut self) {
        self.row.push(std::mem::take(&mut self.field));
    }

    fn end_row(&mut self) {
        self.end_field();
        let row = RawRow { line: self.row_start, fields: std::mem::take(&mut self.row) };
        if row.is_blank() {
            tracing::trace!(line = row.line, "csv: dropping blank row");
        } else {
            tracing::trace!(line = row.line, fields = row.fields.len(), "csv: row");
            self.rows.push(row);
        }
    }

    fn feed(&mut self, c: char, rest: &mut Peekable<Chars<'_>>) {
        match c {
            '"' if self.in_quotes && rest.peek() == Some(&'"') => {
                rest.next();
                self.field.push('"');
            }
            '"' => self.in_quotes = !self.in_quotes,
            '\r' => {}
            ',' if !self.in_quotes => self.end_field(),
            '\n' if !self.in_quotes => {
                self.end_row();
                self.line += 1;
                self.row_start = self.line;
            }
            '\n' => {
                self.field.push('\n');
                self.line += 1;
            }
            _ => self.field.push(c),
        }
    }

    /// Flush whatever is open at end of input, quoted or not.
    fn finish(mut self) -> Vec<RawRow> {
        if !self.field.is_empty() || !self.row.is_empty() {
            if self.in_quotes {
                tracing::debug!(line = self.row_start, "csv: unterminated quote flushed at end of input");
            }
            self.end_row();
        }
        self.rows
    }
}

/// Tokenize a whole file's text into non-blank rows.
pub(crate) fn scan(text: &str) -> Vec<RawRow> {
    run(text, 1)
}

/// Tokenize a single physical line. Returns `None` for a blank line.
///
/// `line` is the 1-based number reported on the returned row. A quote left
/// open at the end of the line is closed there; records spanning several
/// lines need [`scan`].
pub(crate) fn scan_line(text: &str, line: usize) -> Option<RawRow> {
    let text = text.strip_suffix('\n').unwrap_or(text);
    run(text, line).into_iter().next()
}

fn run(text: &str, first_line: usize) -> Vec<RawRow> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut scanner = Scanner::new(first_line);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        scanner.feed(c, &mut chars);
    }
    scanner.finish()
}
