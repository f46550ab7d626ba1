//! CSV tokenizing and header mapping.
//!
//! The scanner in `csv/tokenizer.rs` accepts the loose dialect found in
//! hand-maintained spreadsheet exports:
//!
//! ```text
//! text ── strip BOM ──▶ Scanner (one pass, 1 char lookahead) ──▶ Vec<RawRow>
//!                          │
//!                          ├─ ','  outside quotes  -> end field
//!                          ├─ '\n' outside quotes  -> end row (blank rows dropped)
//!                          ├─ '"'                  -> toggle quoting ("" inside = literal ")
//!                          └─ '\r'                 -> ignored
//! ```
//!
//! Nothing here returns an error. An unterminated quote simply runs to the end
//! of input, where the open field and row are flushed.
//!
//! `csv/header.rs` turns the first row into a case-insensitive column lookup.

#[path = "csv/header.rs"]
mod header;
#[path = "csv/tokenizer.rs"]
mod tokenizer;

pub use header::HeaderMap;
pub(crate) use tokenizer::{scan, scan_line};
