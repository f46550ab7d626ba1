use crate::RawRow;
use std::collections::HashMap;

/// Case-insensitive column lookup built from a header row.
///
/// Names are trimmed and lowercased. When a name repeats, the first column
/// wins.
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    columns: HashMap<String, usize>,
    names: Vec<String>,
}

impl HeaderMap {
    pub fn from_row(row: &RawRow) -> Self {
        let names: Vec<String> = row.fields.iter().map(|f| f.trim().to_lowercase()).collect();
        let mut columns = HashMap::new();
        for (idx, name) in names.iter().enumerate() {
            if !name.is_empty() {
                columns.entry(name.clone()).or_insert(idx);
            }
        }
        HeaderMap { columns, names }
    }

    /// Index of the first alias present in the header.
    pub fn position(&self, aliases: &[&str]) -> Option<usize> {
        aliases.iter().find_map(|a| self.columns.get(*a).copied())
    }

    /// Cell of `row` under the first alias present in the header.
    ///
    /// Short rows yield `None` for columns past their end.
    pub fn get<'r>(&self, row: &'r RawRow, aliases: &[&str]) -> Option<&'r str> {
        self.position(aliases).and_then(|idx| row.get(idx))
    }

    /// Normalized header names, in column order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}
