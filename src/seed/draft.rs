use crate::{HeaderMap, QuestionType, RawRow};
use serde_json::Value;

const TEXT_COLUMNS: &[&str] = &["question", "question_text", "text"];
const TYPE_COLUMNS: &[&str] = &["type"];
const PACKED_OPTION_COLUMNS: &[&str] = &["options_json", "options"];
const ANSWER_COLUMNS: &[&str] = &["answer", "correct_answer", "answer_key"];

/// Per-option column names, in option order. A file may use letters or
/// numbers but not a mix; the first family found wins.
const SPREAD_OPTION_FAMILIES: &[&[&str]] = &[
    &["option_a", "option_b", "option_c", "option_d", "option_e", "option_f", "option_g", "option_h"],
    &["option_1", "option_2", "option_3", "option_4", "option_5", "option_6", "option_7", "option_8"],
];

/// Where a file keeps its options.
#[derive(Debug, Clone, PartialEq, Eq)]
enum OptionColumns {
    /// One cell holding a JSON array or a `|`-delimited list.
    Packed(usize),
    /// One cell per option.
    Spread(Vec<usize>),
}

/// Column positions resolved once from the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    text: Option<usize>,
    qtype: Option<usize>,
    options: OptionColumns,
    answer: usize,
}

impl ColumnLayout {
    /// Locate the columns the driver needs.
    ///
    /// The error names the first required column that is absent: `"answer"`
    /// or `"options_json"` (when neither a packed column nor any
    /// `option_*` column exists).
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, &'static str> {
        let answer = headers.position(ANSWER_COLUMNS).ok_or("answer")?;

        let options = match headers.position(PACKED_OPTION_COLUMNS) {
            Some(idx) => OptionColumns::Packed(idx),
            None => {
                let spread = SPREAD_OPTION_FAMILIES
                    .iter()
                    .map(|family| family.iter().filter_map(|name| headers.position(&[*name])).collect::<Vec<_>>())
                    .find(|cols| !cols.is_empty())
                    .ok_or("options_json")?;
                OptionColumns::Spread(spread)
            }
        };

        Ok(ColumnLayout {
            text: headers.position(TEXT_COLUMNS),
            qtype: headers.position(TYPE_COLUMNS),
            options,
            answer,
        })
    }
}

/// One data row before answer resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub line: usize,
    pub text: String,
    pub qtype: QuestionType,
    /// Options as authored, possibly with enumeration markers.
    pub raw_options: Vec<String>,
    pub raw_answer: String,
}

impl QuestionDraft {
    /// Build a draft from a data row. Missing cells read as empty; trailing
    /// blank `option_*` cells are dropped.
    pub fn from_row(layout: &ColumnLayout, row: &RawRow) -> Self {
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).unwrap_or("");

        let raw_options = match &layout.options {
            OptionColumns::Packed(idx) => decode_options(cell(Some(*idx))),
            OptionColumns::Spread(cols) => {
                let mut options: Vec<String> = cols.iter().map(|&i| cell(Some(i)).trim().to_string()).collect();
                // Interior blanks keep their slot so letters still line up.
                while options.last().is_some_and(|s| s.is_empty()) {
                    options.pop();
                }
                options
            }
        };

        QuestionDraft {
            line: row.line,
            text: cell(layout.text).to_string(),
            qtype: QuestionType::from_cell(cell(layout.qtype)),
            raw_options,
            raw_answer: cell(Some(layout.answer)).to_string(),
        }
    }
}

/// Decode a packed options cell.
///
/// A JSON array yields one option per element (non-strings use their JSON
/// text, nulls are skipped). Anything else is split on `|`. Options are
/// trimmed and empty ones dropped, so a blank cell gives an empty list.
///
/// ```
/// use answerkey::decode_options;
///
/// assert_eq!(decode_options(r#"["Red", "Green"]"#), ["Red", "Green"]);
/// assert_eq!(decode_options("Red | Green |"), ["Red", "Green"]);
/// ```
pub fn decode_options(cell: &str) -> Vec<String> {
    let trimmed = cell.trim();
    let items: Vec<String> = match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(values)) => values
            .into_iter()
            .filter_map(|v| match v {
                Value::Null => None,
                Value::String(s) => Some(s),
                other => Some(other.to_string()),
            })
            .collect(),
        _ => {
            if trimmed.starts_with('[') {
                tracing::debug!(cell = trimmed, "seed: options cell is not a JSON array, splitting on '|'");
            }
            trimmed.split('|').map(str::to_string).collect()
        }
    };

    items.into_iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(line: usize, fields: &[&str]) -> RawRow {
        RawRow { line, fields: fields.iter().map(|s| s.to_string()).collect() }
    }

    fn layout(header: &[&str]) -> Result<ColumnLayout, &'static str> {
        ColumnLayout::from_headers(&HeaderMap::from_row(&row(1, header)))
    }

    #[test]
    fn decode_options_variants() {
        let cases: Vec<(Vec<&str>, &str)> = vec![
            (vec!["Red", "Green", "Blue"], r#"["Red","Green","Blue"]"#),
            (vec!["1", "2.5", "true"], r#"[1, 2.5, true]"#),
            (vec!["A) x", "B) y"], "A) x|B) y"),
            (vec!["[broken", "json"], "[broken | json"),
            (vec!["solo"], "solo"),
            (vec![], ""),
            (vec![], "[]"),
            (vec![], " | | "),
        ];
        for (expected, cell) in cases {
            assert_eq!(decode_options(cell), expected, "cell {:?}", cell);
        }
    }

    #[test]
    fn json_object_is_not_an_option_list() {
        assert_eq!(decode_options(r#"{"a": 1}"#), vec![r#"{"a": 1}"#]);
    }

    #[test]
    fn packed_layout_drafts() {
        let layout = layout(&["Question", "type", "options_json", "answer"]).unwrap();
        let draft = QuestionDraft::from_row(&layout, &row(3, &["Q?", "msq", "x|y", "A,B"]));
        assert_eq!(draft.line, 3);
        assert_eq!(draft.text, "Q?");
        assert_eq!(draft.qtype, QuestionType::Msq);
        assert_eq!(draft.raw_options, vec!["x", "y"]);
        assert_eq!(draft.raw_answer, "A,B");
    }

    #[test]
    fn spread_layout_drafts() {
        let layout = layout(&["text", "option_a", "option_b", "option_c", "correct_answer"]).unwrap();
        let draft = QuestionDraft::from_row(&layout, &row(2, &["Q", "A) one", "", "C) three", "c"]));
        assert_eq!(draft.raw_options, vec!["A) one", "", "C) three"]);
        assert_eq!(draft.qtype, QuestionType::Mcq);
        assert_eq!(draft.raw_answer, "c");
    }

    #[test]
    fn short_rows_read_as_empty() {
        let layout = layout(&["type", "options", "answer"]).unwrap();
        let draft = QuestionDraft::from_row(&layout, &row(4, &["msq"]));
        assert!(draft.raw_options.is_empty());
        assert_eq!(draft.raw_answer, "");
        assert_eq!(draft.text, "");
    }

    #[test]
    fn required_columns() {
        assert_eq!(layout(&["type", "options_json"]), Err("answer"));
        assert_eq!(layout(&["type", "answer"]), Err("options_json"));
        assert!(layout(&["answer", "option_1", "option_2"]).is_ok());
    }
}
