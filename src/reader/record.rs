//! Raw block records as emitted by the layout backend.

use serde::Deserialize;
use serde_json::Value;

/// Record tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordTag {
    /// `header`
    Header,
    /// `para`
    Para,
    /// `list_item`
    ListItem,
    /// `table`
    Table,
    /// `table_row`
    TableRow,
    /// `table_cell`
    TableCell,
    /// Anything else, kept verbatim
    Other(String),
}

impl RecordTag {
    /// Parse a tag; unknown values become [`RecordTag::Other`].
    pub fn parse(tag: &str) -> Self {
        match tag {
            "header" => RecordTag::Header,
            "para" => RecordTag::Para,
            "list_item" => RecordTag::ListItem,
            "table" => RecordTag::Table,
            "table_row" => RecordTag::TableRow,
            "table_cell" => RecordTag::TableCell,
            other => RecordTag::Other(other.to_string()),
        }
    }

    /// The tag as it appears in the input.
    pub fn as_str(&self) -> &str {
        match self {
            RecordTag::Header => "header",
            RecordTag::Para => "para",
            RecordTag::ListItem => "list_item",
            RecordTag::Table => "table",
            RecordTag::TableRow => "table_row",
            RecordTag::TableCell => "table_cell",
            RecordTag::Other(tag) => tag,
        }
    }
}

/// One block record.
///
/// Layout fields are kept as raw JSON so that odd geometry never rejects a
/// record; the decoder reads what it can.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockRecord {
    /// Block tag
    #[serde(default)]
    pub tag: Option<String>,

    /// Nesting level
    #[serde(default)]
    pub level: Option<Value>,

    /// Sentence-segmented text
    #[serde(default)]
    pub sentences: Option<Vec<Value>>,

    /// Page index
    #[serde(default)]
    pub page_idx: Option<Value>,

    /// Block index within the page
    #[serde(default)]
    pub block_idx: Option<Value>,

    /// Top coordinate
    #[serde(default)]
    pub top: Option<Value>,

    /// Left coordinate
    #[serde(default)]
    pub left: Option<Value>,

    /// Bounding box
    #[serde(default)]
    pub bbox: Option<Vec<Value>>,

    /// Table name
    #[serde(default)]
    pub name: Option<Value>,

    /// Inline rows of a `table` record
    #[serde(default)]
    pub table_rows: Option<Vec<RawRow>>,

    /// Cells of a `table_row` record
    #[serde(default)]
    pub cells: Option<Vec<RawCell>>,

    /// Row type of a `table_row` record
    #[serde(default, rename = "type")]
    pub row_type: Option<String>,

    /// Cell value of a `table_cell` record
    #[serde(default)]
    pub cell_value: Option<Value>,

    /// Column span of a `table_cell` record
    #[serde(default)]
    pub col_span: Option<Value>,

    /// Table identifier shared by row and cell records
    #[serde(default)]
    pub table_id: Option<Value>,

    /// Row key of a `table_cell` record
    #[serde(default)]
    pub row_idx: Option<Value>,
}

impl BlockRecord {
    /// Parsed tag; a missing tag is an empty [`RecordTag::Other`].
    pub fn record_tag(&self) -> RecordTag {
        RecordTag::parse(self.tag.as_deref().unwrap_or(""))
    }
}

/// An inline table row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRow {
    /// `table_header`, `table_data_row` or `full_row`
    #[serde(default, rename = "type")]
    pub row_type: Option<String>,

    /// Cells of the row
    #[serde(default)]
    pub cells: Option<Vec<RawCell>>,

    /// Value of a full row
    #[serde(default)]
    pub cell_value: Option<Value>,

    /// Span of a full row
    #[serde(default)]
    pub col_span: Option<Value>,
}

/// An inline table cell.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCell {
    /// String, or a paragraph-like object with `sentences`
    #[serde(default)]
    pub cell_value: Option<Value>,

    /// Column span
    #[serde(default)]
    pub col_span: Option<Value>,
}

/// Read a non-negative integer, accepting floats with no fraction.
pub fn as_index(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        _ => None,
    }
}

/// Read any integer, accepting floats with no fraction.
pub fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        _ => None,
    }
}

/// Read an identifier: strings verbatim, numbers in their JSON form.
pub fn as_identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Text of a cell value: a string, or an object's sentences joined by spaces.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Object(map)) => map
            .get("sentences")
            .and_then(Value::as_array)
            .map(|sentences| {
                sentences
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tag_parse() {
        assert_eq!(RecordTag::parse("header"), RecordTag::Header);
        assert_eq!(RecordTag::parse("table_cell"), RecordTag::TableCell);
        assert_eq!(
            RecordTag::parse("figure"),
            RecordTag::Other("figure".to_string())
        );
        assert_eq!(RecordTag::parse("figure").as_str(), "figure");
    }

    #[test]
    fn test_deserialize_record() {
        let value = json!({
            "tag": "table",
            "level": 1,
            "name": "t1",
            "table_rows": [
                {"type": "table_header", "cells": [{"cell_value": "a", "col_span": 2}]},
                {"type": "full_row", "cell_value": "note"}
            ]
        });
        let record = BlockRecord::deserialize(&value).unwrap();
        assert_eq!(record.record_tag(), RecordTag::Table);
        let rows = record.table_rows.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row_type.as_deref(), Some("table_header"));
    }

    #[test]
    fn test_as_index() {
        assert_eq!(as_index(&json!(3)), Some(3));
        assert_eq!(as_index(&json!(3.0)), Some(3));
        assert_eq!(as_index(&json!(2.5)), None);
        assert_eq!(as_index(&json!(-1)), None);
        assert_eq!(as_index(&json!("1")), None);
        assert_eq!(as_integer(&json!(-1)), Some(-1));
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(Some(&json!("plain"))), "plain");
        assert_eq!(
            cell_text(Some(&json!({"sentences": ["One.", "Two."]}))),
            "One. Two."
        );
        assert_eq!(cell_text(None), "");
        assert_eq!(as_identifier(&json!(7)).as_deref(), Some("7"));
    }
}
