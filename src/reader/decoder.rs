//! Block record decoding.
//!
//! Each record decodes on its own into a tree node or a table fragment;
//! siblings are never consulted.

use super::record::{
    as_identifier, as_index, as_integer, cell_text, BlockRecord, RawCell, RawRow, RecordTag,
};
use super::{CleanupPipeline, ReadOptions};
use crate::error::{Error, Result};
use crate::model::{Layout, Node, NodeKind, RowKind, Table, TableCell, TableRow};
use serde::Deserialize;
use serde_json::Value;

/// Result of decoding one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// A tree node
    Node(Node),
    /// A standalone `table_row` record
    Row(RowFragment),
    /// A standalone `table_cell` record
    Cell(CellFragment),
}

impl Decoded {
    /// Nesting level of the decoded item.
    pub fn level(&self) -> u32 {
        match self {
            Decoded::Node(node) => node.level,
            Decoded::Row(row) => row.level,
            Decoded::Cell(cell) => cell.level,
        }
    }

    /// Index of the source record.
    pub fn index(&self) -> usize {
        match self {
            Decoded::Node(node) => node.source_index,
            Decoded::Row(row) => row.index,
            Decoded::Cell(cell) => cell.index,
        }
    }
}

/// A table row decoded from a `table_row` record.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFragment {
    /// Source record index
    pub index: usize,
    /// Nesting level
    pub level: u32,
    /// Owning table identifier
    pub table_id: Option<String>,
    /// The row
    pub row: TableRow,
    /// Geometry of the record
    pub layout: Layout,
}

/// A table cell decoded from a `table_cell` record.
#[derive(Debug, Clone, PartialEq)]
pub struct CellFragment {
    /// Source record index
    pub index: usize,
    /// Nesting level
    pub level: u32,
    /// Owning table identifier
    pub table_id: Option<String>,
    /// Row key
    pub row_idx: Option<u64>,
    /// The cell
    pub cell: TableCell,
    /// Geometry of the record
    pub layout: Layout,
}

/// Decodes records with a fixed set of options.
pub struct RecordDecoder {
    cleanup: Option<CleanupPipeline>,
}

impl RecordDecoder {
    /// Create a decoder for the given options.
    pub fn new(options: &ReadOptions) -> Self {
        Self {
            cleanup: options.cleanup.clone().map(CleanupPipeline::new),
        }
    }

    /// Decode the record at `index`.
    pub fn decode(&self, index: usize, value: &Value) -> Result<Decoded> {
        if !value.is_object() {
            return Err(Error::malformed_record(index, "record is not an object"));
        }
        let record = BlockRecord::deserialize(value)
            .map_err(|e| Error::malformed_record(index, e.to_string()))?;

        let level = match &record.level {
            None | Some(Value::Null) => {
                return Err(Error::malformed_record(index, "missing level"));
            }
            Some(level) => parse_level(level)
                .ok_or_else(|| Error::malformed_record(index, format!("invalid level {}", level)))?,
        };

        let layout = parse_layout(&record);
        let tag = record.record_tag();
        let table_id = record.table_id.as_ref().and_then(as_identifier);

        let decoded = match tag {
            RecordTag::TableRow => Decoded::Row(RowFragment {
                index,
                level,
                table_id,
                row: self.row_from_parts(
                    record.row_type.as_deref(),
                    record.cells.as_deref(),
                    record.cell_value.as_ref(),
                    record.col_span.as_ref(),
                ),
                layout,
            }),
            RecordTag::TableCell => Decoded::Cell(CellFragment {
                index,
                level,
                table_id,
                row_idx: record.row_idx.as_ref().and_then(as_index),
                cell: self.cell(record.cell_value.as_ref(), record.col_span.as_ref()),
                layout,
            }),
            RecordTag::Table => {
                let mut table = match record.name.as_ref().and_then(as_identifier) {
                    Some(name) => Table::named(name),
                    None => Table::new(),
                };
                for raw in record.table_rows.iter().flatten() {
                    table.add_row(self.row(raw));
                }
                Decoded::Node(
                    Node::table(table, level)
                        .with_source_index(index)
                        .with_layout(layout),
                )
            }
            other => {
                let kind = match other {
                    RecordTag::Header => NodeKind::Section,
                    RecordTag::Para => NodeKind::Paragraph,
                    RecordTag::ListItem => NodeKind::ListItem,
                    _ => NodeKind::Block,
                };
                let sentences = self.sentences(index, record.sentences.as_deref());
                Decoded::Node(
                    Node::new(kind, level, sentences)
                        .with_tag(other.as_str())
                        .with_source_index(index)
                        .with_layout(layout),
                )
            }
        };

        Ok(decoded)
    }

    fn sentences(&self, index: usize, raw: Option<&[Value]>) -> Vec<String> {
        let mut sentences = Vec::new();
        for (i, value) in raw.unwrap_or_default().iter().enumerate() {
            match value.as_str() {
                Some(s) => sentences.push(s.to_string()),
                None => log::debug!("record {}: skipping non-string sentence {}", index, i),
            }
        }
        match &self.cleanup {
            Some(pipeline) => pipeline.process_all(sentences),
            None => sentences,
        }
    }

    fn clean(&self, text: String) -> String {
        match &self.cleanup {
            Some(pipeline) => pipeline.process(&text),
            None => text,
        }
    }

    fn cell(&self, value: Option<&Value>, span: Option<&Value>) -> TableCell {
        let span = span.and_then(as_index).unwrap_or(1).clamp(1, u32::MAX as u64) as u32;
        TableCell::text(self.clean(cell_text(value))).colspan(span)
    }

    fn row(&self, raw: &RawRow) -> TableRow {
        self.row_from_parts(
            raw.row_type.as_deref(),
            raw.cells.as_deref(),
            raw.cell_value.as_ref(),
            raw.col_span.as_ref(),
        )
    }

    fn row_from_parts(
        &self,
        row_type: Option<&str>,
        cells: Option<&[RawCell]>,
        cell_value: Option<&Value>,
        col_span: Option<&Value>,
    ) -> TableRow {
        match RowKind::from_type(row_type) {
            RowKind::Full => TableRow::full(self.cell(cell_value, col_span)),
            kind => {
                let cells = cells
                    .unwrap_or_default()
                    .iter()
                    .map(|c| self.cell(c.cell_value.as_ref(), c.col_span.as_ref()))
                    .collect();
                TableRow {
                    cells,
                    kind,
                    key: None,
                }
            }
        }
    }
}

/// Decode a single record with the given options.
pub fn decode_record(index: usize, value: &Value, options: &ReadOptions) -> Result<Decoded> {
    RecordDecoder::new(options).decode(index, value)
}

fn parse_level(value: &Value) -> Option<u32> {
    as_index(value).and_then(|level| u32::try_from(level).ok())
}

fn parse_layout(record: &BlockRecord) -> Layout {
    Layout {
        page_idx: record.page_idx.as_ref().and_then(as_integer),
        block_idx: record.block_idx.as_ref().and_then(as_integer),
        top: record.top.as_ref().and_then(Value::as_f64),
        left: record.left.as_ref().and_then(Value::as_f64),
        bbox: record
            .bbox
            .iter()
            .flatten()
            .filter_map(Value::as_f64)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::CleanupPreset;
    use serde_json::json;

    fn decode(value: Value) -> Result<Decoded> {
        decode_record(0, &value, &ReadOptions::default())
    }

    fn node(value: Value) -> Node {
        match decode(value).unwrap() {
            Decoded::Node(node) => node,
            other => panic!("expected node, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_header() {
        let n = node(json!({
            "tag": "header",
            "level": 0,
            "sentences": ["Intro"],
            "page_idx": 2,
            "bbox": [1.0, 2.0, 3.0, 4.0]
        }));
        assert!(n.is_section());
        assert_eq!(n.title().as_deref(), Some("Intro"));
        assert_eq!(n.layout.page_idx, Some(2));
        assert_eq!(n.layout.bbox, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_unknown_tag_is_block() {
        let n = node(json!({"tag": "figure", "level": 1, "sentences": ["Caption."]}));
        assert!(n.is_block());
        assert_eq!(n.tag, "figure");

        let untagged = node(json!({"level": 0, "sentences": ["x"]}));
        assert!(untagged.is_block());
    }

    #[test]
    fn test_invalid_levels() {
        for record in [
            json!({"tag": "para", "sentences": ["x"]}),
            json!({"tag": "para", "level": -1}),
            json!({"tag": "para", "level": 1.5}),
            json!({"tag": "para", "level": "1"}),
            json!("para"),
        ] {
            let err = decode(record).unwrap_err();
            assert!(matches!(err, Error::MalformedRecord { index: 0, .. }));
        }
        assert_eq!(node(json!({"tag": "para", "level": 2.0})).level, 2);
    }

    #[test]
    fn test_non_string_sentences_skipped() {
        let n = node(json!({"tag": "para", "level": 0, "sentences": ["a", 3, null, "b"]}));
        assert_eq!(n.own_sentences(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_wrong_field_type_is_malformed() {
        let err = decode(json!({"tag": "para", "level": 0, "sentences": "text"})).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { .. }));
    }

    #[test]
    fn test_inline_table() {
        let n = node(json!({
            "tag": "table",
            "level": 1,
            "name": "t",
            "table_rows": [
                {"type": "table_header", "cells": [
                    {"cell_value": "A", "col_span": 1},
                    {"cell_value": {"sentences": ["B", "b"]}, "col_span": 1}
                ]},
                {"type": "table_data_row", "cells": [{"cell_value": "1"}, {"cell_value": "2"}]},
                {"type": "full_row", "cell_value": "footnote", "col_span": 2}
            ]
        }));
        let table = n.as_table().unwrap();
        assert_eq!(table.name.as_deref(), Some("t"));
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.rows[0].kind, RowKind::Header);
        assert_eq!(table.rows[0].cells[1].text, "B b");
        assert_eq!(table.rows[2].kind, RowKind::Full);
        assert_eq!(table.rows[2].cells[0].col_span, 2);
    }

    #[test]
    fn test_row_and_cell_fragments() {
        match decode(json!({
            "tag": "table_row",
            "level": 1,
            "table_id": 4,
            "cells": [{"cell_value": "x"}, {"cell_value": "y"}]
        }))
        .unwrap()
        {
            Decoded::Row(row) => {
                assert_eq!(row.table_id.as_deref(), Some("4"));
                assert_eq!(row.row.width(), 2);
            }
            other => panic!("expected row, got {:?}", other),
        }

        match decode(json!({
            "tag": "table_cell",
            "level": 1,
            "row_idx": 3,
            "cell_value": "z",
            "col_span": 0
        }))
        .unwrap()
        {
            Decoded::Cell(cell) => {
                assert_eq!(cell.row_idx, Some(3));
                assert_eq!(cell.cell.text, "z");
                assert_eq!(cell.cell.col_span, 1);
            }
            other => panic!("expected cell, got {:?}", other),
        }
    }

    #[test]
    fn test_cleanup_applied() {
        let options = ReadOptions::new().with_cleanup_preset(CleanupPreset::Standard);
        let decoded = decode_record(
            5,
            &json!({"tag": "para", "level": 0, "sentences": [" \u{FB01}ne  print ", "   "]}),
            &options,
        )
        .unwrap();
        match decoded {
            Decoded::Node(n) => {
                assert_eq!(n.own_sentences(), &["fine print".to_string()]);
                assert_eq!(n.source_index, 5);
            }
            other => panic!("expected node, got {:?}", other),
        }
    }
}
