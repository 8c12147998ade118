//! Plain text and chunk rendering.

use crate::error::Result;
use crate::model::Document;
use serde::{Deserialize, Serialize};

use super::RenderOptions;

/// Convert a document to plain text.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let output = doc
        .roots()
        .iter()
        .map(|n| n.to_text(true, options.include_tables))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    Ok(output.trim().to_string())
}

/// Text of every chunk in document order.
///
/// With `with_context`, each chunk is prefixed by its ancestor section
/// titles and parent paragraph text.
pub fn chunk_texts(doc: &Document, with_context: bool) -> Vec<String> {
    doc.chunks()
        .iter()
        .map(|chunk| chunk.to_context_text(with_context))
        .collect()
}

/// A chunk prepared for indexing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Position in chunk order
    pub index: usize,

    /// Node kind name
    pub kind: String,

    /// Nesting level
    pub level: u32,

    /// Chunk text with its descendants
    pub text: String,

    /// Ancestor context (section titles and parent text)
    pub context: String,

    /// Titles of enclosing sections, outermost first
    pub section_path: Vec<String>,

    /// Page of the chunk's source record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_idx: Option<i64>,

    /// Index of the chunk's source record
    pub source_index: usize,
}

/// Export chunks as serializable records.
pub fn to_chunk_records(doc: &Document) -> Vec<ChunkRecord> {
    doc.chunks()
        .iter()
        .enumerate()
        .map(|(index, chunk)| ChunkRecord {
            index,
            kind: chunk.kind.name().to_string(),
            level: chunk.level,
            text: chunk.to_context_text(false),
            context: chunk.parent_text(),
            section_path: chunk.section_path(),
            page_idx: chunk.layout.page_idx,
            source_index: chunk.source_index,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, Table, TableRow};

    fn sample() -> Document {
        let mut a = Node::section("A", 0);
        let mut b = Node::section("B", 1);
        b.add_child(Node::paragraph(["Body."], 2));
        let mut table = Table::new();
        table.add_row(TableRow::from_strings(["x", "y"]));
        b.add_child(Node::table(table, 2));
        a.add_child(b);
        Document::new(vec![a])
    }

    #[test]
    fn test_to_text() {
        let doc = sample();
        assert_eq!(
            to_text(&doc, &RenderOptions::default()).unwrap(),
            "A\nB\nBody.\n| x | y |"
        );
        assert_eq!(
            to_text(&doc, &RenderOptions::new().with_tables(false)).unwrap(),
            "A\nB\nBody."
        );
    }

    #[test]
    fn test_to_text_skips_root_tables() {
        let mut table = Table::new();
        table.add_row(TableRow::from_strings(["a", "b"]));
        let doc = Document::new(vec![
            Node::paragraph(["Before."], 0),
            Node::table(table, 0),
            Node::paragraph(["After."], 0),
        ]);
        assert_eq!(
            to_text(&doc, &RenderOptions::new().with_tables(false)).unwrap(),
            "Before.\nAfter."
        );
        assert_eq!(
            to_text(&doc, &RenderOptions::default()).unwrap(),
            "Before.\n| a | b |\nAfter."
        );
    }

    #[test]
    fn test_chunk_texts() {
        let doc = sample();
        assert_eq!(chunk_texts(&doc, false), vec!["Body.", "| x | y |"]);
        assert_eq!(chunk_texts(&doc, true)[0], "A > B\nBody.");
    }

    #[test]
    fn test_chunk_records() {
        let records = to_chunk_records(&sample());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, "paragraph");
        assert_eq!(records[0].context, "A > B");
        assert_eq!(records[0].section_path, vec!["A", "B"]);
        assert_eq!(records[1].kind, "table");
    }
}
