//! Document-level types.

use super::visitor::{walk, ChunkCollector, Collector, NodeVisitor, VisitorAction};
use super::{Node, NodeRef};
use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A document tree built from layout block records.
///
/// The tree is immutable once built; every query walks it afresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Top-level nodes in reading order
    pub roots: Vec<Node>,

    /// Records that were skipped or degraded while reading
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,

    /// Number of input records
    pub record_count: usize,
}

impl Document {
    /// Create a document from already built root nodes.
    pub fn new(roots: Vec<Node>) -> Self {
        Self {
            roots,
            diagnostics: Vec::new(),
            record_count: 0,
        }
    }

    /// Build a document from raw block records with default options.
    ///
    /// Malformed records and tables are recorded in
    /// [`Document::diagnostics`] rather than failing the document.
    pub fn from_blocks(blocks: &[Value]) -> Self {
        crate::reader::LayoutReader::new().build(blocks)
    }

    /// Top-level nodes.
    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    /// Cursors for the top-level nodes.
    pub fn root_refs(&self) -> Vec<NodeRef<'_>> {
        self.roots.iter().map(NodeRef::root).collect()
    }

    /// Diagnostics recorded while reading.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of input records.
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Check if the document has no nodes.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(Node::subtree_len).sum()
    }

    /// Walk the tree with a visitor.
    pub fn walk<'a, V>(&'a self, visitor: &mut V) -> bool
    where
        V: NodeVisitor<'a> + ?Sized,
    {
        walk(&self.roots, visitor)
    }

    /// All sections at every depth, in document order.
    pub fn sections(&self) -> Vec<NodeRef<'_>> {
        self.collect(Node::is_section)
    }

    /// Content chunks in document order.
    ///
    /// Every paragraph, list item and table is a chunk, at any depth, as
    /// are blocks with their own sentences and sections without children.
    ///
    /// Chunks overlap: a content chunk's text includes its descendants,
    /// and a block's [`Node::sentences`] include its paragraph and list
    /// item children. Those descendants are chunks of their own.
    pub fn chunks(&self) -> Vec<NodeRef<'_>> {
        let mut collector = ChunkCollector::new();
        self.walk(&mut collector);
        collector.into_nodes()
    }

    /// All tables in document order.
    pub fn tables(&self) -> Vec<NodeRef<'_>> {
        self.collect(Node::is_table)
    }

    /// All paragraphs in document order.
    pub fn paragraphs(&self) -> Vec<NodeRef<'_>> {
        self.collect(Node::is_paragraph)
    }

    fn collect(&self, predicate: fn(&Node) -> bool) -> Vec<NodeRef<'_>> {
        let mut collector = Collector::new(predicate);
        self.walk(&mut collector);
        collector.into_nodes()
    }

    /// Plain text of the whole document, tables included.
    pub fn to_text(&self) -> String {
        self.roots
            .iter()
            .map(|n| n.to_text(true, true))
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Debug outline: one line per node with depth dashes, tag, child
    /// count and own text.
    pub fn outline(&self) -> String {
        let mut outline = Outline::default();
        self.walk(&mut outline);
        outline.lines.join("\n")
    }
}

#[derive(Default)]
struct Outline {
    lines: Vec<String>,
}

impl<'a> NodeVisitor<'a> for Outline {
    fn visit_node(&mut self, node: &NodeRef<'a>) -> VisitorAction {
        let tag = if node.tag.is_empty() {
            node.kind.name()
        } else {
            node.tag.as_str()
        };
        self.lines.push(format!(
            "{}{} ({}) {}",
            "-".repeat(node.depth()),
            tag,
            node.children.len(),
            node.own_text().replace('\n', " / ")
        ));
        VisitorAction::Continue
    }
}

/// A record-level problem recovered from while reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Index of the offending record
    pub record_index: usize,

    /// What kind of problem
    pub kind: DiagnosticKind,

    /// Human readable description
    pub message: String,
}

impl Diagnostic {
    /// Convert a recoverable error into a diagnostic.
    pub fn from_error(err: &Error) -> Option<Self> {
        match err {
            Error::MalformedRecord { index, reason } => Some(Self {
                record_index: *index,
                kind: DiagnosticKind::MalformedRecord,
                message: reason.clone(),
            }),
            Error::MalformedTable { index, reason } => Some(Self {
                record_index: *index,
                kind: DiagnosticKind::MalformedTable,
                message: reason.clone(),
            }),
            _ => None,
        }
    }
}

/// Diagnostic kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The record was skipped
    MalformedRecord,
    /// The table was kept but renders as plain text
    MalformedTable,
}
