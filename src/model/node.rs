//! Tree node types.

use super::Table;
use serde::{Deserialize, Serialize};

/// The kind of a tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// A heading and everything nested under it
    Section,

    /// A paragraph of sentences
    Paragraph,

    /// A list item, possibly with nested items
    ListItem,

    /// A table grid
    Table(Table),

    /// Any record the reader has no dedicated type for
    Block,
}

impl NodeKind {
    /// Short name used in outlines and chunk exports.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Section => "section",
            NodeKind::Paragraph => "paragraph",
            NodeKind::ListItem => "list_item",
            NodeKind::Table(_) => "table",
            NodeKind::Block => "block",
        }
    }
}

/// Page geometry carried through from the layout backend.
///
/// The reader never interprets these values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Page index (0-based)
    pub page_idx: Option<i64>,

    /// Block index within the page
    pub block_idx: Option<i64>,

    /// Top coordinate
    pub top: Option<f64>,

    /// Left coordinate
    pub left: Option<f64>,

    /// Bounding box `[x0, y0, x1, y1]`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bbox: Vec<f64>,
}

/// A node of the document tree.
///
/// Every node owns its children; the tree has no back-pointers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// What this node is
    #[serde(flatten)]
    pub kind: NodeKind,

    /// Raw tag of the source record
    pub tag: String,

    /// Nesting level from the source record
    pub level: u32,

    /// The node's own sentences
    #[serde(default)]
    pub sentences: Vec<String>,

    /// Pass-through geometry
    #[serde(default)]
    pub layout: Layout,

    /// Index of the record this node was decoded from
    pub source_index: usize,

    /// Child nodes in reading order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// Create a childless node.
    pub fn new(kind: NodeKind, level: u32, sentences: Vec<String>) -> Self {
        let tag = match &kind {
            NodeKind::Section => "header",
            NodeKind::Paragraph => "para",
            NodeKind::ListItem => "list_item",
            NodeKind::Table(_) => "table",
            NodeKind::Block => "",
        };
        Self {
            kind,
            tag: tag.to_string(),
            level,
            sentences,
            layout: Layout::default(),
            source_index: 0,
            children: Vec::new(),
        }
    }

    /// Create a section with a single-sentence title.
    pub fn section(title: impl Into<String>, level: u32) -> Self {
        Self::new(NodeKind::Section, level, vec![title.into()])
    }

    /// Create a paragraph.
    pub fn paragraph<S: Into<String>>(sentences: impl IntoIterator<Item = S>, level: u32) -> Self {
        Self::new(
            NodeKind::Paragraph,
            level,
            sentences.into_iter().map(Into::into).collect(),
        )
    }

    /// Create a list item.
    pub fn list_item<S: Into<String>>(sentences: impl IntoIterator<Item = S>, level: u32) -> Self {
        Self::new(
            NodeKind::ListItem,
            level,
            sentences.into_iter().map(Into::into).collect(),
        )
    }

    /// Create a table node.
    pub fn table(table: Table, level: u32) -> Self {
        Self::new(NodeKind::Table(table), level, Vec::new())
    }

    /// Create a generic block.
    pub fn block<S: Into<String>>(sentences: impl IntoIterator<Item = S>, level: u32) -> Self {
        Self::new(
            NodeKind::Block,
            level,
            sentences.into_iter().map(Into::into).collect(),
        )
    }

    /// Set the source record index and return self.
    pub fn with_source_index(mut self, index: usize) -> Self {
        self.source_index = index;
        self
    }

    /// Set the raw tag and return self.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set the layout and return self.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Append a child.
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Child nodes in reading order (empty when childless).
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// The node's own sentences, never including descendants.
    pub fn own_sentences(&self) -> &[String] {
        &self.sentences
    }

    /// Sentences exposed by this node.
    ///
    /// Blocks add the sentences of their immediate paragraph and list item
    /// children after their own.
    pub fn sentences(&self) -> Vec<&str> {
        let own = self.sentences.iter().map(String::as_str);
        match self.kind {
            NodeKind::Block => own
                .chain(
                    self.children
                        .iter()
                        .filter(|c| matches!(c.kind, NodeKind::Paragraph | NodeKind::ListItem))
                        .flat_map(|c| c.sentences.iter().map(String::as_str)),
                )
                .collect(),
            _ => own.collect(),
        }
    }

    /// Section title (sentences joined with spaces), `None` for other kinds.
    pub fn title(&self) -> Option<String> {
        match self.kind {
            NodeKind::Section => Some(self.sentences.join(" ")),
            _ => None,
        }
    }

    /// The table, if this is a table node.
    pub fn as_table(&self) -> Option<&Table> {
        match &self.kind {
            NodeKind::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Check if this is a section.
    pub fn is_section(&self) -> bool {
        matches!(self.kind, NodeKind::Section)
    }

    /// Check if this is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self.kind, NodeKind::Paragraph)
    }

    /// Check if this is a list item.
    pub fn is_list_item(&self) -> bool {
        matches!(self.kind, NodeKind::ListItem)
    }

    /// Check if this is a table.
    pub fn is_table(&self) -> bool {
        matches!(self.kind, NodeKind::Table(_))
    }

    /// Check if this is a generic block.
    pub fn is_block(&self) -> bool {
        matches!(self.kind, NodeKind::Block)
    }

    /// Paragraphs, list items and tables hold body content; their
    /// descendants belong to them when chunking.
    pub fn is_content(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Paragraph | NodeKind::ListItem | NodeKind::Table(_)
        )
    }

    /// The node's own text: the table grid for tables, sentences joined
    /// with spaces otherwise.
    pub fn own_text(&self) -> String {
        match &self.kind {
            NodeKind::Table(table) => table.to_text(),
            _ => self.sentences.join(" "),
        }
    }

    /// Render the node's text.
    ///
    /// With `include_descendants`, every descendant follows depth-first on
    /// its own line. Tables, this node included, render only with
    /// `include_tables`.
    pub fn to_text(&self, include_descendants: bool, include_tables: bool) -> String {
        if self.is_table() && !include_tables {
            return String::new();
        }
        let mut parts = Vec::new();
        let own = self.own_text();
        if !own.is_empty() {
            parts.push(own);
        }
        if include_descendants {
            for child in &self.children {
                let text = child.to_text(true, include_tables);
                if !text.is_empty() {
                    parts.push(text);
                }
            }
        }
        parts.join("\n")
    }

    /// Number of nodes in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_len).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableRow;

    #[test]
    fn test_paragraph_text() {
        let p = Node::paragraph(["A.", "B."], 1);
        assert_eq!(p.to_text(false, false), "A. B.");
        assert!(p.children().is_empty());
        assert_eq!(p.sentences(), vec!["A.", "B."]);
    }

    #[test]
    fn test_section_title_and_descendants() {
        let mut section = Node::section("Intro", 0);
        section.add_child(Node::paragraph(["First."], 1));
        let mut item = Node::list_item(["Item one."], 1);
        item.add_child(Node::list_item(["Nested."], 2));
        section.add_child(item);

        assert_eq!(section.title().as_deref(), Some("Intro"));
        assert_eq!(section.to_text(false, false), "Intro");
        assert_eq!(
            section.to_text(true, false),
            "Intro\nFirst.\nItem one.\nNested."
        );
        assert_eq!(section.sentences(), vec!["Intro"]);
        assert_eq!(section.subtree_len(), 4);
    }

    #[test]
    fn test_tables_skipped_without_flag() {
        let mut table = Table::new();
        table.add_row(TableRow::from_strings(["x", "y"]));
        let mut section = Node::section("Data", 0);
        section.add_child(Node::table(table, 1));
        section.add_child(Node::paragraph(["After."], 1));

        assert_eq!(section.to_text(true, false), "Data\nAfter.");
        assert_eq!(section.to_text(true, true), "Data\n| x | y |\nAfter.");

        let table = &section.children()[0];
        assert_eq!(table.to_text(false, false), "");
        assert_eq!(table.to_text(false, true), "| x | y |");
    }

    #[test]
    fn test_block_sentences_include_content_children() {
        let mut block = Node::block(["Own."], 0);
        block.add_child(Node::paragraph(["Para."], 1));
        block.add_child(Node::section("Heading", 1));
        block.add_child(Node::list_item(["Item."], 1));

        assert_eq!(block.sentences(), vec!["Own.", "Para.", "Item."]);
        assert_eq!(block.own_sentences().len(), 1);
    }

    #[test]
    fn test_kind_predicates() {
        let t = Node::table(Table::new(), 0);
        assert!(t.is_table());
        assert!(t.is_content());
        assert!(t.as_table().is_some());
        assert_eq!(t.tag, "table");
        assert!(!Node::section("s", 0).is_content());
        assert_eq!(NodeKind::ListItem.name(), "list_item");
    }
}
