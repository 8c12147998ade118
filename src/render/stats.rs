//! Document statistics.

use crate::model::visitor::{NodeVisitor, VisitorAction};
use crate::model::{Document, NodeRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Counts gathered from one walk over a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Number of input records
    pub record_count: usize,

    /// Number of sections at every depth
    pub section_count: usize,

    /// Number of paragraphs
    pub paragraph_count: usize,

    /// Number of list items
    pub list_item_count: usize,

    /// Number of tables
    pub table_count: usize,

    /// Number of tables whose rows disagree on width
    pub malformed_table_count: usize,

    /// Number of generic blocks
    pub block_count: usize,

    /// Number of chunks
    pub chunk_count: usize,

    /// Number of sentences
    pub sentence_count: usize,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: usize,

    /// Character count (excluding whitespace)
    pub char_count: usize,

    /// Number of distinct pages referenced by records
    pub page_count: usize,

    /// Deepest nesting (1 for a flat document, 0 when empty)
    pub max_depth: usize,

    /// Number of diagnostics recorded while reading
    pub diagnostic_count: usize,
}

impl DocumentStats {
    /// Collect statistics for a document.
    pub fn collect(doc: &Document) -> Self {
        let mut counter = StatsCounter::default();
        doc.walk(&mut counter);

        let mut stats = counter.stats;
        stats.page_count = counter.pages.len();
        stats.chunk_count = doc.chunks().len();
        stats.record_count = doc.record_count();
        stats.diagnostic_count = doc.diagnostics().len();
        stats
    }

    /// Add word and character counts from text.
    fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count();
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count();
    }
}

#[derive(Default)]
struct StatsCounter {
    stats: DocumentStats,
    pages: BTreeSet<i64>,
}

impl<'a> NodeVisitor<'a> for StatsCounter {
    fn visit_node(&mut self, node: &NodeRef<'a>) -> VisitorAction {
        let stats = &mut self.stats;
        stats.max_depth = stats.max_depth.max(node.depth() + 1);
        stats.sentence_count += node.own_sentences().len();
        for sentence in node.own_sentences() {
            stats.count_text(sentence);
        }
        if let Some(page) = node.layout.page_idx {
            self.pages.insert(page);
        }
        VisitorAction::Continue
    }

    fn visit_section(&mut self, node: &NodeRef<'a>) -> VisitorAction {
        self.stats.section_count += 1;
        self.visit_node(node)
    }

    fn visit_paragraph(&mut self, node: &NodeRef<'a>) -> VisitorAction {
        self.stats.paragraph_count += 1;
        self.visit_node(node)
    }

    fn visit_list_item(&mut self, node: &NodeRef<'a>) -> VisitorAction {
        self.stats.list_item_count += 1;
        self.visit_node(node)
    }

    fn visit_table(&mut self, node: &NodeRef<'a>) -> VisitorAction {
        self.stats.table_count += 1;
        if let Some(table) = node.as_table() {
            if table.malformed {
                self.stats.malformed_table_count += 1;
            }
            for row in &table.rows {
                for cell in &row.cells {
                    self.stats.count_text(&cell.text);
                }
            }
        }
        self.visit_node(node)
    }

    fn visit_block(&mut self, node: &NodeRef<'a>) -> VisitorAction {
        self.stats.block_count += 1;
        self.visit_node(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Layout, Node, Table, TableRow};

    #[test]
    fn test_collect() {
        let mut section = Node::section("Intro text", 0).with_layout(Layout {
            page_idx: Some(0),
            ..Layout::default()
        });
        let mut para = Node::paragraph(["One two.", "Three."], 1).with_layout(Layout {
            page_idx: Some(1),
            ..Layout::default()
        });
        para.add_child(Node::list_item(["Item."], 1));
        section.add_child(para);
        let mut table = Table::new();
        table.add_row(TableRow::from_strings(["a", "b"]));
        table.add_row(TableRow::from_strings(["c"]));
        let _ = table.validate();
        section.add_child(Node::table(table, 1));
        section.add_child(Node::block(["Figure 1"], 1));
        let doc = Document::new(vec![section]);

        let stats = DocumentStats::collect(&doc);
        assert_eq!(stats.section_count, 1);
        assert_eq!(stats.paragraph_count, 1);
        assert_eq!(stats.list_item_count, 1);
        assert_eq!(stats.table_count, 1);
        assert_eq!(stats.malformed_table_count, 1);
        assert_eq!(stats.block_count, 1);
        assert_eq!(stats.chunk_count, 4);
        assert_eq!(stats.sentence_count, 5);
        assert_eq!(stats.word_count, 2 + 3 + 1 + 3 + 2);
        assert_eq!(stats.page_count, 2);
        assert_eq!(stats.max_depth, 3);
    }

    #[test]
    fn test_empty() {
        assert_eq!(
            DocumentStats::collect(&Document::default()),
            DocumentStats::default()
        );
    }
}
