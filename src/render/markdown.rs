//! Markdown rendering for layout documents.

use crate::error::Result;
use crate::model::{Document, Node, NodeKind, RowKind, Table, TableRow};

use super::html::table_to_html;
use super::{RenderOptions, TableFallback};

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(&self, doc: &Document) -> Result<String> {
        let mut output = String::new();
        for node in doc.roots() {
            self.render_node(&mut output, node, 0);
        }
        Ok(output.trim().to_string())
    }

    /// Render a single subtree.
    pub fn render_node_tree(&self, node: &Node) -> String {
        let mut output = String::new();
        self.render_node(&mut output, node, 0);
        output.trim().to_string()
    }

    fn render_node(&self, output: &mut String, node: &Node, list_depth: usize) {
        match &node.kind {
            NodeKind::Section => {
                self.start_block(output);
                let level = node
                    .level
                    .saturating_add(1)
                    .min(u32::from(self.options.max_heading_level)) as usize;
                output.push_str(&"#".repeat(level.max(1)));
                output.push(' ');
                output.push_str(&self.text(&node.sentences.join(" ")));
                output.push_str("\n\n");
                self.render_children(output, node, 0);
            }
            NodeKind::Paragraph | NodeKind::Block => {
                let text = node.sentences.join(" ");
                if !text.is_empty() {
                    self.start_block(output);
                    output.push_str(&self.text(&text));
                    output.push_str("\n\n");
                }
                self.render_children(output, node, 0);
            }
            NodeKind::ListItem => {
                output.push_str(&"  ".repeat(list_depth));
                output.push(self.options.list_marker);
                output.push(' ');
                output.push_str(&self.text(&node.sentences.join(" ")));
                output.push('\n');
                self.render_children(output, node, list_depth + 1);
            }
            NodeKind::Table(table) => {
                if self.options.include_tables && !table.is_empty() {
                    self.start_block(output);
                    self.render_table(output, table);
                }
                self.render_children(output, node, 0);
            }
        }
    }

    fn render_children(&self, output: &mut String, node: &Node, list_depth: usize) {
        for child in node.children() {
            if child.is_list_item() {
                self.render_node(output, child, list_depth);
            } else {
                self.render_node(output, child, 0);
            }
        }
    }

    /// Close a running list before a block element.
    fn start_block(&self, output: &mut String) {
        if !output.is_empty() && !output.ends_with("\n\n") {
            output.push('\n');
        }
    }

    fn text(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }

    fn render_table(&self, output: &mut String, table: &Table) {
        if table.malformed {
            output.push_str(&self.text(&table.plain_text()));
            output.push_str("\n\n");
            return;
        }

        if table.has_merged_cells() && self.options.table_fallback == TableFallback::Html {
            output.push_str(&table_to_html(table));
            output.push_str("\n\n");
            return;
        }

        self.render_table_markdown(output, table);
    }

    fn render_table_markdown(&self, output: &mut String, table: &Table) {
        let col_count = table.column_count();
        if col_count == 0 {
            return;
        }

        // Markdown needs a header; without header rows the first row acts as one.
        let header_rows = table.header_rows().max(1);
        for (i, row) in table.rows.iter().enumerate() {
            self.render_markdown_row(output, row, col_count);
            if i + 1 == header_rows {
                output.push('|');
                output.push_str(&" --- |".repeat(col_count));
                output.push('\n');
            }
        }
        output.push('\n');
    }

    fn render_markdown_row(&self, output: &mut String, row: &TableRow, col_count: usize) {
        output.push('|');
        let mut written = 0;
        for cell in &row.cells {
            let content = cell.text.replace('\n', " ");
            output.push_str(&format!(" {} |", self.text(content.trim())));
            written += 1;
            // Spanned columns stay empty.
            for _ in 1..cell.col_span.max(1) {
                output.push_str("  |");
                written += 1;
            }
        }
        if row.kind != RowKind::Full {
            for _ in written..col_count {
                output.push_str("  |");
            }
        }
        output.push('\n');
    }
}

/// Escape special Markdown characters.
/// Only escape characters that could be misinterpreted as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
