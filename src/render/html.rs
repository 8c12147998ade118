//! HTML rendering.

use crate::model::{Document, Node, NodeKind, RowKind, Table, TableRow};
use html_escape::encode_text;

/// Render the whole document as an HTML fragment wrapped in `<html>`.
pub fn to_html(doc: &Document) -> String {
    let mut output = String::from("<html>");
    render_nodes(&mut output, doc.roots());
    output.push_str("</html>");
    output
}

/// Render one node, optionally with its subtree.
pub fn node_to_html(node: &Node, include_children: bool) -> String {
    let mut output = String::new();
    if node.is_list_item() {
        output.push_str("<ul>");
        render_node(&mut output, node, include_children);
        output.push_str("</ul>");
    } else {
        render_node(&mut output, node, include_children);
    }
    output
}

/// Render a table grid. Header rows use `<th>`; spanning cells carry `colspan`.
pub fn table_to_html(table: &Table) -> String {
    let mut output = String::from("<table>");
    for row in &table.rows {
        render_row(&mut output, row);
    }
    output.push_str("</table>");
    output
}

/// Render siblings, wrapping each run of list items in one `<ul>`.
fn render_nodes(output: &mut String, nodes: &[Node]) {
    let mut in_list = false;
    for node in nodes {
        if node.is_list_item() != in_list {
            output.push_str(if in_list { "</ul>" } else { "<ul>" });
            in_list = !in_list;
        }
        render_node(output, node, true);
    }
    if in_list {
        output.push_str("</ul>");
    }
}

fn render_node(output: &mut String, node: &Node, include_children: bool) {
    let text = node.sentences.join(" ");
    match &node.kind {
        NodeKind::Section => {
            let level = node.level.saturating_add(1).min(6);
            output.push_str(&format!("<h{}>{}</h{}>", level, encode_text(&text), level));
        }
        NodeKind::Paragraph | NodeKind::Block => {
            if !text.is_empty() {
                output.push_str(&format!("<p>{}</p>", encode_text(&text)));
            }
        }
        NodeKind::ListItem => {
            output.push_str("<li>");
            output.push_str(&encode_text(&text));
            if include_children && !node.children.is_empty() {
                render_nodes(output, &node.children);
            }
            output.push_str("</li>");
            return;
        }
        NodeKind::Table(table) => {
            if table.malformed {
                let lines: Vec<String> = table
                    .rows
                    .iter()
                    .map(|r| encode_text(&r.plain_text()).into_owned())
                    .collect();
                output.push_str(&format!("<p>{}</p>", lines.join("<br>")));
            } else {
                output.push_str(&table_to_html(table));
            }
        }
    }
    if include_children {
        render_nodes(output, &node.children);
    }
}

fn render_row(output: &mut String, row: &TableRow) {
    let tag = if row.kind == RowKind::Header { "th" } else { "td" };
    output.push_str("<tr>");
    for cell in &row.cells {
        if cell.col_span > 1 {
            output.push_str(&format!("<{} colspan=\"{}\">", tag, cell.col_span));
        } else {
            output.push_str(&format!("<{}>", tag));
        }
        output.push_str(&encode_text(&cell.text));
        output.push_str(&format!("</{}>", tag));
    }
    output.push_str("</tr>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableCell;

    #[test]
    fn test_document_html() {
        let mut section = Node::section("Intro", 0);
        section.add_child(Node::paragraph(["a < b"], 1));
        let mut item = Node::list_item(["one"], 1);
        item.add_child(Node::list_item(["sub"], 2));
        section.add_child(item);
        section.add_child(Node::list_item(["two"], 1));
        let doc = Document::new(vec![section]);

        assert_eq!(
            to_html(&doc),
            "<html><h1>Intro</h1><p>a &lt; b</p><ul><li>one<ul><li>sub</li></ul></li><li>two</li></ul></html>"
        );
    }

    #[test]
    fn test_deep_heading_is_capped() {
        let section = Node::section("Deep", u32::MAX);
        assert_eq!(node_to_html(&section, false), "<h6>Deep</h6>");
    }

    #[test]
    fn test_table_html() {
        let mut table = Table::new();
        table.add_row(TableRow::header(vec![
            TableCell::text("A"),
            TableCell::text("B"),
        ]));
        table.add_row(TableRow::full(TableCell::text("x & y").colspan(2)));
        assert_eq!(
            table_to_html(&table),
            "<table><tr><th>A</th><th>B</th></tr><tr><td colspan=\"2\">x &amp; y</td></tr></table>"
        );
    }

    #[test]
    fn test_node_without_children() {
        let mut section = Node::section("Deep", 2);
        section.add_child(Node::paragraph(["hidden"], 3));
        assert_eq!(node_to_html(&section, false), "<h3>Deep</h3>");
        assert_eq!(
            node_to_html(&section, true),
            "<h3>Deep</h3><p>hidden</p>"
        );
        assert_eq!(
            node_to_html(&Node::list_item(["i"], 0), true),
            "<ul><li>i</li></ul>"
        );
    }

    #[test]
    fn test_malformed_table_html() {
        let mut table = Table::new();
        table.add_row(TableRow::from_strings(["a", "b"]));
        table.add_row(TableRow::from_strings(["c"]));
        let _ = table.validate();
        let node = Node::table(table, 0);
        assert_eq!(node_to_html(&node, true), "<p>a b<br>c</p>");
    }
}
