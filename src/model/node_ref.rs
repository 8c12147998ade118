//! Node cursor carrying its ancestor chain.

use super::{Node, NodeKind};
use std::ops::Deref;

/// Delimiter between ancestor section titles in context text.
pub const CONTEXT_DELIMITER: &str = " > ";

/// A borrowed node together with the chain of its ancestors.
///
/// Queries on a [`Document`](super::Document) return cursors so that a node
/// extracted in isolation can still render its surrounding section context.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRef<'a> {
    node: &'a Node,
    ancestors: Vec<&'a Node>,
}

impl<'a> NodeRef<'a> {
    /// Cursor for a root-level node.
    pub fn root(node: &'a Node) -> Self {
        Self {
            node,
            ancestors: Vec::new(),
        }
    }

    /// Cursor for a node below the given ancestors (root first).
    pub fn new(node: &'a Node, ancestors: Vec<&'a Node>) -> Self {
        Self { node, ancestors }
    }

    /// The underlying node.
    pub fn node(&self) -> &'a Node {
        self.node
    }

    /// Ancestors from the root down to the immediate parent.
    pub fn ancestors(&self) -> &[&'a Node] {
        &self.ancestors
    }

    /// The immediate parent, if any.
    pub fn parent(&self) -> Option<&'a Node> {
        self.ancestors.last().copied()
    }

    /// Depth below the root list (0 for roots).
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    /// Cursors for the direct children.
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        let node: &'a Node = self.node;
        node.children
            .iter()
            .map(|child| {
                let mut ancestors = self.ancestors.clone();
                ancestors.push(node);
                NodeRef::new(child, ancestors)
            })
            .collect()
    }

    /// Titles of ancestor sections, root first.
    pub fn section_path(&self) -> Vec<String> {
        self.ancestors.iter().filter_map(|a| a.title()).collect()
    }

    /// Context text contributed by the ancestors.
    ///
    /// Section titles are joined with `" > "`; paragraph and list item
    /// ancestors follow, one per line.
    pub fn parent_text(&self) -> String {
        let headers = self.section_path();
        let paras: Vec<String> = self
            .ancestors
            .iter()
            .filter(|a| matches!(a.kind, NodeKind::Paragraph | NodeKind::ListItem))
            .map(|a| a.to_text(false, false))
            .filter(|t| !t.is_empty())
            .collect();

        let mut lines = Vec::new();
        if !headers.is_empty() {
            lines.push(headers.join(CONTEXT_DELIMITER));
        }
        lines.extend(paras);
        lines.join("\n")
    }

    /// Render the node, optionally prefixed by its ancestor context.
    ///
    /// Paragraphs, list items and tables include their descendants; other
    /// nodes render only their own text.
    pub fn to_context_text(&self, include_ancestors: bool) -> String {
        let body = if self.node.is_content() {
            self.node.to_text(true, true)
        } else {
            self.node.to_text(false, false)
        };

        if include_ancestors {
            let context = self.parent_text();
            if !context.is_empty() {
                return format!("{}\n{}", context, body);
            }
        }
        body
    }
}

impl Deref for NodeRef<'_> {
    type Target = Node;

    fn deref(&self) -> &Node {
        self.node
    }
}
