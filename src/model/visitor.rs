//! Visitor pattern for walking the document tree.
//!
//! Every document query is a visitor driven by [`walk`], which visits nodes
//! depth-first in reading order.
//!
//! # Example
//!
//! ```
//! use layoutdoc::model::visitor::{walk, NodeVisitor, VisitorAction};
//! use layoutdoc::model::{Node, NodeRef};
//!
//! struct CountParagraphs(usize);
//!
//! impl<'a> NodeVisitor<'a> for CountParagraphs {
//!     fn visit_paragraph(&mut self, _node: &NodeRef<'a>) -> VisitorAction {
//!         self.0 += 1;
//!         VisitorAction::Continue
//!     }
//! }
//!
//! let mut section = Node::section("Intro", 0);
//! section.add_child(Node::paragraph(["Hello."], 1));
//! let roots = vec![section];
//!
//! let mut counter = CountParagraphs(0);
//! walk(&roots, &mut counter);
//! assert_eq!(counter.0, 1);
//! ```

use super::{Node, NodeKind, NodeRef};

/// Action returned by visitor methods to control traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VisitorAction {
    /// Descend into the node's children.
    #[default]
    Continue,

    /// Do not visit this node's descendants.
    SkipChildren,

    /// End the walk.
    Stop,
}

impl VisitorAction {
    /// Check if this action ends the walk.
    pub fn is_stop(&self) -> bool {
        matches!(self, VisitorAction::Stop)
    }
}

/// Trait for visiting tree nodes.
///
/// The per-kind methods default to [`NodeVisitor::visit_node`], which
/// returns `VisitorAction::Continue`.
pub trait NodeVisitor<'a> {
    /// Called for every node unless a per-kind method is overridden.
    fn visit_node(&mut self, node: &NodeRef<'a>) -> VisitorAction {
        let _ = node;
        VisitorAction::Continue
    }

    /// Called for sections.
    fn visit_section(&mut self, node: &NodeRef<'a>) -> VisitorAction {
        self.visit_node(node)
    }

    /// Called for paragraphs.
    fn visit_paragraph(&mut self, node: &NodeRef<'a>) -> VisitorAction {
        self.visit_node(node)
    }

    /// Called for list items.
    fn visit_list_item(&mut self, node: &NodeRef<'a>) -> VisitorAction {
        self.visit_node(node)
    }

    /// Called for tables.
    fn visit_table(&mut self, node: &NodeRef<'a>) -> VisitorAction {
        self.visit_node(node)
    }

    /// Called for generic blocks.
    fn visit_block(&mut self, node: &NodeRef<'a>) -> VisitorAction {
        self.visit_node(node)
    }

    /// Called after a node's children have been visited.
    fn leave_node(&mut self, node: &NodeRef<'a>) {
        let _ = node;
    }
}

/// Walk `roots` depth-first in reading order.
///
/// Returns `false` if a visitor stopped the walk early.
pub fn walk<'a, V>(roots: &'a [Node], visitor: &mut V) -> bool
where
    V: NodeVisitor<'a> + ?Sized,
{
    let mut ancestors = Vec::new();
    walk_level(roots, &mut ancestors, visitor)
}

fn walk_level<'a, V>(nodes: &'a [Node], ancestors: &mut Vec<&'a Node>, visitor: &mut V) -> bool
where
    V: NodeVisitor<'a> + ?Sized,
{
    for node in nodes {
        let cursor = NodeRef::new(node, ancestors.clone());
        let action = match node.kind {
            NodeKind::Section => visitor.visit_section(&cursor),
            NodeKind::Paragraph => visitor.visit_paragraph(&cursor),
            NodeKind::ListItem => visitor.visit_list_item(&cursor),
            NodeKind::Table(_) => visitor.visit_table(&cursor),
            NodeKind::Block => visitor.visit_block(&cursor),
        };

        match action {
            VisitorAction::Stop => return false,
            VisitorAction::SkipChildren => {}
            VisitorAction::Continue => {
                ancestors.push(node);
                let finished = walk_level(&node.children, ancestors, visitor);
                ancestors.pop();
                if !finished {
                    return false;
                }
            }
        }
        visitor.leave_node(&cursor);
    }
    true
}

/// Collects every node matching a predicate, in pre-order.
pub struct Collector<'a, F> {
    predicate: F,
    found: Vec<NodeRef<'a>>,
}

impl<'a, F> Collector<'a, F>
where
    F: FnMut(&Node) -> bool,
{
    /// Create a collector for nodes matching `predicate`.
    pub fn new(predicate: F) -> Self {
        Self {
            predicate,
            found: Vec::new(),
        }
    }

    /// The nodes collected so far.
    pub fn into_nodes(self) -> Vec<NodeRef<'a>> {
        self.found
    }
}

impl<'a, F> NodeVisitor<'a> for Collector<'a, F>
where
    F: FnMut(&Node) -> bool,
{
    fn visit_node(&mut self, node: &NodeRef<'a>) -> VisitorAction {
        if (self.predicate)(node.node()) {
            self.found.push(node.clone());
        }
        VisitorAction::Continue
    }
}

/// Collects chunks at every depth: content nodes, blocks carrying their
/// own sentences, and bare sections.
#[derive(Default)]
pub struct ChunkCollector<'a> {
    chunks: Vec<NodeRef<'a>>,
}

impl<'a> ChunkCollector<'a> {
    /// Create an empty chunk collector.
    pub fn new() -> Self {
        Self { chunks: Vec::new() }
    }

    /// The collected chunks.
    pub fn into_nodes(self) -> Vec<NodeRef<'a>> {
        self.chunks
    }
}

impl<'a> NodeVisitor<'a> for ChunkCollector<'a> {
    fn visit_section(&mut self, node: &NodeRef<'a>) -> VisitorAction {
        if node.children.is_empty() {
            self.chunks.push(node.clone());
        }
        VisitorAction::Continue
    }

    fn visit_block(&mut self, node: &NodeRef<'a>) -> VisitorAction {
        if !node.sentences.is_empty() {
            self.chunks.push(node.clone());
        }
        VisitorAction::Continue
    }

    fn visit_node(&mut self, node: &NodeRef<'a>) -> VisitorAction {
        self.chunks.push(node.clone());
        VisitorAction::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Node> {
        let mut intro = Node::section("Intro", 0);
        intro.add_child(Node::paragraph(["p1"], 1));
        let mut sub = Node::section("Sub", 1);
        let mut item = Node::list_item(["i1"], 2);
        item.add_child(Node::list_item(["i1a"], 3));
        sub.add_child(item);
        intro.add_child(sub);
        vec![intro, Node::section("Empty", 0)]
    }

    struct Order(Vec<String>);

    impl<'a> NodeVisitor<'a> for Order {
        fn visit_node(&mut self, node: &NodeRef<'a>) -> VisitorAction {
            self.0.push(node.own_text());
            VisitorAction::Continue
        }
    }

    #[test]
    fn test_walk_pre_order() {
        let roots = sample();
        let mut order = Order(Vec::new());
        assert!(walk(&roots, &mut order));
        assert_eq!(order.0, vec!["Intro", "p1", "Sub", "i1", "i1a", "Empty"]);
    }

    #[test]
    fn test_stop() {
        struct StopAtSub(usize);
        impl<'a> NodeVisitor<'a> for StopAtSub {
            fn visit_node(&mut self, _node: &NodeRef<'a>) -> VisitorAction {
                self.0 += 1;
                VisitorAction::Continue
            }
            fn visit_section(&mut self, node: &NodeRef<'a>) -> VisitorAction {
                if node.title().as_deref() == Some("Sub") {
                    return VisitorAction::Stop;
                }
                self.visit_node(node)
            }
        }

        let roots = sample();
        let mut v = StopAtSub(0);
        assert!(!walk(&roots, &mut v));
        assert_eq!(v.0, 2);
    }

    #[test]
    fn test_chunks_include_nested_items() {
        let roots = sample();
        let mut chunks = ChunkCollector::new();
        walk(&roots, &mut chunks);
        let texts: Vec<String> = chunks.into_nodes().iter().map(|c| c.own_text()).collect();
        assert_eq!(texts, vec!["p1", "i1", "i1a", "Empty"]);
    }

    #[test]
    fn test_collector_ancestors() {
        let roots = sample();
        let mut items = Collector::new(|n: &Node| n.is_list_item());
        walk(&roots, &mut items);
        let items = items.into_nodes();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].section_path(), vec!["Intro", "Sub"]);
        assert_eq!(items[1].depth(), 3);
    }
}
