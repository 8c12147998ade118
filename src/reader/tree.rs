//! Tree building from the flat node sequence.

use super::NestingPolicy;
use crate::model::{Node, NodeKind};

/// Assembles decoded nodes into a forest in one linear pass.
///
/// Every incoming node is pushed onto a stack of open nodes. Before the
/// push, open nodes that cannot take the incoming node as a child are
/// closed into the node below them (or into the root list).
#[derive(Debug, Default)]
pub struct TreeBuilder {
    policy: NestingPolicy,
    stack: Vec<Node>,
    roots: Vec<Node>,
}

impl TreeBuilder {
    /// Create a builder with the given nesting policy.
    pub fn new(policy: NestingPolicy) -> Self {
        Self {
            policy,
            stack: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Add the next node in reading order.
    pub fn push(&mut self, node: Node) {
        while let Some(top) = self.stack.last() {
            if accepts(top, &node, self.policy) {
                break;
            }
            self.close_top();
        }
        self.stack.push(node);
    }

    /// Number of nodes currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Close every open node and return the roots.
    pub fn finish(mut self) -> Vec<Node> {
        while !self.stack.is_empty() {
            self.close_top();
        }
        self.roots
    }

    fn close_top(&mut self) {
        if let Some(node) = self.stack.pop() {
            match self.stack.last_mut() {
                Some(parent) => parent.add_child(node),
                None => self.roots.push(node),
            }
        }
    }
}

/// Whether the open node `parent` takes `child` as a direct child.
fn accepts(parent: &Node, child: &Node, policy: NestingPolicy) -> bool {
    match parent.kind {
        NodeKind::Section => match child.kind {
            NodeKind::Section => child.level > parent.level,
            _ => match policy {
                NestingPolicy::Strict => child.level > parent.level,
                NestingPolicy::Continuation => true,
            },
        },
        NodeKind::Block => child.level > parent.level,
        NodeKind::ListItem => child.is_list_item() && child.level > parent.level,
        NodeKind::Paragraph => child.is_list_item() && child.level >= parent.level,
        NodeKind::Table(_) => false,
    }
}

/// Build a forest from nodes in reading order.
pub fn build_tree(nodes: impl IntoIterator<Item = Node>, policy: NestingPolicy) -> Vec<Node> {
    let mut builder = TreeBuilder::new(policy);
    for node in nodes {
        builder.push(node);
    }
    builder.finish()
}
