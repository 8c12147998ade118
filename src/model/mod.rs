//! Document model types.
//!
//! The model is a forest of owned [`Node`]s. Each node is a tagged variant
//! ([`NodeKind`]) sharing one set of operations: children, sentences and
//! text rendering. Queries hand out [`NodeRef`] cursors that remember the
//! ancestor chain, so context rendering needs no back-pointers.

mod document;
mod node;
mod node_ref;
mod table;
pub mod visitor;

pub use document::{Diagnostic, DiagnosticKind, Document};
pub use node::{Layout, Node, NodeKind};
pub use node_ref::{NodeRef, CONTEXT_DELIMITER};
pub use table::{RowKind, Table, TableCell, TableRow};
