//! Table grouping.
//!
//! Folds runs of `table`, `table_row` and `table_cell` records into single
//! table nodes before the tree is built.

use super::decoder::{CellFragment, Decoded, RowFragment};
use crate::error::Error;
use crate::model::{Layout, Node, NodeKind, RowKind, Table, TableRow};

struct OpenTable {
    node: Node,
    table_id: Option<String>,
}

impl OpenTable {
    fn table_mut(&mut self) -> Option<&mut Table> {
        match &mut self.node.kind {
            NodeKind::Table(table) => Some(table),
            _ => None,
        }
    }

    fn accepts(&self, table_id: Option<&str>) -> bool {
        match (self.table_id.as_deref(), table_id) {
            (Some(open), Some(incoming)) => open == incoming,
            _ => true,
        }
    }

    fn adopt_id(&mut self, table_id: Option<String>) {
        if self.table_id.is_none() {
            self.table_id = table_id;
        }
    }
}

/// Groups table fragments into table nodes.
///
/// Items go in through [`TableGrouper::push`] in record order; nodes come
/// out in the same order with fragments absorbed.
#[derive(Default)]
pub struct TableGrouper {
    open: Option<OpenTable>,
    errors: Vec<Error>,
    tables: usize,
}

impl TableGrouper {
    /// Create a new grouper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one decoded item; returns the nodes that are complete.
    pub fn push(&mut self, item: Decoded) -> Vec<Node> {
        let mut ready = Vec::new();
        match item {
            Decoded::Node(node) if node.is_table() => {
                ready.extend(self.close());
                self.open = Some(OpenTable {
                    node,
                    table_id: None,
                });
            }
            Decoded::Node(node) => {
                ready.extend(self.close());
                ready.push(node);
            }
            Decoded::Row(fragment) => {
                ready.extend(self.push_row(fragment));
            }
            Decoded::Cell(fragment) => {
                ready.extend(self.push_cell(fragment));
            }
        }
        ready
    }

    /// Close the open table, if any.
    pub fn finish(&mut self) -> Option<Node> {
        self.close()
    }

    /// Problems found while closing tables, in order.
    pub fn take_errors(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.errors)
    }

    /// Number of tables closed so far.
    pub fn table_count(&self) -> usize {
        self.tables
    }

    fn push_row(&mut self, fragment: RowFragment) -> Option<Node> {
        let closed = self.ensure_open(
            fragment.table_id.as_deref(),
            fragment.index,
            fragment.level,
            &fragment.layout,
        );
        if let Some(open) = self.open.as_mut() {
            open.adopt_id(fragment.table_id);
            if let Some(table) = open.table_mut() {
                table.add_row(fragment.row);
            }
        }
        closed
    }

    fn push_cell(&mut self, fragment: CellFragment) -> Option<Node> {
        let closed = self.ensure_open(
            fragment.table_id.as_deref(),
            fragment.index,
            fragment.level,
            &fragment.layout,
        );
        if let Some(open) = self.open.as_mut() {
            open.adopt_id(fragment.table_id);
            if let Some(table) = open.table_mut() {
                let starts_row = match table.rows.last() {
                    None => true,
                    Some(last) => last.kind == RowKind::Full || last.key != fragment.row_idx,
                };
                if starts_row {
                    let mut row = TableRow::new(Vec::new());
                    row.key = fragment.row_idx;
                    table.add_row(row);
                }
                if let Some(row) = table.rows.last_mut() {
                    row.cells.push(fragment.cell);
                }
            }
        }
        closed
    }

    /// Make sure a table compatible with `table_id` is open, closing an
    /// incompatible one first.
    fn ensure_open(
        &mut self,
        table_id: Option<&str>,
        index: usize,
        level: u32,
        layout: &Layout,
    ) -> Option<Node> {
        let mut closed = None;
        if let Some(open) = &self.open {
            if open.accepts(table_id) {
                return None;
            }
            closed = self.close();
        }
        self.open = Some(OpenTable {
            node: Node::table(Table::new(), level)
                .with_source_index(index)
                .with_layout(layout.clone()),
            table_id: None,
        });
        closed
    }

    fn close(&mut self) -> Option<Node> {
        let mut open = self.open.take()?;
        let index = open.node.source_index;
        if let Some(table) = open.table_mut() {
            if let Err(reason) = table.validate() {
                log::warn!("table at record {} is malformed: {}", index, reason);
                self.errors.push(Error::malformed_table(index, reason));
            }
        }
        self.tables += 1;
        Some(open.node)
    }
}
