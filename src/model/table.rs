//! Table types.

use serde::{Deserialize, Serialize};

/// A table grouped from one `table` record and/or a run of row and cell records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name as reported by the layout backend
    pub name: Option<String>,

    /// Rows in source order
    pub rows: Vec<TableRow>,

    /// Set when non-full rows disagree on their width
    pub malformed: bool,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            name: None,
            rows: Vec::new(),
            malformed: false,
        }
    }

    /// Create a named empty table.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new()
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (width of the first non-full row).
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .find(|r| r.kind != RowKind::Full)
            .or_else(|| self.rows.first())
            .map(|r| r.width())
            .unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of header rows.
    pub fn header_rows(&self) -> usize {
        self.rows.iter().filter(|r| r.kind == RowKind::Header).count()
    }

    /// Check if any cell spans more than one column.
    pub fn has_merged_cells(&self) -> bool {
        self.rows
            .iter()
            .any(|r| r.kind == RowKind::Full || r.cells.iter().any(|c| c.col_span > 1))
    }

    /// Check that every non-full row has the same width.
    ///
    /// Returns a description of the first mismatch.
    pub fn check_grid(&self) -> std::result::Result<(), String> {
        let mut expected: Option<(usize, usize)> = None;
        for (i, row) in self.rows.iter().enumerate() {
            if row.kind == RowKind::Full {
                continue;
            }
            let width = row.width();
            match expected {
                None => expected = Some((i, width)),
                Some((first, w)) if w != width => {
                    return Err(format!(
                        "row {} has {} columns but row {} has {}",
                        i, width, first, w
                    ));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Re-validate the grid and update the `malformed` flag.
    pub fn validate(&mut self) -> std::result::Result<(), String> {
        let result = self.check_grid();
        self.malformed = result.is_err();
        result
    }

    /// Get the cell text grid (one entry per cell, spans not expanded).
    pub fn grid(&self) -> Vec<Vec<&str>> {
        self.rows
            .iter()
            .map(|r| r.cells.iter().map(|c| c.text.as_str()).collect())
            .collect()
    }

    /// Render the table as text.
    ///
    /// Well-formed tables become pipe rows with a separator after the last
    /// header row; malformed tables degrade to plain lines.
    pub fn to_text(&self) -> String {
        if self.malformed {
            return self.plain_text();
        }

        let header_rows = self.header_rows();
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        for (i, row) in self.rows.iter().enumerate() {
            lines.push(row.pipe_text());
            if header_rows > 0 && i + 1 == header_rows {
                let width = self.column_count().max(1);
                lines.push(format!("|{}", " --- |".repeat(width)));
            }
        }
        lines.join("\n")
    }

    /// Plain text: cells joined by spaces, rows by newlines.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// Row kind as reported by the layout backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// Header row (`table_header`)
    Header,
    /// Ordinary data row
    #[default]
    Data,
    /// A single cell spanning the whole table (`full_row`)
    Full,
}

impl RowKind {
    /// Map the backend's row `type` field.
    pub fn from_type(value: Option<&str>) -> Self {
        match value {
            Some("table_header") => RowKind::Header,
            Some("full_row") => RowKind::Full,
            _ => RowKind::Data,
        }
    }
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,

    /// Row kind
    pub kind: RowKind,

    /// Row key used while grouping cell records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<u64>,
}

impl TableRow {
    /// Create a new data row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            kind: RowKind::Data,
            key: None,
        }
    }

    /// Create a header row.
    pub fn header(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            kind: RowKind::Header,
            key: None,
        }
    }

    /// Create a full-width row holding a single cell.
    pub fn full(cell: TableCell) -> Self {
        Self {
            cells: vec![cell],
            kind: RowKind::Full,
            key: None,
        }
    }

    /// Create a data row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }

    /// Row width: the sum of cell spans.
    pub fn width(&self) -> usize {
        self.cells.iter().map(|c| c.col_span.max(1) as usize).sum()
    }

    /// `| a | b |` form.
    pub fn pipe_text(&self) -> String {
        let mut line = String::from("|");
        for cell in &self.cells {
            line.push(' ');
            line.push_str(&cell.text.replace('\n', " "));
            line.push_str(" |");
        }
        line
    }

    /// Cells joined by single spaces, empty cells dropped.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell text
    pub text: String,

    /// Number of columns this cell spans
    pub col_span: u32,
}

impl TableCell {
    /// Create a single-column cell.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            col_span: 1,
        }
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self::text(String::new())
    }

    /// Set colspan and return self.
    pub fn colspan(mut self, span: u32) -> Self {
        self.col_span = span.max(1);
        self
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
