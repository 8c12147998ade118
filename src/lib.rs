//! # layoutdoc
//!
//! Hierarchical document model for PDF layout-analysis output.
//!
//! A layout parser reports a page as a flat sequence of block records
//! (headers, paragraphs, list items, table rows) each carrying a nesting
//! level. This library rebuilds the document tree from those records and
//! exposes it for chunking, section extraction and table extraction.
//!
//! ## Quick Start
//!
//! ```no_run
//! use layoutdoc::{read_file, render};
//!
//! fn main() -> layoutdoc::Result<()> {
//!     // Read a parser response
//!     let doc = read_file("response.json")?;
//!
//!     // Chunks with their section context, ready for indexing
//!     for text in render::chunk_texts(&doc, true) {
//!         println!("{}\n---", text);
//!     }
//!
//!     // Or the whole thing as Markdown
//!     let markdown = render::to_markdown(&doc, &render::RenderOptions::default())?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Tree building**: sections, paragraphs, nested lists and tables from flat records
//! - **Queries**: `sections()`, `chunks()`, `tables()`, `paragraphs()` in reading order
//! - **Context text**: any node rendered with its ancestor section titles
//! - **Graceful degradation**: malformed records are skipped and reported as diagnostics
//! - **Output formats**: plain text, Markdown, HTML, JSON, chunk records
//! - **Cleanup pipeline**: Unicode normalization and ligature repair of sentences

pub mod error;
pub mod model;
pub mod reader;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    Diagnostic, DiagnosticKind, Document, Layout, Node, NodeKind, NodeRef, RowKind, Table,
    TableCell, TableRow, CONTEXT_DELIMITER,
};
pub use reader::{
    CleanupOptions, CleanupPreset, ErrorMode, LayoutReader, NestingPolicy, ReadOptions,
};
pub use render::{ChunkRecord, DocumentStats, JsonFormat, RenderOptions, TableFallback};

use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Build a document from block records with default options.
///
/// # Example
///
/// ```
/// use layoutdoc::read_blocks;
/// use serde_json::json;
///
/// let blocks = vec![
///     json!({"tag": "header", "level": 0, "sentences": ["Intro"]}),
///     json!({"tag": "para", "level": 1, "sentences": ["First.", "Second."]}),
/// ];
/// let doc = read_blocks(&blocks).unwrap();
/// assert_eq!(doc.chunks()[0].to_context_text(true), "Intro\nFirst. Second.");
/// ```
pub fn read_blocks(blocks: &[Value]) -> Result<Document> {
    LayoutReader::new().read_blocks(blocks)
}

/// Read a parser response from a JSON string.
///
/// # Example
///
/// ```
/// use layoutdoc::read_str;
///
/// let doc = read_str(r#"{"return_dict": {"result": {"blocks": []}}}"#).unwrap();
/// assert!(doc.is_empty());
/// ```
pub fn read_str(json: &str) -> Result<Document> {
    LayoutReader::new().read_str(json)
}

/// Read a parser response from a file.
///
/// # Example
///
/// ```no_run
/// use layoutdoc::read_file;
///
/// let doc = read_file("response.json").unwrap();
/// println!("Sections: {}", doc.sections().len());
/// ```
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    LayoutReader::new().read_file(path)
}

/// Read a parser response from a reader.
///
/// # Example
///
/// ```no_run
/// use layoutdoc::read_reader;
/// use std::fs::File;
///
/// let file = File::open("response.json").unwrap();
/// let doc = read_reader(file).unwrap();
/// ```
pub fn read_reader<R: Read>(reader: R) -> Result<Document> {
    LayoutReader::new().read_reader(reader)
}
