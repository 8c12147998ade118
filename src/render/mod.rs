//! Rendering module for converting documents to various output formats.

mod html;
mod json;
mod markdown;
mod options;
mod stats;
mod text;

pub use html::{node_to_html, table_to_html, to_html};
pub use json::{serialize, to_json, JsonFormat};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::{RenderOptions, TableFallback};
pub use stats::DocumentStats;
pub use text::{chunk_texts, to_chunk_records, to_text, ChunkRecord};
