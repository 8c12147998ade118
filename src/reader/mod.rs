//! Reading layout block records into a [`Document`].
//!
//! Records flow through three stages: each record is decoded on its own,
//! table fragments are grouped into table nodes, and the resulting flat
//! sequence is assembled into a forest by level.

mod cleanup;
mod decoder;
mod options;
mod record;
mod table_grouper;
mod tree;

pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use decoder::{decode_record, CellFragment, Decoded, RecordDecoder, RowFragment};
pub use options::{ErrorMode, NestingPolicy, ReadOptions};
pub use record::{BlockRecord, RawCell, RawRow, RecordTag};
pub use table_grouper::TableGrouper;
pub use tree::{build_tree, TreeBuilder};

use crate::error::{Error, Result};
use crate::model::{Diagnostic, Document};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Reads layout parser output into documents.
///
/// # Example
///
/// ```
/// use layoutdoc::reader::{LayoutReader, NestingPolicy};
/// use serde_json::json;
///
/// let doc = LayoutReader::new()
///     .with_nesting(NestingPolicy::Continuation)
///     .read_value(&json!({
///         "return_dict": {"result": {"blocks": [
///             {"tag": "header", "level": 0, "sentences": ["Intro"]},
///             {"tag": "para", "level": 1, "sentences": ["Hello."]}
///         ]}}
///     }))?;
/// assert_eq!(doc.sections().len(), 1);
/// # Ok::<(), layoutdoc::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct LayoutReader {
    options: ReadOptions,
}

impl LayoutReader {
    /// Create a reader with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail on the first malformed record or table.
    pub fn strict(mut self) -> Self {
        self.options = self.options.strict();
        self
    }

    /// Record malformed records and tables as diagnostics.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Set the nesting policy.
    pub fn with_nesting(mut self, nesting: NestingPolicy) -> Self {
        self.options = self.options.with_nesting(nesting);
        self
    }

    /// Clean sentences and cell text with a preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.options = self.options.with_cleanup_preset(preset);
        self
    }

    /// Replace all options.
    pub fn with_options(mut self, options: ReadOptions) -> Self {
        self.options = options;
        self
    }

    /// Current options.
    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Read a sequence of block records.
    pub fn read_blocks(&self, blocks: &[Value]) -> Result<Document> {
        let decoder = RecordDecoder::new(&self.options);
        let mut grouper = TableGrouper::new();
        let mut builder = TreeBuilder::new(self.options.nesting);
        let mut diagnostics = Vec::new();
        let mut decoded = 0usize;

        for (index, value) in blocks.iter().enumerate() {
            match decoder.decode(index, value) {
                Ok(item) => {
                    decoded += 1;
                    for node in grouper.push(item) {
                        builder.push(node);
                    }
                }
                Err(err) => {
                    log::warn!("skipping record {}: {}", index, err);
                    self.recover(err, &mut diagnostics)?;
                }
            }
            for err in grouper.take_errors() {
                self.recover(err, &mut diagnostics)?;
            }
        }
        if let Some(node) = grouper.finish() {
            builder.push(node);
        }
        for err in grouper.take_errors() {
            self.recover(err, &mut diagnostics)?;
        }

        let roots = builder.finish();
        log::debug!(
            "decoded {} of {} records, grouped {} tables, built {} roots",
            decoded,
            blocks.len(),
            grouper.table_count(),
            roots.len()
        );

        let document = Document {
            roots,
            diagnostics,
            record_count: blocks.len(),
        };
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("document outline:\n{}", document.outline());
        }
        Ok(document)
    }

    /// Read parser output: a block array, or an object holding one under
    /// `return_dict.result.blocks`, `result.blocks` or `blocks`.
    pub fn read_value(&self, value: &Value) -> Result<Document> {
        let blocks = find_blocks(value)?;
        self.read_blocks(blocks)
    }

    /// Read parser output from a JSON string.
    pub fn read_str(&self, json: &str) -> Result<Document> {
        let value: Value = serde_json::from_str(json)?;
        self.read_value(&value)
    }

    /// Read parser output from a reader.
    pub fn read_reader<R: Read>(&self, reader: R) -> Result<Document> {
        let value: Value = serde_json::from_reader(reader)?;
        self.read_value(&value)
    }

    /// Read parser output from a file.
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        let data = std::fs::read_to_string(path.as_ref())?;
        self.read_str(&data)
    }

    /// Read parser output from a file without blocking the runtime.
    #[cfg(feature = "async")]
    pub async fn read_file_async<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        let data = tokio::fs::read_to_string(path.as_ref()).await?;
        self.read_str(&data)
    }

    /// Build a document, recording every problem as a diagnostic.
    pub fn build(&self, blocks: &[Value]) -> Document {
        let options = self.options.clone().lenient();
        let lenient = LayoutReader { options };
        lenient.read_blocks(blocks).unwrap_or_else(|err| {
            log::warn!("lenient read failed: {}", err);
            Document::default()
        })
    }

    fn recover(&self, err: Error, diagnostics: &mut Vec<Diagnostic>) -> Result<()> {
        match (self.options.error_mode, Diagnostic::from_error(&err)) {
            (ErrorMode::Lenient, Some(diagnostic)) => {
                diagnostics.push(diagnostic);
                Ok(())
            }
            _ => Err(err),
        }
    }
}

/// Locate the block array inside parser output.
fn find_blocks(value: &Value) -> Result<&[Value]> {
    if let Some(blocks) = value.as_array() {
        return Ok(blocks);
    }
    if !value.is_object() {
        return Err(Error::InvalidInput(format!(
            "expected a block array or a parser response object, got {}",
            json_type(value)
        )));
    }

    const PATHS: [&str; 3] = ["/return_dict/result/blocks", "/result/blocks", "/blocks"];
    for path in PATHS {
        if let Some(found) = value.pointer(path) {
            return found.as_array().map(Vec::as_slice).ok_or_else(|| {
                Error::InvalidInput(format!("{} is {}, not an array", path, json_type(found)))
            });
        }
    }
    Err(Error::InvalidInput(
        "no blocks found in parser response".to_string(),
    ))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
