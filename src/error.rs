//! Error types for layoutdoc library.

use std::io;
use thiserror::Error;

/// Result type alias for layoutdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading layout blocks.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input does not contain a sequence of block records.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A single block record lacks required structure (e.g. a valid level).
    #[error("Malformed record at index {index}: {reason}")]
    MalformedRecord {
        /// Position of the record in the input sequence
        index: usize,
        /// What was wrong with it
        reason: String,
    },

    /// A grouped table has rows of inconsistent width.
    #[error("Malformed table at index {index}: {reason}")]
    MalformedTable {
        /// Position of the first record of the table
        index: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Error during rendering (JSON serialization).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Create a malformed record error.
    pub fn malformed_record(index: usize, reason: impl Into<String>) -> Self {
        Error::MalformedRecord {
            index,
            reason: reason.into(),
        }
    }

    /// Create a malformed table error.
    pub fn malformed_table(index: usize, reason: impl Into<String>) -> Self {
        Error::MalformedTable {
            index,
            reason: reason.into(),
        }
    }

    /// Check whether this error is recoverable by skipping or degrading
    /// a single record.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::MalformedRecord { .. } | Error::MalformedTable { .. }
        )
    }
}
