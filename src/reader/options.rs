//! Reading options and configuration.

use super::{CleanupOptions, CleanupPreset};

/// Options for reading layout block records.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// How body content nests under sections
    pub nesting: NestingPolicy,

    /// Text cleanup applied to sentences and cell text
    pub cleanup: Option<CleanupOptions>,
}

impl ReadOptions {
    /// Create new read options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Skip malformed records and keep going.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Fail on the first malformed record or table.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Set the nesting policy.
    pub fn with_nesting(mut self, nesting: NestingPolicy) -> Self {
        self.nesting = nesting;
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = Some(cleanup);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup_preset(mut self, preset: CleanupPreset) -> Self {
        self.cleanup = Some(CleanupOptions::from_preset(preset));
        self
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            nesting: NestingPolicy::Strict,
            cleanup: None,
        }
    }
}

/// Error handling mode while reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any malformed record or table
    Strict,
    /// Record the problem as a diagnostic and continue
    #[default]
    Lenient,
}

/// How non-heading content attaches to open sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NestingPolicy {
    /// A node nests under a section only if its level is strictly greater
    #[default]
    Strict,
    /// Body content continues the innermost open section at any level;
    /// only headings close sections
    Continuation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_options_builder() {
        let options = ReadOptions::new()
            .strict()
            .with_nesting(NestingPolicy::Continuation)
            .with_cleanup_preset(CleanupPreset::Minimal);

        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert_eq!(options.nesting, NestingPolicy::Continuation);
        assert!(options.cleanup.is_some());
    }

    #[test]
    fn test_default_options() {
        let options = ReadOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert_eq!(options.nesting, NestingPolicy::Strict);
        assert!(options.cleanup.is_none());
    }
}
