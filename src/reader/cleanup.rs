//! Sentence cleanup applied while decoding records.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Unicode NFC normalization and whitespace collapsing
    Minimal,
    /// Minimal plus ligature repair, control and replacement character removal
    #[default]
    Standard,
}

/// Options for sentence cleanup.
#[derive(Debug, Clone)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Fix ligatures (fi, fl, etc.)
    pub fix_ligatures: bool,

    /// Remove Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Remove control characters other than whitespace
    pub remove_control_chars: bool,

    /// Collapse runs of whitespace into single spaces and trim
    pub normalize_whitespace: bool,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: false,
            remove_replacement_char: false,
            remove_control_chars: false,
            normalize_whitespace: true,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: true,
            remove_replacement_char: true,
            remove_control_chars: true,
            normalize_whitespace: true,
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Sentence cleanup pipeline.
pub struct CleanupPipeline {
    options: CleanupOptions,
    whitespace_regex: Regex,
    ligature_map: Vec<(&'static str, &'static str)>,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self {
            options,
            whitespace_regex: Regex::new(r"\s+").expect("static regex"),
            ligature_map: vec![
                ("\u{FB00}", "ff"),
                ("\u{FB01}", "fi"),
                ("\u{FB02}", "fl"),
                ("\u{FB03}", "ffi"),
                ("\u{FB04}", "ffl"),
                ("\u{FB05}", "st"),
                ("\u{FB06}", "st"),
            ],
        }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Clean a single sentence.
    pub fn process(&self, text: &str) -> String {
        let mut result: String = if self.options.normalize_unicode {
            text.nfc().collect()
        } else {
            text.to_string()
        };

        if self.options.fix_ligatures {
            for (ligature, replacement) in &self.ligature_map {
                result = result.replace(ligature, replacement);
            }
        }

        if self.options.remove_replacement_char {
            result = result.replace('\u{FFFD}', "");
        }

        if self.options.remove_control_chars {
            result.retain(|c| !c.is_control() || c.is_whitespace());
        }

        if self.options.normalize_whitespace {
            result = self
                .whitespace_regex
                .replace_all(result.trim(), " ")
                .into_owned();
        }

        result
    }

    /// Clean every sentence, dropping the ones left empty.
    pub fn process_all(&self, sentences: Vec<String>) -> Vec<String> {
        sentences
            .into_iter()
            .map(|s| self.process(&s))
            .filter(|s| !s.trim().is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_collapsed() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Minimal);
        assert_eq!(pipeline.process("  Hello \n\t world  "), "Hello world");
    }

    #[test]
    fn test_ligatures_fixed() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Standard);
        assert_eq!(pipeline.process("\u{FB01}nancial \u{FB02}ow"), "financial flow");
    }

    #[test]
    fn test_nfc() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Minimal);
        // e + combining acute accent
        assert_eq!(pipeline.process("caf\u{0065}\u{0301}"), "caf\u{00E9}");
    }

    #[test]
    fn test_control_and_replacement_removed() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Standard);
        assert_eq!(pipeline.process("a\u{0007}b\u{FFFD}c"), "abc");
    }

    #[test]
    fn test_process_all_drops_empty() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Standard);
        let out = pipeline.process_all(vec!["One.".into(), "   ".into(), "Two.".into()]);
        assert_eq!(out, vec!["One.", "Two."]);
    }
}
