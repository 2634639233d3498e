//! Extraction engine for identity fields.
//!
//! The engine scans the text once per pattern and keeps the first match for
//! each field. Nothing is validated beyond the shape of the match.

use onboard_core::{ExtractedFields, Field};
use once_cell::sync::OnceCell;
use regex::Regex;
use tracing::debug;

use crate::patterns::{BuildError, FieldPattern, default_patterns};

struct CompiledPattern {
    def: FieldPattern,
    regex: Regex,
}

/// Compiled extraction patterns.
pub struct FieldExtractor {
    patterns: Vec<CompiledPattern>,
}

impl FieldExtractor {
    /// Create an extractor from pattern definitions, tried in the given order.
    ///
    /// # Errors
    /// Returns an error if a pattern fails to compile.
    pub fn new(defs: Vec<FieldPattern>) -> Result<Self, BuildError> {
        let patterns = defs
            .into_iter()
            .map(|def| {
                let regex = def.compile()?;
                Ok(CompiledPattern { def, regex })
            })
            .collect::<Result<Vec<_>, BuildError>>()?;

        Ok(Self { patterns })
    }

    /// Create an extractor with the default patterns.
    ///
    /// # Errors
    /// Returns an error if default pattern compilation fails.
    pub fn with_defaults() -> Result<Self, BuildError> {
        Self::new(default_patterns())
    }

    /// Extract every field that has a match in `text`.
    #[must_use]
    pub fn extract(&self, text: &str) -> ExtractedFields {
        let mut fields = ExtractedFields::new();

        for pattern in &self.patterns {
            if fields.contains(pattern.def.field) {
                continue;
            }
            if let Some(value) = Self::apply_pattern(pattern, text) {
                debug!("Pattern '{}' matched {}", pattern.def.id, pattern.def.field);
                fields.insert_first(pattern.def.field, value);
            }
        }

        debug!("Extracted {} field(s) from {} bytes", fields.len(), text.len());
        fields
    }

    /// The first value `field` would get, ignoring other fields.
    #[must_use]
    pub fn extract_field(&self, text: &str, field: Field) -> Option<String> {
        self.patterns
            .iter()
            .filter(|p| p.def.field == field)
            .find_map(|p| Self::apply_pattern(p, text))
    }

    fn apply_pattern(pattern: &CompiledPattern, text: &str) -> Option<String> {
        pattern
            .regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .find(|raw| pattern.def.accepts(raw))
            .map(|raw| pattern.def.clean(raw))
    }
}

static DEFAULT_EXTRACTOR: OnceCell<FieldExtractor> = OnceCell::new();

/// Shared extractor with the default patterns, compiled on first use.
///
/// # Errors
/// Returns an error if default pattern compilation fails.
pub fn default_extractor() -> Result<&'static FieldExtractor, BuildError> {
    DEFAULT_EXTRACTOR.get_or_try_init(FieldExtractor::with_defaults)
}

/// Extract fields from `text` with the default patterns.
///
/// # Errors
/// Returns an error if default pattern compilation fails.
pub fn extract(text: &str) -> Result<ExtractedFields, BuildError> {
    Ok(default_extractor()?.extract(text))
}
