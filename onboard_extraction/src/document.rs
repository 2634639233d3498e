//! A piece of document text together with the fields derived from it.

use onboard_core::ExtractedFields;

use crate::engine::FieldExtractor;

/// Raw document text and its extracted fields.
///
/// Fields are computed once when the document is built and cannot be
/// changed afterwards; new text means a new `Document`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
    fields: ExtractedFields,
}

impl Document {
    #[must_use]
    pub fn new(text: String, extractor: &FieldExtractor) -> Self {
        let fields = extractor.extract(&text);
        Self { text, fields }
    }

    /// Document with no text and no fields.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn fields(&self) -> &ExtractedFields {
        &self.fields
    }

    /// Whether there is any non-whitespace text.
    #[must_use]
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}
