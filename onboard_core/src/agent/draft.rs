//! Plain-text onboarding draft built from extracted fields.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::ExtractedFields;

/// Line printed between the draft header and the field lines.
pub const DRAFT_SEPARATOR: &str = "--------------------------";

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    #[error("No extracted data available to generate a form.")]
    NoFields,
}

/// Renders the draft form: header with `timestamp`, separator, one `key: value` line per field.
///
/// # Errors
/// Returns [`DraftError::NoFields`] when `fields` is empty.
pub fn render_draft(fields: &ExtractedFields, timestamp: &str) -> Result<String, DraftError> {
    if fields.is_empty() {
        return Err(DraftError::NoFields);
    }

    let mut lines = Vec::with_capacity(fields.len() + 2);
    lines.push(format!("Onboarding Draft - Generated {timestamp}"));
    lines.push(DRAFT_SEPARATOR.to_string());
    lines.extend(fields.to_lines());
    Ok(lines.join("\n"))
}

/// Formats `now` the way draft headers show it, e.g. `2024-05-01 09:30 UTC`.
#[must_use]
pub fn draft_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d %H:%M UTC").to_string()
}
