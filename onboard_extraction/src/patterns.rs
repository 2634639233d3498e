//! Extraction pattern definitions.
//!
//! Each pattern is data: the field it fills, the regex with one capture
//! group, and how to clean the capture. Patterns for the same field are
//! tried in order and the first match wins.

use onboard_core::Field;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for pattern building.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid regex in pattern '{id}': {source}")]
    Regex {
        id: String,
        #[source]
        source: regex::Error,
    },

    #[error("pattern '{0}' has no capture group")]
    MissingCapture(String),
}

/// Definition of a single extraction pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPattern {
    /// Unique identifier for this pattern.
    pub id: String,

    /// The field a match fills.
    pub field: Field,

    /// Regex with the value in capture group 1.
    pub pattern: String,

    /// Trim surrounding whitespace from the capture.
    #[serde(default)]
    pub trim: bool,

    /// Remove every whitespace character from the capture.
    #[serde(default)]
    pub strip_whitespace: bool,

    /// Skip captures with fewer ASCII digits than this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_digits: Option<usize>,
}

impl FieldPattern {
    fn new(id: &str, field: Field, pattern: &str) -> Self {
        Self {
            id: id.to_string(),
            field,
            pattern: pattern.to_string(),
            trim: false,
            strip_whitespace: false,
            min_digits: None,
        }
    }

    const fn trimmed(mut self) -> Self {
        self.trim = true;
        self
    }

    const fn without_whitespace(mut self) -> Self {
        self.strip_whitespace = true;
        self
    }

    const fn with_min_digits(mut self, digits: usize) -> Self {
        self.min_digits = Some(digits);
        self
    }

    /// Compile the regex.
    ///
    /// # Errors
    /// Returns an error if the regex is invalid or has no capture group.
    pub fn compile(&self) -> Result<Regex, BuildError> {
        let re = Regex::new(&self.pattern).map_err(|source| BuildError::Regex {
            id: self.id.clone(),
            source,
        })?;
        if re.captures_len() < 2 {
            return Err(BuildError::MissingCapture(self.id.clone()));
        }
        Ok(re)
    }

    /// Whether a raw capture has enough digits to count as a match.
    #[must_use]
    pub fn accepts(&self, raw: &str) -> bool {
        self.min_digits
            .is_none_or(|min| raw.bytes().filter(u8::is_ascii_digit).count() >= min)
    }

    /// Apply the cleanup rules to a raw capture.
    #[must_use]
    pub fn clean(&self, raw: &str) -> String {
        if self.strip_whitespace {
            raw.chars().filter(|c| !c.is_whitespace()).collect()
        } else if self.trim {
            raw.trim().to_string()
        } else {
            raw.to_string()
        }
    }
}

/// Default pattern set, in priority order.
#[must_use]
pub fn default_patterns() -> Vec<FieldPattern> {
    let mut patterns = Vec::new();
    patterns.extend(name_patterns());
    patterns.extend(contact_patterns());
    patterns.extend(identity_patterns());
    patterns
}

/// A labelled `Name:` line beats any capitalised word pair.
fn name_patterns() -> Vec<FieldPattern> {
    vec![
        FieldPattern::new("name_labelled", Field::Name, r"(?i)Name:\s*(.+)").trimmed(),
        FieldPattern::new("name_word_pair", Field::Name, r"([A-Z][a-z]+ [A-Z][a-z]+)"),
    ]
}

fn contact_patterns() -> Vec<FieldPattern> {
    vec![
        FieldPattern::new(
            "email",
            Field::Email,
            r"([a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+)",
        ),
        FieldPattern::new("phone", Field::Phone, r"(\+?\d[\d\-\s]{7,}\d)")
            .without_whitespace()
            .with_min_digits(9),
    ]
}

fn identity_patterns() -> Vec<FieldPattern> {
    vec![
        FieldPattern::new(
            "dob_labelled",
            Field::Dob,
            r"(?i)(?:DOB|Date of Birth)[:\s]+([0-9]{1,2}[/-][0-9]{1,2}[/-][0-9]{2,4})",
        ),
        FieldPattern::new("ssn", Field::Ssn, r"(\d{3}-\d{2}-\d{4})"),
    ]
}
