//! Identity fields recognised in onboarding documents.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One recognised identity attribute.
///
/// Variant order is the extraction priority order, so an [`ExtractedFields`]
/// map iterates in the order the fields were extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Phone,
    Dob,
    Ssn,
}

impl Field {
    pub const ALL: [Self; 5] = [Self::Name, Self::Email, Self::Phone, Self::Dob, Self::Ssn];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Dob => "dob",
            Self::Ssn => "ssn",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown field: {s}"))
    }
}

/// Fields found in one piece of text. A missing key means the pattern did not match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedFields(BTreeMap<Field, String>);

impl ExtractedFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` unless the field already has one; the first match wins.
    pub fn insert_first(&mut self, field: Field, value: impl Into<String>) -> bool {
        if self.0.contains_key(&field) {
            return false;
        }
        self.0.insert(field, value.into());
        true
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in extraction order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, value)| (*field, value.as_str()))
    }

    /// `key: value` lines in extraction order.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        self.iter()
            .map(|(field, value)| format!("{field}: {value}"))
            .collect()
    }
}

impl FromIterator<(Field, String)> for ExtractedFields {
    fn from_iter<I: IntoIterator<Item = (Field, String)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (field, value) in iter {
            fields.insert_first(field, value);
        }
        fields
    }
}

impl<'a> IntoIterator for &'a ExtractedFields {
    type Item = (Field, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (Field, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
