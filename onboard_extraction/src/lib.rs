#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Pattern-based identity field extraction from unstructured document text.
//!
//! Patterns are plain data ([`FieldPattern`]) compiled once into a
//! [`FieldExtractor`]. A [`Document`] ties raw text to the fields derived from it.

pub mod document;
pub mod engine;
pub mod patterns;
pub mod source;

pub use document::Document;
pub use engine::{FieldExtractor, default_extractor, extract};
pub use patterns::{BuildError, FieldPattern, default_patterns};
pub use source::{DEFAULT_PREVIEW_CHARS, decode_upload, preview, select_text};
