//! Text intake: uploaded bytes, pasted text and display previews.

use onboard_core::util::truncate_chars;
use tracing::warn;

/// Characters shown when previewing a document.
pub const DEFAULT_PREVIEW_CHARS: usize = 800;

/// Decode an uploaded file as UTF-8.
///
/// Invalid UTF-8 falls back to the escaped byte-string form `b'...'`
/// instead of failing, so extraction still sees any ASCII content.
#[must_use]
pub fn decode_upload(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(e) => {
            warn!("Upload is not valid UTF-8 ({e}), using byte-string form");
            byte_string_literal(bytes)
        }
    }
}

/// Render `bytes` as a `b'...'` literal.
///
/// Single quotes are used unless the bytes hold a `'` and no `"`. Only the
/// backslash, the chosen quote and non-printable bytes are escaped, so other
/// punctuation survives as written.
fn byte_string_literal(bytes: &[u8]) -> String {
    let quote = if bytes.contains(&b'\'') && !bytes.contains(&b'"') {
        b'"'
    } else {
        b'\''
    };

    let mut out = String::with_capacity(bytes.len() + 3);
    out.push('b');
    out.push(char::from(quote));
    for &byte in bytes {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'\t' => out.push_str("\\t"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            _ if byte == quote => {
                out.push('\\');
                out.push(char::from(byte));
            }
            0x20..=0x7e => out.push(char::from(byte)),
            _ => out.extend(byte.escape_ascii().map(char::from)),
        }
    }
    out.push(char::from(quote));
    out
}

/// Choose the text to extract from. Non-blank pasted text takes precedence.
#[must_use]
pub fn select_text(pasted: Option<&str>, uploaded: Option<String>) -> String {
    match pasted {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => uploaded.unwrap_or_default(),
    }
}

/// First `max_chars` characters of `text`.
#[must_use]
pub fn preview(text: &str, max_chars: usize) -> &str {
    truncate_chars(text, max_chars)
}
