//! Prompt text and small display helpers shared across crates.

/// System instruction sent with every remote completion request.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are LegacyOnboard AI, a professional onboarding assistant for a financial services company. Be concise, ask only necessary questions, and avoid giving legal or tax advice. Always suggest secure document upload.";

/// Display name used for agent turns.
pub const AGENT_DISPLAY_NAME: &str = "LegacyOnboard AI";

/// Returns at most `max_chars` characters of `text`, never splitting a code point.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(idx, _)| &text[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("日本語テキスト", 3), "日本語");
    }

    #[test]
    fn system_prompt_mentions_constraints() {
        assert!(DEFAULT_SYSTEM_PROMPT.contains("legal or tax advice"));
        assert!(DEFAULT_SYSTEM_PROMPT.contains("secure document upload"));
    }
}
