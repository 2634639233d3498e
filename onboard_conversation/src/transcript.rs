//! Transcript of an onboarding chat.

use chrono::{DateTime, Utc};
use onboard_core::util::AGENT_DISPLAY_NAME;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    Client,
    Agent,
}

impl Speaker {
    /// Label used when rendering the transcript.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Client => "You",
            Self::Agent => AGENT_DISPLAY_NAME,
        }
    }
}

/// One turn of the conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    speaker: Speaker,
    text: String,
}

impl ChatTurn {
    #[must_use]
    pub const fn new(speaker: Speaker, text: String) -> Self {
        Self { speaker, text }
    }

    #[must_use]
    pub const fn speaker(&self) -> Speaker {
        self.speaker
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for ChatTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.speaker.label(), self.text)
    }
}

/// Ordered, append-only record of a session's turns.
///
/// The caller owns the transcript and passes it into each turn explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    id: Uuid,
    turns: Vec<ChatTurn>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Transcript {
    /// Create a new empty transcript.
    #[must_use]
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            turns: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a turn.
    pub fn record(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.turns.push(ChatTurn::new(speaker, text.into()));
        self.updated_at = Utc::now();
    }

    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    #[must_use]
    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    /// Number of client turns so far.
    #[must_use]
    pub fn client_turns(&self) -> usize {
        self.turns
            .iter()
            .filter(|t| t.speaker == Speaker::Client)
            .count()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// One `Label: text` line per turn.
    #[must_use]
    pub fn render(&self) -> String {
        self.turns
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut transcript = Transcript::new();
        transcript.record(Speaker::Client, "start");
        transcript.record(Speaker::Agent, "Hello!");

        let speakers: Vec<Speaker> = transcript.turns().iter().map(ChatTurn::speaker).collect();
        assert_eq!(speakers, vec![Speaker::Client, Speaker::Agent]);
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.client_turns(), 1);
        assert_eq!(transcript.last().map(ChatTurn::text), Some("Hello!"));
    }

    #[test]
    fn renders_with_labels() {
        let mut transcript = Transcript::new();
        transcript.record(Speaker::Client, "status?");
        transcript.record(Speaker::Agent, "Pending.");

        assert_eq!(
            transcript.render(),
            "You: status?\nLegacyOnboard AI: Pending."
        );
    }

    #[test]
    fn new_transcript_is_empty() {
        let transcript = Transcript::default();
        assert!(transcript.is_empty());
        assert_eq!(transcript.render(), "");
        assert!(transcript.updated_at() >= transcript.created_at());
    }
}
