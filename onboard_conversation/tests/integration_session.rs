//! Integration tests for onboarding sessions.
//!
//! These tests verify that:
//! - Turns are appended to the caller's transcript in order
//! - Replies use the fields of the currently loaded document
//! - Remote mode without a key never reaches a provider
//! - The interactive loop handles commands end to end

use std::io::{Cursor, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use onboard_conversation::{ConversationError, OnboardingManager, Speaker, Transcript};
use onboard_core::agent::{GREETING_REPLY, NOT_ENOUGH_INFO_REPLY, REMOTE_UNAVAILABLE_REPLY};
use onboard_core::{
    ChatMessage, CompletionOptions, Field, LLMProvider, LLMResponse, Mode, ResponseDispatcher,
};

struct CountingProvider {
    calls: AtomicUsize,
}

#[async_trait]
impl LLMProvider for CountingProvider {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> anyhow::Result<LLMResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let last = messages.last().map_or("", |m| m.content.as_str());
        Ok(LLMResponse {
            content: format!(" echo({}): {last} ", options.model),
            usage: None,
        })
    }

    fn get_default_model(&self) -> &'static str {
        "counting"
    }
}

#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn local_manager() -> OnboardingManager {
    OnboardingManager::new(ResponseDispatcher::local_only(), Mode::Local)
        .expect("manager should build")
}

#[tokio::test]
async fn test_turns_are_recorded_in_order() {
    let manager = local_manager();
    let mut transcript = Transcript::new();

    let first = manager.process_turn(&mut transcript, "  start  ").await;
    let second = manager.process_turn(&mut transcript, "complete").await;

    assert_eq!(first.map(|r| (r.reply, r.turn_number)).ok(), Some((GREETING_REPLY.to_string(), 1)));
    assert_eq!(second.map(|r| r.turn_number).ok(), Some(2));

    let turns = transcript.turns();
    assert_eq!(turns.len(), 4);
    assert_eq!(turns[0].speaker(), Speaker::Client);
    assert_eq!(turns[0].text(), "start");
    assert_eq!(turns[3].speaker(), Speaker::Agent);
    assert_eq!(turns[3].text(), NOT_ENOUGH_INFO_REPLY);
}

#[tokio::test]
async fn test_blank_utterance_is_rejected_without_recording() {
    let manager = local_manager();
    let mut transcript = Transcript::new();

    let result = manager.process_turn(&mut transcript, " \n ").await;

    assert!(matches!(result, Err(ConversationError::EmptyInput)));
    assert!(transcript.is_empty());
}

#[tokio::test]
async fn test_reply_uses_current_document_only() {
    let mut manager = local_manager();
    let mut transcript = Transcript::new();

    manager.load_text("Name: Jane Doe\nEmail: jane@example.com".to_string());
    let reply = manager
        .process_turn(&mut transcript, "please complete the form")
        .await
        .map(|r| r.reply)
        .unwrap_or_default();
    assert!(reply.contains("name: Jane Doe"));
    assert!(reply.contains("email: jane@example.com"));

    manager.load_text("nothing useful".to_string());
    let reply = manager
        .process_turn(&mut transcript, "complete")
        .await
        .map(|r| r.reply)
        .unwrap_or_default();
    assert_eq!(reply, NOT_ENOUGH_INFO_REPLY);
}

#[tokio::test]
async fn test_remote_mode_without_key_short_circuits() {
    let mut manager = local_manager();
    manager.set_mode(Mode::Remote);
    assert!(manager.remote_warning().is_some());

    let mut transcript = Transcript::new();
    let reply = manager
        .process_turn(&mut transcript, "hello")
        .await
        .map(|r| r.reply)
        .unwrap_or_default();

    assert_eq!(reply, REMOTE_UNAVAILABLE_REPLY);
}

#[tokio::test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
async fn test_remote_mode_with_provider() {
    let provider = Arc::new(CountingProvider {
        calls: AtomicUsize::new(0),
    });
    let dispatcher = ResponseDispatcher::new(Some(provider.clone()));
    let manager = OnboardingManager::new(dispatcher, Mode::Remote).expect("manager should build");
    assert!(manager.remote_warning().is_none());

    let mut transcript = Transcript::new();
    let result = manager
        .process_turn(&mut transcript, "What documents do I need?")
        .await
        .expect("remote turn should succeed");

    assert_eq!(result.reply, "echo(gpt-4o-mini): What documents do I need?");
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_draft_requires_fields() {
    let mut manager = local_manager();
    let now = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).single().unwrap_or_default();

    assert!(matches!(
        manager.draft_at(now),
        Err(ConversationError::Draft(_))
    ));

    manager.load_text("Email: a@b.io".to_string());
    let draft = manager.draft_at(now).unwrap_or_default();
    assert_eq!(
        draft,
        "Onboarding Draft - Generated 2024-03-09 14:05 UTC\n--------------------------\nemail: a@b.io"
    );
}

#[test]
fn test_draft_lists_ssn_shaped_number_as_phone_too() {
    let mut manager = local_manager();
    let now = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).single().unwrap_or_default();

    manager.load_text("SSN 123-45-6789".to_string());
    let draft = manager.draft_at(now).unwrap_or_default();
    assert_eq!(
        draft,
        "Onboarding Draft - Generated 2024-03-09 14:05 UTC\n--------------------------\nphone: 123-45-6789\nssn: 123-45-6789"
    );
}

#[test]
fn test_load_sources_prefers_paste() {
    let mut manager = local_manager();
    let fields = manager.load_sources(Some("Name: From Paste"), Some("Name: From File".to_string()));
    assert_eq!(fields.get(Field::Name), Some("From Paste"));

    let fields = manager.load_sources(Some("   "), Some("Name: From File".to_string()));
    assert_eq!(fields.get(Field::Name), Some("From File"));
}

#[tokio::test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
async fn test_interactive_session_end_to_end() {
    let mut doc = tempfile::NamedTempFile::new().expect("temp file should be created");
    writeln!(doc, "Name: Priya Raman\nDOB: 3/11/1990").expect("temp file should be writable");

    let script = format!(
        "/help\n/load {}\ncomplete form\n/draft\n/mode remote\nhello\n/history\nexit\nnever read\n",
        doc.path().display()
    );

    let mut manager = local_manager();
    let mut transcript = Transcript::new();
    let mut output = Vec::new();

    manager
        .run_with(&mut transcript, Cursor::new(script), &mut output)
        .await
        .expect("session should run");

    let output = String::from_utf8(output).expect("output should be UTF-8");
    assert!(output.contains("Commands:"));
    assert!(output.contains("Extracted fields:\n  name: Priya Raman\n  dob: 3/11/1990"));
    assert!(output.contains("Onboarding Draft - Generated "));
    assert!(output.contains("Mode set to remote."));
    assert!(output.contains(REMOTE_UNAVAILABLE_REPLY));
    assert!(output.contains("You: complete form"));
    assert!(output.contains("Session ended. Total turns: 2"));

    assert_eq!(manager.mode(), Mode::Remote);
    assert_eq!(transcript.client_turns(), 2);
}

#[tokio::test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
async fn test_interactive_paste_and_missing_file() {
    let script = "/load /definitely/not/here.txt\n/paste\nEmail: a@b.io\n.\n/fields\n";

    let mut manager = local_manager();
    let mut transcript = Transcript::new();
    let mut output = Vec::new();

    manager
        .run_with(&mut transcript, Cursor::new(script), &mut output)
        .await
        .expect("session should run until EOF");

    let output = String::from_utf8(output).expect("output should be UTF-8");
    assert!(output.contains("Error: could not read /definitely/not/here.txt"));
    assert!(output.contains("  email: a@b.io"));
    assert_eq!(manager.fields().get(Field::Email), Some("a@b.io"));
    assert!(transcript.is_empty());
}
