//! Response dispatcher for onboarding chat turns.
//!
//! Local mode answers from a fixed keyword table. Remote mode forwards the
//! utterance to an [`LLMProvider`]. Neither path returns an error: remote
//! failures are folded into the reply text.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::util::DEFAULT_SYSTEM_PROMPT;
use crate::{ChatMessage, CompletionOptions, ExtractedFields, LLMProvider, Mode};

pub const GREETING_REPLY: &str = "Hello! I'm LegacyOnboard AI. I can guide you through onboarding, extract info from uploads, and pre-fill forms. Please upload your ID or paste the document text.";

pub const STATUS_REPLY: &str = "Your onboarding status: Incomplete, documents pending. I can help you complete and submit them.";

pub const DRAFT_PREAMBLE: &str = "I prepared a draft of your onboarding fields:";

pub const DRAFT_OFFER: &str = "Would you like me to generate a completed PDF form?";

pub const NOT_ENOUGH_INFO_REPLY: &str = "I don't have enough info yet. Please upload or paste your documents so I can extract data.";

pub const FALLBACK_REPLY: &str = "Thanks, I understand. For demo mode, try asking me to 'start onboarding', 'check status', or 'complete form'.";

pub const REMOTE_UNAVAILABLE_REPLY: &str = "Remote mode requested but the API key or client is not available. Switch to local mode or set the API key to enable remote replies.";

/// Answers an utterance from the fixed rule table.
///
/// Keywords are matched as case-insensitive substrings, first match wins:
/// `start`, then `status`, then `form` or `complete`.
#[must_use]
pub fn local_reply(utterance: &str, fields: &ExtractedFields) -> String {
    let lowered = utterance.to_lowercase();

    if lowered.contains("start") {
        return GREETING_REPLY.to_string();
    }
    if lowered.contains("status") {
        return STATUS_REPLY.to_string();
    }
    if lowered.contains("form") || lowered.contains("complete") {
        if fields.is_empty() {
            return NOT_ENOUGH_INFO_REPLY.to_string();
        }
        let mut lines = Vec::with_capacity(fields.len() + 2);
        lines.push(DRAFT_PREAMBLE.to_string());
        lines.extend(fields.to_lines());
        lines.push(DRAFT_OFFER.to_string());
        return lines.join("\n");
    }

    FALLBACK_REPLY.to_string()
}

/// Produces one reply per utterance in either [`Mode`].
///
/// The remote provider is optional; without one, remote mode answers with
/// [`REMOTE_UNAVAILABLE_REPLY`] and no request is made.
pub struct ResponseDispatcher<P = Arc<dyn LLMProvider>>
where
    P: Send + Sync,
{
    remote: Option<P>,
    options: CompletionOptions,
    system_prompt: String,
}

impl ResponseDispatcher {
    /// Dispatcher with no remote provider.
    #[must_use]
    pub fn local_only() -> Self {
        Self::new(None)
    }
}

impl<P> ResponseDispatcher<P>
where
    P: LLMProvider + Send + Sync,
{
    #[must_use]
    pub fn new(remote: Option<P>) -> Self {
        Self {
            remote,
            options: CompletionOptions::default(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_system_prompt(mut self, prompt: String) -> Self {
        self.system_prompt = prompt;
        self
    }

    /// Whether remote mode can reach a provider.
    #[must_use]
    pub const fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    #[must_use]
    pub const fn options(&self) -> &CompletionOptions {
        &self.options
    }

    pub async fn respond(&self, utterance: &str, fields: &ExtractedFields, mode: Mode) -> String {
        match mode {
            Mode::Local => local_reply(utterance, fields),
            Mode::Remote => self.remote_reply(utterance).await,
        }
    }

    async fn remote_reply(&self, utterance: &str) -> String {
        let Some(provider) = self.remote.as_ref() else {
            warn!("Remote mode requested without an API key, skipping request");
            return REMOTE_UNAVAILABLE_REPLY.to_string();
        };

        let messages = [
            ChatMessage::system(self.system_prompt.as_str()),
            ChatMessage::user(utterance),
        ];

        info!("Dispatching remote completion: model={}", self.options.model);

        match provider.chat(&messages, &self.options).await {
            Ok(response) => {
                if let Some(usage) = response.usage {
                    debug!(
                        "Tokens: {} prompt + {} completion = {} total",
                        usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
                    );
                }
                response.content.trim().to_string()
            }
            Err(e) => {
                warn!("Remote completion failed: {e}");
                format!("Remote API error: {e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Field, LLMResponse, Role};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedProvider {
        calls: AtomicUsize,
        reply: Result<String, String>,
        seen: Mutex<Vec<ChatMessage>>,
    }

    impl ScriptedProvider {
        fn replying(reply: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply: Ok(reply.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply: Err(error.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn chat(
            &self,
            messages: &[ChatMessage],
            _options: &CompletionOptions,
        ) -> anyhow::Result<LLMResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut seen) = self.seen.lock() {
                seen.extend_from_slice(messages);
            }
            match &self.reply {
                Ok(content) => Ok(LLMResponse {
                    content: content.clone(),
                    usage: None,
                }),
                Err(e) => Err(anyhow::anyhow!("{e}")),
            }
        }

        fn get_default_model(&self) -> &'static str {
            "scripted"
        }
    }

    fn jane() -> ExtractedFields {
        [(Field::Name, "Jane Doe".to_string())].into_iter().collect()
    }

    #[test]
    fn start_has_highest_priority() {
        let reply = local_reply("Start onboarding and check status of my form", &jane());
        assert_eq!(reply, GREETING_REPLY);
    }

    #[test]
    fn status_before_form() {
        let reply = local_reply("what is the STATUS of the form?", &jane());
        assert_eq!(reply, STATUS_REPLY);
    }

    #[test]
    fn complete_without_fields_asks_for_documents() {
        let reply = local_reply("complete", &ExtractedFields::new());
        assert_eq!(reply, NOT_ENOUGH_INFO_REPLY);
    }

    #[test]
    fn complete_lists_fields_in_order() {
        let fields: ExtractedFields = [
            (Field::Ssn, "123-45-6789".to_string()),
            (Field::Name, "Jane Doe".to_string()),
        ]
        .into_iter()
        .collect();

        let reply = local_reply("complete", &fields);
        let lines: Vec<&str> = reply.lines().collect();
        assert_eq!(
            lines,
            vec![
                DRAFT_PREAMBLE,
                "name: Jane Doe",
                "ssn: 123-45-6789",
                DRAFT_OFFER
            ]
        );
    }

    #[test]
    fn keywords_match_as_substrings() {
        assert_eq!(local_reply("please restart", &jane()), GREETING_REPLY);
        assert!(local_reply("more information", &jane()).contains("name: Jane Doe"));
    }

    #[test]
    fn unmatched_falls_back() {
        assert_eq!(local_reply("hello there", &jane()), FALLBACK_REPLY);
        assert_eq!(local_reply("", &ExtractedFields::new()), FALLBACK_REPLY);
    }

    #[test]
    fn local_reply_is_deterministic() {
        let fields = jane();
        assert_eq!(
            local_reply("fill the form", &fields),
            local_reply("fill the form", &fields)
        );
    }

    #[tokio::test]
    async fn local_mode_never_calls_provider() {
        let provider = Arc::new(ScriptedProvider::replying("remote"));
        let dispatcher = ResponseDispatcher::new(Some(provider.clone()));

        let reply = dispatcher.respond("status", &jane(), Mode::Local).await;
        assert_eq!(reply, STATUS_REPLY);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn remote_without_provider_short_circuits() {
        let dispatcher = ResponseDispatcher::local_only();
        assert!(!dispatcher.has_remote());

        let reply = dispatcher.respond("hello", &jane(), Mode::Remote).await;
        assert_eq!(reply, REMOTE_UNAVAILABLE_REPLY);
    }

    #[tokio::test]
    async fn remote_reply_is_trimmed_and_prompted() {
        let provider = Arc::new(ScriptedProvider::replying("  Welcome aboard.\n"));
        let dispatcher = ResponseDispatcher::new(Some(provider.clone()));

        let reply = dispatcher.respond("Hi there", &jane(), Mode::Remote).await;
        assert_eq!(reply, "Welcome aboard.");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

        let seen = provider.seen.lock().map(|m| m.clone()).unwrap_or_default();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].role, Role::System);
        assert_eq!(seen[0].content, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(seen[1].role, Role::User);
        assert_eq!(seen[1].content, "Hi there");
    }

    #[tokio::test]
    async fn remote_failure_becomes_reply() {
        let provider = Arc::new(ScriptedProvider::failing("quota exceeded"));
        let dispatcher = ResponseDispatcher::new(Some(provider.clone()));

        let reply = dispatcher.respond("Hi", &jane(), Mode::Remote).await;
        assert_eq!(reply, "Remote API error: quota exceeded");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn custom_system_prompt_is_sent() {
        let provider = Arc::new(ScriptedProvider::replying("ok"));
        let dispatcher = ResponseDispatcher::new(Some(provider.clone()))
            .with_system_prompt("Be brief.".to_string());

        dispatcher.respond("Hi", &jane(), Mode::Remote).await;

        let seen = provider.seen.lock().map(|m| m.clone()).unwrap_or_default();
        assert_eq!(seen[0].content, "Be brief.");
    }
}
