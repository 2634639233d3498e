//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input type, so
//! dispatch in `main` is fully static.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use onboard_config::Config;
use onboard_conversation::OnboardingManager;
use onboard_core::{LLMProvider, Mode, ResponseDispatcher};
use onboard_extraction::{decode_upload, select_text};
use onboard_providers::OpenAiProvider;
use tracing::{info, warn};

mod chat;
mod draft;
mod extract;
mod info;
mod init;
mod version;

pub use chat::{ChatInput, ChatStrategy};
pub use draft::DraftStrategy;
pub use extract::{ExtractInput, ExtractStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// Each strategy defines its own input type via the associated type, so
/// parameters are passed without runtime casting or boxing.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Where the document text comes from.
#[derive(Debug, Clone, Default)]
pub struct DocumentInput {
    /// Uploaded file (`-` for stdin)
    pub file: Option<PathBuf>,
    /// Pasted text
    pub text: Option<String>,
}

impl DocumentInput {
    /// Read the upload (if any) and apply paste precedence.
    fn read(&self) -> anyhow::Result<String> {
        let uploaded = match &self.file {
            Some(path) if path.as_os_str() == "-" => {
                let mut bytes = Vec::new();
                std::io::stdin().read_to_end(&mut bytes)?;
                Some(decode_upload(&bytes))
            }
            Some(path) => {
                let bytes = std::fs::read(path).map_err(|e| {
                    anyhow::anyhow!("Cannot read document {}: {e}", path.display())
                })?;
                info!("Read {} bytes from {}", bytes.len(), path.display());
                Some(decode_upload(&bytes))
            }
            None => None,
        };

        Ok(select_text(self.text.as_deref(), uploaded))
    }

    const fn is_empty(&self) -> bool {
        self.file.is_none() && self.text.is_none()
    }
}

/// Build the remote provider when an API key is available.
fn remote_provider(config: &Config) -> Option<Arc<dyn LLMProvider>> {
    let provider_config = &config.providers.openai;
    let Some(api_key) = provider_config.api_key() else {
        info!(
            "{} is not set, remote replies are unavailable",
            provider_config.api_key_env
        );
        return None;
    };

    let provider =
        OpenAiProvider::new(api_key).with_base_url(provider_config.base_url.clone());
    Some(Arc::new(provider))
}

/// Build a manager for `mode` from configuration, with the document loaded.
fn build_manager(
    config: &Config,
    mode: Mode,
    model: Option<String>,
    document: &DocumentInput,
) -> anyhow::Result<OnboardingManager> {
    let remote = remote_provider(config);
    if mode == Mode::Remote && remote.is_none() {
        warn!("Remote mode selected without an API key");
    }

    let defaults = &config.agents.defaults;
    let mut dispatcher =
        ResponseDispatcher::new(remote).with_options(defaults.completion_options(model));
    if let Some(prompt) = &defaults.system_prompt {
        dispatcher = dispatcher.with_system_prompt(prompt.clone());
    }

    let mut manager = OnboardingManager::new(dispatcher, mode)?
        .with_preview_chars(config.display.preview_chars);

    if !document.is_empty() {
        manager.load_text(document.read()?);
    }

    Ok(manager)
}
