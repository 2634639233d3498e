//! Onboarding chat command.
//!
//! Loads the document, then either answers a single message or runs the
//! interactive session loop.

use onboard_config::Config;
use onboard_conversation::Transcript;
use onboard_core::Mode;
use tracing::info;

use super::{DocumentInput, build_manager};

/// Input parameters for the Chat command strategy.
#[derive(Debug, Clone)]
pub struct ChatInput {
    /// Document to load before the first turn
    pub document: DocumentInput,
    /// Reply mode override
    pub mode: Option<Mode>,
    /// Optional model override
    pub model: Option<String>,
    /// Optional single message to send (non-interactive mode)
    pub message: Option<String>,
}

/// Strategy for executing the Chat command.
#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

impl super::CommandStrategy for ChatStrategy {
    type Input = ChatInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let mode = input.mode.unwrap_or(config.agents.defaults.mode);

        let mut manager = build_manager(&config, mode, input.model, &input.document)?;
        let mut transcript = Transcript::new();

        if let Some(warning) = manager.remote_warning() {
            eprintln!("{warning}");
        }

        if let Some(msg) = input.message {
            let result = manager.process_turn(&mut transcript, &msg).await?;
            println!("{}", result.reply);
        } else {
            if manager.document().has_text() {
                let mut stdout = std::io::stdout();
                manager.write_document(&mut stdout)?;
                println!();
            }

            manager.run_interactive(&mut transcript).await?;
            info!(
                "Conversation ended: {} turns recorded",
                transcript.len()
            );
        }

        Ok(())
    }
}
