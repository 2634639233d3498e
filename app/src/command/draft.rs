use chrono::Utc;
use onboard_core::{DraftError, draft_timestamp, render_draft};
use onboard_extraction::FieldExtractor;
use tracing::warn;

use super::DocumentInput;

/// Strategy for rendering the draft onboarding form of a document.
///
/// An empty result is reported on stderr; it is not a command failure.
#[derive(Debug, Clone, Copy)]
pub struct DraftStrategy;

impl super::CommandStrategy for DraftStrategy {
    type Input = DocumentInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let text = input.read()?;
        let fields = FieldExtractor::with_defaults()?.extract(&text);

        match render_draft(&fields, &draft_timestamp(Utc::now())) {
            Ok(form) => {
                println!("{form}");
                println!();
                println!("Draft prepared. Review and edit before sending for signature.");
            }
            Err(DraftError::NoFields) => {
                warn!("Draft requested for a document with no recognised fields");
                eprintln!("{}", DraftError::NoFields);
            }
        }

        Ok(())
    }
}
