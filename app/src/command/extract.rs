use onboard_config::Config;
use onboard_extraction::{FieldExtractor, preview};

use super::DocumentInput;

/// Input parameters for the Extract command strategy.
#[derive(Debug, Clone)]
pub struct ExtractInput {
    pub document: DocumentInput,
    /// Print fields as a JSON object instead of text
    pub json: bool,
}

/// Strategy for printing the fields found in a document.
#[derive(Debug, Clone, Copy)]
pub struct ExtractStrategy;

impl super::CommandStrategy for ExtractStrategy {
    type Input = ExtractInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let text = input.document.read()?;
        let fields = FieldExtractor::with_defaults()?.extract(&text);

        if input.json {
            println!("{}", serde_json::to_string_pretty(&fields)?);
            return Ok(());
        }

        if text.trim().is_empty() {
            println!("No document text provided. Use --file or --text.");
            return Ok(());
        }

        let config = Config::load()?;
        let limit = config.display.preview_chars;
        println!("Preview (first {limit} chars):");
        println!("{}\n", preview(&text, limit));

        if fields.is_empty() {
            println!(
                "No structured fields found. Try pasting a line like `Name: John Doe` or an email address."
            );
        } else {
            println!("Extracted fields:");
            for line in fields.to_lines() {
                println!("  {line}");
            }
        }

        Ok(())
    }
}
