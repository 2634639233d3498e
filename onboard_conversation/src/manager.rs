//! Onboarding session manager.
//!
//! The `OnboardingManager` holds the current document and reply mode, and
//! turns client utterances into agent replies. The transcript is owned by the
//! caller and handed in for every turn.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use onboard_core::{
    DraftError, ExtractedFields, LLMProvider, Mode, ResponseDispatcher, draft_timestamp,
    render_draft,
};
use onboard_extraction::{
    BuildError, DEFAULT_PREVIEW_CHARS, Document, FieldExtractor, decode_upload, preview,
    select_text,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::transcript::{Speaker, Transcript};

const NO_FIELDS_HINT: &str =
    "No structured fields found. Try pasting a line like `Name: John Doe` or an email address.";

const REMOTE_WARNING: &str = "Warning: remote mode needs an API key. Replies will explain that the service is unavailable until one is set.";

const HELP_TEXT: &str = "\
Commands:
  /load <path>    read a text document and extract fields
  /paste          paste document text, end with a line containing only '.'
  /fields         show the extracted fields
  /draft          generate the draft onboarding form
  /mode <m>       switch reply mode (local | remote)
  /history        show the conversation so far
  /help           show this help
  exit | quit     end the session
Anything else is sent to the agent.";

/// Errors that can occur during an onboarding session.
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("Extraction setup failed: {0}")]
    Extraction(#[from] BuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Empty message")]
    EmptyInput,

    #[error(transparent)]
    Draft(#[from] DraftError),
}

/// Result of processing one client utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnResult {
    /// Agent reply
    pub reply: String,
    /// 1-based count of client turns, including this one
    pub turn_number: usize,
}

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Load(PathBuf),
    Paste,
    Fields,
    Draft,
    Mode(Mode),
    History,
    Help,
    Exit,
    Say(String),
    Invalid(String),
}

impl SessionCommand {
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();

        if matches!(line, "exit" | "quit" | "q") {
            return Self::Exit;
        }

        let Some(rest) = line.strip_prefix('/') else {
            return Self::Say(line.to_string());
        };

        let (name, arg) = rest
            .split_once(char::is_whitespace)
            .map_or((rest, ""), |(name, arg)| (name, arg.trim()));

        match name {
            "load" if !arg.is_empty() => Self::Load(PathBuf::from(arg)),
            "load" => Self::Invalid("usage: /load <path>".to_string()),
            "paste" => Self::Paste,
            "fields" => Self::Fields,
            "draft" => Self::Draft,
            "mode" => arg
                .parse::<Mode>()
                .map_or_else(Self::Invalid, Self::Mode),
            "history" => Self::History,
            "help" => Self::Help,
            other => Self::Invalid(format!("unknown command: /{other} (try /help)")),
        }
    }
}

/// Onboarding session over one document at a time.
pub struct OnboardingManager<P = Arc<dyn LLMProvider>>
where
    P: Send + Sync,
{
    dispatcher: ResponseDispatcher<P>,
    extractor: FieldExtractor,
    mode: Mode,
    document: Document,
    preview_chars: usize,
}

impl<P> OnboardingManager<P>
where
    P: LLMProvider + Send + Sync,
{
    /// Create a manager with the default extraction patterns and no document.
    pub fn new(dispatcher: ResponseDispatcher<P>, mode: Mode) -> Result<Self, ConversationError> {
        let extractor = FieldExtractor::with_defaults()?;
        info!("Creating onboarding manager: mode={mode}");

        Ok(Self {
            dispatcher,
            extractor,
            mode,
            document: Document::empty(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
        })
    }

    #[must_use]
    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        info!("Switching reply mode: {} -> {mode}", self.mode);
        self.mode = mode;
    }

    /// Warning to show when remote mode is selected but no provider is configured.
    #[must_use]
    pub const fn remote_warning(&self) -> Option<&'static str> {
        match self.mode {
            Mode::Remote if !self.dispatcher.has_remote() => Some(REMOTE_WARNING),
            _ => None,
        }
    }

    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub const fn fields(&self) -> &ExtractedFields {
        self.document.fields()
    }

    /// Replace the current document with `text` and extract its fields.
    pub fn load_text(&mut self, text: String) -> &ExtractedFields {
        self.document = Document::new(text, &self.extractor);
        info!(
            "Loaded document: {} chars, {} field(s)",
            self.document.text().chars().count(),
            self.document.fields().len()
        );
        self.document.fields()
    }

    /// Replace the current document from pasted and uploaded text; non-blank paste wins.
    pub fn load_sources(&mut self, pasted: Option<&str>, uploaded: Option<String>) -> &ExtractedFields {
        self.load_text(select_text(pasted, uploaded))
    }

    /// Replace the current document with the contents of `path`.
    pub fn load_file(&mut self, path: &Path) -> Result<&ExtractedFields, ConversationError> {
        let bytes = std::fs::read(path)?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(self.load_text(decode_upload(&bytes)))
    }

    /// Preview of the current document text.
    #[must_use]
    pub fn preview(&self) -> &str {
        preview(self.document.text(), self.preview_chars)
    }

    /// Process one client utterance: record it, reply, record the reply.
    pub async fn process_turn(
        &self,
        transcript: &mut Transcript,
        utterance: &str,
    ) -> Result<TurnResult, ConversationError> {
        let utterance = utterance.trim();
        if utterance.is_empty() {
            return Err(ConversationError::EmptyInput);
        }

        transcript.record(Speaker::Client, utterance);
        let turn_number = transcript.client_turns();
        info!("Processing turn {turn_number} for transcript: {}", transcript.id());

        let reply = self
            .dispatcher
            .respond(utterance, self.document.fields(), self.mode)
            .await;

        transcript.record(Speaker::Agent, reply.clone());
        debug!("Turn {turn_number} completed");

        Ok(TurnResult { reply, turn_number })
    }

    /// Draft form for the current document, stamped with `now`.
    pub fn draft_at(&self, now: DateTime<Utc>) -> Result<String, ConversationError> {
        Ok(render_draft(self.document.fields(), &draft_timestamp(now))?)
    }

    /// Draft form for the current document, stamped with the current time.
    pub fn draft(&self) -> Result<String, ConversationError> {
        self.draft_at(Utc::now())
    }

    /// Run an interactive session on stdin and stdout.
    pub async fn run_interactive(
        &mut self,
        transcript: &mut Transcript,
    ) -> Result<(), ConversationError> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.run_with(transcript, stdin.lock(), stdout.lock()).await
    }

    /// Run an interactive session over arbitrary input and output.
    pub async fn run_with<R, W>(
        &mut self,
        transcript: &mut Transcript,
        mut input: R,
        mut out: W,
    ) -> Result<(), ConversationError>
    where
        R: BufRead,
        W: Write,
    {
        writeln!(out, "=== LegacyOnboard session: {} ({} mode) ===", transcript.id(), self.mode)?;
        writeln!(out, "Type /help for commands, 'exit' to end the session.\n")?;
        if let Some(warning) = self.remote_warning() {
            writeln!(out, "{warning}\n")?;
        }

        loop {
            write!(out, "> ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            match SessionCommand::parse(&line) {
                SessionCommand::Exit => break,
                SessionCommand::Say(text) if text.is_empty() => {}
                SessionCommand::Say(text) => match self.process_turn(transcript, &text).await {
                    Ok(result) => writeln!(out, "\n{}\n", result.reply)?,
                    Err(e) => writeln!(out, "Error: {e}")?,
                },
                SessionCommand::Load(path) => match self.load_file(&path).map(|_| ()) {
                    Ok(()) => self.write_document(&mut out)?,
                    Err(e) => {
                        warn!("Failed to load {}: {e}", path.display());
                        writeln!(out, "Error: could not read {}: {e}", path.display())?;
                    }
                },
                SessionCommand::Paste => {
                    writeln!(out, "Paste document text, finish with a line containing only '.'")?;
                    out.flush()?;
                    let pasted = read_until_dot(&mut input)?;
                    self.load_sources(Some(&pasted), None);
                    self.write_document(&mut out)?;
                }
                SessionCommand::Fields => self.write_fields(&mut out)?,
                SessionCommand::Draft => match self.draft() {
                    Ok(form) => writeln!(out, "\n{form}\n")?,
                    Err(e) => writeln!(out, "{e}")?,
                },
                SessionCommand::Mode(mode) => {
                    self.set_mode(mode);
                    writeln!(out, "Mode set to {mode}.")?;
                    if let Some(warning) = self.remote_warning() {
                        writeln!(out, "{warning}")?;
                    }
                }
                SessionCommand::History => {
                    if transcript.is_empty() {
                        writeln!(out, "(no messages yet)")?;
                    } else {
                        writeln!(out, "{}", transcript.render())?;
                    }
                }
                SessionCommand::Help => writeln!(out, "{HELP_TEXT}")?,
                SessionCommand::Invalid(msg) => writeln!(out, "{msg}")?,
            }
        }

        writeln!(
            out,
            "\nSession ended. Total turns: {}",
            transcript.client_turns()
        )?;
        Ok(())
    }

    /// Write the preview and fields of the current document.
    pub fn write_document<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        if self.document.has_text() {
            writeln!(out, "Preview (first {} chars):", self.preview_chars)?;
            writeln!(out, "{}", self.preview())?;
        } else {
            writeln!(out, "(document is empty)")?;
        }
        self.write_fields(out)
    }

    /// Write the extracted fields, or a hint when there are none.
    pub fn write_fields<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let fields = self.document.fields();
        if fields.is_empty() {
            return writeln!(out, "{NO_FIELDS_HINT}");
        }
        writeln!(out, "Extracted fields:")?;
        for line in fields.to_lines() {
            writeln!(out, "  {line}")?;
        }
        Ok(())
    }
}

fn read_until_dot<R: BufRead>(input: &mut R) -> std::io::Result<String> {
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\n', '\r']);
        if line == "." {
            break;
        }
        lines.push(line.to_string());
    }
    Ok(lines.join("\n"))
}
