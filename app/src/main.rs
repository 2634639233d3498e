#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use onboard_core::Mode;
use tracing_subscriber::EnvFilter;

mod command;

use command::{
    ChatInput, ChatStrategy, CommandStrategy, DocumentInput, DraftStrategy, ExtractInput,
    ExtractStrategy, InfoStrategy, InitStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "legacyonboard")]
#[command(about = "LegacyOnboard AI onboarding assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Clone)]
struct DocumentArgs {
    /// Text file with client documents ('-' reads stdin)
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,

    /// Pasted document text; takes precedence over --file when not blank
    #[arg(short = 't', long)]
    text: Option<String>,
}

impl From<DocumentArgs> for DocumentInput {
    fn from(args: DocumentArgs) -> Self {
        Self {
            file: args.file,
            text: args.text,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start an onboarding chat over a document
    Chat {
        #[command(flatten)]
        document: DocumentArgs,

        /// Reply mode (local or remote); defaults to the configured mode
        #[arg(long)]
        mode: Option<Mode>,

        /// Model to use in remote mode
        #[arg(short = 'M', long)]
        model: Option<String>,

        /// Single message to send
        #[arg(short = 'm', long)]
        message: Option<String>,
    },
    /// Extract identity fields from a document
    Extract {
        #[command(flatten)]
        document: DocumentArgs,

        /// Print the fields as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate a draft onboarding form from a document
    Draft {
        #[command(flatten)]
        document: DocumentArgs,
    },
    /// Initialize configuration
    Init,
    /// Show configuration
    Info,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat {
            document,
            mode,
            model,
            message,
        } => {
            ChatStrategy
                .execute(ChatInput {
                    document: document.into(),
                    mode,
                    model,
                    message,
                })
                .await
        }
        Commands::Extract { document, json } => {
            ExtractStrategy
                .execute(ExtractInput {
                    document: document.into(),
                    json,
                })
                .await
        }
        Commands::Draft { document } => DraftStrategy.execute(document.into()).await,
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
