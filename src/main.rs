mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fastmemory::config::FastMemoryConfig;
use fastmemory::SearchMode;

#[derive(Parser)]
#[command(name = "fastmemory", version, about = "Persistent hybrid-search memory for AI agents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Store a memory
    Add {
        content: String,
        /// Metadata entry as key=value (repeatable)
        #[arg(long = "meta", value_name = "KEY=VALUE")]
        meta: Vec<String>,
        /// Only store the content if the memorability gate accepts it
        #[arg(long)]
        gate: bool,
    },
    /// Search stored memories
    Search {
        query: String,
        #[arg(long, default_value_t = SearchMode::Hybrid)]
        mode: SearchMode,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show what the gate would decide for some content, without storing it
    Judge { content: String },
    /// Run the built-in labeled examples through the gate
    Eval {
        /// Use the larger categorized set and print a per-category breakdown
        #[arg(long)]
        expanded: bool,
    },
    /// Show database statistics
    Stats,
    /// Delete a memory by ID
    Forget { id: String },
    /// Manage the embedding model
    Model {
        #[command(subcommand)]
        action: ModelAction,
    },
}

#[derive(Subcommand)]
enum ModelAction {
    /// Download the embedding model to ~/.fastmemory/models/
    Download,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = FastMemoryConfig::load()?;

    // stdout carries command output; logs go to stderr.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Add { content, meta, gate } => {
            cli::add::add(&config, &content, &meta, gate).await?;
        }
        Command::Search { query, mode, limit } => {
            let limit = limit.unwrap_or(config.retrieval.default_limit);
            cli::search::search(&config, &query, mode, limit).await?;
        }
        Command::Judge { content } => {
            cli::judge::judge(&config, &content).await?;
        }
        Command::Eval { expanded } => {
            cli::eval::eval(&config, expanded).await?;
        }
        Command::Stats => {
            cli::stats::stats(&config).await?;
        }
        Command::Forget { id } => {
            cli::forget::forget(&config, &id).await?;
        }
        Command::Model { action } => match action {
            ModelAction::Download => {
                cli::model_download(&config.embedding).await?;
            }
        },
    }

    Ok(())
}
