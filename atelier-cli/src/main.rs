//! Atelier CLI
//!
//! Command-line interface for the AI product-team studio backend: create
//! project workspaces, push requirements and agent handbooks, start runs
//! and watch the team's streamed outputs.

mod commands;
mod config;
mod id_resolver;
mod types;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "atelier")]
#[command(about = "AI product team studio CLI", long_about = None)]
struct Cli {
    /// Studio backend URL
    #[arg(
        long,
        env = "ATELIER_STUDIO_URL",
        default_value = "http://localhost:8000"
    )]
    studio_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Keep the terminal clean by default; RUST_LOG opens it up.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atelier_cli=info,atelier_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config {
        studio_url: cli.studio_url,
    };

    handle_command(cli.command, &config).await
}
