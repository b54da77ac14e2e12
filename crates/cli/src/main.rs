#![allow(clippy::print_stdout, reason = "CLI output")]

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use querygpt_core::{AppConfig, DEFAULT_PURGE_DAYS};
use querygpt_storage::StorageBackend;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "querygpt")]
#[command(about = "Question-answering API backed by an LLM provider", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Overrides API_PORT
        #[arg(short, long)]
        port: Option<u16>,
        /// Overrides API_HOST
        #[arg(short = 'H', long)]
        host: Option<String>,
    },
    /// Create or update the database schema, then exit
    Migrate,
    /// Delete stored sessions older than the given number of days
    Purge {
        #[arg(short, long, default_value_t = DEFAULT_PURGE_DAYS, value_parser = clap::value_parser!(u32).range(1..))]
        days: u32,
    },
}

/// Loads `.env.local` then `.env`; variables already set are kept.
fn load_dotenv() {
    for file in [".env.local", ".env"] {
        dotenvy::from_filename(file).ok();
    }
}

fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// PostgreSQL when configured, otherwise the in-process store.
pub(crate) async fn open_storage(config: &AppConfig) -> Result<StorageBackend> {
    match config.database.url.as_deref() {
        Some(url) => {
            let storage = StorageBackend::new_postgres(url).await?;
            tracing::info!(url = ?config.database.redacted_url(), "connected to PostgreSQL");
            Ok(storage)
        },
        None => {
            tracing::warn!("DATABASE_URL not set, sessions are kept in memory and lost on exit");
            Ok(StorageBackend::new_memory())
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    load_dotenv();

    let config = AppConfig::from_env()?;
    init_tracing(config.log_directive);

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(config, host, port).await,
        Commands::Migrate => commands::migrate::run(&config).await,
        Commands::Purge { days } => commands::purge::run(&config, days).await,
    }
}
