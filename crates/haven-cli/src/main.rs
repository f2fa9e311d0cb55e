mod cli;
mod commands;
mod config;
mod error;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use haven_core::paths;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        error::handle_error(err);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = config::CliConfig::load();

    // Log to a file so the chat REPL stays clean.
    let log_dir = paths::logs_dir()?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "haven.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    let ctx = commands::AppContext::prepare(&cli, &config)?;

    match cli.command {
        None => ctx.chat(None).await,
        Some(Commands::Chat { thread }) => ctx.chat(thread).await,
        Some(Commands::Thread { command }) => ctx.thread(command).await,
        Some(Commands::Profile { command }) => ctx.profile(command).await,
    }
}
