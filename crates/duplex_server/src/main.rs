//! Duplex Tic-Tac-Toe host process.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use duplex_server::{ServerConfig, SessionHandle};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ServerConfig::load_or_default(&cli.config)?.with_overrides(
        cli.host,
        cli.port,
        cli.log_filter,
    );

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run_server(config).await,
        Command::CheckConfig => check_config(&config),
    }
}

/// Run the game server
async fn run_server(config: ServerConfig) -> Result<()> {
    initialize_tracing(&config);
    info!(?config, "Starting duplex tic-tac-toe server");

    let session = SessionHandle::new();
    duplex_server::serve(&config, session).await
}

/// Print the effective configuration
fn check_config(config: &ServerConfig) -> Result<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn initialize_tracing(config: &ServerConfig) {
    let filter = match config.log_filter() {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,duplex_server=debug")),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
