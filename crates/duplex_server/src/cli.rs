//! Command-line interface for duplex_server.

use clap::{Parser, Subcommand};

/// Duplex Tic-Tac-Toe - two-player game server over WebSocket
#[derive(Parser, Debug)]
#[command(name = "duplex_server")]
#[command(about = "Hosts one two-player tic-tac-toe game at a time", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file (optional)
    #[arg(short, long, default_value = "duplex.toml", global = true)]
    pub config: std::path::PathBuf,

    /// Host to bind to (overrides the config file)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Port to bind to (overrides the config file)
    #[arg(short, long, global = true)]
    pub port: Option<u16>,

    /// Tracing filter, e.g. "info,duplex_server=debug"
    #[arg(long, global = true)]
    pub log_filter: Option<String>,

    /// Subcommand to run (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the game server until Ctrl-C
    Serve,

    /// Print the effective configuration and exit
    CheckConfig,
}
