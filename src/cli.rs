//! Command-line interface for fivetoe.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fivetoe - tic-tac-toe on a five-by-five board
#[derive(Parser, Debug)]
#[command(name = "fivetoe")]
#[command(about = "Five-by-five tic-tac-toe for two players", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "fivetoe.toml")]
    pub config: PathBuf,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Play in the terminal
    Play,

    /// Run the web server
    Http {
        /// Port to bind to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,
    },
}
