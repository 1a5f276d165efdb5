//! Fivetoe - terminal and web front ends.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use fivetoe::{AppConfig, Mark};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Play);

    // Keep the terminal quiet unless RUST_LOG asks for more.
    let default_filter = match command {
        Command::Play => "warn",
        Command::Http { .. } => "info,fivetoe=debug",
    };
    initialize_tracing(default_filter);

    let config = AppConfig::load(&cli.config)?;

    match command {
        Command::Play => run_terminal(*config.starting_mark()).await,
        Command::Http { port, host } => run_http_server(config, host, port).await,
    }
}

/// Run the terminal game on a blocking thread.
#[instrument]
async fn run_terminal(starting: Mark) -> Result<()> {
    info!("Starting terminal game");
    tokio::task::spawn_blocking(move || fivetoe::run_stdio(starting)).await?
}

/// Run the web server with command-line overrides applied.
#[instrument(skip(config))]
async fn run_http_server(config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = config;
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }

    info!(host = %config.host(), port = config.port(), "Starting web server");
    fivetoe::serve(config).await
}

/// Logs go to stderr so they never interleave with the terminal board.
fn initialize_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
