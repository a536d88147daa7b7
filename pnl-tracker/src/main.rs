//! `pnl` - CLI for the daily P&L tracker

#![deny(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use tracing::error;

use pnl_tracker::backend::initialize_backend;
use pnl_tracker::cli::{handlers, Cli, Command};
use pnl_tracker::{init_logging, AppConfig};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbosity());

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load_from(cli.config.clone())?;

    if let Command::Config(cmd) = &cli.command {
        return handlers::handle_config(&config, cli.config.clone(), cmd);
    }

    let state = initialize_backend(&config).await?;
    handlers::dispatch(&state, cli.command).await
}
