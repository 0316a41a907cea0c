//! rentpro-migrate CLI - applies versioned schema changes and reference data

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod migrations;

use cli::Cli;
use commands::{generate, migrate, status};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match &cli.command {
        cli::Commands::Migrate(args) => migrate::execute(args, &cli.global).await,
        cli::Commands::Status(args) => status::execute(args, &cli.global).await,
        cli::Commands::Generate(args) => generate::execute(args, &cli.global).await,
    }
}

/// `RUST_LOG` wins over the verbosity flag when set.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_target(false)
        .init();
}
