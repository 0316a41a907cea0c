//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};
use rp_core::settings::DEFAULT_SETTINGS_PATH;
use std::path::PathBuf;

/// rentpro-migrate - versioned schema migrations and reference data loading
#[derive(Parser, Debug)]
#[command(name = "rp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the settings file
    #[arg(short, long, global = true, default_value = DEFAULT_SETTINGS_PATH)]
    pub config: PathBuf,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply every migration missing from the ledger
    Migrate(MigrateArgs),

    /// Show which migrations are applied and which are pending
    Status(StatusArgs),

    /// Scaffold a new migration file
    Generate(GenerateArgs),
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Override the database source from the settings file
    #[arg(short, long)]
    pub database: Option<String>,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Override the database source from the settings file
    #[arg(short, long)]
    pub database: Option<String>,
}

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Directory to write the file into (default: migration.directory)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Short description used in the file and unit name
    #[arg(short, long, default_value = "migrate")]
    pub name: String,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
