//! Shared utilities for CLI commands.

use anyhow::{Context, Result};
use rp_core::{Driver, Settings};
use rp_db::{Database, DuckDbBackend};
use rp_migrate::{MigrationLedger, MigrationRegistry, Migrator, SeedLoader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::GlobalArgs;
use crate::migrations;

/// Load the settings file named by the global `--config` argument.
pub(crate) fn load_settings(global: &GlobalArgs) -> Result<Settings> {
    Settings::load(&global.config)
        .with_context(|| format!("Failed to load settings from {}", global.config.display()))
}

/// Directory relative paths in the settings resolve against.
pub(crate) fn project_root() -> Result<PathBuf> {
    std::env::current_dir().context("Failed to resolve the working directory")
}

/// Open the store named by the settings, or by `source_override` when given.
pub(crate) fn open_database(
    settings: &Settings,
    source_override: Option<&str>,
) -> Result<Arc<dyn Database>> {
    let source = source_override.unwrap_or(&settings.database().source);
    ensure_parent_dir(source)?;
    let db: Arc<dyn Database> = match settings.database().driver {
        Driver::DuckDb => {
            Arc::new(DuckDbBackend::new(source).context("Failed to connect to database")?)
        }
    };
    Ok(db)
}

/// Create the directory a file-backed store lives in.
fn ensure_parent_dir(source: &str) -> Result<()> {
    if source == ":memory:" {
        return Ok(());
    }
    if let Some(parent) = Path::new(source).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Build a migrator over the application's units, attached to `db`.
pub(crate) fn build_migrator(settings: &Settings, db: Arc<dyn Database>) -> Result<Migrator> {
    let root = project_root()?;
    let migration = settings.migration();

    let loader = SeedLoader::new(settings.seed_path_absolute(&root))
        .with_policy(migration.seed_skip_policy);
    let registry = MigrationRegistry::new();
    migrations::register_all(&registry, &loader).context("Failed to register migrations")?;

    let mut migrator = Migrator::new(registry)
        .with_ledger(MigrationLedger::new(migration.ledger_table.clone()))
        .with_strict_version_width(migration.strict_version_width);
    migrator.set_db(db);
    Ok(migrator)
}

/// Calculate column widths for table output.
pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }
    widths
}

/// Print a left-aligned table with a dashed separator under the header.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let widths = calculate_column_widths(headers, rows);
    let render = |cells: Vec<String>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect::<Vec<_>>()
            .join("  ")
    };

    println!("{}", render(headers.iter().map(|h| h.to_string()).collect()));
    println!("{}", render(widths.iter().map(|&w| "-".repeat(w)).collect()));
    for row in rows {
        println!("{}", render(row.clone()));
    }
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
