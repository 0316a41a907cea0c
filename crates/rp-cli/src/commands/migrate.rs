//! Migrate command implementation

use anyhow::{Context, Result};
use rp_core::settings::mask_sensitive;

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common::{build_migrator, load_settings, open_database};

/// Execute the migrate command
pub async fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let settings = load_settings(global)?;
    let masked = match &args.database {
        Some(source) => mask_sensitive(source),
        None => settings.database().mask_source(),
    };
    println!("Database: {} ({})", masked, settings.database().driver);

    let db = open_database(&settings, args.database.as_deref())?;
    let migrator = build_migrator(&settings, db)?;

    migrator
        .ensure_ledger()
        .await
        .context("Failed to prepare the migration ledger")?;

    let pending = migrator
        .pending()
        .await
        .context("Failed to read the migration ledger")?;
    if pending.is_empty() {
        println!("Database is up to date.");
        return Ok(());
    }

    if global.verbose {
        eprintln!("[verbose] Pending versions: {}", pending.join(", "));
    }
    println!("Applying {} migrations...\n", pending.len());

    let report = migrator.execute().await.context("Migration run aborted")?;

    for version in &report.applied {
        let name = migrator
            .registry()
            .get(version)?
            .map(|unit| unit.name().to_string())
            .unwrap_or_default();
        println!("  ✓ {} {}", version, name);
    }

    println!();
    println!(
        "Applied {} migrations ({} already applied)",
        report.applied.len(),
        report.skipped.len()
    );
    Ok(())
}
