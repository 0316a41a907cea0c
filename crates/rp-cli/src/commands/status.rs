//! Status command implementation

use anyhow::{Context, Result};
use rp_migrate::LedgerEntry;
use std::collections::HashMap;

use crate::cli::{GlobalArgs, StatusArgs};
use crate::commands::common::{build_migrator, load_settings, open_database, print_table};

/// Execute the status command
pub async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let settings = load_settings(global)?;
    let db = open_database(&settings, args.database.as_deref())?;
    let migrator = build_migrator(&settings, db.clone())?;

    // Reading status never creates the ledger table
    let ledger_exists = db
        .relation_exists(migrator.ledger().table())
        .await
        .context("Failed to look up the migration ledger")?;
    let entries: HashMap<String, LedgerEntry> = if ledger_exists {
        migrator
            .ledger()
            .entries(db.as_ref())
            .await
            .context("Failed to read the migration ledger")?
            .into_iter()
            .map(|entry| (entry.version.clone(), entry))
            .collect()
    } else {
        HashMap::new()
    };

    let units = migrator.registry().snapshot()?;
    let rows = status_rows(&units, &entries);
    let pending = rows.iter().filter(|row| row[2] == "pending").count();

    print_table(&["VERSION", "NAME", "STATUS", "APPLIED AT"], &rows);
    println!();
    println!(
        "{} migrations, {} applied, {} pending",
        rows.len(),
        rows.len() - pending,
        pending
    );
    Ok(())
}

/// One row per registered unit: version, name, applied/pending, timestamp.
fn status_rows(
    units: &[(String, std::sync::Arc<dyn rp_migrate::Migration>)],
    entries: &HashMap<String, LedgerEntry>,
) -> Vec<Vec<String>> {
    units
        .iter()
        .map(|(version, unit)| match entries.get(version) {
            Some(entry) => vec![
                version.clone(),
                unit.name().to_string(),
                "applied".to_string(),
                entry.created_at.clone().unwrap_or_else(|| "-".to_string()),
            ],
            None => vec![
                version.clone(),
                unit.name().to_string(),
                "pending".to_string(),
                "-".to_string(),
            ],
        })
        .collect()
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
