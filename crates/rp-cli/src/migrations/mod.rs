//! Application migration units, one module per version.
//!
//! Module names carry the version so `rp generate` output can be dropped in
//! next to them; every unit must also be added to [`register_all`].

mod m1700000000001_create_rental_tables;
mod m1756303272770_create_system_tables;
mod m1756303350000_add_building_timestamps;
mod m1756303400000_seed_rental_data;
mod m1756303600000_create_rental_business_tables;
mod m1756303700000_seed_auth_data;

use rp_db::Database;
use rp_migrate::{MigrateResult, MigrationRegistry, SeedLoader};

use m1700000000001_create_rental_tables::CreateRentalTables;
use m1756303272770_create_system_tables::CreateSystemTables;
use m1756303350000_add_building_timestamps::AddBuildingTimestamps;
use m1756303400000_seed_rental_data::SeedRentalData;
use m1756303600000_create_rental_business_tables::CreateRentalBusinessTables;
use m1756303700000_seed_auth_data::SeedAuthData;

/// Register every application unit; seed units load through `seeds`.
pub(crate) fn register_all(registry: &MigrationRegistry, seeds: &SeedLoader) -> MigrateResult<()> {
    registry.register(m1700000000001_create_rental_tables::VERSION, CreateRentalTables)?;
    registry.register(m1756303272770_create_system_tables::VERSION, CreateSystemTables)?;
    registry.register(
        m1756303350000_add_building_timestamps::VERSION,
        AddBuildingTimestamps,
    )?;
    registry.register(
        m1756303400000_seed_rental_data::VERSION,
        SeedRentalData::new(seeds.clone()),
    )?;
    registry.register(
        m1756303600000_create_rental_business_tables::VERSION,
        CreateRentalBusinessTables,
    )?;
    registry.register(
        m1756303700000_seed_auth_data::VERSION,
        SeedAuthData::new(seeds.clone()),
    )?;
    Ok(())
}

/// Load `files` in order, stopping at the first one that fails.
async fn load_seed_files(
    loader: &SeedLoader,
    db: &dyn Database,
    files: &[&str],
) -> MigrateResult<()> {
    for file in files {
        let report = loader.load_and_execute(db, file).await?;
        log::debug!(
            "{}: {} executed, {} skipped, {} rows already present",
            file,
            report.executed,
            report.skipped,
            report.rows_filtered
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
