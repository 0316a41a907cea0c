//! Cities, districts and buildings reference data.

use async_trait::async_trait;
use rp_db::Database;
use rp_migrate::{MigrateResult, Migration, SeedLoader};

pub(crate) const VERSION: &str = "1756303400000";

/// Parents before children.
pub(crate) const FILES: [&str; 3] = ["sys_city.sql", "sys_district.sql", "sys_buildings.sql"];

pub(crate) struct SeedRentalData {
    loader: SeedLoader,
}

impl SeedRentalData {
    pub(crate) fn new(loader: SeedLoader) -> Self {
        Self { loader }
    }
}

#[async_trait]
impl Migration for SeedRentalData {
    fn name(&self) -> &str {
        "load rental catalogue reference data"
    }

    // Duplicate keys rejected by the store are passed over only outside a transaction
    fn transactional(&self) -> bool {
        false
    }

    async fn up(&self, db: &dyn Database, _version: &str) -> MigrateResult<()> {
        super::load_seed_files(&self.loader, db, &FILES).await
    }
}
