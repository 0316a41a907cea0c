//! Audit timestamps and soft delete for buildings.

use async_trait::async_trait;
use rp_db::Database;
use rp_migrate::{MigrateResult, Migration};

pub(crate) const VERSION: &str = "1756303350000";

const STATEMENTS: [&str; 4] = [
    "ALTER TABLE sys_buildings ADD COLUMN IF NOT EXISTS created_at TIMESTAMP",
    "ALTER TABLE sys_buildings ADD COLUMN IF NOT EXISTS updated_at TIMESTAMP",
    "ALTER TABLE sys_buildings ADD COLUMN IF NOT EXISTS deleted_at TIMESTAMP",
    "CREATE INDEX IF NOT EXISTS idx_sys_buildings_deleted_at ON sys_buildings (deleted_at)",
];

pub(crate) struct AddBuildingTimestamps;

#[async_trait]
impl Migration for AddBuildingTimestamps {
    fn name(&self) -> &str {
        "add timestamp columns to sys_buildings"
    }

    // Every statement is guarded, so a partial run is safe to repeat
    fn transactional(&self) -> bool {
        false
    }

    async fn up(&self, db: &dyn Database, _version: &str) -> MigrateResult<()> {
        for sql in STATEMENTS {
            db.execute(sql).await?;
        }
        Ok(())
    }
}
