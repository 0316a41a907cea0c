//! Base tables of the rental catalogue.

use async_trait::async_trait;
use rp_db::Database;
use rp_migrate::{MigrateResult, Migration};

pub(crate) const VERSION: &str = "1700000000001";

const DDL: &str = r#"
CREATE TABLE IF NOT EXISTS sys_city (
    id BIGINT PRIMARY KEY,
    code VARCHAR(20) NOT NULL UNIQUE,
    name VARCHAR(50) NOT NULL,
    sort INTEGER DEFAULT 0,
    status VARCHAR(20) DEFAULT 'active'
);

CREATE TABLE IF NOT EXISTS sys_district (
    id BIGINT PRIMARY KEY,
    code VARCHAR(20) NOT NULL UNIQUE,
    name VARCHAR(50) NOT NULL,
    city_code VARCHAR(20) NOT NULL,
    city_id BIGINT,
    sort INTEGER DEFAULT 0,
    status VARCHAR(20) DEFAULT 'active'
);

CREATE TABLE IF NOT EXISTS sys_buildings (
    id BIGINT PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    developer VARCHAR(100),
    address VARCHAR(255) NOT NULL,
    city VARCHAR(50) NOT NULL,
    district VARCHAR(50) NOT NULL,
    sub_district VARCHAR(50),
    property_type VARCHAR(50),
    property_company VARCHAR(100),
    description TEXT,
    status VARCHAR(20) NOT NULL DEFAULT 'active',
    is_hot BOOLEAN DEFAULT false,
    created_by VARCHAR(50),
    updated_by VARCHAR(50)
);
"#;

pub(crate) struct CreateRentalTables;

#[async_trait]
impl Migration for CreateRentalTables {
    fn name(&self) -> &str {
        "create rental catalogue tables"
    }

    async fn up(&self, db: &dyn Database, _version: &str) -> MigrateResult<()> {
        db.execute_batch(DDL).await?;
        Ok(())
    }
}
