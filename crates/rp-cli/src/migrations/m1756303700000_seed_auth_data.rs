//! Default departments, posts, roles, menus and the admin account.

use async_trait::async_trait;
use rp_db::Database;
use rp_migrate::{MigrateResult, Migration, SeedLoader};

pub(crate) const VERSION: &str = "1756303700000";

/// Load order follows the references between the tables.
pub(crate) const FILES: [&str; 6] = [
    "sys_dept.sql",
    "sys_post.sql",
    "sys_role.sql",
    "sys_menu.sql",
    "sys_user.sql",
    "sys_role_menu.sql",
];

pub(crate) struct SeedAuthData {
    loader: SeedLoader,
}

impl SeedAuthData {
    pub(crate) fn new(loader: SeedLoader) -> Self {
        Self { loader }
    }
}

#[async_trait]
impl Migration for SeedAuthData {
    fn name(&self) -> &str {
        "load permission system data from sql files"
    }

    // Duplicate keys rejected by the store are passed over only outside a transaction
    fn transactional(&self) -> bool {
        false
    }

    async fn up(&self, db: &dyn Database, _version: &str) -> MigrateResult<()> {
        super::load_seed_files(&self.loader, db, &FILES).await
    }
}
