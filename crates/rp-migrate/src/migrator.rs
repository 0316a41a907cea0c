//! Migration executor.

use crate::error::{MigrateError, MigrateResult};
use crate::ledger::{MigrationLedger, MigrationStatus};
use crate::registry::{check_version_width, Migration, MigrationRegistry};
use rp_db::Database;
use std::sync::Arc;

/// Outcome of a successful [`Migrator::execute`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Versions applied by this run, in order
    pub applied: Vec<String>,
    /// Versions skipped because the ledger already had them
    pub skipped: Vec<String>,
}

/// Applies registered migration units that the ledger has not seen.
///
/// Versions run strictly one after another in lexical order. The first
/// failure stops the run; versions applied before it stay recorded, which is
/// what the next run resumes from.
pub struct Migrator {
    registry: MigrationRegistry,
    ledger: MigrationLedger,
    db: Option<Arc<dyn Database>>,
    strict_version_width: bool,
}

impl Migrator {
    /// Migrator over `registry` using the default ledger table.
    pub fn new(registry: MigrationRegistry) -> Self {
        Self {
            registry,
            ledger: MigrationLedger::default(),
            db: None,
            strict_version_width: false,
        }
    }

    /// Use `ledger` instead of the default ledger table.
    pub fn with_ledger(mut self, ledger: MigrationLedger) -> Self {
        self.ledger = ledger;
        self
    }

    /// Fail before running anything if versions have mixed widths.
    pub fn with_strict_version_width(mut self, strict: bool) -> Self {
        self.strict_version_width = strict;
        self
    }

    /// Attach the store handle used by the ledger and every unit.
    pub fn set_db(&mut self, db: Arc<dyn Database>) {
        self.db = Some(db);
    }

    /// The attached store handle, if any.
    pub fn db(&self) -> Option<&Arc<dyn Database>> {
        self.db.as_ref()
    }

    /// The registry this migrator runs.
    pub fn registry(&self) -> &MigrationRegistry {
        &self.registry
    }

    /// The ledger this migrator records into.
    pub fn ledger(&self) -> &MigrationLedger {
        &self.ledger
    }

    fn handle(&self) -> MigrateResult<&dyn Database> {
        self.db
            .as_deref()
            .ok_or(MigrateError::HandleNotSet)
    }

    /// Create the ledger table if needed.
    pub async fn ensure_ledger(&self) -> MigrateResult<()> {
        self.ledger.ensure_table(self.handle()?).await
    }

    /// Ensure the ledger table, then [`execute`](Self::execute).
    pub async fn run(&self) -> MigrateResult<MigrationReport> {
        self.ensure_ledger().await?;
        self.execute().await
    }

    /// Registered versions without a ledger row, in run order.
    pub async fn pending(&self) -> MigrateResult<Vec<String>> {
        let db = self.handle()?;
        let mut pending = Vec::new();
        for version in self.registry.versions()? {
            if !self.ledger.exists(db, &version).await? {
                pending.push(version);
            }
        }
        Ok(pending)
    }

    /// Apply every registered version missing from the ledger.
    pub async fn execute(&self) -> MigrateResult<MigrationReport> {
        let db = self.handle()?;
        let units = self.registry.snapshot()?;
        let versions: Vec<String> = units.iter().map(|(version, _)| version.clone()).collect();
        check_version_width(&versions, self.strict_version_width)?;
        log::debug!(
            "Checking {} registered migrations against {}",
            versions.len(),
            db.db_type()
        );

        let mut report = MigrationReport::default();
        for (version, unit) in units {
            if self.ledger.exists(db, &version).await? {
                log::debug!("Migration {} already applied, skipping", version);
                report.skipped.push(version);
                continue;
            }

            log::info!("Applying migration {} ({})", version, unit.name());
            self.apply(db, &version, unit.as_ref())
                .await
                .map_err(|e| MigrateError::MigrationFailed {
                    version: version.clone(),
                    source: Box::new(e),
                })?;
            log::info!("Migration {} completed", version);
            report.applied.push(version);
        }
        Ok(report)
    }

    /// Run one unit and record it, inside a transaction when both the unit
    /// and the backend allow it.
    async fn apply(
        &self,
        db: &dyn Database,
        version: &str,
        unit: &dyn Migration,
    ) -> MigrateResult<()> {
        if !(unit.transactional() && db.supports_transactional_ddl()) {
            return self.run_and_record(db, version, unit).await;
        }

        db.begin().await?;
        let result = self.run_and_record(db, version, unit).await;

        match result {
            Ok(()) => {
                if let Err(commit_err) = db.commit().await {
                    if let Err(rollback_err) = db.rollback().await {
                        log::warn!(
                            "Rollback after failed commit of migration {} failed: {}",
                            version,
                            rollback_err
                        );
                    }
                    return Err(commit_err.into());
                }
                Ok(())
            }
            Err(e) => {
                if let Err(rollback_err) = db.rollback().await {
                    log::warn!("Rollback of migration {} failed: {}", version, rollback_err);
                }
                Err(e)
            }
        }
    }

    async fn run_and_record(
        &self,
        db: &dyn Database,
        version: &str,
        unit: &dyn Migration,
    ) -> MigrateResult<()> {
        unit.up(db, version).await?;
        self.ledger
            .record(db, version, unit.name(), MigrationStatus::Completed)
            .await
    }
}

#[cfg(test)]
#[path = "migrator_test.rs"]
mod tests;
