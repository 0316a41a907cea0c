//! Migration ledger.
//!
//! One row per successfully applied version. The unique constraint on
//! `version` makes a second write for the same version fail instead of
//! duplicating, so racing migrators produce at most one row.

use crate::error::{MigrateError, MigrateResult};
use rp_db::{quote_ident, quote_literal, Database, DbError};

pub use rp_core::settings::DEFAULT_LEDGER_TABLE;

/// Lifecycle states a ledger row can carry.
///
/// The migrator only ever writes [`MigrationStatus::Completed`]; the other
/// states exist for rows written by hand or by older tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl MigrationStatus {
    /// Value stored in the `status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            MigrationStatus::Pending => "pending",
            MigrationStatus::Running => "running",
            MigrationStatus::Completed => "completed",
            MigrationStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for MigrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted ledger row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub version: String,
    pub name: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Thin persistence wrapper over the ledger table.
#[derive(Debug, Clone)]
pub struct MigrationLedger {
    table: String,
}

impl Default for MigrationLedger {
    fn default() -> Self {
        Self::new(DEFAULT_LEDGER_TABLE)
    }
}

impl MigrationLedger {
    /// Ledger stored in `table`.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }

    /// Unquoted table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    fn quoted_table(&self) -> String {
        quote_ident(&self.table)
    }

    /// Create the ledger table if it does not exist.
    pub async fn ensure_table(&self, db: &dyn Database) -> MigrateResult<()> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (
                 version    VARCHAR(191) NOT NULL UNIQUE,
                 name       VARCHAR(255),
                 status     VARCHAR(20) DEFAULT 'completed',
                 created_at TIMESTAMP DEFAULT current_timestamp,
                 updated_at TIMESTAMP DEFAULT current_timestamp
             )",
            self.quoted_table()
        );
        db.execute_batch(&sql)
            .await
            .map_err(|source| MigrateError::Ledger {
                action: "table creation",
                source,
            })
    }

    /// Whether `version` has a ledger row.
    pub async fn exists(&self, db: &dyn Database, version: &str) -> MigrateResult<bool> {
        let sql = format!(
            "SELECT version FROM {} WHERE version = {}",
            self.quoted_table(),
            quote_literal(version)
        );
        let count = db
            .query_count(&sql)
            .await
            .map_err(|source| MigrateError::Ledger {
                action: "lookup",
                source,
            })?;
        Ok(count > 0)
    }

    /// Insert the ledger row for `version`.
    ///
    /// A second record for the same version fails with a ledger error whose
    /// source is [`DbError::DuplicateKey`].
    pub async fn record(
        &self,
        db: &dyn Database,
        version: &str,
        name: &str,
        status: MigrationStatus,
    ) -> MigrateResult<()> {
        let sql = format!(
            "INSERT INTO {} (version, name, status, created_at, updated_at) \
             VALUES ({}, {}, {}, current_timestamp, current_timestamp)",
            self.quoted_table(),
            quote_literal(version),
            quote_literal(name),
            quote_literal(status.as_str())
        );
        db.execute(&sql)
            .await
            .map(|_| ())
            .map_err(|source| MigrateError::Ledger {
                action: "write",
                source,
            })
    }

    /// Every ledger row ordered by version.
    pub async fn entries(&self, db: &dyn Database) -> MigrateResult<Vec<LedgerEntry>> {
        let sql = format!(
            "SELECT version, name, status, CAST(created_at AS VARCHAR), CAST(updated_at AS VARCHAR) \
             FROM {} ORDER BY version",
            self.quoted_table()
        );
        let rows = db
            .query_rows(&sql)
            .await
            .map_err(|source| MigrateError::Ledger {
                action: "listing",
                source,
            })?;

        rows.into_iter()
            .map(|row| {
                let mut cols = row.into_iter();
                let version = cols.next().flatten().ok_or_else(|| MigrateError::Ledger {
                    action: "listing",
                    source: DbError::ExecutionError(
                        "ledger row without a version".to_string(),
                    ),
                })?;
                Ok(LedgerEntry {
                    version,
                    name: cols.next().flatten(),
                    status: cols.next().flatten(),
                    created_at: cols.next().flatten(),
                    updated_at: cols.next().flatten(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
