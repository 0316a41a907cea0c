//! Version registry.
//!
//! Migration units register themselves independently, possibly from several
//! threads during startup. The registry keeps them keyed by version
//! identifier and hands them to the [`Migrator`](crate::Migrator) in lexical
//! order.

use crate::error::{MigrateError, MigrateResult};
use async_trait::async_trait;
use rp_db::Database;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Width of a millisecond timestamp, the conventional version identifier.
pub const TIMESTAMP_VERSION_WIDTH: usize = 13;

/// A single versioned change to the store.
#[async_trait]
pub trait Migration: Send + Sync {
    /// Descriptive name written to the ledger.
    fn name(&self) -> &str;

    /// Run inside a transaction when the backend supports transactional DDL.
    ///
    /// Return `false` for units whose statements cannot run inside a
    /// transaction, or that manage their own.
    fn transactional(&self) -> bool {
        true
    }

    /// Apply the change. `version` is the identifier the unit was registered under.
    async fn up(&self, db: &dyn Database, version: &str) -> MigrateResult<()>;
}

/// Registered migration units keyed by version identifier.
#[derive(Default)]
pub struct MigrationRegistry {
    units: Mutex<BTreeMap<String, Arc<dyn Migration>>>,
}

impl MigrationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MigrateResult<MutexGuard<'_, BTreeMap<String, Arc<dyn Migration>>>> {
        self.units
            .lock()
            .map_err(|e| MigrateError::MutexPoisoned(e.to_string()))
    }

    /// Register `unit` under `version`.
    ///
    /// Fails with [`MigrateError::DuplicateVersion`] if the version is taken;
    /// the first registration is kept.
    pub fn register<M>(&self, version: impl Into<String>, unit: M) -> MigrateResult<()>
    where
        M: Migration + 'static,
    {
        self.register_arc(version, Arc::new(unit))
    }

    /// Register an already shared unit.
    pub fn register_arc(
        &self,
        version: impl Into<String>,
        unit: Arc<dyn Migration>,
    ) -> MigrateResult<()> {
        let version = version.into();
        if version.trim().is_empty() {
            return Err(MigrateError::InvalidVersion {
                version,
                reason: "version identifier cannot be empty".to_string(),
            });
        }

        let mut units = self.lock()?;
        if units.contains_key(&version) {
            return Err(MigrateError::DuplicateVersion { version });
        }
        log::debug!("Registered migration {} ({})", version, unit.name());
        units.insert(version, unit);
        Ok(())
    }

    /// Registered versions in lexical ascending order.
    pub fn versions(&self) -> MigrateResult<Vec<String>> {
        Ok(self.lock()?.keys().cloned().collect())
    }

    /// Look up the unit registered under `version`.
    pub fn get(&self, version: &str) -> MigrateResult<Option<Arc<dyn Migration>>> {
        Ok(self.lock()?.get(version).cloned())
    }

    /// Every registered unit in lexical version order.
    ///
    /// The lock is released before returning so units can run without
    /// holding it.
    pub fn snapshot(&self) -> MigrateResult<Vec<(String, Arc<dyn Migration>)>> {
        Ok(self
            .lock()?
            .iter()
            .map(|(version, unit)| (version.clone(), Arc::clone(unit)))
            .collect())
    }

    /// Number of registered units.
    pub fn len(&self) -> MigrateResult<usize> {
        Ok(self.lock()?.len())
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> MigrateResult<bool> {
        Ok(self.lock()?.is_empty())
    }
}

/// Check that all `versions` share one width.
///
/// Lexical order only matches chronological order when identifiers have the
/// same length (`"2"` sorts after `"10"`). Mixed widths are logged; with
/// `strict` they are an error.
pub fn check_version_width(versions: &[String], strict: bool) -> MigrateResult<()> {
    let mut widths: Vec<usize> = versions.iter().map(|v| v.chars().count()).collect();
    widths.sort_unstable();
    widths.dedup();
    if widths.len() <= 1 {
        return Ok(());
    }

    let details = format!(
        "widths {:?} across {} versions; lexical order may differ from numeric order",
        widths,
        versions.len()
    );
    if strict {
        return Err(MigrateError::InconsistentVersionWidth { details });
    }
    log::warn!("Migration versions have mixed widths: {}", details);
    Ok(())
}

/// Version identifier from a migration file name such as
/// `1756303600000_create_rental_tables.rs`.
///
/// Takes the leading 13-digit millisecond timestamp, tolerating an `m`
/// prefix used to make the file a valid Rust module name.
pub fn version_from_filename(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let name = name.strip_prefix('m').unwrap_or(name);
    let prefix = name.get(..TIMESTAMP_VERSION_WIDTH)?;
    if prefix.chars().all(|c| c.is_ascii_digit()) {
        Some(prefix.to_string())
    } else {
        None
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
