//! Settings types and parsing for settings.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the settings file, relative to the working directory
pub const DEFAULT_SETTINGS_PATH: &str = "config/settings.yml";

/// Top-level document of settings.yml
///
/// The file nests everything under a single `settings:` key so the same file
/// can be shared with the admin web server, which reads other sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Settings body
    pub settings: SettingsBody,
}

/// Body of the `settings:` key
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsBody {
    /// Store connection
    pub database: DatabaseSettings,

    /// Migration engine options
    #[serde(default)]
    pub migration: MigrationSettings,
}

/// Store driver selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    /// DuckDB (default)
    #[default]
    DuckDb,
}

impl std::fmt::Display for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Driver::DuckDb => write!(f, "duckdb"),
        }
    }
}

/// Store connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseSettings {
    /// Driver name
    #[serde(default)]
    pub driver: Driver,

    /// Connection source (a DuckDB file path, or `:memory:`)
    pub source: String,
}

impl DatabaseSettings {
    /// Connection source with its middle hidden, for printing
    pub fn mask_source(&self) -> String {
        mask_sensitive(&self.source)
    }
}

/// How the seed loader decides that rows are already present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeedSkipPolicy {
    /// Drop individual rows whose key exists, skip the statement only when all do
    #[default]
    PerRow,
    /// Skip the whole statement as soon as any row's key exists
    PerStatement,
}

/// Migration engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigrationSettings {
    /// Name of the ledger table
    #[serde(default = "default_ledger_table")]
    pub ledger_table: String,

    /// Base directory for seed-data files
    #[serde(default = "default_seed_path")]
    pub seed_path: String,

    /// Seed loader idempotency policy
    #[serde(default)]
    pub seed_skip_policy: SeedSkipPolicy,

    /// Fail when registered version identifiers have different lengths
    #[serde(default)]
    pub strict_version_width: bool,

    /// Where `rp generate` writes new migration files
    #[serde(default = "default_migration_dir")]
    pub directory: String,
}

impl Default for MigrationSettings {
    fn default() -> Self {
        Self {
            ledger_table: default_ledger_table(),
            seed_path: default_seed_path(),
            seed_skip_policy: SeedSkipPolicy::default(),
            strict_version_width: false,
            directory: default_migration_dir(),
        }
    }
}

/// Ledger table used when none is configured
pub const DEFAULT_LEDGER_TABLE: &str = "sys_migration";

/// Seed directory used when none is configured
pub const DEFAULT_SEED_PATH: &str = "config/sql/data";

fn default_ledger_table() -> String {
    DEFAULT_LEDGER_TABLE.to_string()
}

fn default_seed_path() -> String {
    DEFAULT_SEED_PATH.to_string()
}

fn default_migration_dir() -> String {
    "crates/rp-cli/src/migrations".to_string()
}

impl Settings {
    /// Load settings from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parse and validate settings from YAML text
    pub fn parse(content: &str) -> CoreResult<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate the settings
    fn validate(&self) -> CoreResult<()> {
        if self.database().source.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database.source cannot be empty".to_string(),
            });
        }

        let table = &self.migration().ledger_table;
        if !is_plain_identifier(table) {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "migration.ledger_table '{}' must be a non-empty identifier of letters, digits and '_'",
                    table
                ),
            });
        }

        if self.migration().seed_path.trim().is_empty() {
            log::warn!("migration.seed_path is empty, seed files resolve against the working directory");
        }

        Ok(())
    }

    /// Store connection settings
    pub fn database(&self) -> &DatabaseSettings {
        &self.settings.database
    }

    /// Migration engine settings
    pub fn migration(&self) -> &MigrationSettings {
        &self.settings.migration
    }

    /// Seed base directory resolved against `root`
    pub fn seed_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migration().seed_path)
    }

    /// Scaffold directory resolved against `root`
    pub fn migration_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migration().directory)
    }
}

/// Letters, digits and underscores, not starting with a digit
fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Hide everything but the first and last four characters
pub fn mask_sensitive(info: &str) -> String {
    let chars: Vec<char> = info.chars().collect();
    if chars.len() <= 8 {
        return "***".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}***{tail}")
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
