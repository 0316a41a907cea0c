//! Migration engine for rentpro-migrate.
//!
//! Versioned change units are registered into a [`MigrationRegistry`], then a
//! [`Migrator`] applies every unit missing from the [`MigrationLedger`] in
//! lexical version order, stopping at the first failure. Units that populate
//! reference data use the [`SeedLoader`], which can be re-run over a store
//! that already holds some or all of the rows.

pub mod error;
pub mod ledger;
pub mod migrator;
pub mod registry;
pub mod seed;

pub use error::{MigrateError, MigrateResult, SeedError, SeedResult};
pub use ledger::{LedgerEntry, MigrationLedger, MigrationStatus};
pub use migrator::{MigrationReport, Migrator};
pub use registry::{check_version_width, version_from_filename, Migration, MigrationRegistry};
pub use seed::{parse_statements, SeedLoader, SeedReport};
