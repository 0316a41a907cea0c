//! Error types for the migration engine.

use rp_db::DbError;
use thiserror::Error;

/// Migration engine errors.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// A version was registered twice (MG001).
    #[error("[MG001] Migration version registered twice: {version}")]
    DuplicateVersion { version: String },

    /// A version identifier was rejected at registration (MG002).
    #[error("[MG002] Invalid migration version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    /// `execute` was called before a store handle was attached (MG003).
    #[error("[MG003] No store handle set on the migrator")]
    HandleNotSet,

    /// Reading or writing the ledger table failed (MG004).
    #[error("[MG004] Migration ledger {action} failed: {source}")]
    Ledger {
        action: &'static str,
        #[source]
        source: DbError,
    },

    /// A migration unit failed; wraps the unit's own error (MG005).
    #[error("[MG005] Migration {version} failed: {source}")]
    MigrationFailed {
        version: String,
        #[source]
        source: Box<MigrateError>,
    },

    /// Registered versions do not share one width (MG006).
    #[error("[MG006] Migration versions have mixed widths: {details}")]
    InconsistentVersionWidth { details: String },

    /// Registry lock poisoned (MG007).
    #[error("[MG007] Migration registry mutex poisoned: {0}")]
    MutexPoisoned(String),

    /// Free-form failure raised by a migration unit (MG008).
    #[error("[MG008] {0}")]
    Custom(String),

    /// Store error raised inside a migration unit.
    #[error(transparent)]
    Db(#[from] DbError),

    /// Seed loader error raised inside a migration unit.
    #[error(transparent)]
    Seed(#[from] SeedError),
}

/// Result type alias for [`MigrateError`].
pub type MigrateResult<T> = Result<T, MigrateError>;

/// Seed-data file loader errors.
#[derive(Error, Debug)]
pub enum SeedError {
    /// Seed file does not exist under the base directory (SD001).
    #[error("[SD001] Seed file not found: {filename} (tried {path})")]
    FileNotFound { filename: String, path: String },

    /// Seed file or directory could not be read (SD002).
    #[error("[SD002] Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A statement could not be parsed (SD003).
    #[error("[SD003] Seed statement parse error: {message}, SQL: {statement}")]
    Parse { statement: String, message: String },

    /// A statement failed for a reason other than a duplicate key (SD004).
    #[error("[SD004] Seed statement failed: {source}, SQL: {sql}")]
    Execution {
        sql: String,
        #[source]
        source: DbError,
    },

    /// Checking for existing rows failed (SD005).
    #[error("[SD005] Seed existence check failed: {0}")]
    Query(#[source] DbError),

    /// A duplicate key inside an open transaction (SD006).
    ///
    /// The store aborts the transaction, so the statement cannot be passed
    /// over. Run the unit with `transactional() -> false` to tolerate it.
    #[error("[SD006] Duplicate seed rows inside a transaction: {source}, SQL: {sql}")]
    DuplicateInTransaction {
        sql: String,
        #[source]
        source: DbError,
    },
}

/// Result type alias for [`SeedError`].
pub type SeedResult<T> = Result<T, SeedError>;
