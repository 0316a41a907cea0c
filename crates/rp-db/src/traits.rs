//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// Store handle consumed by the migration engine
///
/// This is the same handle the rest of the admin application queries
/// through. Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute SQL that modifies data, returns affected rows
    async fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute multiple SQL statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Execute query returning row count
    async fn query_count(&self, sql: &str) -> DbResult<usize>;

    /// Execute query returning every row as text.
    ///
    /// Columns must be VARCHAR (or NULL); cast anything else in the SQL.
    async fn query_rows(&self, sql: &str) -> DbResult<Vec<Vec<Option<String>>>>;

    /// Check if a table or view exists
    async fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Column names of a table in ordinal order, empty if it doesn't exist
    async fn table_columns(&self, name: &str) -> DbResult<Vec<String>>;

    /// Open a transaction
    async fn begin(&self) -> DbResult<()>;

    /// Commit the open transaction
    async fn commit(&self) -> DbResult<()>;

    /// Roll back the open transaction
    async fn rollback(&self) -> DbResult<()>;

    /// Whether a transaction opened with [`begin`](Self::begin) is still open
    fn in_transaction(&self) -> bool;

    /// Whether CREATE/ALTER/DROP can run inside a transaction on this engine
    fn supports_transactional_ddl(&self) -> bool;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
