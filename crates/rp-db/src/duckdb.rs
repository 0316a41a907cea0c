//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use async_trait::async_trait;
use duckdb::Connection;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

/// DuckDB database backend
///
/// A single connection behind a mutex. Transactions opened with
/// [`Database::begin`] apply to every statement issued until commit or
/// rollback, so callers must not interleave unrelated work meanwhile.
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
    in_transaction: AtomicBool,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self::from_connection(conn))
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{}: {}", e, path.display())))?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            in_transaction: AtomicBool::new(false),
        }
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Execute SQL synchronously
    fn execute_sync(&self, sql: &str) -> DbResult<usize> {
        let conn = self.lock()?;
        conn.execute(sql, [])
            .map_err(|e| DbError::classify(format!("{}: {}", e, sql)))
    }

    /// Execute batch SQL synchronously
    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql).map_err(DbError::from)
    }

    /// Query count synchronously
    fn query_count_sync(&self, sql: &str) -> DbResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM ({})", sql), [], |row| {
            row.get(0)
        })?;
        Ok(count as usize)
    }

    /// Query rows synchronously
    fn query_rows_sync(&self, sql: &str) -> DbResult<Vec<Vec<Option<String>>>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query([])?;

        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            // Column count is only known once the statement has been stepped
            let width = row.as_ref().column_count();
            let mut values = Vec::with_capacity(width);
            for idx in 0..width {
                values.push(row.get::<_, Option<String>>(idx)?);
            }
            out.push(values);
        }
        Ok(out)
    }

    /// Check if relation exists synchronously
    fn relation_exists_sync(&self, name: &str) -> DbResult<bool> {
        let conn = self.lock()?;
        let (schema, table) = split_qualified(name);

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = ? AND table_name = ?",
            duckdb::params![schema, table],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }

    /// List table columns synchronously
    fn table_columns_sync(&self, name: &str) -> DbResult<Vec<String>> {
        let conn = self.lock()?;
        let (schema, table) = split_qualified(name);

        let mut stmt = conn.prepare(
            "SELECT column_name FROM information_schema.columns \
             WHERE table_schema = ? AND table_name = ? ORDER BY ordinal_position",
        )?;
        let columns = stmt
            .query_map(duckdb::params![schema, table], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(columns)
    }

    fn transaction_control(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::TransactionError(format!("{} failed: {}", sql, e)))
    }
}

/// Split `schema.table` (quotes stripped), defaulting the schema to `main`
fn split_qualified(name: &str) -> (String, String) {
    let unquote = |s: &str| s.trim().trim_matches('"').to_string();
    match name.rfind('.') {
        Some(pos) => (unquote(&name[..pos]), unquote(&name[pos + 1..])),
        None => ("main".to_string(), unquote(name)),
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn execute(&self, sql: &str) -> DbResult<usize> {
        self.execute_sync(sql)
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.execute_batch_sync(sql)
    }

    async fn query_count(&self, sql: &str) -> DbResult<usize> {
        self.query_count_sync(sql)
    }

    async fn query_rows(&self, sql: &str) -> DbResult<Vec<Vec<Option<String>>>> {
        self.query_rows_sync(sql)
    }

    async fn relation_exists(&self, name: &str) -> DbResult<bool> {
        self.relation_exists_sync(name)
    }

    async fn table_columns(&self, name: &str) -> DbResult<Vec<String>> {
        self.table_columns_sync(name)
    }

    async fn begin(&self) -> DbResult<()> {
        self.transaction_control("BEGIN TRANSACTION")?;
        self.in_transaction.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn commit(&self) -> DbResult<()> {
        self.transaction_control("COMMIT")?;
        self.in_transaction.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(&self) -> DbResult<()> {
        // A failed ROLLBACK means there was nothing left to roll back
        let result = self.transaction_control("ROLLBACK");
        self.in_transaction.store(false, Ordering::SeqCst);
        result
    }

    fn in_transaction(&self) -> bool {
        self.in_transaction.load(Ordering::SeqCst)
    }

    fn supports_transactional_ddl(&self) -> bool {
        true
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
