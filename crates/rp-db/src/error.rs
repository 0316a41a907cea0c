//! Error types for rp-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Table not found (D003)
    #[error("[D003] Table or view not found: {0}")]
    TableNotFound(String),

    /// Unique or primary key violation (D004)
    #[error("[D004] Duplicate key: {0}")]
    DuplicateKey(String),

    /// Transaction control error (D005)
    #[error("[D005] Transaction failed: {0}")]
    TransactionError(String),

    /// Mutex poisoned (D006)
    #[error("[D006] Database mutex poisoned: {0}")]
    MutexPoisoned(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl DbError {
    /// Classify a driver error message.
    ///
    /// Drivers report constraint violations only as text, so the duplicate
    /// patterns cover DuckDB, MySQL (`Duplicate entry`) and PostgreSQL
    /// (`duplicate key`) wording.
    pub fn classify(msg: String) -> Self {
        if is_duplicate_key_message(&msg) {
            DbError::DuplicateKey(msg)
        } else if msg.contains("Table with name")
            || msg.contains("View with name")
            || msg.contains("Table or view with name")
            || (msg.contains("Catalog Error") && msg.contains("Table") && msg.contains("not found"))
        {
            DbError::TableNotFound(msg)
        } else {
            DbError::ExecutionError(msg)
        }
    }

    /// True for unique and primary key violations
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, DbError::DuplicateKey(_))
    }
}

fn is_duplicate_key_message(msg: &str) -> bool {
    msg.contains("Duplicate key")
        || msg.contains("duplicate key")
        || msg.contains("Duplicate entry")
        || msg.contains("violates unique constraint")
        || msg.contains("violates primary key constraint")
}

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        DbError::classify(err.to_string())
    }
}
