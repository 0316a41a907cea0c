//! Seed-data file loader.
//!
//! Seed files are hand-written INSERT batches for reference data. They are
//! loaded by migration units and must be safe to load again over a store that
//! already holds some or all of their rows: rows whose key is present are
//! dropped before execution, and a duplicate-key failure that slips through
//! is logged rather than fatal. Inside an open transaction the store aborts
//! on that failure, so there it is reported as
//! [`SeedError::DuplicateInTransaction`] instead.

mod insert;
mod tokenizer;

pub use tokenizer::{parse_statements, COMMENT_MARKER, TERMINATOR};

use crate::error::{SeedError, SeedResult};
use rp_core::SeedSkipPolicy;
use rp_db::{quote_ident, Database};
use std::path::{Path, PathBuf};

/// Base directory used when the loader is created with an empty path.
pub use rp_core::settings::DEFAULT_SEED_PATH as DEFAULT_SEED_DIR;

/// Counts from one [`SeedLoader::load_and_execute`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Statements sent to the store (including rewritten ones)
    pub executed: usize,
    /// Statements skipped because their rows were already present
    pub skipped: usize,
    /// Rows removed from statements because their key was already present
    pub rows_filtered: usize,
    /// Statements that failed with a duplicate key and were passed over
    pub duplicates: usize,
}

/// Loads seed files from a base directory.
#[derive(Debug, Clone)]
pub struct SeedLoader {
    base_dir: PathBuf,
    policy: SeedSkipPolicy,
}

impl SeedLoader {
    /// Loader resolving file names under `base_dir`.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        let base_dir = base_dir.as_ref();
        let base_dir = if base_dir.as_os_str().is_empty() {
            PathBuf::from(DEFAULT_SEED_DIR)
        } else {
            base_dir.to_path_buf()
        };
        Self {
            base_dir,
            policy: SeedSkipPolicy::default(),
        }
    }

    /// Use `policy` to decide which rows are already loaded.
    pub fn with_policy(mut self, policy: SeedSkipPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Directory file names are resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Active skip policy.
    pub fn policy(&self) -> SeedSkipPolicy {
        self.policy
    }

    /// `.sql` files in the base directory, sorted by name.
    pub fn available_files(&self) -> SeedResult<Vec<String>> {
        let entries = std::fs::read_dir(&self.base_dir).map_err(|e| SeedError::Io {
            path: self.base_dir.display().to_string(),
            source: e,
        })?;

        let mut files: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|e| e == "sql"))
            .filter_map(|path| path.file_name().and_then(|n| n.to_str()).map(String::from))
            .collect();
        files.sort();
        Ok(files)
    }

    /// Read `filename` and split it into INSERT statements.
    pub fn read_statements(&self, filename: &str) -> SeedResult<Vec<String>> {
        let path = self.base_dir.join(filename);
        if !path.is_file() {
            return Err(SeedError::FileNotFound {
                filename: filename.to_string(),
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|e| SeedError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(parse_statements(&content))
    }

    /// Load `filename` and execute its statements in file order.
    pub async fn load_and_execute(
        &self,
        db: &dyn Database,
        filename: &str,
    ) -> SeedResult<SeedReport> {
        let statements = self.read_statements(filename)?;
        log::info!(
            "Loading {} seed statements from {}",
            statements.len(),
            filename
        );

        let mut report = SeedReport::default();
        for statement in &statements {
            let Some(sql) = self.prepare(db, statement, &mut report).await? else {
                continue;
            };

            match db.execute(&sql).await {
                Ok(_) => report.executed += 1,
                Err(e) if e.is_duplicate_key() && db.in_transaction() => {
                    return Err(SeedError::DuplicateInTransaction { sql, source: e });
                }
                Err(e) if e.is_duplicate_key() => {
                    log::warn!("Skipping duplicate seed rows in {}: {}", filename, e);
                    report.duplicates += 1;
                }
                Err(e) => return Err(SeedError::Execution { sql, source: e }),
            }
        }

        log::debug!("Seed file {} done: {:?}", filename, report);
        Ok(report)
    }

    /// Decide what to run for one statement; `None` means skip it.
    async fn prepare(
        &self,
        db: &dyn Database,
        statement: &str,
        report: &mut SeedReport,
    ) -> SeedResult<Option<String>> {
        // The store accepts some SQL the parser does not; without keys the
        // duplicate-key check at execution is the only guard.
        let mut parsed = match insert::parse_single(statement) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::warn!("Executing seed statement without existence check: {}", e);
                return Ok(Some(statement.to_string()));
            }
        };
        let Some(target) = insert::insert_target(&parsed) else {
            return Ok(Some(statement.to_string()));
        };

        let present = self.rows_present(db, &target).await?;
        let existing = present.iter().filter(|p| **p).count();
        if existing == 0 {
            return Ok(Some(statement.to_string()));
        }

        let all_present = existing == present.len();
        if all_present || self.policy == SeedSkipPolicy::PerStatement {
            log::info!("Skipping already loaded seed data: {}", statement);
            report.skipped += 1;
            return Ok(None);
        }

        let keep: Vec<bool> = present.iter().map(|p| !p).collect();
        if !insert::retain_rows(&mut parsed, &keep) {
            return Ok(Some(statement.to_string()));
        }
        log::info!(
            "Dropping {} already loaded rows from insert into {}",
            existing,
            target.table
        );
        report.rows_filtered += existing;
        Ok(Some(parsed.to_string()))
    }

    /// For each row, whether its key already exists in the target table.
    async fn rows_present(
        &self,
        db: &dyn Database,
        target: &insert::InsertTarget,
    ) -> SeedResult<Vec<bool>> {
        let absent = vec![false; target.row_keys.len()];

        // A missing table has no rows; execution will report it
        if !db
            .relation_exists(&target.table)
            .await
            .map_err(SeedError::Query)?
        {
            return Ok(absent);
        }

        let key_column = match target.columns.first() {
            Some(column) => column.clone(),
            None => {
                let columns = db
                    .table_columns(&target.table)
                    .await
                    .map_err(SeedError::Query)?;
                match columns.first() {
                    Some(column) => quote_ident(column),
                    None => return Ok(absent),
                }
            }
        };

        let mut present = Vec::with_capacity(target.row_keys.len());
        for key in &target.row_keys {
            let exists = match key {
                Some(literal) => {
                    let sql = format!(
                        "SELECT 1 FROM {} WHERE {} = {}",
                        target.table, key_column, literal
                    );
                    db.query_count(&sql).await.map_err(SeedError::Query)? > 0
                }
                None => false,
            };
            present.push(exists);
        }
        Ok(present)
    }
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
