//! rp-db - Store handle abstraction for rentpro-migrate
//!
//! This crate provides the `Database` trait consumed by the migration engine
//! and its DuckDB implementation.

pub mod duckdb;
pub mod error;
pub mod quoting;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use quoting::{quote_ident, quote_literal};
pub use traits::Database;
