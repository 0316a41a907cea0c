//! rp-core - Shared types for rentpro-migrate
//!
//! Holds the `settings.yml` model used by the operator CLI and the error
//! type for loading it.

pub mod error;
pub mod settings;

pub use error::{CoreError, CoreResult};
pub use settings::{DatabaseSettings, Driver, MigrationSettings, SeedSkipPolicy, Settings};
