//! Error types for rp-core

use thiserror::Error;

/// Core error type for rentpro-migrate
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Settings file not found
    #[error("[E001] Settings file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse settings file
    #[error("[E002] Failed to parse settings: {message}")]
    ConfigParseError { message: String },

    /// E003: Invalid settings value
    #[error("[E003] Invalid settings: {message}")]
    ConfigInvalid { message: String },

    /// E004: IO error with file path context
    #[error("[E004] IO error on {path}: {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::ConfigParseError {
            message: err.to_string(),
        }
    }
}
