//! CLI command implementations

pub(crate) mod common;
pub(crate) mod generate;
pub(crate) mod migrate;
pub(crate) mod status;
