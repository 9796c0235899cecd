//! Process configuration for the episode generation service
//!
//! Supports loading from:
//! - a TOML file (path given by the caller, or `EPISODEER_CONFIG`)
//! - environment variables (`EPISODEER_` prefix, double-underscore
//!   separated, e.g. `EPISODEER_SERVER__PORT`)
//!
//! Everything else — default voice, chunk strategy, cleaning flags — is
//! the persisted `Settings` row (`episodeer_core::Settings`), read and
//! written at runtime through the Store, not through this crate.

pub mod process;

pub use process::ProcessConfig;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
