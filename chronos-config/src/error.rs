// Error types for schedule configuration

use chronos_core::ChronosError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Schedule not found: {0}")]
    NotFound(String),

    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid schedule: {0}")]
    Schedule(#[from] ChronosError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvError(#[from] std::env::VarError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
