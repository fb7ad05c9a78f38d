//! Errors raised while loading or checking `advisor.toml`

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// TOML syntax or type error, with the parser's location details.
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// A setting parsed but is unusable; `field` is the dotted TOML path.
    #[error("Invalid value for '{field}': {message}")]
    Validation { field: String, message: String },

    /// An upstream API key variable named in the config is unset or blank.
    #[error("Environment variable '{0}' is not set")]
    MissingSecret(String),
}

impl ConfigError {
    pub(crate) fn validation(field: &str, message: &str) -> Self {
        ConfigError::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}
