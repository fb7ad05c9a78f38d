//! Configuration module for the advisor
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`ADVISOR_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! API keys never live in the file; each upstream section names the
//! environment variable that holds its key.
//!
//! # Example
//!
//! ```rust
//! use advisor::config::AdvisorConfig;
//!
//! let toml = r#"
//! [server]
//! port = 9000
//!
//! [dataset]
//! path = "/srv/advisor/crop_data.csv"
//! "#;
//! let config: AdvisorConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.server.port, 9000);
//! assert_eq!(config.weather.default_location, "Hyderabad");
//! ```

pub mod error;
pub mod logging;
pub mod server;
pub mod services;

pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use services::{ChatConfig, DatasetConfig, WeatherConfig};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Unified configuration for the advisor service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AdvisorConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Reference dataset
    pub dataset: DatasetConfig,
    /// Weather proxy
    pub weather: WeatherConfig,
    /// Chatbot proxy
    pub chat: ChatConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AdvisorConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("ADVISOR_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("ADVISOR_HOST") {
            self.server.host = host;
        }

        if let Ok(level) = std::env::var("ADVISOR_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("ADVISOR_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(dataset) = std::env::var("ADVISOR_DATASET") {
            if !dataset.is_empty() {
                self.dataset.path = PathBuf::from(dataset);
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::validation("server.port", "port must be non-zero"));
        }
        if self.dataset.path.as_os_str().is_empty() {
            return Err(ConfigError::validation("dataset.path", "path cannot be empty"));
        }
        if self.weather.base_url.is_empty() {
            return Err(ConfigError::validation("weather.base_url", "URL cannot be empty"));
        }
        if self.chat.base_url.is_empty() {
            return Err(ConfigError::validation("chat.base_url", "URL cannot be empty"));
        }
        if self.chat.model.is_empty() {
            return Err(ConfigError::validation("chat.model", "model cannot be empty"));
        }

        // Upstream calls must give up before the server-wide timeout fires
        let request_timeout = self.server.request_timeout_seconds;
        if request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout_seconds",
                "timeout must be non-zero",
            ));
        }
        let upstreams = [
            ("weather.timeout_seconds", self.weather.timeout_seconds),
            ("chat.timeout_seconds", self.chat.timeout_seconds),
        ];
        for (field, seconds) in upstreams {
            if seconds >= request_timeout {
                return Err(ConfigError::validation(
                    field,
                    &format!(
                        "must be less than server.request_timeout_seconds ({}s)",
                        request_timeout
                    ),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_advisor_config_defaults() {
        let config = AdvisorConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.dataset.path, PathBuf::from("data/crop_data.csv"));
        assert_eq!(config.chat.api_key_env, "GROQ_API_KEY");
    }

    #[test]
    fn test_config_parse_minimal_toml() {
        let toml = r#"
        [server]
        port = 9000
        "#;

        let config: AdvisorConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_config_parse_example_file() {
        let toml = include_str!("../../advisor.example.toml");
        let config: AdvisorConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.weather.default_location, "Hyderabad");
    }

    #[test]
    fn test_config_parse_upstreams() {
        let toml = r#"
        [weather]
        base_url = "http://localhost:9001"
        default_location = "Warangal"

        [chat]
        model = "llama-3.3-70b-versatile"
        "#;

        let config: AdvisorConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.weather.base_url, "http://localhost:9001");
        assert_eq!(config.weather.default_location, "Warangal");
        assert_eq!(config.weather.units, "metric");
        assert_eq!(config.chat.model, "llama-3.3-70b-versatile");
    }

    #[test]
    fn test_config_load_from_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[server]\nport = 8080").unwrap();

        let config = AdvisorConfig::load(Some(temp.path())).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_config_missing_file_error() {
        let result = AdvisorConfig::load(Some(Path::new("/nonexistent/advisor.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_config_invalid_toml_error() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[server\nport = ").unwrap();

        let result = AdvisorConfig::load(Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_load_none_returns_defaults() {
        let config = AdvisorConfig::load(None).unwrap();
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_config_env_override_port() {
        std::env::set_var("ADVISOR_PORT", "9999");
        let config = AdvisorConfig::default().with_env_overrides();
        std::env::remove_var("ADVISOR_PORT");

        assert_eq!(config.server.port, 9999);
    }

    #[test]
    fn test_config_env_override_dataset() {
        std::env::set_var("ADVISOR_DATASET", "/tmp/crops.csv");
        let config = AdvisorConfig::default().with_env_overrides();
        std::env::remove_var("ADVISOR_DATASET");

        assert_eq!(config.dataset.path, PathBuf::from("/tmp/crops.csv"));
    }

    #[test]
    fn test_config_env_override_log_level() {
        std::env::set_var("ADVISOR_LOG_LEVEL", "debug");
        let config = AdvisorConfig::default().with_env_overrides();
        std::env::remove_var("ADVISOR_LOG_LEVEL");

        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_config_env_invalid_format_ignored() {
        std::env::set_var("ADVISOR_LOG_FORMAT", "xml");
        let config = AdvisorConfig::default().with_env_overrides();
        std::env::remove_var("ADVISOR_LOG_FORMAT");

        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_config_validation_zero_port() {
        let mut config = AdvisorConfig::default();
        config.server.port = 0;

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "server.port"
        ));
    }

    #[test]
    fn test_config_validation_empty_dataset_path() {
        let mut config = AdvisorConfig::default();
        config.dataset.path = PathBuf::new();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "dataset.path"
        ));
    }

    #[test]
    fn test_config_defaults_validate() {
        let config = AdvisorConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.chat.timeout_seconds < config.server.request_timeout_seconds);
        assert!(config.weather.timeout_seconds < config.server.request_timeout_seconds);
    }

    #[test]
    fn test_config_validation_chat_timeout_outlives_request() {
        let toml = r#"
        [server]
        request_timeout_seconds = 30

        [chat]
        timeout_seconds = 60
        "#;
        let config: AdvisorConfig = toml::from_str(toml).unwrap();

        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Validation { ref field, .. } if field == "chat.timeout_seconds"
        ));
        assert!(err.to_string().contains("(30s)"));
    }

    #[test]
    fn test_config_validation_weather_timeout_equal_to_request() {
        let mut config = AdvisorConfig::default();
        config.server.request_timeout_seconds = 10;
        config.weather.timeout_seconds = 10;
        config.chat.timeout_seconds = 5;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "weather.timeout_seconds"
        ));
    }

    #[test]
    fn test_config_validation_zero_request_timeout() {
        let mut config = AdvisorConfig::default();
        config.server.request_timeout_seconds = 0;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. })
                if field == "server.request_timeout_seconds"
        ));
    }

    #[test]
    fn test_config_validation_empty_chat_model() {
        let mut config = AdvisorConfig::default();
        config.chat.model = String::new();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "chat.model"
        ));
    }
}
