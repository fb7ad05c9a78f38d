//! Dataset and upstream service configuration

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Reference dataset location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/crop_data.csv"),
        }
    }
}

/// OpenWeatherMap proxy settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Used when a farmer has no location on file
    pub default_location: String,
    pub units: String,
    pub timeout_seconds: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "http://api.openweathermap.org".to_string(),
            api_key_env: "OPENWEATHER_API_KEY".to_string(),
            default_location: "Hyderabad".to_string(),
            units: "metric".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl WeatherConfig {
    pub fn api_key(&self) -> Result<String, ConfigError> {
        read_secret(&self.api_key_env)
    }
}

/// Chatbot proxy settings (any OpenAI-compatible endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub base_url: String,
    pub api_key_env: String,
    pub model: String,
    pub timeout_seconds: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai".to_string(),
            api_key_env: "GROQ_API_KEY".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            timeout_seconds: 25,
        }
    }
}

impl ChatConfig {
    pub fn api_key(&self) -> Result<String, ConfigError> {
        read_secret(&self.api_key_env)
    }
}

fn read_secret(var: &str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingSecret(var.to_string())),
    }
}
