//! Weather lookup proxy.
//!
//! The `WeatherProvider` trait hides the upstream weather API so request
//! handlers (and tests) can work against `Arc<dyn WeatherProvider>`.

pub mod openweather;

pub use openweather::OpenWeatherProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current conditions for a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    /// Degrees in the configured unit system
    pub temperature: f64,
    /// Title-cased description, e.g. "Scattered Clouds"
    pub description: String,
    /// Relative humidity, percent
    pub humidity: f64,
    pub wind_speed: f64,
}

/// Errors from the weather upstream.
///
/// The display strings are shown to farmers as-is.
#[derive(Error, Debug)]
pub enum WeatherError {
    /// The API answered with a non-success status.
    #[error("Weather API error: {status} - {body}")]
    Upstream { status: u16, body: String },

    /// Network failures, missing credentials, unexpected payloads.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl WeatherError {
    /// Label used for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            WeatherError::Upstream { .. } => "upstream_error",
            WeatherError::Unexpected(_) => "unexpected_error",
        }
    }
}

/// A source of current weather conditions.
#[async_trait]
pub trait WeatherProvider: Send + Sync + 'static {
    /// Human-readable provider name for logs.
    fn name(&self) -> &str;

    /// Fetch current conditions for a free-text location (city or state name).
    async fn current(&self, location: &str) -> Result<WeatherReport, WeatherError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let upstream = WeatherError::Upstream {
            status: 404,
            body: r#"{"cod":"404","message":"city not found"}"#.to_string(),
        };
        assert_eq!(
            upstream.to_string(),
            r#"Weather API error: 404 - {"cod":"404","message":"city not found"}"#
        );

        let unexpected = WeatherError::Unexpected("connection refused".to_string());
        assert_eq!(unexpected.to_string(), "Unexpected error: connection refused");
    }

    #[test]
    fn test_report_serialization() {
        let report = WeatherReport {
            location: "Hyderabad".to_string(),
            temperature: 31.5,
            description: "Haze".to_string(),
            humidity: 48.0,
            wind_speed: 3.6,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["location"], "Hyderabad");
        assert_eq!(json["wind_speed"], 3.6);
    }
}
