//! OpenWeatherMap provider.

use super::{WeatherError, WeatherProvider, WeatherReport};
use crate::advisory::title_case;
use crate::config::WeatherConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// OpenWeatherMap current-weather client.
///
/// Calls `GET {base_url}/data/2.5/weather?q=<location>&appid=<key>&units=<units>`.
pub struct OpenWeatherProvider {
    base_url: String,
    api_key: Option<String>,
    api_key_env: String,
    units: String,
    timeout: Duration,
    client: Client,
}

impl OpenWeatherProvider {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        units: String,
        timeout: Duration,
        client: Client,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            api_key_env: "OPENWEATHER_API_KEY".to_string(),
            units,
            timeout,
            client,
        }
    }

    /// Build from configuration, reading the API key from its environment variable.
    ///
    /// A missing key is not fatal here; lookups report it instead.
    pub fn from_config(config: &WeatherConfig, client: Client) -> Self {
        let api_key = config.api_key().ok();
        if api_key.is_none() {
            tracing::warn!(
                env = %config.api_key_env,
                "Weather API key not set, weather lookups will fail"
            );
        }
        let mut provider = Self::new(
            config.base_url.clone(),
            api_key,
            config.units.clone(),
            Duration::from_secs(config.timeout_seconds),
            client,
        );
        provider.api_key_env = config.api_key_env.clone();
        provider
    }
}

/// Subset of the OpenWeatherMap /data/2.5/weather response
#[derive(Deserialize)]
struct CurrentWeather {
    main: MainBlock,
    weather: Vec<ConditionBlock>,
    wind: WindBlock,
}

#[derive(Deserialize)]
struct MainBlock {
    temp: f64,
    humidity: f64,
}

#[derive(Deserialize)]
struct ConditionBlock {
    description: String,
}

#[derive(Deserialize)]
struct WindBlock {
    speed: f64,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    fn name(&self) -> &str {
        "openweathermap"
    }

    async fn current(&self, location: &str) -> Result<WeatherReport, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            WeatherError::Unexpected(format!(
                "Environment variable '{}' is not set",
                self.api_key_env
            ))
        })?;

        let url = format!("{}/data/2.5/weather", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", location),
                ("appid", api_key),
                ("units", self.units.as_str()),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| WeatherError::Unexpected(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body: CurrentWeather = response
            .json()
            .await
            .map_err(|e| WeatherError::Unexpected(format!("Failed to parse weather response: {}", e)))?;

        let condition = body
            .weather
            .first()
            .ok_or_else(|| WeatherError::Unexpected("Weather response has no conditions".to_string()))?;

        Ok(WeatherReport {
            location: location.to_string(),
            temperature: body.main.temp,
            description: title_case(&condition.description),
            humidity: body.main.humidity,
            wind_speed: body.wind.speed,
        })
    }
}
