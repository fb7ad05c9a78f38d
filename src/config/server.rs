//! HTTP listener settings

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the advisory API listens and how long a request may take.
///
/// `request_timeout_seconds` bounds the whole request, including any weather
/// or chat upstream call it makes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_seconds: u64,
}

impl ServerConfig {
    /// `host:port` for the TCP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Deadline the router applies to every request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            request_timeout_seconds: 30,
        }
    }
}
