//! Error types for chat operations.

use thiserror::Error;

/// Errors that can occur while asking the chat model for a reply.
#[derive(Error, Debug)]
pub enum ChatError {
    /// Network connectivity error (DNS, connection refused, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded deadline.
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// Chat API returned an error response (4xx, 5xx).
    #[error("Chat API error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Response doesn't match the chat completion format.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Agent configuration error (missing API key).
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ChatError {
    /// Label used for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            ChatError::Network(_) => "network_error",
            ChatError::Timeout(_) => "timeout",
            ChatError::Upstream { .. } => "upstream_error",
            ChatError::InvalidResponse(_) => "invalid_response",
            ChatError::Configuration(_) => "configuration_error",
        }
    }
}
