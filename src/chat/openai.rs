//! OpenAI-compatible chat agent (Groq by default).

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use super::{ChatAgent, ChatError, SYSTEM_PROMPT};
use crate::config::ChatConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Chat agent for any endpoint speaking the OpenAI chat completions API.
///
/// Sends POST {base_url}/v1/chat/completions with Bearer token auth. Each
/// request carries the advisor system prompt followed by the farmer's message.
pub struct OpenAICompatAgent {
    /// Base URL (e.g., "https://api.groq.com/openai")
    base_url: String,
    /// API key for Bearer authentication
    api_key: Option<String>,
    /// Environment variable the key was expected in, for error messages
    api_key_env: String,
    model: String,
    timeout: Duration,
    /// Shared HTTP client for connection pooling
    client: Arc<Client>,
}

impl OpenAICompatAgent {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        model: String,
        timeout: Duration,
        client: Arc<Client>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            api_key_env: "GROQ_API_KEY".to_string(),
            model,
            timeout,
            client,
        }
    }

    /// Build from configuration, reading the API key from its environment variable.
    pub fn from_config(config: &ChatConfig, client: Arc<Client>) -> Self {
        let api_key = config.api_key().ok();
        if api_key.is_none() {
            tracing::warn!(
                env = %config.api_key_env,
                "Chat API key not set, chatbot replies will report an error"
            );
        }
        let mut agent = Self::new(
            config.base_url.clone(),
            api_key,
            config.model.clone(),
            Duration::from_secs(config.timeout_seconds),
            client,
        );
        agent.api_key_env = config.api_key_env.clone();
        agent
    }

    fn build_request(&self, message: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(message)],
            temperature: None,
            max_tokens: None,
        }
    }
}

#[async_trait]
impl ChatAgent for OpenAICompatAgent {
    fn name(&self) -> &str {
        "openai-compatible"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn reply(&self, message: &str) -> Result<String, ChatError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ChatError::Configuration(format!(
                "environment variable '{}' is not set",
                self.api_key_env
            ))
        })?;

        let url = format!("{}/v1/chat/completions", self.base_url);
        let timeout_ms = self.timeout.as_millis() as u64;

        let response = self
            .client
            .post(&url)
            .header("authorization", format!("Bearer {}", api_key))
            .json(&self.build_request(message))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChatError::Timeout(timeout_ms)
                } else {
                    ChatError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ChatError::Upstream {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            ChatError::InvalidResponse(format!("Failed to parse completion response: {}", e))
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ChatError::InvalidResponse("completion has no content".to_string()))?;

        Ok(content.trim().to_string())
    }
}
