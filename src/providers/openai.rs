//! OpenAI Provider implementation
//!
//! Standard OpenAI-compatible chat completions provider

use super::{Completion, Provider};
use crate::config::OpenAIConfig;
use crate::models::openai::*;
use crate::utils::error::UpstreamError;
use crate::utils::logging::create_request_log_summary;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error};

/// Instructions sent as the system message of every request
const SYSTEM_PROMPT: &str = "You are a quiz author. You write accurate multiple-choice questions and follow the requested output format exactly.";

/// OpenAI Provider
#[derive(Clone)]
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAIProvider {
    /// Create a provider from configuration
    ///
    /// Returns `None` when no API key is configured.
    pub fn from_config(config: &OpenAIConfig) -> Result<Option<Self>> {
        match &config.api_key {
            Some(api_key) => Self::new(config, api_key.clone()).map(Some),
            None => Ok(None),
        }
    }

    /// Create a new provider with an explicit API key
    pub fn new(config: &OpenAIConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(concat!("quiz-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    /// Build the request URL
    fn build_url(&self) -> String {
        let base_url = self.base_url.trim_end_matches('/');
        format!("{}/chat/completions", base_url)
    }

    fn build_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)],
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
        }
    }
}

impl std::fmt::Debug for OpenAIProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// Classify a transport-level reqwest failure
fn classify_transport_error(err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout
    } else if err.is_decode() {
        UpstreamError::InvalidResponse(err.to_string())
    } else {
        UpstreamError::Network(err.to_string())
    }
}

/// Classify a non-success HTTP response
pub fn classify_status_error(status: StatusCode, body: &str) -> UpstreamError {
    let parsed = serde_json::from_str::<OpenAIErrorResponse>(body).ok();
    let message = parsed
        .as_ref()
        .map(|e| e.error.message.clone())
        .unwrap_or_else(|| body.trim().to_string());

    // Quota errors arrive as 429 as well, check the error code first
    if parsed.as_ref().is_some_and(|e| e.error.is_quota_error()) {
        return UpstreamError::QuotaExceeded(message);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return UpstreamError::RateLimited(message);
    }

    UpstreamError::Status {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl Provider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<Completion, UpstreamError> {
        let request = self.build_request(prompt);

        if let Ok(summary_json) = serde_json::to_string_pretty(&create_request_log_summary(&request)) {
            debug!("Upstream request:\n{}", summary_json);
        }

        let response = self
            .client
            .post(self.build_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let upstream_error = classify_status_error(status, &error_text);
            error!("OpenAI API request failed: {}", upstream_error);
            return Err(upstream_error);
        }

        let completion: ChatCompletionResponse =
            response.json().await.map_err(classify_transport_error)?;

        let text = completion
            .first_content()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or(UpstreamError::EmptyCompletion)?
            .to_string();

        let total_tokens = completion.usage.as_ref().map(|u| u.total_tokens);
        debug!(
            "OpenAI request completed successfully - Tokens: {}",
            total_tokens.map(|t| t.to_string()).unwrap_or_else(|| "unknown".to_string())
        );

        let model = if completion.model.is_empty() {
            self.model.clone()
        } else {
            completion.model
        };

        Ok(Completion {
            text,
            model,
            total_tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> OpenAIConfig {
        OpenAIConfig {
            api_key: Some("sk-test".to_string()),
            base_url: "https://api.openai.com/v1/".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 500,
            temperature: 0.3,
            timeout: 5,
        }
    }

    #[test]
    fn test_from_config_without_key() {
        let mut config = test_config();
        config.api_key = None;
        assert!(OpenAIProvider::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn test_build_url_trims_slash() {
        let provider = OpenAIProvider::from_config(&test_config()).unwrap().unwrap();
        assert_eq!(provider.build_url(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_build_request() {
        let provider = OpenAIProvider::new(&test_config(), "sk-test".to_string()).unwrap();
        let request = provider.build_request("Make a quiz");

        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.max_tokens, Some(500));
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[1].content.as_deref(), Some("Make a quiz"));
    }

    #[test]
    fn test_classify_status_error() {
        let quota = r#"{"error": {"message": "You exceeded your current quota", "type": "insufficient_quota", "code": "insufficient_quota"}}"#;
        assert!(matches!(
            classify_status_error(StatusCode::TOO_MANY_REQUESTS, quota),
            UpstreamError::QuotaExceeded(_)
        ));

        let rate = r#"{"error": {"message": "Rate limit reached", "type": "requests", "code": "rate_limit_exceeded"}}"#;
        assert_eq!(
            classify_status_error(StatusCode::TOO_MANY_REQUESTS, rate),
            UpstreamError::RateLimited("Rate limit reached".to_string())
        );

        assert_eq!(
            classify_status_error(StatusCode::BAD_GATEWAY, "upstream down"),
            UpstreamError::Status {
                status: 502,
                message: "upstream down".to_string()
            }
        );
    }
}
