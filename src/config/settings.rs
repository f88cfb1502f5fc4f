//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Origins allowed when `ALLOWED_ORIGINS` is not set (local frontend dev servers)
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:3001,http://localhost:3002,http://127.0.0.1:3000,http://127.0.0.1:3001,http://127.0.0.1:3002";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Upstream OpenAI-compatible API configuration
    pub openai: OpenAIConfig,
    /// Quiz request bounds
    pub quiz: QuizConfig,
    /// Request configuration
    pub request: RequestConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// OpenAI API configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    /// API key; `None` disables AI generation
    #[serde(skip_serializing, default)]
    pub api_key: Option<String>,
    /// API base URL
    pub base_url: String,
    /// Model identifier sent upstream
    pub model: String,
    /// Maximum output tokens
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl std::fmt::Debug for OpenAIConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Quiz request bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Smallest accepted question count
    pub min_questions: u32,
    /// Largest accepted question count
    pub max_questions: u32,
}

/// Request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Maximum request size in bytes
    pub max_request_size: usize,
    /// Request timeout in seconds
    pub timeout: u64,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Allowed origins for CORS
    pub allowed_origins: Vec<String>,
    /// Whether CORS is enabled
    pub cors_enabled: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Settings {
    /// Create a new configuration instance from the process environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::load(|key| std::env::var(key).ok())
    }

    /// Create a configuration instance from an explicit variable map
    pub fn from_map(vars: &HashMap<&str, &str>) -> Result<Self> {
        Self::load(|key| vars.get(key).map(|v| v.to_string()))
    }

    fn load<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        // SERVER_PORT wins over the hosting platform's PORT
        let port = lookup("SERVER_PORT")
            .or_else(|| lookup("PORT"))
            .unwrap_or_else(|| "8000".to_string());

        let settings = Self {
            server: ServerConfig {
                host: get("SERVER_HOST", "0.0.0.0"),
                port: port.trim().parse().context("Invalid port number")?,
            },
            openai: OpenAIConfig {
                api_key: normalize_api_key(lookup("OPENAI_API_KEY")),
                base_url: get("OPENAI_BASE_URL", "https://api.openai.com/v1"),
                model: get("OPENAI_MODEL", "gpt-3.5-turbo"),
                max_tokens: get("OPENAI_MAX_TOKENS", "800")
                    .parse()
                    .context("Invalid OPENAI_MAX_TOKENS value")?,
                temperature: get("OPENAI_TEMPERATURE", "0.7")
                    .parse()
                    .context("Invalid OPENAI_TEMPERATURE value")?,
                timeout: get("OPENAI_TIMEOUT", "20")
                    .parse()
                    .context("Invalid OPENAI_TIMEOUT value")?,
            },
            quiz: QuizConfig {
                min_questions: get("QUIZ_MIN_QUESTIONS", "1")
                    .parse()
                    .context("Invalid QUIZ_MIN_QUESTIONS value")?,
                max_questions: get("QUIZ_MAX_QUESTIONS", "20")
                    .parse()
                    .context("Invalid QUIZ_MAX_QUESTIONS value")?,
            },
            request: RequestConfig {
                max_request_size: get("MAX_REQUEST_SIZE", "65536")
                    .parse()
                    .context("Invalid maximum request size")?,
                timeout: get("REQUEST_TIMEOUT", "30")
                    .parse()
                    .context("Invalid request timeout")?,
            },
            security: SecurityConfig {
                allowed_origins: get("ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS)
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                cors_enabled: get("CORS_ENABLED", "true")
                    .parse()
                    .context("Invalid CORS enabled flag")?,
            },
            logging: LoggingConfig {
                level: get("RUST_LOG", "info"),
                format: get("LOG_FORMAT", "text"),
            },
        };

        // Validate configuration
        settings.validate()?;

        if settings.openai.api_key.is_none() {
            warn!("OPENAI_API_KEY not provided, all quizzes will be served from the fallback set");
        }

        Ok(settings)
    }

    /// Validate configuration validity
    fn validate(&self) -> Result<()> {
        // Validate port range
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        // Validate URL format
        if !self.openai.base_url.starts_with("http") {
            anyhow::bail!("Invalid OpenAI base URL format, should start with 'http'");
        }

        if self.openai.model.trim().is_empty() {
            anyhow::bail!("OpenAI model cannot be empty");
        }

        if self.openai.max_tokens == 0 {
            anyhow::bail!("OPENAI_MAX_TOKENS cannot be 0");
        }

        if !(0.0..=2.0).contains(&self.openai.temperature) {
            anyhow::bail!("OPENAI_TEMPERATURE must be between 0.0 and 2.0, got {}", self.openai.temperature);
        }

        // Validate timeout values
        if self.openai.timeout == 0 || self.request.timeout == 0 {
            anyhow::bail!("Timeout values cannot be 0");
        }

        // The fallback must be served before the HTTP layer gives up on the request
        if self.openai.timeout >= self.request.timeout {
            anyhow::bail!(
                "OPENAI_TIMEOUT ({}s) must be shorter than REQUEST_TIMEOUT ({}s)",
                self.openai.timeout,
                self.request.timeout
            );
        }

        if self.quiz.min_questions == 0 {
            anyhow::bail!("QUIZ_MIN_QUESTIONS cannot be 0");
        }

        if self.quiz.min_questions > self.quiz.max_questions {
            anyhow::bail!(
                "QUIZ_MIN_QUESTIONS ({}) cannot exceed QUIZ_MAX_QUESTIONS ({})",
                self.quiz.min_questions,
                self.quiz.max_questions
            );
        }

        // Validate request size limit
        if self.request.max_request_size == 0 {
            anyhow::bail!("Maximum request size cannot be 0");
        }

        if self.security.cors_enabled && self.security.allowed_origins.is_empty() {
            anyhow::bail!("ALLOWED_ORIGINS cannot be empty when CORS is enabled");
        }

        // Validate log level, accepting full filter directives
        if let Err(e) = EnvFilter::try_new(&self.logging.level) {
            anyhow::bail!("Invalid log level: {} ({})", self.logging.level, e);
        }

        // Validate log format
        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Whether an upstream API key is available
    pub fn ai_configured(&self) -> bool {
        self.openai.api_key.is_some()
    }

    /// Upstream call timeout
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.openai.timeout)
    }

    /// HTTP-level request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request.timeout)
    }
}

/// Blank or whitespace-containing keys are treated as absent
fn normalize_api_key(raw: Option<String>) -> Option<String> {
    let key = raw?.trim().to_string();
    if key.is_empty() {
        return None;
    }
    if key.contains(char::is_whitespace) {
        warn!("OPENAI_API_KEY contains whitespace characters, ignoring it");
        return None;
    }
    Some(key)
}
