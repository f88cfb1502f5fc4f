//! Error handling module
//!
//! Defines error types and handling logic used in the project

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error types
///
/// These are the errors that reach HTTP clients. Upstream and parse
/// failures never do: they are absorbed by the fallback path.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request validation failed
    #[error("Request validation failed: {0}")]
    Validation(String),

    /// Payload too large
    #[error("Payload too large")]
    PayloadTooLarge,
}

/// Failure talking to the upstream model API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UpstreamError {
    /// The call did not finish within the configured timeout
    #[error("upstream request timed out")]
    Timeout,

    /// Connection or transport failure
    #[error("network error: {0}")]
    Network(String),

    /// HTTP 429 from the upstream
    #[error("rate limited by upstream: {0}")]
    RateLimited(String),

    /// Account quota or billing exhausted
    #[error("upstream quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Any other non-success status
    #[error("upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Success status but a body we could not decode
    #[error("invalid upstream response: {0}")]
    InvalidResponse(String),

    /// No choices or blank message content
    #[error("upstream returned an empty completion")]
    EmptyCompletion,
}

/// The completion text did not match the expected quiz layout
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("no questions found in completion")]
    NoQuestions,

    #[error("question {number} has no text")]
    MissingQuestionText { number: usize },

    #[error("question {number} has {found} options, at least 2 required")]
    TooFewOptions { number: usize, found: usize },

    #[error("question {number} has no answer marker")]
    MissingAnswer { number: usize },

    #[error("question {number} marks answer {index} but has only {options} options")]
    AnswerOutOfRange { number: usize, index: usize, options: usize },

    #[error("expected {expected} questions, found {found}")]
    CountMismatch { expected: usize, found: usize },
}

/// Why a request was served from the fallback set
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("no upstream API key configured")]
    NotConfigured,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl GenerationError {
    /// Short label used in logs and usage counters
    pub fn cause(&self) -> &'static str {
        match self {
            GenerationError::NotConfigured => "not_configured",
            GenerationError::Upstream(_) => "upstream_error",
            GenerationError::Parse(_) => "parse_error",
        }
    }
}

/// API error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Get error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Validation(_) | AppError::PayloadTooLarge => "invalid_request_error",
        }
    }

    /// Whether the error is caused by the client
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Convert to the API error body
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error_type: "error".to_string(),
            error: ErrorDetail {
                error_type: self.error_type().to_string(),
                message: self.to_string(),
            },
        }
    }
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_client_error() {
            tracing::warn!("Client error: {} - Status code: {}", self, status);
        } else {
            tracing::error!("Application error: {} - Status code: {}", self, status);
        }

        (status, Json(self.to_error_response())).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;
