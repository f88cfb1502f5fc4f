//! Provider module
//!
//! Defines the Provider trait and the upstream provider implementation

pub mod openai;

use crate::utils::error::UpstreamError;
use async_trait::async_trait;

/// Text returned by a provider for one prompt
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Generated text
    pub text: String,
    /// Model that produced the text
    pub model: String,
    /// Total tokens billed for the call, when reported
    pub total_tokens: Option<u32>,
}

/// Provider trait for upstream model APIs
///
/// A provider performs exactly one upstream call per `complete` and
/// reports every failure as an `UpstreamError`.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Model identifier requested upstream
    fn model(&self) -> &str;

    /// Send a single prompt and return the completion text
    async fn complete(&self, prompt: &str) -> Result<Completion, UpstreamError>;
}

pub use openai::OpenAIProvider;
