//! Quiz generator
//!
//! Validates requests, asks the upstream provider for questions and falls
//! back to the static quiz on any upstream or parse failure.

use crate::config::{QuizConfig, Settings};
use crate::models::{Quiz, QuizRequest, QuizSource};
use crate::providers::{OpenAIProvider, Provider};
use crate::services::fallback::fallback_quiz;
use crate::services::parser::parse_quiz;
use crate::services::prompt::build_prompt;
use crate::services::usage::{UsageCounters, UsageSnapshot};
use crate::utils::error::{AppError, AppResult, GenerationError, UpstreamError};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Longest accepted topic, in characters
pub const MAX_TOPIC_CHARS: usize = 200;

/// Longest accepted background context, in characters
pub const MAX_CONTEXT_CHARS: usize = 2000;

/// Generate-with-fallback orchestration
#[derive(Clone)]
pub struct QuizGenerator {
    provider: Option<Arc<dyn Provider>>,
    usage: Arc<UsageCounters>,
    limits: QuizConfig,
    upstream_timeout: Duration,
}

impl std::fmt::Debug for QuizGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizGenerator")
            .field("provider", &self.provider.as_ref().map(|p| p.name().to_string()))
            .field("limits", &self.limits)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}

impl QuizGenerator {
    /// Create a generator with an explicit provider (or none)
    pub fn new(
        provider: Option<Arc<dyn Provider>>,
        usage: Arc<UsageCounters>,
        limits: QuizConfig,
        upstream_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            usage,
            limits,
            upstream_timeout,
        }
    }

    /// Create a generator backed by the configured OpenAI provider
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let provider = OpenAIProvider::from_config(&settings.openai)?
            .map(|p| Arc::new(p) as Arc<dyn Provider>);

        match &provider {
            Some(p) => info!("Upstream provider {} initialized with model {}", p.name(), p.model()),
            None => warn!("Upstream API key not configured, using fallback quizzes only"),
        }

        Ok(Self::new(
            provider,
            Arc::new(UsageCounters::new()),
            settings.quiz.clone(),
            settings.upstream_timeout(),
        ))
    }

    /// Whether requests can reach the upstream at all
    pub fn ai_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Count a request rejected before reaching `generate`
    pub fn record_rejection(&self) {
        self.usage.record_rejection();
    }

    /// Current usage counters
    pub fn usage(&self) -> UsageSnapshot {
        self.usage.snapshot()
    }

    /// Generate a quiz
    ///
    /// Only validation failures are returned as errors; every other failure
    /// is logged and answered with the fallback quiz.
    pub async fn generate(&self, request: QuizRequest) -> AppResult<Quiz> {
        if let Err(message) = validate_quiz_request(&request, &self.limits) {
            self.usage.record_rejection();
            return Err(AppError::Validation(message));
        }

        match self.generate_with_provider(&request).await {
            Ok(quiz) => {
                info!(
                    "Quiz generated for {} - {} questions",
                    request.topic.trim(),
                    quiz.questions.len()
                );
                Ok(quiz)
            }
            Err(cause) => {
                warn!(
                    "Serving fallback quiz for {} ({}): {}",
                    request.topic.trim(),
                    cause.cause(),
                    cause
                );
                self.usage.record_fallback(&cause);
                Ok(fallback_quiz(&request))
            }
        }
    }

    async fn generate_with_provider(&self, request: &QuizRequest) -> Result<Quiz, GenerationError> {
        let provider = self.provider.as_ref().ok_or(GenerationError::NotConfigured)?;

        let prompt = build_prompt(request);
        debug!("Requesting {} questions from {}", request.question_count, provider.name());

        let completion = tokio::time::timeout(self.upstream_timeout, provider.complete(&prompt))
            .await
            .map_err(|_| UpstreamError::Timeout)??;

        let questions = parse_quiz(
            &completion.text,
            request.question_count as usize,
            request.difficulty.points(),
        )?;

        self.usage.record_ai_success(completion.total_tokens);

        Ok(Quiz::new(request, QuizSource::AiGenerated, questions).with_model(completion.model))
    }
}

/// Validate a quiz request against the configured bounds
pub fn validate_quiz_request(request: &QuizRequest, limits: &QuizConfig) -> Result<(), String> {
    let topic = request.topic.trim();
    if topic.is_empty() {
        return Err("topic cannot be empty".to_string());
    }
    if topic.chars().count() > MAX_TOPIC_CHARS {
        return Err(format!("topic cannot exceed {} characters", MAX_TOPIC_CHARS));
    }

    if let Some(context) = &request.context {
        if context.chars().count() > MAX_CONTEXT_CHARS {
            return Err(format!("context cannot exceed {} characters", MAX_CONTEXT_CHARS));
        }
    }

    if request.question_count < limits.min_questions || request.question_count > limits.max_questions {
        return Err(format!(
            "question_count must be between {} and {}, got {}",
            limits.min_questions, limits.max_questions, request.question_count
        ));
    }

    Ok(())
}
