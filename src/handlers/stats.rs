//! Usage statistics handler

use crate::handlers::AppState;
use crate::services::UsageSnapshot;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Rough upstream cost of one AI-generated quiz, in USD
pub const ESTIMATED_COST_PER_QUIZ_USD: f64 = 0.001;

/// Usage statistics response
#[derive(Debug, Serialize, Deserialize)]
pub struct UsageStatsResponse {
    /// Request outcome counters
    #[serde(flatten)]
    pub usage: UsageSnapshot,
    /// Upstream model identifier
    pub model: String,
    /// Max output tokens per request
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Whether an upstream API key is configured
    pub api_configured: bool,
    pub estimated_cost_per_quiz: f64,
    pub estimated_total_cost: f64,
    pub uptime_seconds: u64,
}

/// GET /api/v1/stats/usage
pub async fn usage_stats(State(state): State<Arc<AppState>>) -> Json<UsageStatsResponse> {
    let usage = state.generator.usage();
    let openai = &state.settings.openai;

    Json(UsageStatsResponse {
        usage,
        model: openai.model.clone(),
        max_tokens: openai.max_tokens,
        temperature: openai.temperature,
        api_configured: state.generator.ai_configured(),
        estimated_cost_per_quiz: ESTIMATED_COST_PER_QUIZ_USD,
        estimated_total_cost: usage.ai_generated as f64 * ESTIMATED_COST_PER_QUIZ_USD,
        uptime_seconds: state.uptime_seconds(),
    })
}
