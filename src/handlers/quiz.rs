//! Quiz generation handler

use crate::handlers::AppState;
use crate::models::{Quiz, QuizRequest};
use crate::utils::error::{AppError, AppResult};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;

/// Handle AI quiz generation
///
/// POST /api/v1/quizzes/generate-ai
///
/// Responds 422 for invalid input and counts it as a rejected request.
/// Upstream failures are answered with the fallback quiz, never with an
/// error status.
pub async fn generate_ai_quiz(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> AppResult<Json<Quiz>> {
    let Json(request) = payload.map_err(|rejection| {
        state.generator.record_rejection();
        rejection_to_error(rejection)
    })?;

    debug!(
        "Received quiz request: topic={}, difficulty={}, count={}",
        request.topic, request.difficulty, request.question_count
    );

    let quiz = state.generator.generate(request).await?;
    Ok(Json(quiz))
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(rejection.body_text())
    }
}
