//! Health check handlers
//!
//! Liveness and service information endpoints. Neither touches the upstream.

use crate::handlers::AppState;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Service name reported by the info endpoints
pub const SERVICE_NAME: &str = "quiz-gateway";

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Version information
    pub version: String,
    /// Timestamp
    pub timestamp: String,
    /// Whether an upstream API key is configured
    pub ai_configured: bool,
    /// Uptime in seconds
    pub uptime_seconds: u64,
}

/// Root endpoint response
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub service: String,
    pub version: String,
    pub status: String,
    pub ai_configured: bool,
}

/// Basic health check
///
/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing health check");

    Json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        ai_configured: state.generator.ai_configured(),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// GET /
pub async fn service_info(State(state): State<Arc<AppState>>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Quiz gateway is running".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "ok".to_string(),
        ai_configured: state.generator.ai_configured(),
    })
}
