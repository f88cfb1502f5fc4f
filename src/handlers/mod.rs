//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod health;
pub mod quiz;
pub mod stats;

use crate::config::{SecurityConfig, Settings};
use crate::middleware::logging::request_logging_middleware;
use crate::services::QuizGenerator;
use anyhow::{Context, Result};
use axum::{http::HeaderValue, middleware, routing::get, routing::post, Router};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub generator: QuizGenerator,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(settings: Settings, generator: QuizGenerator) -> Self {
        Self {
            settings,
            generator,
            started_at: Instant::now(),
        }
    }

    /// Seconds since the state was created
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Create application router
pub async fn create_router(settings: Settings) -> Result<Router> {
    let generator = QuizGenerator::from_settings(&settings)?;
    build_router(settings, generator)
}

/// Create application router around an existing generator
pub fn build_router(settings: Settings, generator: QuizGenerator) -> Result<Router> {
    let app_state = Arc::new(AppState::new(settings.clone(), generator));

    // Create middleware stack
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(RequestBodyLimitLayer::new(settings.request.max_request_size))
        .layer(TimeoutLayer::new(settings.request_timeout()));

    // Create routes
    let mut router = Router::new()
        .route("/", get(health::service_info))
        .route("/health", get(health::health_check))
        .route("/api/v1/quizzes/generate-ai", post(quiz::generate_ai_quiz))
        .route("/api/v1/stats/usage", get(stats::usage_stats))
        .with_state(app_state)
        .layer(middleware_stack);

    if settings.security.cors_enabled {
        router = router.layer(build_cors_layer(&settings.security)?);
        info!("CORS enabled for origins: {}", settings.security.allowed_origins.join(", "));
    }

    Ok(router)
}

/// Build the CORS layer from the configured origin list
///
/// An explicit origin list allows credentials. `*` allows any origin without
/// credentials.
pub fn build_cors_layer(security: &SecurityConfig) -> Result<CorsLayer> {
    if security.allowed_origins.iter().any(|origin| origin == "*") {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins = security
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_rejects_invalid_origin() {
        let security = SecurityConfig {
            allowed_origins: vec!["http://localhost:3000".to_string(), "bad\norigin".to_string()],
            cors_enabled: true,
        };
        assert!(build_cors_layer(&security).is_err());
    }

    #[test]
    fn test_cors_layer_wildcard() {
        let security = SecurityConfig {
            allowed_origins: vec!["*".to_string()],
            cors_enabled: true,
        };
        assert!(build_cors_layer(&security).is_ok());
    }
}
