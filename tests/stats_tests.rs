//! Usage statistics endpoint tests

use async_trait::async_trait;
use axum_test::TestServer;
use quiz_gateway::config::Settings;
use quiz_gateway::handlers::build_router;
use quiz_gateway::{Completion, Provider, QuizGenerator, UpstreamError, UsageCounters};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

/// Answers every topic except ones starting with "fail"
struct TopicProvider;

#[async_trait]
impl Provider for TopicProvider {
    fn name(&self) -> &str {
        "topic"
    }

    fn model(&self) -> &str {
        "topic-model"
    }

    async fn complete(&self, prompt: &str) -> Result<Completion, UpstreamError> {
        if prompt.contains("\"fail") {
            return Err(UpstreamError::Status {
                status: 503,
                message: "overloaded".to_string(),
            });
        }
        Ok(Completion {
            text: "Question 1: Pick one\nA. yes\nB. no\nAnswer: A".to_string(),
            model: "topic-model".to_string(),
            total_tokens: Some(10),
        })
    }
}

fn test_settings() -> Settings {
    Settings::from_map(&HashMap::from([
        ("OPENAI_MODEL", "gpt-4o-mini"),
        ("OPENAI_MAX_TOKENS", "500"),
        ("CORS_ENABLED", "false"),
    ]))
    .unwrap()
}

fn server_with(provider: Option<Arc<dyn Provider>>) -> TestServer {
    let settings = test_settings();
    let generator = QuizGenerator::new(
        provider,
        Arc::new(UsageCounters::new()),
        settings.quiz.clone(),
        Duration::from_secs(2),
    );
    let app = build_router(settings, generator).unwrap();
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_initial_stats_are_zero() {
    let server = server_with(None);

    let response = server.get("/api/v1/stats/usage").await;
    response.assert_status_ok();

    let stats = response.json::<Value>();
    assert_eq!(stats["total_requests"], 0);
    assert_eq!(stats["ai_generated"], 0);
    assert_eq!(stats["fallbacks"], 0);
    assert_eq!(stats["rejected_requests"], 0);
    assert_eq!(stats["model"], "gpt-4o-mini");
    assert_eq!(stats["max_tokens"], 500);
    assert_eq!(stats["api_configured"], false);
    assert_eq!(stats["estimated_total_cost"], 0.0);
}

#[tokio::test]
async fn test_stats_track_outcomes() {
    let server = server_with(Some(Arc::new(TopicProvider) as Arc<dyn Provider>));

    for topic in ["Rust", "Tokio", "fail fast"] {
        server
            .post("/api/v1/quizzes/generate-ai")
            .json(&json!({ "topic": topic }))
            .await
            .assert_status_ok();
    }
    server
        .post("/api/v1/quizzes/generate-ai")
        .json(&json!({ "topic": "" }))
        .await
        .assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);

    let stats = server.get("/api/v1/stats/usage").await.json::<Value>();
    assert_eq!(stats["total_requests"], 3);
    assert_eq!(stats["ai_generated"], 2);
    assert_eq!(stats["fallbacks"], 1);
    assert_eq!(stats["fallback_breakdown"]["upstream_error"], 1);
    assert_eq!(stats["rejected_requests"], 1);
    assert_eq!(stats["total_tokens"], 20);
    assert_eq!(stats["api_configured"], true);
}

#[tokio::test]
async fn test_concurrent_requests_are_all_counted() {
    let server = server_with(Some(Arc::new(TopicProvider) as Arc<dyn Provider>));

    let ok = |topic: &'static str| {
        server
            .post("/api/v1/quizzes/generate-ai")
            .json(&json!({ "topic": topic, "difficulty": "easy" }))
            .into_future()
    };

    let (a, b, c, d, e, f) = tokio::join!(
        ok("Rust"),
        ok("fail one"),
        ok("Axum"),
        ok("fail two"),
        ok("Serde"),
        ok("Tower"),
    );
    for response in [a, b, c, d, e, f] {
        response.assert_status_ok();
        let quiz = response.json::<Value>();
        assert!(quiz["questions"].as_array().is_some_and(|q| !q.is_empty()));
    }

    let stats = server.get("/api/v1/stats/usage").await.json::<Value>();
    assert_eq!(stats["total_requests"], 6);
    assert_eq!(stats["ai_generated"], 4);
    assert_eq!(stats["fallbacks"], 2);
}

#[tokio::test]
async fn test_health_reports_ai_configuration() {
    let server = server_with(None);

    let health = server.get("/health").await.json::<Value>();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["service"], "quiz-gateway");
    assert_eq!(health["ai_configured"], false);

    let server = server_with(Some(Arc::new(TopicProvider) as Arc<dyn Provider>));
    let health = server.get("/health").await.json::<Value>();
    assert_eq!(health["ai_configured"], true);
}
