//! Configuration module unit tests

use quiz_gateway::config::Settings;
use std::collections::HashMap;
use tokio_test::{assert_err, assert_ok};

/// Full set of valid variables
fn valid_vars() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("OPENAI_API_KEY", "sk-test-key-12345678901234567890"),
        ("OPENAI_BASE_URL", "https://api.openai.com/v1"),
        ("OPENAI_MODEL", "gpt-4o-mini"),
        ("OPENAI_MAX_TOKENS", "1200"),
        ("OPENAI_TEMPERATURE", "0.2"),
        ("OPENAI_TIMEOUT", "15"),
        ("SERVER_HOST", "127.0.0.1"),
        ("SERVER_PORT", "8080"),
        ("QUIZ_MIN_QUESTIONS", "2"),
        ("QUIZ_MAX_QUESTIONS", "10"),
        ("REQUEST_TIMEOUT", "30"),
        ("MAX_REQUEST_SIZE", "1048576"),
        ("RUST_LOG", "info"),
        ("LOG_FORMAT", "json"),
        ("ALLOWED_ORIGINS", "https://app.example.com, https://admin.example.com"),
        ("CORS_ENABLED", "true"),
    ])
}

fn with(key: &'static str, value: &'static str) -> HashMap<&'static str, &'static str> {
    let mut vars = valid_vars();
    vars.insert(key, value);
    vars
}

#[test]
fn test_settings_creation_with_valid_env() {
    let settings = assert_ok!(Settings::from_map(&valid_vars()));

    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.openai.api_key.as_deref(), Some("sk-test-key-12345678901234567890"));
    assert_eq!(settings.openai.model, "gpt-4o-mini");
    assert_eq!(settings.openai.max_tokens, 1200);
    assert_eq!(settings.openai.timeout, 15);
    assert_eq!(settings.quiz.min_questions, 2);
    assert_eq!(settings.quiz.max_questions, 10);
    assert_eq!(settings.request.max_request_size, 1048576);
    assert_eq!(settings.logging.format, "json");
    assert_eq!(
        settings.security.allowed_origins,
        vec!["https://app.example.com", "https://admin.example.com"]
    );
    assert!(settings.ai_configured());
}

#[test]
fn test_missing_api_key_does_not_fail_startup() {
    let mut vars = valid_vars();
    vars.remove("OPENAI_API_KEY");

    let settings = assert_ok!(Settings::from_map(&vars));
    assert!(settings.openai.api_key.is_none());
    assert!(!settings.ai_configured());
}

#[test]
fn test_empty_api_key_disables_ai() {
    let settings = assert_ok!(Settings::from_map(&with("OPENAI_API_KEY", "")));
    assert!(!settings.ai_configured());
}

#[test]
fn test_settings_validation_invalid_port() {
    let error = assert_err!(Settings::from_map(&with("SERVER_PORT", "0")));
    assert!(error.to_string().contains("Port number cannot be 0"));

    assert_err!(Settings::from_map(&with("SERVER_PORT", "not-a-port")));
}

#[test]
fn test_settings_validation_invalid_base_url() {
    let error = assert_err!(Settings::from_map(&with("OPENAI_BASE_URL", "ftp://example.com")));
    assert!(error.to_string().contains("base URL"));
}

#[test]
fn test_settings_validation_temperature_range() {
    assert_ok!(Settings::from_map(&with("OPENAI_TEMPERATURE", "0")));
    assert_ok!(Settings::from_map(&with("OPENAI_TEMPERATURE", "2.0")));
    assert_err!(Settings::from_map(&with("OPENAI_TEMPERATURE", "2.5")));
    assert_err!(Settings::from_map(&with("OPENAI_TEMPERATURE", "-0.1")));
    assert_err!(Settings::from_map(&with("OPENAI_TEMPERATURE", "warm")));
}

#[test]
fn test_settings_validation_max_tokens() {
    assert_err!(Settings::from_map(&with("OPENAI_MAX_TOKENS", "0")));
}

#[test]
fn test_upstream_timeout_must_be_shorter_than_request_timeout() {
    let error = assert_err!(Settings::from_map(&with("OPENAI_TIMEOUT", "30")));
    assert!(error.to_string().contains("must be shorter"));

    assert_err!(Settings::from_map(&with("REQUEST_TIMEOUT", "0")));
}

#[test]
fn test_question_bounds_validation() {
    assert_err!(Settings::from_map(&with("QUIZ_MIN_QUESTIONS", "0")));

    let error = assert_err!(Settings::from_map(&with("QUIZ_MIN_QUESTIONS", "11")));
    assert!(error.to_string().contains("cannot exceed"));
}

#[test]
fn test_log_level_accepts_filter_directives() {
    let settings = assert_ok!(Settings::from_map(&with(
        "RUST_LOG",
        "quiz_gateway=debug,tower_http=info"
    )));
    assert_eq!(settings.logging.level, "quiz_gateway=debug,tower_http=info");

    assert_ok!(Settings::from_map(&with("RUST_LOG", "warn")));
}

#[test]
fn test_settings_validation_invalid_log_settings() {
    let error = assert_err!(Settings::from_map(&with("RUST_LOG", "quiz_gateway=loud")));
    assert!(error.to_string().contains("Invalid log level"));

    let error = assert_err!(Settings::from_map(&with("LOG_FORMAT", "xml")));
    assert!(error.to_string().contains("Invalid log format"));
}

#[test]
fn test_cors_requires_origins_when_enabled() {
    assert_err!(Settings::from_map(&with("ALLOWED_ORIGINS", " , ")));

    let mut vars = with("ALLOWED_ORIGINS", "");
    vars.insert("CORS_ENABLED", "false");
    assert_ok!(Settings::from_map(&vars));
}

#[test]
fn test_timeouts_as_durations() {
    let settings = assert_ok!(Settings::from_map(&valid_vars()));

    assert_eq!(settings.upstream_timeout().as_secs(), 15);
    assert_eq!(settings.request_timeout().as_secs(), 30);
}
