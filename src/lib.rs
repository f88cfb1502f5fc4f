//! Quiz Gateway Library
//!
//! Generates multiple-choice quizzes through an OpenAI-compatible API and
//! falls back to a deterministic quiz whenever the upstream is unavailable

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod providers;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::Settings;
pub use handlers::{build_router, create_router, AppState};
pub use models::{Difficulty, Quiz, QuizQuestion, QuizRequest, QuizSource};
pub use providers::{Completion, OpenAIProvider, Provider};
pub use services::{QuizGenerator, UsageCounters, UsageSnapshot};
pub use utils::error::{AppError, AppResult, GenerationError, ParseError, UpstreamError};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
