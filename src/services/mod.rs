//! Service layer module
//!
//! Contains prompt building, completion parsing, the fallback quiz, usage counters and the generator

pub mod fallback;
pub mod generator;
pub mod parser;
pub mod prompt;
pub mod usage;

pub use fallback::{fallback_quiz, FALLBACK_QUESTION_COUNT};
pub use generator::{validate_quiz_request, QuizGenerator};
pub use parser::parse_quiz;
pub use prompt::build_prompt;
pub use usage::{FallbackBreakdown, UsageCounters, UsageSnapshot};
