//! Data models module
//!
//! Defines the quiz domain types and the upstream chat completion structures

pub mod openai;
pub mod quiz;

pub use quiz::{Difficulty, Quiz, QuizQuestion, QuizRequest, QuizSource};
