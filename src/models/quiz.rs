//! Quiz data models
//!
//! Request and response structures of the quiz generation endpoint

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Quiz difficulty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Points awarded per correctly answered question
    pub fn points(self) -> u32 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 15,
            Difficulty::Hard => 20,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the questions of a quiz came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizSource {
    #[serde(rename = "ai-generated")]
    AiGenerated,
    #[serde(rename = "fallback")]
    Fallback,
}

/// Quiz generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizRequest {
    /// Subject of the quiz
    pub topic: String,
    /// Difficulty (defaults to medium)
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Number of questions to generate
    #[serde(default = "default_question_count")]
    pub question_count: u32,
    /// Background information about the topic (optional)
    #[serde(default, alias = "description", skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

fn default_question_count() -> u32 {
    1
}

impl QuizRequest {
    pub fn new(topic: impl Into<String>, difficulty: Difficulty, question_count: u32) -> Self {
        Self {
            topic: topic.into(),
            difficulty,
            question_count,
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Question text
    pub question: String,
    /// Answer options in display order
    pub options: Vec<String>,
    /// Zero-based index of the correct option
    pub correct_answer: usize,
    /// Why the answer is correct (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// Points awarded for a correct answer
    pub points: u32,
}

impl QuizQuestion {
    /// Whether `correct_answer` points at an existing option
    pub fn is_well_formed(&self) -> bool {
        !self.question.is_empty() && self.correct_answer < self.options.len()
    }
}

/// A generated quiz
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: Uuid,
    pub topic: String,
    pub difficulty: Difficulty,
    pub source: QuizSource,
    /// Upstream model, only set for AI-generated quizzes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub questions: Vec<QuizQuestion>,
    pub total_points: u32,
    pub generated_at: DateTime<Utc>,
}

impl Quiz {
    pub fn new(request: &QuizRequest, source: QuizSource, questions: Vec<QuizQuestion>) -> Self {
        let total_points = questions.iter().map(|q| q.points).sum();
        Self {
            id: Uuid::new_v4(),
            topic: request.topic.trim().to_string(),
            difficulty: request.difficulty,
            source,
            model: None,
            questions,
            total_points,
            generated_at: Utc::now(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn is_fallback(&self) -> bool {
        self.source == QuizSource::Fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_points() {
        assert_eq!(Difficulty::Easy.points(), 10);
        assert_eq!(Difficulty::Medium.points(), 15);
        assert_eq!(Difficulty::Hard.points(), 20);
    }

    #[test]
    fn test_request_defaults() {
        let request: QuizRequest = serde_json::from_str(r#"{"topic": "Rust"}"#).unwrap();
        assert_eq!(request.difficulty, Difficulty::Medium);
        assert_eq!(request.question_count, 1);
        assert!(request.context.is_none());
    }

    #[test]
    fn test_description_alias() {
        let request: QuizRequest =
            serde_json::from_str(r#"{"topic": "Kamakura", "description": "Old capital"}"#).unwrap();
        assert_eq!(request.context.as_deref(), Some("Old capital"));
    }

    #[test]
    fn test_total_points() {
        let request = QuizRequest::new("Rust", Difficulty::Hard, 2);
        let question = QuizQuestion {
            question: "Q".to_string(),
            options: vec!["a".to_string(), "b".to_string()],
            correct_answer: 1,
            explanation: None,
            points: 20,
        };
        let quiz = Quiz::new(&request, QuizSource::AiGenerated, vec![question.clone(), question]);
        assert_eq!(quiz.total_points, 40);
        assert!(!quiz.is_fallback());
    }
}
