//! Fallback quiz
//!
//! Deterministic questions served whenever AI generation is unavailable

use crate::models::{Quiz, QuizQuestion, QuizRequest, QuizSource};

/// Number of questions in every fallback quiz
pub const FALLBACK_QUESTION_COUNT: usize = 3;

struct Template {
    question: &'static str,
    options: [&'static str; 4],
    correct_answer: usize,
    explanation: &'static str,
}

/// `{topic}` is replaced with the request topic
const TEMPLATES: [Template; FALLBACK_QUESTION_COUNT] = [
    Template {
        question: "Which statement about {topic} is most accurate?",
        options: [
            "It is a well-documented subject with its own history",
            "It was invented last week",
            "It exists only in fiction",
            "Nobody has ever studied it",
        ],
        correct_answer: 0,
        explanation: "{topic} has a documented background that can be studied from reliable sources.",
    },
    Template {
        question: "What is the best first step when learning about {topic}?",
        options: [
            "Memorize unrelated trivia",
            "Skip straight to the most advanced material",
            "Start with the core fundamentals",
            "Avoid every reference source",
        ],
        correct_answer: 2,
        explanation: "Understanding the fundamentals of {topic} makes the advanced material easier to follow.",
    },
    Template {
        question: "Which source is generally most reliable for studying {topic}?",
        options: [
            "An unverified rumor",
            "Reputable reference works and subject experts",
            "Randomly generated text",
            "A single anonymous comment",
        ],
        correct_answer: 1,
        explanation: "Reputable references and experts are the most dependable way to learn about {topic}.",
    },
];

/// Build the fallback quiz for a request
///
/// The same request always yields the same questions.
pub fn fallback_quiz(request: &QuizRequest) -> Quiz {
    let topic = request.topic.trim();
    let points = request.difficulty.points();

    let questions = TEMPLATES
        .iter()
        .map(|template| QuizQuestion {
            question: template.question.replace("{topic}", topic),
            options: template.options.iter().map(|o| o.to_string()).collect(),
            correct_answer: template.correct_answer,
            explanation: Some(template.explanation.replace("{topic}", topic)),
            points,
        })
        .collect();

    Quiz::new(request, QuizSource::Fallback, questions)
}
