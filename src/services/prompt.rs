//! Prompt construction
//!
//! Turns a quiz request into the instruction text sent upstream

use crate::models::QuizRequest;
use std::fmt::Write;

/// Number of answer options requested per question
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Build the user prompt for a validated request
///
/// The layout requested here is the one `parser::parse_quiz` understands.
pub fn build_prompt(request: &QuizRequest) -> String {
    let count = request.question_count;
    let noun = if count == 1 { "question" } else { "questions" };

    let mut prompt = format!(
        "Create {} multiple-choice quiz {} about \"{}\" at {} difficulty.\n",
        count,
        noun,
        request.topic.trim(),
        request.difficulty
    );

    if let Some(context) = request.context.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        let _ = writeln!(prompt, "\nBackground information: {}", context);
    }

    let _ = write!(
        prompt,
        "\nEach question must have exactly {} options and exactly one correct answer.\n\
         Reply using exactly this format for every question and nothing else:\n\n\
         Question 1: <question text>\n\
         A. <option>\n\
         B. <option>\n\
         C. <option>\n\
         D. <option>\n\
         Answer: <letter of the correct option>\n\
         Explanation: <one sentence explaining the answer>",
        OPTIONS_PER_QUESTION
    );

    prompt
}
