//! Completion parser
//!
//! Converts the upstream's plain-text quiz into structured questions.
//!
//! Expected layout (one block per question, blank lines ignored):
//!
//! ```text
//! Question 1: What does `&mut` grant?
//! A. Shared access
//! B. Exclusive access
//! C. Ownership
//! D. Nothing
//! Answer: B
//! Explanation: A mutable reference is exclusive.
//! ```
//!
//! Headers may also be written `1.` / `1)` and markdown bold markers are
//! ignored. Answers may be given as a letter or a 1-based number.

use crate::models::QuizQuestion;
use crate::utils::error::ParseError;
use tracing::warn;

/// Highest option letter recognised (`A`..=`F`)
const MAX_OPTIONS: usize = 6;

#[derive(Debug, Default)]
struct Draft {
    text: String,
    options: Vec<String>,
    answer: Option<usize>,
    explanation: Option<String>,
}

impl Draft {
    fn finish(self, number: usize, points: u32) -> Result<QuizQuestion, ParseError> {
        let text = self.text.trim().to_string();
        if text.is_empty() {
            return Err(ParseError::MissingQuestionText { number });
        }
        if self.options.len() < 2 {
            return Err(ParseError::TooFewOptions {
                number,
                found: self.options.len(),
            });
        }
        let index = self.answer.ok_or(ParseError::MissingAnswer { number })?;
        if index >= self.options.len() {
            return Err(ParseError::AnswerOutOfRange {
                number,
                index,
                options: self.options.len(),
            });
        }

        Ok(QuizQuestion {
            question: text,
            options: self.options,
            correct_answer: index,
            explanation: self
                .explanation
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty()),
            points,
        })
    }
}

/// Parse `text` into exactly `expected` questions worth `points` each
///
/// Surplus questions are dropped; fewer than `expected` is an error.
pub fn parse_quiz(text: &str, expected: usize, points: u32) -> Result<Vec<QuizQuestion>, ParseError> {
    let mut questions = Vec::new();
    let mut current: Option<Draft> = None;

    for raw in text.lines() {
        let line = raw.replace("**", "");
        let line = line.trim().trim_start_matches('#').trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = parse_question_header(line) {
            if let Some(draft) = current.take() {
                questions.push(draft.finish(questions.len() + 1, points)?);
            }
            current = Some(Draft {
                text: rest.to_string(),
                ..Draft::default()
            });
            continue;
        }

        // Preamble before the first question
        let Some(draft) = current.as_mut() else {
            continue;
        };

        if let Some(value) = strip_label(line, &["correct answer", "answer", "correct"]) {
            draft.answer = parse_answer(value);
        } else if let Some(value) = strip_label(line, &["explanation"]) {
            draft.explanation = Some(value.to_string());
        } else if let Some(option) =
            parse_option(line).filter(|_| draft.answer.is_none() && draft.explanation.is_none())
        {
            if draft.options.len() < MAX_OPTIONS {
                draft.options.push(option.to_string());
            }
        } else if let Some(explanation) = draft.explanation.as_mut() {
            explanation.push(' ');
            explanation.push_str(line);
        } else if draft.options.is_empty() {
            // Question text wrapped onto several lines
            if !draft.text.is_empty() {
                draft.text.push(' ');
            }
            draft.text.push_str(line);
        }
    }

    if let Some(draft) = current.take() {
        questions.push(draft.finish(questions.len() + 1, points)?);
    }

    if questions.is_empty() {
        return Err(ParseError::NoQuestions);
    }
    if questions.len() < expected {
        return Err(ParseError::CountMismatch {
            expected,
            found: questions.len(),
        });
    }
    if questions.len() > expected {
        warn!("Upstream returned {} questions, keeping the first {}", questions.len(), expected);
        questions.truncate(expected);
    }

    Ok(questions)
}

/// Case-insensitive prefix strip that respects char boundaries
fn strip_prefix_ignore_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &line[prefix.len()..])
}

/// `Question 3: text`, `Question: text`, `3. text` or `3) text`
fn parse_question_header(line: &str) -> Option<&str> {
    let (rest, labelled) = match strip_prefix_ignore_case(line, "question") {
        Some(rest) => (rest.trim_start(), true),
        None => (line, false),
    };

    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 && !labelled {
        return None;
    }

    let after = &rest[digits..];
    let after = after
        .strip_prefix(':')
        .or_else(|| after.strip_prefix('.'))
        .or_else(|| after.strip_prefix(')'))?;

    Some(after.trim())
}

/// `A. text`, `b) text`
fn parse_option(line: &str) -> Option<&str> {
    let mut chars = line.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if !('A'..='F').contains(&letter) {
        return None;
    }
    match chars.next()? {
        '.' | ')' | ':' => {}
        _ => return None,
    }
    let text = line[2..].trim();
    (!text.is_empty()).then_some(text)
}

/// `Answer: B`, `Correct answer: (b)`, `Answer - 2`
fn strip_label<'a>(line: &'a str, labels: &[&str]) -> Option<&'a str> {
    labels.iter().find_map(|label| {
        strip_prefix_ignore_case(line, label)
            .map(str::trim_start)
            .and_then(|rest| rest.strip_prefix(':').or_else(|| rest.strip_prefix('-')))
            .map(str::trim)
    })
}

/// Zero-based option index from a letter or 1-based number
fn parse_answer(value: &str) -> Option<usize> {
    let mut value = value.trim_start_matches(|c: char| !c.is_ascii_alphanumeric());

    // "Option C", "option (2)"
    if let Some(rest) = strip_prefix_ignore_case(value, "option") {
        if !rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
            value = rest.trim_start_matches(|c: char| !c.is_ascii_alphanumeric());
        }
    }
    let first = value.chars().next()?;

    if first.is_ascii_digit() {
        let digits: String = value.chars().take_while(char::is_ascii_digit).collect();
        let number: usize = digits.parse().ok()?;
        return number.checked_sub(1);
    }

    let letter = first.to_ascii_uppercase();
    if letter.is_ascii_uppercase() {
        // Only single-letter answers, "Answer: Because..." is not an answer
        let next = value.chars().nth(1);
        if next.map_or(true, |c| !c.is_ascii_alphabetic()) {
            return Some((letter as u8 - b'A') as usize);
        }
    }

    None
}
