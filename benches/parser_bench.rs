//! Prompt building and completion parsing benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quiz_gateway::models::{Difficulty, QuizRequest};
use quiz_gateway::services::{build_prompt, parse_quiz};

/// Completion text with `count` questions in the expected layout
fn completion_text(count: usize) -> String {
    (1..=count)
        .map(|n| {
            format!(
                "**Question {n}:** What is item {n}?\nA. first\nB. second\nC. third\nD. fourth\nAnswer: C\nExplanation: Item {n} is always the third.\n"
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_build_prompt(c: &mut Criterion) {
    let request = QuizRequest::new("Kamakura history", Difficulty::Hard, 10)
        .with_context("The Kamakura shogunate ruled Japan from 1185 to 1333.");

    c.bench_function("build_prompt", |b| b.iter(|| build_prompt(black_box(&request))));
}

fn bench_parse_quiz(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_quiz");

    for count in [1usize, 5, 20] {
        let text = completion_text(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &text, |b, text| {
            b.iter(|| parse_quiz(black_box(text), count, 15))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build_prompt, bench_parse_quiz);
criterion_main!(benches);
