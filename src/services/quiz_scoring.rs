use std::collections::HashMap;

use crate::db::models::QuizQuestion;
use crate::db::types::QuestionType;
use crate::services::progress::completion_percentage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct QuizScore {
    pub(crate) correct: i32,
    pub(crate) total: i32,
    pub(crate) score: i32,
    pub(crate) passed: bool,
}

/// Grades a submission against the stored answer key. Answers are keyed
/// by question id; a missing or malformed answer scores as incorrect.
/// The overall score is the percentage of correct answers, and an empty
/// quiz scores 0 and cannot be passed.
pub(crate) fn grade(
    questions: &[QuizQuestion],
    answers: &HashMap<String, serde_json::Value>,
    passing_score: i32,
) -> QuizScore {
    let total = questions.len() as i32;
    let correct = questions
        .iter()
        .filter(|question| {
            answers
                .get(&question.id)
                .and_then(normalize_answer)
                .is_some_and(|given| answer_matches(question, &given))
        })
        .count() as i32;

    let score = completion_percentage(i64::from(correct), i64::from(total));
    let passed = total > 0 && score >= passing_score;

    QuizScore { correct, total, score, passed }
}

fn answer_matches(question: &QuizQuestion, given: &str) -> bool {
    let expected = question.correct_answer.trim();
    match question.question_type {
        // True/false answers arrive as booleans or free-form text, so
        // the comparison ignores case.
        QuestionType::TrueFalse => given.eq_ignore_ascii_case(expected),
        QuestionType::MultipleChoice | QuestionType::Essay => given == expected,
    }
}

/// Folds JSON answer values into comparable text. Strings are trimmed,
/// booleans and numbers use their canonical rendering, and anything
/// structured is rejected.
fn normalize_answer(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(text) => Some(text.trim().to_string()),
        serde_json::Value::Bool(flag) => Some(flag.to_string()),
        serde_json::Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
