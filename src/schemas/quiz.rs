use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::time::format_primitive;
use crate::db::models::{Quiz, QuizAttempt, QuizQuestion};
use crate::db::types::QuestionType;

/// Quiz payload handed to takers. Question rows carry the answer key in
/// the database, so this shape deliberately has no correct_answer field.
#[derive(Debug, Serialize)]
pub(crate) struct QuizResponse {
    pub(crate) id: String,
    pub(crate) lesson_id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) passing_score: i32,
    pub(crate) questions: Vec<QuizQuestionResponse>,
}

impl QuizResponse {
    pub(crate) fn from_db(quiz: Quiz, questions: Vec<QuizQuestion>) -> Self {
        Self {
            id: quiz.id,
            lesson_id: quiz.lesson_id,
            title: quiz.title,
            description: quiz.description,
            passing_score: quiz.passing_score,
            questions: questions.into_iter().map(QuizQuestionResponse::from_db).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct QuizQuestionResponse {
    pub(crate) id: String,
    pub(crate) question: String,
    pub(crate) question_type: QuestionType,
    pub(crate) options: Vec<String>,
    pub(crate) position: i32,
}

impl QuizQuestionResponse {
    pub(crate) fn from_db(question: QuizQuestion) -> Self {
        Self {
            id: question.id,
            question: question.question,
            question_type: question.question_type,
            options: question.options.0,
            position: question.position,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuizSubmitRequest {
    pub(crate) answers: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuizResultResponse {
    pub(crate) attempt_id: String,
    pub(crate) quiz_id: String,
    pub(crate) score: i32,
    pub(crate) passed: bool,
    pub(crate) correct: i32,
    pub(crate) total: i32,
    pub(crate) attempted_at: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuizAttemptResponse {
    pub(crate) id: String,
    pub(crate) quiz_id: String,
    pub(crate) score: i32,
    pub(crate) passed: bool,
    pub(crate) answers: serde_json::Value,
    pub(crate) attempted_at: String,
}

impl QuizAttemptResponse {
    pub(crate) fn from_db(attempt: QuizAttempt) -> Self {
        Self {
            id: attempt.id,
            quiz_id: attempt.quiz_id,
            score: attempt.score,
            passed: attempt.passed,
            answers: attempt.answers.0,
            attempted_at: format_primitive(attempt.attempted_at),
        }
    }
}
