use sqlx::PgPool;
use time::PrimitiveDateTime;

use crate::db::models::{Quiz, QuizAttempt, QuizQuestion};
use crate::db::types::QuestionType;

const QUIZ_COLUMNS: &str = "id, lesson_id, title, description, passing_score, created_at";

const QUESTION_COLUMNS: &str = "\
    id, quiz_id, question, question_type, options, correct_answer, position, created_at";

const ATTEMPT_COLUMNS: &str = "id, user_id, quiz_id, score, passed, answers, attempted_at";

pub(crate) async fn find_by_id(pool: &PgPool, quiz_id: &str) -> Result<Option<Quiz>, sqlx::Error> {
    sqlx::query_as::<_, Quiz>(&format!("SELECT {QUIZ_COLUMNS} FROM quizzes WHERE id = $1"))
        .bind(quiz_id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn list_questions(
    pool: &PgPool,
    quiz_id: &str,
) -> Result<Vec<QuizQuestion>, sqlx::Error> {
    sqlx::query_as::<_, QuizQuestion>(&format!(
        "SELECT {QUESTION_COLUMNS} FROM quiz_questions WHERE quiz_id = $1 ORDER BY position",
    ))
    .bind(quiz_id)
    .fetch_all(pool)
    .await
}

pub(crate) struct CreateQuiz<'a> {
    pub(crate) id: &'a str,
    pub(crate) lesson_id: &'a str,
    pub(crate) title: &'a str,
    pub(crate) description: Option<&'a str>,
    pub(crate) passing_score: i32,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) async fn create(pool: &PgPool, params: CreateQuiz<'_>) -> Result<Quiz, sqlx::Error> {
    sqlx::query_as::<_, Quiz>(&format!(
        "INSERT INTO quizzes (id, lesson_id, title, description, passing_score, created_at)
        VALUES ($1,$2,$3,$4,$5,$6)
        RETURNING {QUIZ_COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.lesson_id)
    .bind(params.title)
    .bind(params.description)
    .bind(params.passing_score)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) struct CreateQuestion<'a> {
    pub(crate) id: &'a str,
    pub(crate) quiz_id: &'a str,
    pub(crate) question: &'a str,
    pub(crate) question_type: QuestionType,
    pub(crate) options: Vec<String>,
    pub(crate) correct_answer: &'a str,
    pub(crate) position: i32,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) async fn create_question(
    pool: &PgPool,
    params: CreateQuestion<'_>,
) -> Result<QuizQuestion, sqlx::Error> {
    sqlx::query_as::<_, QuizQuestion>(&format!(
        "INSERT INTO quiz_questions (
            id, quiz_id, question, question_type, options, correct_answer, position, created_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
        RETURNING {QUESTION_COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.quiz_id)
    .bind(params.question)
    .bind(params.question_type)
    .bind(sqlx::types::Json(params.options))
    .bind(params.correct_answer)
    .bind(params.position)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) struct CreateAttempt<'a> {
    pub(crate) id: &'a str,
    pub(crate) user_id: &'a str,
    pub(crate) quiz_id: &'a str,
    pub(crate) score: i32,
    pub(crate) passed: bool,
    pub(crate) answers: serde_json::Value,
    pub(crate) attempted_at: PrimitiveDateTime,
}

pub(crate) async fn create_attempt(
    pool: &PgPool,
    params: CreateAttempt<'_>,
) -> Result<QuizAttempt, sqlx::Error> {
    sqlx::query_as::<_, QuizAttempt>(&format!(
        "INSERT INTO quiz_attempts (id, user_id, quiz_id, score, passed, answers, attempted_at)
        VALUES ($1,$2,$3,$4,$5,$6,$7)
        RETURNING {ATTEMPT_COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.user_id)
    .bind(params.quiz_id)
    .bind(params.score)
    .bind(params.passed)
    .bind(sqlx::types::Json(params.answers))
    .bind(params.attempted_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_latest_attempt(
    pool: &PgPool,
    user_id: &str,
    quiz_id: &str,
) -> Result<Option<QuizAttempt>, sqlx::Error> {
    sqlx::query_as::<_, QuizAttempt>(&format!(
        "SELECT {ATTEMPT_COLUMNS} FROM quiz_attempts
        WHERE user_id = $1 AND quiz_id = $2
        ORDER BY attempted_at DESC
        LIMIT 1",
    ))
    .bind(user_id)
    .bind(quiz_id)
    .fetch_optional(pool)
    .await
}
