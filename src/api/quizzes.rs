use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::core::state::AppState;
use crate::core::time::{format_primitive, primitive_now_utc};
use crate::db::models::Quiz;
use crate::repositories;
use crate::schemas::quiz::{
    QuizAttemptResponse, QuizResponse, QuizResultResponse, QuizSubmitRequest,
};
use crate::services::quiz_scoring;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/:quiz_id", get(get_quiz))
        .route("/:quiz_id/submit", post(submit_quiz))
        .route("/:quiz_id/submission", get(latest_submission))
}

async fn get_quiz(
    CurrentUser(_user): CurrentUser,
    State(state): State<AppState>,
    Path(quiz_id): Path<String>,
) -> Result<Json<QuizResponse>, ApiError> {
    let quiz = fetch_quiz(&state, &quiz_id).await?;

    let questions = repositories::quizzes::list_questions(state.db(), &quiz.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load quiz questions"))?;

    Ok(Json(QuizResponse::from_db(quiz, questions)))
}

async fn submit_quiz(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(quiz_id): Path<String>,
    Json(payload): Json<QuizSubmitRequest>,
) -> Result<(StatusCode, Json<QuizResultResponse>), ApiError> {
    let quiz = fetch_quiz(&state, &quiz_id).await?;

    let questions = repositories::quizzes::list_questions(state.db(), &quiz.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load quiz questions"))?;

    let result = quiz_scoring::grade(&questions, &payload.answers, quiz.passing_score);

    let answers = serde_json::to_value(&payload.answers)
        .map_err(|e| ApiError::internal(e, "Failed to serialize answers"))?;

    let attempt = repositories::quizzes::create_attempt(
        state.db(),
        repositories::quizzes::CreateAttempt {
            id: &Uuid::new_v4().to_string(),
            user_id: &user.id,
            quiz_id: &quiz.id,
            score: result.score,
            passed: result.passed,
            answers,
            attempted_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to record quiz attempt"))?;

    let response = QuizResultResponse {
        attempt_id: attempt.id,
        quiz_id: attempt.quiz_id,
        score: result.score,
        passed: result.passed,
        correct: result.correct,
        total: result.total,
        attempted_at: format_primitive(attempt.attempted_at),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

async fn latest_submission(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(quiz_id): Path<String>,
) -> Result<Json<QuizAttemptResponse>, ApiError> {
    let quiz = fetch_quiz(&state, &quiz_id).await?;

    let attempt = repositories::quizzes::find_latest_attempt(state.db(), &user.id, &quiz.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load quiz attempt"))?
        .ok_or_else(|| ApiError::NotFound("No submission found for this quiz".to_string()))?;

    Ok(Json(QuizAttemptResponse::from_db(attempt)))
}

async fn fetch_quiz(state: &AppState, quiz_id: &str) -> Result<Quiz, ApiError> {
    repositories::quizzes::find_by_id(state.db(), quiz_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load quiz"))?
        .ok_or_else(|| ApiError::NotFound("Quiz not found".to_string()))
}
