use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::repositories;
use crate::schemas::progress::{
    CourseProgressResponse, LessonProgressEntry, LessonProgressResponse,
};
use crate::services::progress::completion_percentage;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/lessons/:lesson_id/complete", post(complete_lesson))
        .route("/courses/:course_id", get(course_progress))
}

async fn complete_lesson(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
) -> Result<Json<LessonProgressResponse>, ApiError> {
    let lesson = repositories::lessons::find_by_id(state.db(), &lesson_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load lesson"))?
        .ok_or_else(|| ApiError::NotFound("Lesson not found".to_string()))?;

    // Enrollment is not a precondition; the rollup update inside the
    // transaction simply matches no row when the user never enrolled.
    let progress = repositories::lesson_progress::complete_lesson(
        state.db(),
        repositories::lesson_progress::CompleteLesson {
            id: &Uuid::new_v4().to_string(),
            user_id: &user.id,
            lesson_id: &lesson.id,
            course_id: &lesson.course_id,
            now: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to record lesson progress"))?;

    Ok(Json(LessonProgressResponse::from_db(progress)))
}

async fn course_progress(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<CourseProgressResponse>, ApiError> {
    let course = repositories::courses::find_by_id(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load course"))?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    let rows = repositories::lesson_progress::course_progress(state.db(), &user.id, &course.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load course progress"))?;

    let total = rows.len() as i64;
    let completed = rows.iter().filter(|row| row.completed).count() as i64;

    Ok(Json(CourseProgressResponse {
        lessons: rows.into_iter().map(LessonProgressEntry::from_db).collect(),
        completed,
        total,
        completion_percentage: completion_percentage(completed, total),
    }))
}
