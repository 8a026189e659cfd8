use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::lesson::LessonResponse;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/:lesson_id", get(get_lesson))
}

async fn get_lesson(
    CurrentUser(_user): CurrentUser,
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
) -> Result<Json<LessonResponse>, ApiError> {
    let lesson = repositories::lessons::find_by_id(state.db(), &lesson_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load lesson"))?
        .ok_or_else(|| ApiError::NotFound("Lesson not found".to_string()))?;

    Ok(Json(LessonResponse::from_db(lesson)))
}
