use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::enrollment::{EnrolledCourseResponse, EnrollmentCheckResponse};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_my_enrollments))
        .route("/check/:course_id", get(check_enrollment))
}

async fn list_my_enrollments(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<EnrolledCourseResponse>>, ApiError> {
    let enrollments = repositories::enrollments::list_for_user(state.db(), &user.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list enrollments"))?;

    Ok(Json(enrollments.into_iter().map(EnrolledCourseResponse::from_db).collect()))
}

async fn check_enrollment(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<EnrollmentCheckResponse>, ApiError> {
    let enrollment =
        repositories::enrollments::find_for_user_course(state.db(), &user.id, &course_id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to check enrollment"))?;

    Ok(Json(EnrollmentCheckResponse { enrolled: enrollment.is_some() }))
}

#[cfg(test)]
mod tests;
