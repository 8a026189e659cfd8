use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::guards::{require_course_instructor, CurrentUser};
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::repositories;
use crate::schemas::course::{
    CourseCreate, CourseDetailResponse, CourseListQuery, CourseResponse,
};
use crate::schemas::enrollment::EnrollmentResponse;
use crate::schemas::lesson::{LessonCreate, LessonResponse};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route("/:course_id", get(get_course))
        .route("/:course_id/enroll", post(enroll))
        .route("/:course_id/lessons", get(list_lessons).post(create_lesson))
}

async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<CourseListQuery>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let filter = query.into_filter();
    let courses = repositories::courses::list(state.db(), &filter)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list courses"))?;

    Ok(Json(courses.into_iter().map(CourseResponse::from_db).collect()))
}

async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<CourseDetailResponse>, ApiError> {
    let course = repositories::courses::find_by_id(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load course"))?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    let lessons = repositories::lessons::list_for_course(state.db(), &course.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load lessons"))?;

    Ok(Json(CourseDetailResponse {
        course: CourseResponse::from_db(course),
        lessons: lessons.into_iter().map(LessonResponse::from_db).collect(),
    }))
}

async fn create_course(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(payload): Json<CourseCreate>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Course title must not be empty".to_string()));
    }
    if payload.description.trim().is_empty() {
        return Err(ApiError::BadRequest("Course description must not be empty".to_string()));
    }
    if !payload.price.is_finite() || payload.price < 0.0 {
        return Err(ApiError::BadRequest("Course price must not be negative".to_string()));
    }

    let now = primitive_now_utc();
    let course = repositories::courses::create(
        state.db(),
        repositories::courses::CreateCourse {
            id: &Uuid::new_v4().to_string(),
            title: payload.title.trim(),
            description: payload.description.trim(),
            category: payload.category.as_deref(),
            price: payload.price,
            instructor_id: &user.id,
            thumbnail_url: payload.thumbnail_url.as_deref(),
            created_at: now,
            updated_at: now,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create course"))?;

    Ok((StatusCode::CREATED, Json(CourseResponse::from_db(course))))
}

async fn enroll(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), ApiError> {
    let course = repositories::courses::find_by_id(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load course"))?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    let enrollment = repositories::enrollments::enroll(
        state.db(),
        repositories::enrollments::CreateEnrollment {
            id: &Uuid::new_v4().to_string(),
            user_id: &user.id,
            course_id: &course.id,
            enrolled_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to enroll in course"))?;

    let Some(enrollment) = enrollment else {
        return Err(ApiError::Conflict("Already enrolled in this course".to_string()));
    };

    Ok((StatusCode::CREATED, Json(EnrollmentResponse::from_db(enrollment))))
}

async fn list_lessons(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<Vec<LessonResponse>>, ApiError> {
    let course = repositories::courses::find_by_id(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load course"))?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    let lessons = repositories::lessons::list_for_course(state.db(), &course.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load lessons"))?;

    Ok(Json(lessons.into_iter().map(LessonResponse::from_db).collect()))
}

async fn create_lesson(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    Json(payload): Json<LessonCreate>,
) -> Result<(StatusCode, Json<LessonResponse>), ApiError> {
    let course = require_course_instructor(&state, &user, &course_id).await?;

    if payload.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Lesson title must not be empty".to_string()));
    }
    if payload.position < 0 {
        return Err(ApiError::BadRequest("Lesson position must not be negative".to_string()));
    }

    let now = primitive_now_utc();
    let lesson = repositories::lessons::create(
        state.db(),
        repositories::lessons::CreateLesson {
            id: &Uuid::new_v4().to_string(),
            course_id: &course.id,
            title: payload.title.trim(),
            description: payload.description.as_deref(),
            content: payload.content.as_deref(),
            video_url: payload.video_url.as_deref(),
            duration_minutes: payload.duration_minutes,
            position: payload.position,
            created_at: now,
            updated_at: now,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create lesson"))?;

    Ok((StatusCode::CREATED, Json(LessonResponse::from_db(lesson))))
}

#[cfg(test)]
mod tests;
