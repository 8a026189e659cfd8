use sqlx::PgPool;

use crate::db::models::Lesson;

const LESSON_COLUMNS: &str = "\
    id, course_id, title, description, content, video_url, duration_minutes, position, \
    created_at, updated_at";

pub(crate) async fn list_for_course(
    pool: &PgPool,
    course_id: &str,
) -> Result<Vec<Lesson>, sqlx::Error> {
    sqlx::query_as::<_, Lesson>(&format!(
        "SELECT {LESSON_COLUMNS} FROM lessons WHERE course_id = $1 ORDER BY position",
    ))
    .bind(course_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn find_by_id(
    pool: &PgPool,
    lesson_id: &str,
) -> Result<Option<Lesson>, sqlx::Error> {
    sqlx::query_as::<_, Lesson>(&format!("SELECT {LESSON_COLUMNS} FROM lessons WHERE id = $1"))
        .bind(lesson_id)
        .fetch_optional(pool)
        .await
}

pub(crate) struct CreateLesson<'a> {
    pub(crate) id: &'a str,
    pub(crate) course_id: &'a str,
    pub(crate) title: &'a str,
    pub(crate) description: Option<&'a str>,
    pub(crate) content: Option<&'a str>,
    pub(crate) video_url: Option<&'a str>,
    pub(crate) duration_minutes: Option<i32>,
    pub(crate) position: i32,
    pub(crate) created_at: time::PrimitiveDateTime,
    pub(crate) updated_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(pool: &PgPool, params: CreateLesson<'_>) -> Result<Lesson, sqlx::Error> {
    sqlx::query_as::<_, Lesson>(&format!(
        "INSERT INTO lessons (
            id, course_id, title, description, content, video_url, duration_minutes,
            position, created_at, updated_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10)
        RETURNING {LESSON_COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.course_id)
    .bind(params.title)
    .bind(params.description)
    .bind(params.content)
    .bind(params.video_url)
    .bind(params.duration_minutes)
    .bind(params.position)
    .bind(params.created_at)
    .bind(params.updated_at)
    .fetch_one(pool)
    .await
}
