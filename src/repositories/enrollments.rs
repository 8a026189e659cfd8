use sqlx::{FromRow, PgPool};
use time::PrimitiveDateTime;

use crate::db::models::Enrollment;

const ENROLLMENT_COLUMNS: &str = "\
    id, user_id, course_id, enrolled_at, completion_percentage, completed_at";

pub(crate) struct CreateEnrollment<'a> {
    pub(crate) id: &'a str,
    pub(crate) user_id: &'a str,
    pub(crate) course_id: &'a str,
    pub(crate) enrolled_at: PrimitiveDateTime,
}

/// Inserts an enrollment and bumps the course student counter in one
/// transaction. Returns `None` when the user is already enrolled; the
/// counter is untouched in that case.
pub(crate) async fn enroll(
    pool: &PgPool,
    params: CreateEnrollment<'_>,
) -> Result<Option<Enrollment>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let inserted = sqlx::query_as::<_, Enrollment>(&format!(
        "INSERT INTO enrollments (id, user_id, course_id, enrolled_at, completion_percentage)
        VALUES ($1,$2,$3,$4,0)
        ON CONFLICT (user_id, course_id) DO NOTHING
        RETURNING {ENROLLMENT_COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.user_id)
    .bind(params.course_id)
    .bind(params.enrolled_at)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(enrollment) = inserted else {
        tx.rollback().await?;
        return Ok(None);
    };

    sqlx::query("UPDATE courses SET student_count = student_count + 1, updated_at = $1 WHERE id = $2")
        .bind(params.enrolled_at)
        .bind(params.course_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(Some(enrollment))
}

pub(crate) async fn find_for_user_course(
    pool: &PgPool,
    user_id: &str,
    course_id: &str,
) -> Result<Option<Enrollment>, sqlx::Error> {
    sqlx::query_as::<_, Enrollment>(&format!(
        "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE user_id = $1 AND course_id = $2",
    ))
    .bind(user_id)
    .bind(course_id)
    .fetch_optional(pool)
    .await
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct EnrollmentWithCourse {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) enrolled_at: PrimitiveDateTime,
    pub(crate) completion_percentage: i32,
    pub(crate) completed_at: Option<PrimitiveDateTime>,
    pub(crate) course_title: String,
    pub(crate) course_category: Option<String>,
    pub(crate) course_thumbnail_url: Option<String>,
}

pub(crate) async fn list_for_user(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<EnrollmentWithCourse>, sqlx::Error> {
    sqlx::query_as::<_, EnrollmentWithCourse>(
        "SELECT e.id, e.course_id, e.enrolled_at, e.completion_percentage, e.completed_at,
            c.title AS course_title, c.category AS course_category,
            c.thumbnail_url AS course_thumbnail_url
        FROM enrollments e
        JOIN courses c ON c.id = e.course_id
        WHERE e.user_id = $1
        ORDER BY e.enrolled_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
