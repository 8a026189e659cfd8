use sqlx::{FromRow, PgPool};
use time::PrimitiveDateTime;

use crate::db::models::LessonProgress;
use crate::services::progress::completion_percentage;

const PROGRESS_COLUMNS: &str = "\
    id, user_id, lesson_id, completed, progress_percentage, completed_at, created_at, updated_at";

pub(crate) struct CompleteLesson<'a> {
    pub(crate) id: &'a str,
    pub(crate) user_id: &'a str,
    pub(crate) lesson_id: &'a str,
    pub(crate) course_id: &'a str,
    pub(crate) now: PrimitiveDateTime,
}

/// Marks a lesson complete and refreshes the enrollment rollup in the
/// same transaction. Replaying the call leaves every row unchanged:
/// the upsert keeps the original completed_at and the recomputed
/// percentage matches the stored one.
pub(crate) async fn complete_lesson(
    pool: &PgPool,
    params: CompleteLesson<'_>,
) -> Result<LessonProgress, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let progress = sqlx::query_as::<_, LessonProgress>(&format!(
        "INSERT INTO lesson_progress (
            id, user_id, lesson_id, completed, progress_percentage, completed_at,
            created_at, updated_at
        ) VALUES ($1,$2,$3,TRUE,100,$4,$4,$4)
        ON CONFLICT (user_id, lesson_id) DO UPDATE SET
            completed = TRUE,
            progress_percentage = 100,
            completed_at = COALESCE(lesson_progress.completed_at, EXCLUDED.completed_at),
            updated_at = EXCLUDED.updated_at
        RETURNING {PROGRESS_COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.user_id)
    .bind(params.lesson_id)
    .bind(params.now)
    .fetch_one(&mut *tx)
    .await?;

    let (completed, total) = sqlx::query_as::<_, (i64, i64)>(
        "SELECT COUNT(*) FILTER (WHERE lp.completed), COUNT(*)
        FROM lessons l
        LEFT JOIN lesson_progress lp ON lp.lesson_id = l.id AND lp.user_id = $1
        WHERE l.course_id = $2",
    )
    .bind(params.user_id)
    .bind(params.course_id)
    .fetch_one(&mut *tx)
    .await?;

    let percentage = completion_percentage(completed, total);

    sqlx::query(
        "UPDATE enrollments SET
            completion_percentage = $1,
            completed_at = CASE
                WHEN $1 = 100 THEN COALESCE(completed_at, $2)
                ELSE NULL
            END
        WHERE user_id = $3 AND course_id = $4",
    )
    .bind(percentage)
    .bind(params.now)
    .bind(params.user_id)
    .bind(params.course_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(progress)
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct CourseLessonProgress {
    pub(crate) lesson_id: String,
    pub(crate) lesson_title: String,
    pub(crate) position: i32,
    pub(crate) completed: bool,
    pub(crate) completed_at: Option<PrimitiveDateTime>,
}

/// One row per lesson in the course, in lesson order, with the user's
/// progress joined in. Lessons never started come back as not completed.
pub(crate) async fn course_progress(
    pool: &PgPool,
    user_id: &str,
    course_id: &str,
) -> Result<Vec<CourseLessonProgress>, sqlx::Error> {
    sqlx::query_as::<_, CourseLessonProgress>(
        "SELECT l.id AS lesson_id, l.title AS lesson_title, l.position,
            COALESCE(lp.completed, FALSE) AS completed, lp.completed_at
        FROM lessons l
        LEFT JOIN lesson_progress lp ON lp.lesson_id = l.id AND lp.user_id = $1
        WHERE l.course_id = $2
        ORDER BY l.position",
    )
    .bind(user_id)
    .bind(course_id)
    .fetch_all(pool)
    .await
}
