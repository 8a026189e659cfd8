use serde::Serialize;

use crate::core::time::format_primitive;
use crate::repositories::lesson_progress::CourseLessonProgress;

#[derive(Debug, Serialize)]
pub(crate) struct LessonProgressResponse {
    pub(crate) id: String,
    pub(crate) lesson_id: String,
    pub(crate) completed: bool,
    pub(crate) progress_percentage: i32,
    pub(crate) completed_at: Option<String>,
}

impl LessonProgressResponse {
    pub(crate) fn from_db(progress: crate::db::models::LessonProgress) -> Self {
        Self {
            id: progress.id,
            lesson_id: progress.lesson_id,
            completed: progress.completed,
            progress_percentage: progress.progress_percentage,
            completed_at: progress.completed_at.map(format_primitive),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LessonProgressEntry {
    pub(crate) lesson_id: String,
    pub(crate) title: String,
    pub(crate) position: i32,
    pub(crate) completed: bool,
    pub(crate) completed_at: Option<String>,
}

impl LessonProgressEntry {
    pub(crate) fn from_db(row: CourseLessonProgress) -> Self {
        Self {
            lesson_id: row.lesson_id,
            title: row.lesson_title,
            position: row.position,
            completed: row.completed,
            completed_at: row.completed_at.map(format_primitive),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CourseProgressResponse {
    pub(crate) lessons: Vec<LessonProgressEntry>,
    pub(crate) completed: i64,
    pub(crate) total: i64,
    #[serde(rename = "completionPercentage")]
    pub(crate) completion_percentage: i32,
}
