use serde::{Deserialize, Serialize};

use crate::core::time::format_primitive;

#[derive(Debug, Deserialize)]
pub(crate) struct LessonCreate {
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) content: Option<String>,
    #[serde(default)]
    #[serde(alias = "videoUrl")]
    pub(crate) video_url: Option<String>,
    #[serde(default)]
    #[serde(alias = "durationMinutes", alias = "duration")]
    pub(crate) duration_minutes: Option<i32>,
    pub(crate) position: i32,
}

#[derive(Debug, Serialize)]
pub(crate) struct LessonResponse {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) video_url: Option<String>,
    pub(crate) duration_minutes: Option<i32>,
    pub(crate) position: i32,
    pub(crate) created_at: String,
}

impl LessonResponse {
    pub(crate) fn from_db(lesson: crate::db::models::Lesson) -> Self {
        Self {
            id: lesson.id,
            course_id: lesson.course_id,
            title: lesson.title,
            description: lesson.description,
            content: lesson.content,
            video_url: lesson.video_url,
            duration_minutes: lesson.duration_minutes,
            position: lesson.position,
            created_at: format_primitive(lesson.created_at),
        }
    }
}
