use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use time::PrimitiveDateTime;

use crate::db::types::{QuestionType, UserRole};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct User {
    pub(crate) id: String,
    pub(crate) email: String,
    pub(crate) hashed_password: String,
    pub(crate) full_name: String,
    pub(crate) role: UserRole,
    pub(crate) bio: Option<String>,
    pub(crate) avatar_url: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Course {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) category: Option<String>,
    pub(crate) price: f64,
    pub(crate) instructor_id: String,
    pub(crate) rating: f64,
    pub(crate) review_count: i32,
    pub(crate) student_count: i32,
    pub(crate) thumbnail_url: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Lesson {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) video_url: Option<String>,
    pub(crate) duration_minutes: Option<i32>,
    pub(crate) position: i32,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Enrollment {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) course_id: String,
    pub(crate) enrolled_at: PrimitiveDateTime,
    pub(crate) completion_percentage: i32,
    pub(crate) completed_at: Option<PrimitiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct LessonProgress {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) lesson_id: String,
    pub(crate) completed: bool,
    pub(crate) progress_percentage: i32,
    pub(crate) completed_at: Option<PrimitiveDateTime>,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Quiz {
    pub(crate) id: String,
    pub(crate) lesson_id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) passing_score: i32,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct QuizQuestion {
    pub(crate) id: String,
    pub(crate) quiz_id: String,
    pub(crate) question: String,
    pub(crate) question_type: QuestionType,
    pub(crate) options: Json<Vec<String>>,
    pub(crate) correct_answer: String,
    pub(crate) position: i32,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct QuizAttempt {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) quiz_id: String,
    pub(crate) score: i32,
    pub(crate) passed: bool,
    pub(crate) answers: Json<serde_json::Value>,
    pub(crate) attempted_at: PrimitiveDateTime,
}
