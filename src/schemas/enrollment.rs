use serde::Serialize;

use crate::core::time::format_primitive;
use crate::repositories::enrollments::EnrollmentWithCourse;

#[derive(Debug, Serialize)]
pub(crate) struct EnrollmentResponse {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) course_id: String,
    pub(crate) enrolled_at: String,
    pub(crate) completion_percentage: i32,
    pub(crate) completed_at: Option<String>,
}

impl EnrollmentResponse {
    pub(crate) fn from_db(enrollment: crate::db::models::Enrollment) -> Self {
        Self {
            id: enrollment.id,
            user_id: enrollment.user_id,
            course_id: enrollment.course_id,
            enrolled_at: format_primitive(enrollment.enrolled_at),
            completion_percentage: enrollment.completion_percentage,
            completed_at: enrollment.completed_at.map(format_primitive),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct EnrolledCourseResponse {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) course_title: String,
    pub(crate) course_category: Option<String>,
    pub(crate) course_thumbnail_url: Option<String>,
    pub(crate) enrolled_at: String,
    pub(crate) completion_percentage: i32,
    pub(crate) completed_at: Option<String>,
}

impl EnrolledCourseResponse {
    pub(crate) fn from_db(row: EnrollmentWithCourse) -> Self {
        Self {
            id: row.id,
            course_id: row.course_id,
            course_title: row.course_title,
            course_category: row.course_category,
            course_thumbnail_url: row.course_thumbnail_url,
            enrolled_at: format_primitive(row.enrolled_at),
            completion_percentage: row.completion_percentage,
            completed_at: row.completed_at.map(format_primitive),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct EnrollmentCheckResponse {
    pub(crate) enrolled: bool,
}
