use serde::{Deserialize, Serialize};

use crate::core::time::format_primitive;
use crate::repositories::courses::{CourseFilter, CourseSort};
use crate::schemas::lesson::LessonResponse;

#[derive(Debug, Deserialize)]
pub(crate) struct CourseCreate {
    pub(crate) title: String,
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) category: Option<String>,
    #[serde(default)]
    pub(crate) price: f64,
    #[serde(default)]
    #[serde(alias = "thumbnailUrl")]
    pub(crate) thumbnail_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CourseListQuery {
    #[serde(default)]
    pub(crate) query: Option<String>,
    #[serde(default)]
    pub(crate) category: Option<String>,
    #[serde(default)]
    #[serde(alias = "sortBy")]
    pub(crate) sort_by: Option<String>,
}

impl CourseListQuery {
    /// Blank query parameters mean "no filter"; an unrecognized sort key
    /// falls back to newest-first rather than erroring.
    pub(crate) fn into_filter(self) -> CourseFilter {
        let sort = match self.sort_by.as_deref() {
            Some("popular") => CourseSort::Popular,
            Some("rating") => CourseSort::Rating,
            Some("price") => CourseSort::Price,
            _ => CourseSort::Newest,
        };
        CourseFilter {
            search: self.query.filter(|value| !value.trim().is_empty()),
            category: self.category.filter(|value| !value.trim().is_empty()),
            sort,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CourseResponse {
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
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

impl CourseResponse {
    pub(crate) fn from_db(course: crate::db::models::Course) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            category: course.category,
            price: course.price,
            instructor_id: course.instructor_id,
            rating: course.rating,
            review_count: course.review_count,
            student_count: course.student_count,
            thumbnail_url: course.thumbnail_url,
            created_at: format_primitive(course.created_at),
            updated_at: format_primitive(course.updated_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CourseDetailResponse {
    #[serde(flatten)]
    pub(crate) course: CourseResponse,
    pub(crate) lessons: Vec<LessonResponse>,
}
