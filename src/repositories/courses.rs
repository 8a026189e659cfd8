use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::db::models::Course;

const COURSE_COLUMNS: &str = "\
    id, title, description, category, price, instructor_id, rating, review_count, \
    student_count, thumbnail_url, created_at, updated_at";

/// Recognized catalog filters. Anything not expressible here is not a
/// supported filter, which keeps the SQL assembly enumerable.
#[derive(Debug, Default)]
pub(crate) struct CourseFilter {
    pub(crate) search: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) sort: CourseSort,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum CourseSort {
    #[default]
    Newest,
    Popular,
    Rating,
    Price,
}

impl CourseSort {
    fn order_clause(self) -> &'static str {
        match self {
            CourseSort::Newest => " ORDER BY created_at DESC",
            CourseSort::Popular => " ORDER BY student_count DESC",
            CourseSort::Rating => " ORDER BY rating DESC",
            CourseSort::Price => " ORDER BY price ASC",
        }
    }
}

pub(crate) async fn list(
    pool: &PgPool,
    filter: &CourseFilter,
) -> Result<Vec<Course>, sqlx::Error> {
    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new(format!("SELECT {COURSE_COLUMNS} FROM courses"));

    let mut prefix = " WHERE ";

    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        builder
            .push(prefix)
            .push("(title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(")");
        prefix = " AND ";
    }

    if let Some(category) = &filter.category {
        builder.push(prefix).push("category = ").push_bind(category.clone());
    }

    builder.push(filter.sort.order_clause());

    builder.build_query_as::<Course>().fetch_all(pool).await
}

pub(crate) struct CreateCourse<'a> {
    pub(crate) id: &'a str,
    pub(crate) title: &'a str,
    pub(crate) description: &'a str,
    pub(crate) category: Option<&'a str>,
    pub(crate) price: f64,
    pub(crate) instructor_id: &'a str,
    pub(crate) thumbnail_url: Option<&'a str>,
    pub(crate) created_at: time::PrimitiveDateTime,
    pub(crate) updated_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(pool: &PgPool, params: CreateCourse<'_>) -> Result<Course, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "INSERT INTO courses (
            id, title, description, category, price, instructor_id,
            rating, review_count, student_count, thumbnail_url, created_at, updated_at
        ) VALUES ($1,$2,$3,$4,$5,$6,0,0,0,$7,$8,$9)
        RETURNING {COURSE_COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.title)
    .bind(params.description)
    .bind(params.category)
    .bind(params.price)
    .bind(params.instructor_id)
    .bind(params.thumbnail_url)
    .bind(params.created_at)
    .bind(params.updated_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_by_id(
    pool: &PgPool,
    course_id: &str,
) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"))
        .bind(course_id)
        .fetch_optional(pool)
        .await
}
