use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::repositories;
use crate::test_support;

#[tokio::test]
async fn any_authenticated_user_can_create_course() {
    let ctx = test_support::setup_test_context().await;

    let student =
        test_support::insert_user(ctx.state.db(), "creator@example.com", "Creator", "password123")
            .await;
    let token = test_support::bearer_token(&student, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/courses",
            Some(&token),
            Some(json!({
                "title": "Intro to Rust",
                "description": "Ownership, borrowing and lifetimes",
                "category": "Programming",
                "price": 29.99
            })),
        ))
        .await
        .expect("create course");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::CREATED, "response: {body}");
    assert_eq!(body["title"], "Intro to Rust");
    assert_eq!(body["instructor_id"], student.id.as_str());
    assert_eq!(body["student_count"], 0);
}

#[tokio::test]
async fn create_course_requires_auth_and_valid_payload() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/courses",
            None,
            Some(json!({
                "title": "No Auth",
                "description": "Should fail"
            })),
        ))
        .await
        .expect("create without auth");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let user =
        test_support::insert_user(ctx.state.db(), "poster@example.com", "Poster", "password123")
            .await;
    let token = test_support::bearer_token(&user, ctx.state.settings());

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/courses",
            Some(&token),
            Some(json!({
                "title": "  ",
                "description": "Blank title"
            })),
        ))
        .await
        .expect("create blank title");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_courses_filters_and_sorts() {
    let ctx = test_support::setup_test_context().await;

    let instructor = test_support::insert_instructor(
        ctx.state.db(),
        "teach@example.com",
        "Teacher",
        "password123",
    )
    .await;

    let rust = test_support::insert_course(ctx.state.db(), "Rust Systems", &instructor.id).await;
    let react = test_support::insert_course(ctx.state.db(), "React Basics", &instructor.id).await;
    let cooking = test_support::insert_course(ctx.state.db(), "Italian Cooking", &instructor.id)
        .await;

    sqlx::query(
        "UPDATE courses SET category = 'Cooking', price = 9.99, rating = 4.9, \
         student_count = 50, created_at = '2026-01-01 00:00:00' WHERE id = $1",
    )
    .bind(&cooking.id)
    .execute(ctx.state.db())
    .await
    .expect("update cooking");
    sqlx::query(
        "UPDATE courses SET price = 59.99, rating = 4.2, student_count = 900, \
         created_at = '2026-02-01 00:00:00' WHERE id = $1",
    )
    .bind(&rust.id)
    .execute(ctx.state.db())
    .await
    .expect("update rust");
    sqlx::query(
        "UPDATE courses SET price = 39.99, rating = 4.7, student_count = 300, \
         created_at = '2026-03-01 00:00:00' WHERE id = $1",
    )
    .bind(&react.id)
    .execute(ctx.state.db())
    .await
    .expect("update react");

    let titles = |body: &serde_json::Value| -> Vec<String> {
        body.as_array()
            .expect("array")
            .iter()
            .map(|course| course["title"].as_str().expect("title").to_string())
            .collect()
    };

    // Default sort is newest first
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/courses", None, None))
        .await
        .expect("list default");
    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(titles(&body), vec!["React Basics", "Rust Systems", "Italian Cooking"]);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/courses?sortBy=popular",
            None,
            None,
        ))
        .await
        .expect("list popular");
    let body = test_support::read_json(response).await;
    assert_eq!(titles(&body), vec!["Rust Systems", "Italian Cooking", "React Basics"]);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/courses?sortBy=rating",
            None,
            None,
        ))
        .await
        .expect("list rating");
    let body = test_support::read_json(response).await;
    assert_eq!(titles(&body), vec!["Italian Cooking", "React Basics", "Rust Systems"]);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/courses?sortBy=price", None, None))
        .await
        .expect("list price");
    let body = test_support::read_json(response).await;
    assert_eq!(titles(&body), vec!["Italian Cooking", "React Basics", "Rust Systems"]);

    // Search matches title or description, case-insensitively
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/courses?query=rust", None, None))
        .await
        .expect("list query");
    let body = test_support::read_json(response).await;
    assert_eq!(titles(&body), vec!["Rust Systems"]);

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/courses?category=Cooking",
            None,
            None,
        ))
        .await
        .expect("list category");
    let body = test_support::read_json(response).await;
    assert_eq!(titles(&body), vec!["Italian Cooking"]);
}

#[tokio::test]
async fn get_course_includes_ordered_lessons() {
    let ctx = test_support::setup_test_context().await;

    let instructor = test_support::insert_instructor(
        ctx.state.db(),
        "detail@example.com",
        "Teacher",
        "password123",
    )
    .await;
    let course = test_support::insert_course(ctx.state.db(), "Detail Course", &instructor.id)
        .await;
    test_support::insert_lesson(ctx.state.db(), &course.id, "Second", 2).await;
    test_support::insert_lesson(ctx.state.db(), &course.id, "First", 1).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/courses/{}", course.id),
            None,
            None,
        ))
        .await
        .expect("get course");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["title"], "Detail Course");
    let lessons = body["lessons"].as_array().expect("lessons");
    assert_eq!(lessons.len(), 2);
    assert_eq!(lessons[0]["title"], "First");
    assert_eq!(lessons[1]["title"], "Second");

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/courses/00000000-0000-0000-0000-000000000000",
            None,
            None,
        ))
        .await
        .expect("get missing course");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn enroll_twice_conflicts_and_counts_once() {
    let ctx = test_support::setup_test_context().await;

    let instructor = test_support::insert_instructor(
        ctx.state.db(),
        "enrollteach@example.com",
        "Teacher",
        "password123",
    )
    .await;
    let course = test_support::insert_course(ctx.state.db(), "Enroll Course", &instructor.id)
        .await;
    let student =
        test_support::insert_user(ctx.state.db(), "enrollee@example.com", "Student", "password123")
            .await;
    let token = test_support::bearer_token(&student, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            &format!("/api/courses/{}/enroll", course.id),
            Some(&token),
            None,
        ))
        .await
        .expect("enroll");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::CREATED, "response: {body}");
    assert_eq!(body["course_id"], course.id.as_str());
    assert_eq!(body["completion_percentage"], 0);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            &format!("/api/courses/{}/enroll", course.id),
            Some(&token),
            None,
        ))
        .await
        .expect("enroll again");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let refreshed = repositories::courses::find_by_id(ctx.state.db(), &course.id)
        .await
        .expect("find course")
        .expect("course exists");
    assert_eq!(refreshed.student_count, 1);

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM enrollments WHERE user_id = $1 AND course_id = $2",
    )
    .bind(&student.id)
    .bind(&course.id)
    .fetch_one(ctx.state.db())
    .await
    .expect("count enrollments");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn enroll_in_missing_course_is_not_found() {
    let ctx = test_support::setup_test_context().await;

    let student =
        test_support::insert_user(ctx.state.db(), "lost@example.com", "Student", "password123")
            .await;
    let token = test_support::bearer_token(&student, ctx.state.settings());

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/courses/00000000-0000-0000-0000-000000000000/enroll",
            Some(&token),
            None,
        ))
        .await
        .expect("enroll missing course");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn only_instructor_can_add_lessons() {
    let ctx = test_support::setup_test_context().await;

    let instructor = test_support::insert_instructor(
        ctx.state.db(),
        "owner@example.com",
        "Owner",
        "password123",
    )
    .await;
    let course = test_support::insert_course(ctx.state.db(), "Lesson Course", &instructor.id)
        .await;

    let outsider =
        test_support::insert_user(ctx.state.db(), "outsider@example.com", "Outsider", "password123")
            .await;
    let outsider_token = test_support::bearer_token(&outsider, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            &format!("/api/courses/{}/lessons", course.id),
            Some(&outsider_token),
            Some(json!({"title": "Sneaky Lesson", "position": 1})),
        ))
        .await
        .expect("create lesson as outsider");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let owner_token = test_support::bearer_token(&instructor, ctx.state.settings());
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            &format!("/api/courses/{}/lessons", course.id),
            Some(&owner_token),
            Some(json!({
                "title": "Real Lesson",
                "content": "Lesson body",
                "duration_minutes": 30,
                "position": 1
            })),
        ))
        .await
        .expect("create lesson as owner");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::CREATED, "response: {body}");
    assert_eq!(body["title"], "Real Lesson");

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/courses/{}/lessons", course.id),
            None,
            None,
        ))
        .await
        .expect("list lessons");
    let body = test_support::read_json(response).await;
    assert_eq!(body.as_array().expect("lessons").len(), 1);
}
