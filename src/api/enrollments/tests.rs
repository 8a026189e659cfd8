use axum::http::{Method, StatusCode};
use tower::ServiceExt;

use crate::test_support;

#[tokio::test]
async fn lists_own_enrollments_with_course_details() {
    let ctx = test_support::setup_test_context().await;

    let instructor = test_support::insert_instructor(
        ctx.state.db(),
        "listteach@example.com",
        "Teacher",
        "password123",
    )
    .await;
    let enrolled_course =
        test_support::insert_course(ctx.state.db(), "Enrolled Course", &instructor.id).await;
    test_support::insert_course(ctx.state.db(), "Other Course", &instructor.id).await;

    let student =
        test_support::insert_user(ctx.state.db(), "lister@example.com", "Student", "password123")
            .await;
    test_support::enroll_user(ctx.state.db(), &student.id, &enrolled_course.id).await;

    let token = test_support::bearer_token(&student, ctx.state.settings());
    let response = ctx
        .app
        .oneshot(test_support::json_request(Method::GET, "/api/enrollments", Some(&token), None))
        .await
        .expect("list enrollments");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    let rows = body.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["course_id"], enrolled_course.id.as_str());
    assert_eq!(rows[0]["course_title"], "Enrolled Course");
    assert_eq!(rows[0]["completion_percentage"], 0);
}

#[tokio::test]
async fn check_reports_enrollment_status() {
    let ctx = test_support::setup_test_context().await;

    let instructor = test_support::insert_instructor(
        ctx.state.db(),
        "checkteach@example.com",
        "Teacher",
        "password123",
    )
    .await;
    let course = test_support::insert_course(ctx.state.db(), "Check Course", &instructor.id)
        .await;
    let student =
        test_support::insert_user(ctx.state.db(), "checker@example.com", "Student", "password123")
            .await;
    let token = test_support::bearer_token(&student, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/enrollments/check/{}", course.id),
            Some(&token),
            None,
        ))
        .await
        .expect("check before enroll");
    let body = test_support::read_json(response).await;
    assert_eq!(body["enrolled"], false);

    test_support::enroll_user(ctx.state.db(), &student.id, &course.id).await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/enrollments/check/{}", course.id),
            Some(&token),
            None,
        ))
        .await
        .expect("check after enroll");
    let body = test_support::read_json(response).await;
    assert_eq!(body["enrolled"], true);
}

#[tokio::test]
async fn enrollments_require_auth() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(Method::GET, "/api/enrollments", None, None))
        .await
        .expect("list without token");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
