use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::test_support;

#[tokio::test]
async fn register_returns_token_and_user() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "email": "newuser@example.com",
                "password": "password123",
                "full_name": "New User"
            })),
        ))
        .await
        .expect("register");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::CREATED, "response: {body}");
    assert!(body["access_token"].as_str().is_some_and(|token| !token.is_empty()));
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["user"]["email"], "newuser@example.com");
    assert_eq!(body["user"]["role"], "student");
    assert!(body["user"].get("hashed_password").is_none());
}

#[tokio::test]
async fn register_duplicate_email_conflicts() {
    let ctx = test_support::setup_test_context().await;

    test_support::insert_user(ctx.state.db(), "taken@example.com", "Existing", "password123")
        .await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "email": "taken@example.com",
                "password": "password123",
                "full_name": "Someone Else"
            })),
        ))
        .await
        .expect("register duplicate");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn register_rejects_short_password_and_bad_email() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "email": "short@example.com",
                "password": "short",
                "full_name": "Short Password"
            })),
        ))
        .await
        .expect("register short password");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "email": "not-an-email",
                "password": "password123",
                "full_name": "Bad Email"
            })),
        ))
        .await
        .expect("register bad email");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_rejects_admin_role() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "email": "wannabe@example.com",
                "password": "password123",
                "full_name": "Wannabe Admin",
                "role": "admin"
            })),
        ))
        .await
        .expect("register admin");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_roundtrip_and_me() {
    let ctx = test_support::setup_test_context().await;

    test_support::insert_user(ctx.state.db(), "login@example.com", "Login User", "password123")
        .await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({
                "email": "login@example.com",
                "password": "password123"
            })),
        ))
        .await
        .expect("login");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    let token = body["access_token"].as_str().expect("token").to_string();

    let response = ctx
        .app
        .oneshot(test_support::json_request(Method::GET, "/api/auth/me", Some(&token), None))
        .await
        .expect("me");

    let status = response.status();
    let me = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {me}");
    assert_eq!(me["email"], "login@example.com");
    assert_eq!(me["full_name"], "Login User");
}

#[tokio::test]
async fn login_wrong_password_is_unauthorized() {
    let ctx = test_support::setup_test_context().await;

    test_support::insert_user(ctx.state.db(), "victim@example.com", "Victim", "password123")
        .await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({
                "email": "victim@example.com",
                "password": "wrong-password"
            })),
        ))
        .await
        .expect("login wrong password");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_without_token_is_unauthorized() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(Method::GET, "/api/auth/me", None, None))
        .await
        .expect("me without token");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(axum::http::header::WWW_AUTHENTICATE));
}
