use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::api::validation::{validate_email, validate_password_len};
use crate::core::security;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::models::User;
use crate::db::types::UserRole;
use crate::repositories;
use crate::schemas::auth::TokenResponse;
use crate::schemas::user::{UserCreate, UserLogin, UserResponse};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}

async fn register(
    State(state): State<AppState>,
    Json(payload): Json<UserCreate>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    validate_email(&payload.email)?;
    validate_password_len(&payload.password)?;

    if payload.full_name.trim().is_empty() {
        return Err(ApiError::BadRequest("Name must not be empty".to_string()));
    }
    if payload.role == UserRole::Admin {
        return Err(ApiError::BadRequest("Cannot register with admin role".to_string()));
    }

    let email = payload.email.trim().to_ascii_lowercase();

    let existing = repositories::users::exists_by_email(state.db(), &email)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to check existing user"))?;

    if existing.is_some() {
        return Err(ApiError::Conflict("User with this email already exists".to_string()));
    }

    let hashed_password = security::hash_password(&payload.password)
        .map_err(|e| ApiError::internal(e, "Failed to hash password"))?;

    let now = primitive_now_utc();

    let user = repositories::users::create(
        state.db(),
        repositories::users::CreateUser {
            id: &Uuid::new_v4().to_string(),
            email: &email,
            hashed_password,
            full_name: payload.full_name.trim(),
            role: payload.role,
            bio: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        },
    )
    .await
    .map_err(|e| {
        // Two concurrent registrations can both pass the existence check;
        // the unique index settles it.
        if is_unique_violation(&e) {
            ApiError::Conflict("User with this email already exists".to_string())
        } else {
            ApiError::internal(e, "Failed to create user")
        }
    })?;

    let token = security::create_access_token(&user.id, &user.email, state.settings(), None)
        .map_err(|e| ApiError::internal(e, "Failed to create access token"))?;

    let response = TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
        user: UserResponse::from_db(user),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<UserLogin>,
) -> Result<Json<TokenResponse>, ApiError> {
    let email = payload.email.trim().to_ascii_lowercase();
    let user = fetch_user_by_email(&state, &email).await?;

    let verified = security::verify_password(&payload.password, &user.hashed_password)
        .map_err(|_| ApiError::Unauthorized("Incorrect email or password"))?;

    if !verified {
        return Err(ApiError::Unauthorized("Incorrect email or password"));
    }

    let token = security::create_access_token(&user.id, &user.email, state.settings(), None)
        .map_err(|e| ApiError::internal(e, "Failed to create access token"))?;

    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
        user: UserResponse::from_db(user),
    }))
}

async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from_db(user))
}

async fn fetch_user_by_email(state: &AppState, email: &str) -> Result<User, ApiError> {
    repositories::users::find_by_email(state.db(), email)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load user"))?
        .ok_or(ApiError::Unauthorized("Incorrect email or password"))
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.code().as_deref() == Some("23505"),
        _ => false,
    }
}

#[cfg(test)]
mod tests;
