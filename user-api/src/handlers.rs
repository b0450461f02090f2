//! HTTP handlers for registration, login, and token introspection.

use crate::models::{
    ExistsResponse, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
    RegisterResponse, User, ValidateResponse,
};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::AppendHeaders,
    Json,
};
use chrono::Utc;
use stayhub_core::{auth, validate, AppError, AuthUser};
use uuid::Uuid;

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 8;

/// Login failures share one message so the response does not reveal
/// whether the email is registered.
const LOGIN_FAILED: &str = "Invalid email or password";

/// `POST /users/register`
///
/// # Errors
///
/// Returns 422 for an invalid email or short password, 409 if the email
/// is already registered.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    if !validate::is_valid_email(&req.email) {
        return Err(AppError::validation("Invalid email address"));
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    if state.users.email_exists(&req.email).await? {
        return Err(AppError::conflict("Email already exists"));
    }

    let password_hash = hash_password(req.password).await?;

    let user = User {
        id: Uuid::new_v4(),
        email: req.email,
        password_hash,
        role: req.role.unwrap_or_else(|| "user".to_string()),
        created_at: Utc::now(),
    };

    let created = state.users.create(&user).await?;
    tracing::info!(user_id = %created.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: created.id,
            message: "User registered".to_string(),
        }),
    ))
}

/// `POST /users/login`
///
/// On success the token is returned in the body and mirrored into an
/// `Authorization` cookie for browser clients.
///
/// # Errors
///
/// Returns 401 with a single shared message for both an unknown email
/// and a wrong password.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<
    (
        AppendHeaders<[(header::HeaderName, String); 1]>,
        Json<LoginResponse>,
    ),
    AppError,
> {
    let user = state
        .users
        .get_by_email(&req.email)
        .await?
        .ok_or_else(|| AppError::unauthorized(LOGIN_FAILED))?;

    let hash = user.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(&req.password, &hash))
        .await
        .map_err(|e| AppError::internal("Password check failed").with_source(e.into()))?
        .map_err(|e| AppError::internal("Password check failed").with_source(e.into()))?;

    if !verified {
        return Err(AppError::unauthorized(LOGIN_FAILED));
    }

    let token = state.jwt.issue(user.id, &user.role, state.token_ttl)?;
    let cookie = auth::session_cookie(&token, state.token_ttl.num_seconds());
    tracing::info!(user_id = %user.id, "User logged in");

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(LoginResponse { token, user }),
    ))
}

/// `POST /users/logout`
///
/// Clears the session cookie. The token itself stays valid until expiry.
pub async fn logout() -> (
    AppendHeaders<[(header::HeaderName, String); 1]>,
    Json<MessageResponse>,
) {
    (
        AppendHeaders([(header::SET_COOKIE, auth::clear_session_cookie())]),
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    )
}

/// `GET /users/me`
///
/// # Errors
///
/// Returns 404 if the token's user no longer exists.
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<User>, AppError> {
    let found = state
        .users
        .get_by_id(user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User", user.user_id))?;

    Ok(Json(found))
}

/// `GET /users/validate`
///
/// Echoes the verified claims, letting other services or clients check
/// a token without sharing the secret.
pub async fn validate_token(user: AuthUser) -> Json<ValidateResponse> {
    Json(ValidateResponse {
        user_id: user.user_id,
        role: user.role,
    })
}

/// `GET /users/:id/exists`
///
/// Unauthenticated existence probe used by reservation-api.
///
/// # Errors
///
/// Returns 404 when the user does not exist so probes can branch on
/// status alone.
pub async fn exists(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExistsResponse>, AppError> {
    if state.users.exists(id).await? {
        Ok(Json(ExistsResponse { exists: true }))
    } else {
        Err(AppError::not_found("User", id))
    }
}

/// `GET /health`
pub async fn health() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "ok".to_string(),
    })
}

async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| AppError::internal("Password hashing failed").with_source(e.into()))?
        .map_err(|e| AppError::internal("Password hashing failed").with_source(e.into()))
}
