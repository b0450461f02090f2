//! JWT issuance, verification, and Axum request extractors.
//!
//! user-api issues HS256 tokens on login; every service verifies them
//! locally with the shared `JWT_SECRET`. Tokens travel either as an
//! `Authorization: Bearer <token>` header or as an `Authorization` cookie
//! (the cookie is what browsers get on login).
//!
//! # Usage
//!
//! ```rust,ignore
//! // Require authentication
//! async fn list_hotels(user: AuthUser) -> Result<Json<Vec<Hotel>>, AppError> {
//!     // user.user_id and user.role are verified
//! }
//!
//! // Require the admin role
//! async fn delete_hotel(admin: RequireAdmin) -> Result<StatusCode, AppError> {
//!     // admin.user_id is guaranteed to have role "admin"
//! }
//! ```

use crate::error::AppError;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the cookie carrying the token, matching the header it mirrors.
pub const AUTH_COOKIE: &str = "Authorization";

/// Claims carried by a Stayhub session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: Uuid,
    /// Role assigned at registration ("admin" is privileged).
    pub role: String,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

/// JWT signing/verification configuration shared through application state.
#[derive(Clone)]
pub struct JwtConfig {
    secret: String,
}

impl JwtConfig {
    /// Create a config from the shared secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Issue a signed token for a user.
    ///
    /// # Errors
    ///
    /// Returns an internal error if signing fails.
    pub fn issue(&self, user_id: Uuid, role: &str, ttl: Duration) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_id,
            role: role.to_string(),
            exp: (Utc::now() + ttl).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::internal("Failed to sign token").with_source(e.into()))
    }

    /// Verify a token and return its claims.
    ///
    /// Expiry is validated; any signature or format problem yields 401.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::unauthorized`] if the token is invalid or expired.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| AppError::unauthorized("Invalid or expired token"))
    }
}

/// Build a `Set-Cookie` value storing a session token.
#[must_use]
pub fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!("{AUTH_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}")
}

/// Build a `Set-Cookie` value that clears the session cookie.
#[must_use]
pub fn clear_session_cookie() -> String {
    format!("{AUTH_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Pull a token from the `Authorization: Bearer` header or the
/// `Authorization` cookie, header taking precedence.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        if let Ok(value) = value.to_str() {
            if let Some(token) = value.strip_prefix("Bearer ") {
                if !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }

    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix("Authorization="))
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
}

/// Authenticated user extracted from a verified token.
///
/// Use as a handler parameter to require authentication.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The authenticated user id.
    pub user_id: Uuid,
    /// The role claim from the token.
    pub role: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtConfig: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers)
            .ok_or_else(|| AppError::unauthorized("Missing authentication token"))?;

        let jwt = JwtConfig::from_ref(state);
        let claims = jwt.verify(&token)?;

        Ok(Self {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

/// Authenticated user with the admin role.
///
/// Returns 403 for authenticated non-admin users.
#[derive(Debug, Clone)]
pub struct RequireAdmin {
    /// The authenticated admin user id.
    pub user_id: Uuid,
}

#[async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
    JwtConfig: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        if user.role != "admin" {
            return Err(AppError::forbidden("Admin privileges required"));
        }

        Ok(Self {
            user_id: user.user_id,
        })
    }
}
