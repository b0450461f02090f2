//! User model and request/response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user.
///
/// The password hash never leaves this service: it is skipped during
/// serialization so it cannot leak through any response body.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// User id.
    pub id: Uuid,
    /// Login email, unique.
    pub email: String,
    /// bcrypt hash of the password.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role string; "admin" is privileged.
    pub role: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /users/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
    /// Optional role; defaults to "user".
    pub role: Option<String>,
}

/// Request body for `POST /users/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Response body for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Signed JWT, also set as an `Authorization` cookie.
    pub token: String,
    /// The authenticated user (without password hash).
    pub user: User,
}

/// Response body for a successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// The new user's id.
    pub id: Uuid,
    /// Confirmation message.
    pub message: String,
}

/// Response body echoing verified token claims.
#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    /// The authenticated user id.
    pub user_id: Uuid,
    /// The role claim.
    pub role: String,
}

/// Response body for existence probes.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExistsResponse {
    /// Whether the record exists.
    pub exists: bool,
}

/// Generic confirmation message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            role: "user".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("$2b$12$secret"));
    }
}
