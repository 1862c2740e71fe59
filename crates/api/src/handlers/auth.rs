//! Handlers for the `/auth` resource (register, login).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cardvault_core::error::CoreError;
use cardvault_core::types::DbId;
use cardvault_db::models::user::CreateUser;
use cardvault_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Bearer token issued by register and login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account and log it in. Returns 409 if the email is taken.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    input.validate()?;
    let email = normalize_email(&input.email);

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already registered".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A concurrent registration still hits uq_users_email and maps to 409.
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");
    let response = token_response(&state, user.id, &user.email)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Incorrect email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, &normalize_email(&input.email))
        .await?
        .ok_or_else(invalid)?;

    if !user.is_active {
        return Err(invalid());
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(invalid());
    }

    Ok(Json(token_response(&state, user.id, &user.email)?))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn token_response(state: &AppState, user_id: DbId, email: &str) -> AppResult<TokenResponse> {
    let access_token = generate_access_token(user_id, email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(TokenResponse {
        access_token,
        token_type: "bearer",
        expires_in: state.config.jwt.expires_in_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_rejects_short_password_and_bad_email() {
        let input = RegisterRequest {
            email: "not-an-email".into(),
            password: "short".into(),
        };
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn register_request_accepts_valid_input() {
        let input = RegisterRequest {
            email: "misty@cerulean.gym".into(),
            password: "starmie-123".into(),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn emails_are_normalized() {
        assert_eq!(normalize_email("  Brock@Pewter.GYM "), "brock@pewter.gym");
    }
}
