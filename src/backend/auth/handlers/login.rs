/**
 * Login Handler
 *
 * `POST /api/auth/login`
 *
 * An unknown email and a wrong password produce the same 401 so the
 * endpoint cannot be used to discover registered addresses.
 */

use axum::{extract::State, response::Json};
use sqlx::PgPool;

use crate::backend::auth::handlers::issue_tokens;
use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::{ApiJson, BackendError};
use crate::backend::server::config::AuthConfig;
use crate::shared::ApiResponse;

fn invalid_credentials() -> BackendError {
    BackendError::unauthorized("INVALID_CREDENTIALS", "Email atau password salah")
}

/// Login handler
///
/// # Errors
///
/// * `400 VALIDATION_ERROR` - email or password missing
/// * `401 INVALID_CREDENTIALS` - unknown email or wrong password
/// * `503 SERVICE_UNAVAILABLE` - database not configured
pub async fn login(
    State(pool): State<Option<PgPool>>,
    State(auth): State<AuthConfig>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, BackendError> {
    let (Some(email), Some(password)) = (
        request.email.filter(|e| !e.is_empty()),
        request.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(BackendError::validation("email dan password wajib diisi"));
    };
    let pool = pool.ok_or_else(BackendError::database_unavailable)?;

    let Some(user) = get_user_by_email(&pool, &email).await? else {
        tracing::warn!("Login attempt for unknown email");
        return Err(invalid_credentials());
    };

    let hash = user.password_hash.clone();
    let is_match = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| BackendError::internal(format!("verify task failed: {}", e)))?
        .map_err(|e| BackendError::internal(format!("failed to verify password: {}", e)))?;

    if !is_match {
        tracing::warn!("Invalid password for user {}", user.id);
        return Err(invalid_credentials());
    }

    tracing::info!("User logged in: {}", user.email);
    let response = issue_tokens(&auth, user)?;
    Ok(Json(ApiResponse::with_message(response, "Login successful")))
}
