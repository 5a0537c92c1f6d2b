/**
 * Refresh and Logout Handlers
 *
 * `POST /api/auth/refresh` trades a refresh token for a new access token.
 * `POST /api/auth/logout` is stateless: tokens are not tracked server-side,
 * so the client simply discards them.
 */

use axum::{extract::State, response::Json};
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{RefreshRequest, RefreshResponse};
use crate::backend::auth::sessions::{create_access_token, subject, verify_refresh_token};
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::{ApiJson, BackendError};
use crate::backend::server::config::AuthConfig;
use crate::shared::ApiResponse;

/// Refresh handler
///
/// # Errors
///
/// * `400 VALIDATION_ERROR` - `refreshToken` missing
/// * `401 INVALID_TOKEN` - bad or expired token, or the user no longer exists
/// * `503 SERVICE_UNAVAILABLE` - database not configured
pub async fn refresh(
    State(pool): State<Option<PgPool>>,
    State(auth): State<AuthConfig>,
    ApiJson(request): ApiJson<RefreshRequest>,
) -> Result<Json<ApiResponse<RefreshResponse>>, BackendError> {
    let token = request
        .refresh_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| BackendError::validation("refreshToken wajib dikirim"))?;

    let user_id = verify_refresh_token(&auth, &token)
        .and_then(|claims| subject(&claims.sub))
        .map_err(|e| {
            tracing::warn!("Rejected refresh token: {}", e);
            BackendError::unauthorized("INVALID_TOKEN", "Refresh token tidak valid atau sudah expired")
        })?;

    let pool = pool.ok_or_else(BackendError::database_unavailable)?;
    let user = get_user_by_id(&pool, user_id)
        .await?
        .ok_or_else(|| BackendError::unauthorized("INVALID_TOKEN", "User tidak ditemukan"))?;

    let access_token = create_access_token(&auth, user.id, &user.email)
        .map_err(|e| BackendError::internal(format!("failed to create access token: {}", e)))?;

    Ok(Json(ApiResponse::with_message(
        RefreshResponse { access_token },
        "Token refreshed",
    )))
}

/// Logout handler
pub async fn logout() -> Json<ApiResponse<()>> {
    Json(ApiResponse::with_message((), "Logged out successfully"))
}
