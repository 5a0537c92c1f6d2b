/**
 * Authentication Middleware
 *
 * Protects routes that require a logged-in user. The access token is read
 * from `Authorization: Bearer <token>`, verified, and the resulting
 * `AuthenticatedUser` is attached to the request extensions where the
 * `AuthUser` extractor picks it up.
 *
 * # Rejections
 *
 * | Situation                       | Code            | Message                |
 * |---------------------------------|-----------------|------------------------|
 * | header missing or not `Bearer`  | `UNAUTHORIZED`  | No token provided      |
 * | token expired                   | `TOKEN_EXPIRED` | Access token expired   |
 * | anything else                   | `INVALID_TOKEN` | Invalid access token   |
 *
 * All rejections are 401.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::sessions::{subject, verify_access_token, TokenError};
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Authenticated user data extracted from the access token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

fn no_token() -> BackendError {
    BackendError::unauthorized("UNAUTHORIZED", "No token provided")
}

fn invalid_token() -> BackendError {
    BackendError::unauthorized("INVALID_TOKEN", "Invalid access token")
}

impl From<TokenError> for BackendError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => BackendError::unauthorized("TOKEN_EXPIRED", "Access token expired"),
            TokenError::Invalid => invalid_token(),
        }
    }
}

/// Pull the token out of an `Authorization` header value
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header?.strip_prefix("Bearer ").map(str::trim).filter(|t| !t.is_empty())
}

/// Authentication middleware
///
/// 1. Extracts the bearer token from the Authorization header
/// 2. Verifies it against the access secret
/// 3. When a database is configured, checks the user still exists
/// 4. Attaches `AuthenticatedUser` to the request extensions
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let header = request.headers().get(AUTHORIZATION).and_then(|h| h.to_str().ok());
    let token = bearer_token(header).ok_or_else(|| {
        tracing::warn!("Missing or malformed Authorization header");
        no_token()
    })?;

    let claims = verify_access_token(&app_state.config.auth, token).map_err(|e| {
        tracing::warn!("Rejected access token: {}", e);
        BackendError::from(e)
    })?;
    let user_id = subject(&claims.sub)?;

    if let Some(pool) = &app_state.db_pool {
        verify_user_exists(pool, user_id).await?;
    }

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
    });

    Ok(next.run(request).await)
}

/// Verify the token's user still exists in the database
async fn verify_user_exists(pool: &PgPool, user_id: Uuid) -> Result<(), BackendError> {
    match get_user_by_id(pool, user_id).await? {
        Some(_) => Ok(()),
        None => {
            tracing::warn!("Token for unknown user {}", user_id);
            Err(invalid_token())
        }
    }
}

/// Axum extractor for the authenticated user
///
/// Only valid behind `auth_middleware`; anywhere else it rejects with 401.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                no_token()
            })
    }
}
