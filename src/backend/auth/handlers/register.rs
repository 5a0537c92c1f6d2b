/**
 * Register Handler
 *
 * `POST /api/auth/register`
 *
 * # Registration Process
 *
 * 1. Validate that every field is present, the email format, the password
 *    length and the confirmation
 * 2. Reject an email that is already registered
 * 3. Hash the password with bcrypt (cost 12) off the async runtime
 * 4. Create the user and issue an access/refresh token pair
 */

use std::sync::OnceLock;

use axum::{extract::State, http::StatusCode, response::Json};
use regex::Regex;
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{AuthResponse, RegisterRequest};
use crate::backend::auth::handlers::issue_tokens;
use crate::backend::auth::users::{create_user, get_user_by_email};
use crate::backend::error::{ApiJson, BackendError};
use crate::backend::server::config::AuthConfig;
use crate::shared::ApiResponse;

/// bcrypt work factor
pub const BCRYPT_COST: u32 = 12;

/// Minimum password length in characters
pub const MIN_PASSWORD_LEN: usize = 8;

fn email_format() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex should compile"))
}

/// A register request whose fields passed validation
#[derive(Debug, PartialEq, Eq)]
pub struct ValidRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Validate a register request without touching the database
pub fn validate_registration(request: RegisterRequest) -> Result<ValidRegistration, BackendError> {
    let present = |v: Option<String>| v.filter(|s| !s.is_empty());
    let (Some(name), Some(email), Some(password), Some(confirm_password)) = (
        present(request.name),
        present(request.email),
        present(request.password),
        present(request.confirm_password),
    ) else {
        return Err(BackendError::validation(
            "name, email, password, dan confirmPassword wajib diisi",
        ));
    };

    if !email_format().is_match(&email) {
        return Err(BackendError::validation("Format email tidak valid"));
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(BackendError::validation("Password minimal 8 karakter"));
    }

    if password != confirm_password {
        return Err(BackendError::handler(
            StatusCode::BAD_REQUEST,
            "PASSWORD_MISMATCH",
            "Password dan konfirmasi password tidak sama",
        ));
    }

    Ok(ValidRegistration {
        name,
        email,
        password,
    })
}

/// Register handler
///
/// # Errors
///
/// * `400 VALIDATION_ERROR` - missing field, bad email, short password
/// * `400 PASSWORD_MISMATCH` - `confirmPassword` differs
/// * `409 CONFLICT` - email already registered
/// * `503 SERVICE_UNAVAILABLE` - database not configured
///
/// # Example Request
///
/// ```http
/// POST /api/auth/register HTTP/1.1
/// Content-Type: application/json
///
/// {"name": "Budi", "email": "budi@example.com", "password": "rahasia123", "confirmPassword": "rahasia123"}
/// ```
pub async fn register(
    State(pool): State<Option<PgPool>>,
    State(auth): State<AuthConfig>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), BackendError> {
    let registration = validate_registration(request)?;
    let pool = pool.ok_or_else(BackendError::database_unavailable)?;

    if get_user_by_email(&pool, &registration.email).await?.is_some() {
        tracing::warn!("Email already registered: {}", registration.email);
        return Err(BackendError::conflict("Email sudah terdaftar"));
    }

    let password = registration.password;
    let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| BackendError::internal(format!("hashing task failed: {}", e)))?
        .map_err(|e| BackendError::internal(format!("failed to hash password: {}", e)))?;

    let user = create_user(&pool, &registration.name, &registration.email, &password_hash).await?;
    tracing::info!("User registered: {}", user.email);

    let response = issue_tokens(&auth, user)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(response, "User registered successfully")),
    ))
}
