/**
 * Backend Error Types
 *
 * `BackendError` is the single error type returned by HTTP handlers. Every
 * variant resolves to an HTTP status, a machine-readable code and a
 * human-readable message, which `conversion` renders as
 * `{"success": false, "error": {"code", "message"}}`.
 *
 * # Error Categories
 *
 * - `Api` - errors raised directly by handlers (validation, auth, ownership)
 * - `Ai` - failures of the AI normalization pipeline
 * - `SharedError` - request-field validation and decoding errors
 * - `Database` - sqlx errors; unique violations become 409, missing rows 404
 * - `InvalidBody` - the JSON body could not be read
 * - `Internal` - anything else; the message is logged, never returned
 */

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::ai::AiError;
use crate::shared::SharedError;

/// Message sent in place of any internal error detail
pub const INTERNAL_MESSAGE: &str = "Something went wrong";

/// PostgreSQL unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status and code
    #[error("{code}: {message}")]
    Api {
        /// HTTP status code for this error
        status: StatusCode,
        /// Machine-readable code, e.g. `NOT_FOUND`
        code: &'static str,
        /// Human-readable error message
        message: String,
    },

    /// AI pipeline error
    #[error(transparent)]
    Ai(#[from] AiError),

    /// Shared error (from shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request body is not valid JSON for the endpoint
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    /// Unexpected server-side failure
    #[error("Internal error: {message}")]
    Internal {
        /// Detail for the log only
        message: String,
    },
}

impl BackendError {
    /// Create a handler error with a status code and machine code
    ///
    /// # Arguments
    ///
    /// * `status` - HTTP status code
    /// * `code` - Machine-readable error code
    /// * `message` - Error message
    pub fn handler(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            code,
            message: message.into(),
        }
    }

    /// 400 `VALIDATION_ERROR`
    pub fn validation(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
    }

    /// 401 with the given code
    pub fn unauthorized(code: &'static str, message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, code, message)
    }

    /// 403 `FORBIDDEN`
    pub fn forbidden() -> Self {
        Self::handler(StatusCode::FORBIDDEN, "FORBIDDEN", "Access denied")
    }

    /// 404 `NOT_FOUND`
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    /// 409 `CONFLICT`
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::CONFLICT, "CONFLICT", message)
    }

    /// 503 when no database is configured
    pub fn database_unavailable() -> Self {
        Self::handler(
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            "Database not configured",
        )
    }

    /// Unexpected failure; `message` is only logged
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    fn is_unique_violation(err: &sqlx::Error) -> bool {
        matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION))
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Api` - the status carried by the error
    /// - `Ai` - 400 validation, 502 upstream, 422 malformed or schema
    /// - `SharedError` - 400 for validation, 500 otherwise
    /// - `Database` - 409 unique violation, 404 row not found, 500 otherwise
    /// - `InvalidBody` - 400
    /// - `Internal` - 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Api { status, .. } => *status,
            Self::Ai(err) => match err {
                AiError::Validation => StatusCode::BAD_REQUEST,
                AiError::Upstream(_) => StatusCode::BAD_GATEWAY,
                AiError::MalformedOutput { .. } | AiError::Schema(_) => StatusCode::UNPROCESSABLE_ENTITY,
            },
            Self::SharedError(err) => match err {
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::SerializationError { .. } | SharedError::DecodeError { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Database(err) if Self::is_unique_violation(err) => StatusCode::CONFLICT,
            Self::Database(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Api { code, .. } => *code,
            Self::Ai(err) => err.code(),
            Self::InvalidBody(_) => "VALIDATION_ERROR",
            _ => match self.status_code() {
                StatusCode::BAD_REQUEST => "VALIDATION_ERROR",
                StatusCode::CONFLICT => "CONFLICT",
                StatusCode::NOT_FOUND => "NOT_FOUND",
                _ => "INTERNAL_SERVER_ERROR",
            },
        }
    }

    /// Get the client-facing message
    ///
    /// Server-side failures are masked with a generic message.
    pub fn message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::Ai(err) => err.to_string(),
            Self::SharedError(SharedError::ValidationError { message, .. }) => message.clone(),
            Self::Database(err) if Self::is_unique_violation(err) => {
                "A record with that value already exists".to_string()
            }
            Self::Database(sqlx::Error::RowNotFound) => "Record not found".to_string(),
            Self::InvalidBody(rejection) => rejection.body_text(),
            _ => INTERNAL_MESSAGE.to_string(),
        }
    }
}
