/**
 * Error Conversion
 *
 * Renders `BackendError` as an HTTP response and provides `ApiJson`, a JSON
 * body extractor whose rejection is a `BackendError`, so malformed bodies
 * get the same envelope as every other error.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "success": false,
 *   "error": {"code": "VALIDATION_ERROR", "message": "title is required"}
 * }
 * ```
 */

use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::de::DeserializeOwned;

use crate::backend::error::types::BackendError;
use crate::shared::ErrorResponse;

impl IntoResponse for BackendError {
    /// Convert a backend error into an HTTP response
    ///
    /// 5xx errors are logged with their full detail; 4xx errors at warn level.
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed with {}: {}", status, self);
        } else if status != StatusCode::NOT_FOUND {
            tracing::warn!("Request rejected with {}: {}", status, self);
        }

        let body = ErrorResponse::new(self.code(), self.message());
        (status, Json(body)).into_response()
    }
}

/// JSON body extractor that rejects with `BackendError`
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
