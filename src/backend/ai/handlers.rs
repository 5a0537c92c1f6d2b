/**
 * AI Handlers
 *
 * `POST /api/ai/parse` turns free text into previewable activity and note
 * drafts. Nothing is persisted here; the client saves the drafts it accepts
 * through the regular activity and note endpoints.
 */

use axum::{extract::State, response::Json};
use serde_json::Value;

use crate::backend::ai::error::AiError;
use crate::backend::ai::service::AiService;
use crate::backend::ai::types::AiResponse;
use crate::backend::error::{ApiJson, BackendError};
use crate::backend::middleware::AuthUser;
use crate::shared::ApiResponse;

/// Parse a natural-language prompt
///
/// # Example Request
///
/// ```http
/// POST /api/ai/parse HTTP/1.1
/// Authorization: Bearer <access token>
/// Content-Type: application/json
///
/// {"prompt": "besok jam 9 rapat tim"}
/// ```
///
/// # Errors
///
/// * `400 VALIDATION_ERROR` - `prompt` missing, blank or not a string
/// * `502 AI_ERROR` - the model call failed
/// * `422 AI_PARSE_ERROR` - the model did not return JSON
/// * `422 AI_SCHEMA_ERROR` - the JSON did not match the schema
pub async fn parse_prompt(
    State(ai): State<AiService>,
    AuthUser(user): AuthUser,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<ApiResponse<AiResponse>>, BackendError> {
    let prompt = body
        .get("prompt")
        .and_then(Value::as_str)
        .ok_or(AiError::Validation)?;

    let response = ai.parse(prompt, user.user_id).await?;

    Ok(Json(ApiResponse::with_message(
        response,
        "AI response parsed successfully",
    )))
}
