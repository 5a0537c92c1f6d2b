/**
 * AI Normalizer Service
 *
 * Runs the full pipeline for one request:
 *
 * 1. Reject a blank prompt
 * 2. Build the system instruction for the current instant
 * 3. Call the model (the only await point; no retry)
 * 4. Strip fences and parse JSON
 * 5. Validate the schema
 * 6. Stamp `source` and `userId`
 *
 * Nothing is kept between calls, so one service is shared by every request.
 */

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backend::ai::client::PlannerModel;
use crate::backend::ai::error::AiError;
use crate::backend::ai::extract::extract_json;
use crate::backend::ai::prompt::build_system_instruction;
use crate::backend::ai::schema::validate_response;
use crate::backend::ai::types::AiResponse;

#[derive(Clone)]
pub struct AiService {
    model: Arc<dyn PlannerModel>,
}

impl AiService {
    pub fn new(model: Arc<dyn PlannerModel>) -> Self {
        Self { model }
    }

    /// Parse `prompt` into drafts owned by `user_id`
    pub async fn parse(&self, prompt: &str, user_id: Uuid) -> Result<AiResponse, AiError> {
        self.parse_at(Utc::now(), prompt, user_id).await
    }

    /// Same as `parse` with an explicit "now", used to pin the reference day
    pub async fn parse_at(
        &self,
        now: DateTime<Utc>,
        prompt: &str,
        user_id: Uuid,
    ) -> Result<AiResponse, AiError> {
        if prompt.trim().is_empty() {
            return Err(AiError::Validation);
        }

        let instruction = build_system_instruction(now);
        let raw = self.model.generate(&instruction, prompt).await.map_err(|e| {
            tracing::error!("Model {} call failed: {}", self.model.model_name(), e);
            AiError::Upstream(e)
        })?;

        let value = extract_json(&raw)?;
        let validated = validate_response(&value)?;

        tracing::info!(
            "AI response parsed for user {}: {} activities, {} notes",
            user_id,
            validated.activities.len(),
            validated.notes.len()
        );

        Ok(validated.stamp(user_id))
    }
}
