//! Language model client.
//!
//! `PlannerModel` is the seam between the normalizer and the external model.
//! `GeminiClient` implements it over the Gemini `generateContent` REST
//! endpoint; tests substitute their own implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::backend::ai::error::ModelError;
use crate::backend::server::config::AiConfig;

/// A text generator that takes a system instruction and a user prompt.
#[async_trait]
pub trait PlannerModel: Send + Sync {
    /// Generate the raw reply text. Any failure is an upstream error.
    async fn generate(&self, system_instruction: &str, prompt: &str) -> Result<String, ModelError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}

/// Gemini REST client.
pub struct GeminiClient {
    api_key: Option<String>,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: &AiConfig) -> Result<Self, ModelError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Instruction<'a> {
    parts: [TextPart<'a>; 1],
}

#[derive(Serialize)]
struct Turn<'a> {
    role: &'static str,
    parts: [TextPart<'a>; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Instruction<'a>,
    contents: [Turn<'a>; 1],
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Concatenated text parts of the first candidate
fn candidate_text(response: GenerateResponse) -> Option<String> {
    let text: String = response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect();
    (!text.is_empty()).then_some(text)
}

#[async_trait]
impl PlannerModel for GeminiClient {
    async fn generate(&self, system_instruction: &str, prompt: &str) -> Result<String, ModelError> {
        let api_key = self.api_key.as_deref().ok_or(ModelError::MissingApiKey)?;

        let request = GenerateRequest {
            system_instruction: Instruction {
                parts: [TextPart { text: system_instruction }],
            },
            contents: [Turn {
                role: "user",
                parts: [TextPart { text: prompt }],
            }],
        };

        tracing::debug!("Calling Gemini model {}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            tracing::error!("Gemini returned {}: {}", status, body);
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        candidate_text(parsed).ok_or(ModelError::EmptyResponse)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
