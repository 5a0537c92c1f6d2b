/**
 * AI Pipeline Errors
 *
 * Four failure kinds can leave the normalizer, each raised at the stage
 * that detects it and passed to the caller unchanged:
 *
 * - `Validation` - the prompt is missing or blank
 * - `Upstream` - the model call failed (network, auth, quota, bad status)
 * - `MalformedOutput` - the model text is not JSON after fence-stripping
 * - `Schema` - the JSON does not match the response schema
 *
 * Mapping to HTTP status codes happens in `backend::error::conversion`.
 */

use std::fmt;

use thiserror::Error;

/// Failure of the external model call
#[derive(Debug, Error)]
pub enum ModelError {
    /// Request could not be sent or the body could not be read
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Model endpoint answered with a non-success status
    #[error("[{status}] {body}")]
    Status {
        status: u16,
        body: String,
    },

    /// Response carried no candidate text
    #[error("model returned an empty response")]
    EmptyResponse,

    /// No API key configured
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,
}

/// One field that failed schema validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Field path, e.g. `activities[2].date`
    pub path: String,
    /// What the field should have been
    pub reason: String,
}

impl SchemaViolation {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.path, self.reason)
    }
}

/// Every violation found in a model response, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolations(pub Vec<SchemaViolation>);

impl SchemaViolations {
    pub fn first(&self) -> Option<&SchemaViolation> {
        self.0.first()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|v| v.path.as_str())
    }
}

impl fmt::Display for SchemaViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

/// Errors raised by the AI normalization pipeline
#[derive(Debug, Error)]
pub enum AiError {
    /// Prompt missing, empty or not a string
    #[error("prompt is required")]
    Validation,

    /// External model call failed
    #[error("Gemini API error: {0}")]
    Upstream(#[from] ModelError),

    /// Model output is not parseable JSON
    #[error("AI returned invalid JSON")]
    MalformedOutput {
        /// Parser detail, logged but never sent to clients
        detail: String,
    },

    /// Parsed output violates the response schema
    #[error("AI response schema invalid: {0}")]
    Schema(SchemaViolations),
}

impl AiError {
    /// Machine-readable code for the response envelope
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::Upstream(_) => "AI_ERROR",
            Self::MalformedOutput { .. } => "AI_PARSE_ERROR",
            Self::Schema(_) => "AI_SCHEMA_ERROR",
        }
    }
}
