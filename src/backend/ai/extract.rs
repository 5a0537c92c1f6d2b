/**
 * Response Extractor
 *
 * Models sometimes wrap JSON in a markdown code block even when told not to.
 * The extractor strips one leading fence (optionally tagged `json`) and one
 * trailing fence, trims the rest, and parses it into a loosely-typed
 * `serde_json::Value`. Shape checks happen afterwards in `schema`.
 */

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::backend::ai::error::AiError;

fn leading_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\A\s*```(?:json)?\s*").expect("leading fence regex should compile"))
}

fn trailing_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*```\s*\z").expect("trailing fence regex should compile"))
}

/// Remove surrounding code fences and whitespace
pub fn strip_fences(raw: &str) -> &str {
    let start = leading_fence().find(raw).map_or(0, |m| m.end());
    let rest = &raw[start..];
    let end = trailing_fence().find(rest).map_or(rest.len(), |m| m.start());
    rest[..end].trim()
}

/// Strip fences and parse the model text as JSON
pub fn extract_json(raw: &str) -> Result<Value, AiError> {
    let cleaned = strip_fences(raw);
    serde_json::from_str(cleaned).map_err(|e| {
        tracing::warn!("Model output is not valid JSON: {}", e);
        AiError::MalformedOutput {
            detail: e.to_string(),
        }
    })
}
