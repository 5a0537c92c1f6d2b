/**
 * Schema Validator
 *
 * The correctness boundary between an untrusted text generator and the rest
 * of the server. Input is the loosely-typed JSON produced by `extract`;
 * output is either a fully typed `ValidatedResponse` or an
 * `AiError::Schema` listing every violated path.
 *
 * # Rules
 *
 * Top level, checked in order, first failure wins:
 * - `type` is `activity`, `note` or `none`
 * - `message` is a non-blank string
 * - `warnings`, `activities` and `notes` are arrays
 *
 * Every entry of `warnings`, `activities` and `notes` is then checked and
 * all violations are collected, e.g. `activities[2].date`. Any violation
 * rejects the whole response; nothing is dropped or defaulted silently.
 *
 * The array that `type` selects is not cross-checked against the other:
 * `type = "activity"` with a non-empty `notes` array is accepted as long as
 * every entry is valid. `status` accepts `pending`, `done` and `skipped`
 * even though the model is told to always emit `pending`.
 *
 * Fields the model is not allowed to set (`source`, `userId`) and unknown
 * fields are discarded; the typed drafts have no room for them.
 */

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::backend::ai::error::{AiError, SchemaViolation, SchemaViolations};
use crate::backend::ai::types::{ActivityDraft, NoteDraft, ResponseKind, ValidatedResponse};
use crate::shared::activity::{ActivityStatus, ActivityType, Priority};

fn iso_date() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("ISO date regex should compile"))
}

fn clock_time() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{2}:[0-9]{2}$").expect("clock time regex should compile"))
}

/// Render a JSON value for an error message
fn shown(value: Option<&Value>) -> String {
    match value {
        None => "missing".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn schema_error(path: &str, reason: impl Into<String>) -> AiError {
    AiError::Schema(SchemaViolations(vec![SchemaViolation::new(path, reason)]))
}

fn required_array<'v>(root: &'v Map<String, Value>, field: &str) -> Result<&'v Vec<Value>, AiError> {
    root.get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| schema_error(field, "must be an array"))
}

/// Field accessor for one array entry that records violations as it goes
struct Fields<'v, 'e> {
    tag: String,
    object: &'v Map<String, Value>,
    violations: &'e mut Vec<SchemaViolation>,
}

impl<'v, 'e> Fields<'v, 'e> {
    fn violation(&mut self, field: &str, reason: String) {
        self.violations
            .push(SchemaViolation::new(format!("{}.{}", self.tag, field), reason));
    }

    /// Present and not `null`
    fn present(&self, field: &str) -> Option<&'v Value> {
        self.object.get(field).filter(|v| !v.is_null())
    }

    fn required_text(&mut self, field: &str, reason: &str) -> Option<String> {
        match self.object.get(field).and_then(Value::as_str) {
            Some(s) if !s.trim().is_empty() => Some(s.to_string()),
            _ => {
                self.violation(field, reason.to_string());
                None
            }
        }
    }

    /// `Some(None)` for null or absent, `None` after recording a violation
    fn optional_text(&mut self, field: &str) -> Option<Option<String>> {
        match self.present(field) {
            None => Some(None),
            Some(Value::String(s)) => Some(Some(s.clone())),
            Some(other) => {
                self.violation(field, format!("must be a string or null, got: {}", other));
                None
            }
        }
    }

    fn required_pattern(&mut self, field: &str, re: &Regex, expected: &str) -> Option<String> {
        let value = self.object.get(field);
        match value.and_then(Value::as_str) {
            Some(s) if re.is_match(s) => Some(s.to_string()),
            _ => {
                self.violation(field, format!("must be {}, got: {}", expected, shown(value)));
                None
            }
        }
    }

    fn optional_pattern(&mut self, field: &str, re: &Regex, expected: &str) -> Option<Option<String>> {
        match self.present(field) {
            None => Some(None),
            Some(Value::String(s)) if re.is_match(s) => Some(Some(s.clone())),
            Some(other) => {
                self.violation(
                    field,
                    format!("must be {} or null, got: {}", expected, shown(Some(other))),
                );
                None
            }
        }
    }

    fn required_enum<T>(&mut self, field: &str, parse: fn(&str) -> Option<T>, expected: &str) -> Option<T> {
        let value = self.object.get(field);
        match value.and_then(Value::as_str).and_then(parse) {
            Some(parsed) => Some(parsed),
            None => {
                self.violation(field, format!("must be {}, got: {}", expected, shown(value)));
                None
            }
        }
    }

    fn optional_enum<T>(&mut self, field: &str, parse: fn(&str) -> Option<T>, expected: &str) -> Option<Option<T>> {
        match self.present(field) {
            None => Some(None),
            Some(value) => match value.as_str().and_then(parse) {
                Some(parsed) => Some(Some(parsed)),
                None => {
                    self.violation(
                        field,
                        format!("must be {} or null, got: {}", expected, shown(Some(value))),
                    );
                    None
                }
            },
        }
    }

    fn optional_bool(&mut self, field: &str) -> Option<Option<bool>> {
        match self.present(field) {
            None => Some(None),
            Some(Value::Bool(b)) => Some(Some(*b)),
            Some(other) => {
                self.violation(field, format!("must be a boolean, got: {}", other));
                None
            }
        }
    }
}

fn entry_object<'v>(
    tag: &str,
    value: &'v Value,
    violations: &mut Vec<SchemaViolation>,
) -> Option<&'v Map<String, Value>> {
    let object = value.as_object();
    if object.is_none() {
        violations.push(SchemaViolation::new(tag, "must be an object"));
    }
    object
}

fn validate_activity(
    index: usize,
    value: &Value,
    violations: &mut Vec<SchemaViolation>,
) -> Option<ActivityDraft> {
    let tag = format!("activities[{}]", index);
    let object = entry_object(&tag, value, violations)?;
    let mut f = Fields { tag, object, violations };

    let title = f.required_text("title", "is required and must be a non-empty string");
    let description = f.optional_text("description");
    let kind = f.required_enum("type", ActivityType::parse, r#""task" or "schedule""#);
    let date = f.required_pattern("date", iso_date(), "YYYY-MM-DD");
    let start_time = f.optional_pattern("startTime", clock_time(), "HH:MM");
    let end_time = f.optional_pattern("endTime", clock_time(), "HH:MM");
    let priority = f.optional_enum("priority", Priority::parse, r#""low", "medium", "high""#);
    let status = f.required_enum("status", ActivityStatus::parse, r#""pending", "done", or "skipped""#);
    let link_url = f.optional_text("linkUrl");

    Some(ActivityDraft {
        title: title?,
        description: description?,
        kind: kind?,
        date: date?,
        start_time: start_time?,
        end_time: end_time?,
        priority: priority?,
        link_url: link_url?,
        status: status?,
    })
}

fn validate_note(index: usize, value: &Value, violations: &mut Vec<SchemaViolation>) -> Option<NoteDraft> {
    let tag = format!("notes[{}]", index);
    let object = entry_object(&tag, value, violations)?;
    let mut f = Fields { tag, object, violations };

    let title = f.required_text("title", "is required");
    let content = f.required_text("content", "is required");
    let related_date = f.optional_pattern("relatedDate", iso_date(), "YYYY-MM-DD");
    let is_pinned = f.optional_bool("isPinned");

    Some(NoteDraft {
        title: title?,
        content: content?,
        related_date: related_date?,
        is_pinned: is_pinned?.unwrap_or(false),
    })
}

/// Validate parsed model output against the response schema
pub fn validate_response(value: &Value) -> Result<ValidatedResponse, AiError> {
    let root = value
        .as_object()
        .ok_or_else(|| schema_error("(root)", "must be a JSON object"))?;

    let kind = root
        .get("type")
        .and_then(Value::as_str)
        .and_then(ResponseKind::parse)
        .ok_or_else(|| {
            schema_error(
                "type",
                format!(
                    r#"must be "activity", "note", or "none", got: {}"#,
                    shown(root.get("type"))
                ),
            )
        })?;

    let message = root
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| schema_error("message", "must be a non-empty string"))?;

    let raw_warnings = required_array(root, "warnings")?;
    let raw_activities = required_array(root, "activities")?;
    let raw_notes = required_array(root, "notes")?;

    let mut violations = Vec::new();

    let mut warnings = Vec::with_capacity(raw_warnings.len());
    for (index, warning) in raw_warnings.iter().enumerate() {
        match warning.as_str() {
            Some(s) => warnings.push(s.to_string()),
            None => violations.push(SchemaViolation::new(
                format!("warnings[{}]", index),
                "must be a string",
            )),
        }
    }

    let activities: Vec<ActivityDraft> = raw_activities
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| validate_activity(index, entry, &mut violations))
        .collect();

    let notes: Vec<NoteDraft> = raw_notes
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| validate_note(index, entry, &mut violations))
        .collect();

    if !violations.is_empty() {
        tracing::warn!(
            "AI response rejected with {} schema violation(s), first at {}",
            violations.len(),
            violations[0].path
        );
        return Err(AiError::Schema(SchemaViolations(violations)));
    }

    Ok(ValidatedResponse {
        kind,
        message: message.to_string(),
        warnings,
        activities,
        notes,
    })
}
