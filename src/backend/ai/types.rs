/**
 * AI Response Types
 *
 * Strongly-typed shapes produced by the schema validator. A
 * `ValidatedResponse` only exists once every field has been checked; it is
 * turned into the caller-facing `AiResponse` by stamping the
 * server-authoritative `source` and `userId` onto each draft.
 *
 * Dates stay ISO `YYYY-MM-DD` strings. Converting them to a storage type is
 * left to whoever persists the drafts later.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::activity::{ActivityStatus, ActivityType, Priority, Source};

/// Which collection of the response the model filled
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    Activity,
    Note,
    None,
}

impl ResponseKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "activity" => Some(Self::Activity),
            "note" => Some(Self::Note),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

/// A validated, unpersisted activity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDraft {
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub priority: Option<Priority>,
    pub link_url: Option<String>,
    pub status: ActivityStatus,
}

/// A validated, unpersisted note
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub related_date: Option<String>,
    pub is_pinned: bool,
}

/// A draft carrying the server-assigned attribution fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stamped<T> {
    #[serde(flatten)]
    pub draft: T,
    pub source: Source,
    pub user_id: Uuid,
}

impl<T> Stamped<T> {
    fn ai(draft: T, user_id: Uuid) -> Self {
        Self {
            draft,
            source: Source::Ai,
            user_id,
        }
    }
}

/// Model output that passed schema validation, not yet stamped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedResponse {
    pub kind: ResponseKind,
    pub message: String,
    pub warnings: Vec<String>,
    pub activities: Vec<ActivityDraft>,
    pub notes: Vec<NoteDraft>,
}

impl ValidatedResponse {
    /// Attach `source = "ai"` and the caller's id to every draft
    pub fn stamp(self, user_id: Uuid) -> AiResponse {
        AiResponse {
            kind: self.kind,
            message: self.message,
            warnings: self.warnings,
            activities: self
                .activities
                .into_iter()
                .map(|draft| Stamped::ai(draft, user_id))
                .collect(),
            notes: self
                .notes
                .into_iter()
                .map(|draft| Stamped::ai(draft, user_id))
                .collect(),
        }
    }
}

/// Normalized AI response returned by `POST /api/ai/parse`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AiResponse {
    #[serde(rename = "type")]
    pub kind: ResponseKind,
    pub message: String,
    pub warnings: Vec<String>,
    pub activities: Vec<Stamped<ActivityDraft>>,
    pub notes: Vec<Stamped<NoteDraft>>,
}
