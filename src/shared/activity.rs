//! Activity Data Structures
//!
//! Activities are the planner's tasks and schedules. This module defines the
//! stored record, the enumerations shared with the AI pipeline, and the
//! request bodies accepted by the activity endpoints together with their
//! validation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::dates::parse_calendar_date;
use crate::shared::error::SharedError;
use crate::shared::patch::deserialize_nullable;

/// Kind of activity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    /// Personal work, chores, studying, exercise
    Task,
    /// Appointments, meetings, classes, events
    Schedule,
}

impl ActivityType {
    pub const ALL: [ActivityType; 2] = [ActivityType::Task, ActivityType::Schedule];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Task => "task",
            ActivityType::Schedule => "schedule",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// Completion state of an activity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    #[default]
    Pending,
    Done,
    Skipped,
}

impl ActivityStatus {
    pub const ALL: [ActivityStatus; 3] = [
        ActivityStatus::Pending,
        ActivityStatus::Done,
        ActivityStatus::Skipped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Pending => "pending",
            ActivityStatus::Done => "done",
            ActivityStatus::Skipped => "skipped",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Comma-separated list used in validation messages
    pub fn allowed_values() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Priority of an activity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// Who created a record
///
/// `Ai` is stamped by the server on drafts produced by the language model;
/// it is never taken from model output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Ai,
    #[default]
    Manual,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Ai => "ai",
            Source::Manual => "manual",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ai" => Some(Source::Ai),
            "manual" => Some(Source::Manual),
            _ => None,
        }
    }
}

/// A stored activity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    /// Calendar day, timezone-neutral
    pub date: NaiveDate,
    /// `HH:MM`, 24-hour
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: ActivityStatus,
    pub priority: Option<Priority>,
    pub link_url: Option<String>,
    pub source: Source,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/activities`
///
/// Fields are kept as raw strings so each one can be rejected with its own
/// message instead of a generic deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub link_url: Option<String>,
    pub source: Option<String>,
}

/// Validated input for inserting an activity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    pub title: String,
    pub description: Option<String>,
    pub kind: ActivityType,
    pub date: NaiveDate,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: ActivityStatus,
    pub priority: Option<Priority>,
    pub link_url: Option<String>,
    pub source: Source,
}

/// Treat empty strings the same as absent values
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl CreateActivityRequest {
    /// Validate the request
    ///
    /// `today` is used when no date is supplied. An unknown `source` falls
    /// back to `manual`; an unknown `status` is rejected.
    pub fn validate(self, today: NaiveDate) -> Result<NewActivity, SharedError> {
        let title = non_empty(self.title)
            .ok_or_else(|| SharedError::validation("title", "title is required"))?;
        let kind = non_empty(self.kind)
            .ok_or_else(|| SharedError::validation("type", "type is required"))?;
        let kind = ActivityType::parse(&kind)
            .ok_or_else(|| SharedError::validation("type", "Invalid activity type"))?;

        let status = match non_empty(self.status) {
            Some(s) => ActivityStatus::parse(&s)
                .ok_or_else(|| SharedError::validation("status", "Invalid status"))?,
            None => ActivityStatus::Pending,
        };
        let priority = match non_empty(self.priority) {
            Some(p) => Some(
                Priority::parse(&p)
                    .ok_or_else(|| SharedError::validation("priority", "Invalid priority"))?,
            ),
            None => None,
        };
        let date = match non_empty(self.date) {
            Some(d) => parse_calendar_date(&d)
                .ok_or_else(|| SharedError::validation("date", "date must be YYYY-MM-DD"))?,
            None => today,
        };
        let source = self
            .source
            .as_deref()
            .and_then(Source::parse)
            .unwrap_or(Source::Manual);

        Ok(NewActivity {
            title,
            description: self.description,
            kind,
            date,
            start_time: non_empty(self.start_time),
            end_time: non_empty(self.end_time),
            status,
            priority,
            link_url: non_empty(self.link_url),
            source,
        })
    }
}

/// Body of `PUT /api/activities/{id}`
///
/// Absent fields are left unchanged. Nullable fields distinguish an explicit
/// `null` (clear) from absence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivityRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub description: Option<Option<String>>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub start_time: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub end_time: Option<Option<String>>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub priority: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub link_url: Option<Option<String>>,
}

impl UpdateActivityRequest {
    /// Validate the patch and apply it to an existing activity
    pub fn apply_to(self, activity: &mut Activity) -> Result<(), SharedError> {
        if let Some(kind) = self.kind {
            activity.kind = ActivityType::parse(&kind)
                .ok_or_else(|| SharedError::validation("type", "Invalid type"))?;
        }
        if let Some(status) = self.status {
            activity.status = ActivityStatus::parse(&status)
                .ok_or_else(|| SharedError::validation("status", "Invalid status"))?;
        }
        if let Some(priority) = self.priority {
            activity.priority = match priority {
                Some(p) => Some(
                    Priority::parse(&p)
                        .ok_or_else(|| SharedError::validation("priority", "Invalid priority"))?,
                ),
                None => None,
            };
        }
        if let Some(date) = self.date {
            activity.date = parse_calendar_date(&date)
                .ok_or_else(|| SharedError::validation("date", "date must be YYYY-MM-DD"))?;
        }
        if let Some(title) = self.title {
            if title.trim().is_empty() {
                return Err(SharedError::validation("title", "title cannot be empty"));
            }
            activity.title = title;
        }
        if let Some(description) = self.description {
            activity.description = description;
        }
        if let Some(start_time) = self.start_time {
            activity.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            activity.end_time = end_time;
        }
        if let Some(link_url) = self.link_url {
            activity.link_url = link_url;
        }
        Ok(())
    }
}

/// Body of `PATCH /api/activities/{id}/status`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

impl UpdateStatusRequest {
    pub fn validate(&self) -> Result<ActivityStatus, SharedError> {
        self.status
            .as_deref()
            .and_then(ActivityStatus::parse)
            .ok_or_else(|| {
                SharedError::validation(
                    "status",
                    format!("status must be one of: {}", ActivityStatus::allowed_values()),
                )
            })
    }
}

/// Query string of `GET /api/activities`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityFilters {
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

/// Filters after validation; unknown enum values are dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityQuery {
    pub date: Option<NaiveDate>,
    pub kind: Option<ActivityType>,
    pub status: Option<ActivityStatus>,
    pub priority: Option<Priority>,
}

impl ActivityFilters {
    pub fn validate(&self) -> Result<ActivityQuery, SharedError> {
        let date = match self.date.as_deref().filter(|d| !d.is_empty()) {
            Some(d) => Some(
                parse_calendar_date(d)
                    .ok_or_else(|| SharedError::validation("date", "date must be YYYY-MM-DD"))?,
            ),
            None => None,
        };
        Ok(ActivityQuery {
            date,
            kind: self.kind.as_deref().and_then(ActivityType::parse),
            status: self.status.as_deref().and_then(ActivityStatus::parse),
            priority: self.priority.as_deref().and_then(Priority::parse),
        })
    }
}
