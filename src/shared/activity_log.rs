//! Activity Log Data Structures
//!
//! Every mutation of an activity appends an audit entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::activity::{ActivityStatus, ActivityType};

/// What happened to an activity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogAction {
    Created,
    Updated,
    Completed,
    Skipped,
}

impl LogAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogAction::Created => "created",
            LogAction::Updated => "updated",
            LogAction::Completed => "completed",
            LogAction::Skipped => "skipped",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "created" => Some(LogAction::Created),
            "updated" => Some(LogAction::Updated),
            "completed" => Some(LogAction::Completed),
            "skipped" => Some(LogAction::Skipped),
            _ => None,
        }
    }

    /// Action recorded for a status change
    pub fn for_status(status: ActivityStatus) -> Self {
        match status {
            ActivityStatus::Done => LogAction::Completed,
            ActivityStatus::Skipped => LogAction::Skipped,
            ActivityStatus::Pending => LogAction::Updated,
        }
    }
}

/// Minimal view of the activity a log entry refers to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivitySummary {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
}

/// A log entry joined with its activity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub activity_id: Uuid,
    pub action: LogAction,
    pub timestamp: DateTime<Utc>,
    pub activity: ActivitySummary,
}

/// Query string of `GET /api/activity-logs`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogFilters {
    pub activity_id: Option<Uuid>,
}
