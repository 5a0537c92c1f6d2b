//! Note Data Structures
//!
//! Notes hold free-form reflections, optionally tied to a calendar day and
//! pinned to the top of the list.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::activity::Source;
use crate::shared::dates::parse_calendar_date;
use crate::shared::error::SharedError;
use crate::shared::patch::deserialize_nullable;

/// A stored note
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub is_pinned: bool,
    pub related_date: Option<NaiveDate>,
    pub source: Source,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/notes`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_pinned: Option<bool>,
    pub related_date: Option<String>,
    pub source: Option<String>,
}

/// Validated input for inserting a note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub is_pinned: bool,
    pub related_date: Option<NaiveDate>,
    pub source: Source,
}

fn parse_related_date(value: Option<String>) -> Result<Option<NaiveDate>, SharedError> {
    match value.filter(|v| !v.is_empty()) {
        Some(v) => parse_calendar_date(&v)
            .map(Some)
            .ok_or_else(|| SharedError::validation("relatedDate", "relatedDate must be YYYY-MM-DD")),
        None => Ok(None),
    }
}

impl CreateNoteRequest {
    pub fn validate(self) -> Result<NewNote, SharedError> {
        let (title, content, source) = match (
            self.title.filter(|t| !t.is_empty()),
            self.content.filter(|c| !c.is_empty()),
            self.source.filter(|s| !s.is_empty()),
        ) {
            (Some(title), Some(content), Some(source)) => (title, content, source),
            _ => {
                return Err(SharedError::validation(
                    "title",
                    "title, content, and source are required",
                ))
            }
        };
        let source = Source::parse(&source)
            .ok_or_else(|| SharedError::validation("source", "Invalid source"))?;

        Ok(NewNote {
            title,
            content,
            is_pinned: self.is_pinned.unwrap_or(false),
            related_date: parse_related_date(self.related_date)?,
            source,
        })
    }
}

/// Body of `PUT /api/notes/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_pinned: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub related_date: Option<Option<String>>,
}

impl UpdateNoteRequest {
    pub fn apply_to(self, note: &mut Note) -> Result<(), SharedError> {
        if let Some(related_date) = self.related_date {
            note.related_date = parse_related_date(related_date)?;
        }
        if let Some(title) = self.title {
            note.title = title;
        }
        if let Some(content) = self.content {
            note.content = content;
        }
        if let Some(is_pinned) = self.is_pinned {
            note.is_pinned = is_pinned;
        }
        Ok(())
    }
}

/// Query string of `GET /api/notes`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteFilters {
    /// `"true"` selects pinned notes, any other value unpinned ones
    pub is_pinned: Option<String>,
    pub related_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteQuery {
    pub is_pinned: Option<bool>,
    pub related_date: Option<NaiveDate>,
}

impl NoteFilters {
    pub fn validate(&self) -> Result<NoteQuery, SharedError> {
        Ok(NoteQuery {
            is_pinned: self.is_pinned.as_deref().map(|v| v == "true"),
            related_date: parse_related_date(self.related_date.clone())?,
        })
    }
}
