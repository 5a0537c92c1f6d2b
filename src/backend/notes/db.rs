//! Database operations for notes
//!
//! Updates go through [`lock_note`] and [`save_note`] on one transaction.

use chrono::Utc;
use sqlx::{postgres::PgRow, PgConnection, PgPool, Row};
use uuid::Uuid;

use crate::backend::activities::db::decode_text;
use crate::shared::activity::Source;
use crate::shared::note::{NewNote, NoteQuery};
use crate::shared::Note;

const NOTE_COLUMNS: &str =
    "id, user_id, title, content, is_pinned, related_date, source, created_at, updated_at";

fn note_from_row(row: &PgRow) -> Result<Note, sqlx::Error> {
    Ok(Note {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        is_pinned: row.try_get("is_pinned")?,
        related_date: row.try_get("related_date")?,
        source: decode_text(row, "source", Source::parse)?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// List a user's notes, pinned first, then newest first
pub async fn list_notes(pool: &PgPool, user_id: Uuid, query: &NoteQuery) -> Result<Vec<Note>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {NOTE_COLUMNS}
        FROM notes
        WHERE user_id = $1
          AND ($2::boolean IS NULL OR is_pinned = $2)
          AND ($3::date IS NULL OR related_date = $3)
        ORDER BY is_pinned DESC, created_at DESC
        "#
    );

    let rows = sqlx::query(&sql)
        .bind(user_id)
        .bind(query.is_pinned)
        .bind(query.related_date)
        .fetch_all(pool)
        .await?;

    rows.iter().map(note_from_row).collect()
}

/// Get a note by ID, regardless of owner
pub async fn get_note(pool: &PgPool, id: Uuid) -> Result<Option<Note>, sqlx::Error> {
    let sql = format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = $1");

    sqlx::query(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .as_ref()
        .map(note_from_row)
        .transpose()
}

/// Get a note by ID and hold its row lock until the transaction ends
pub async fn lock_note(conn: &mut PgConnection, id: Uuid) -> Result<Option<Note>, sqlx::Error> {
    let sql = format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = $1 FOR UPDATE");

    sqlx::query(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?
        .as_ref()
        .map(note_from_row)
        .transpose()
}

/// Insert a note
pub async fn create_note(pool: &PgPool, user_id: Uuid, new: &NewNote) -> Result<Note, sqlx::Error> {
    let sql = format!(
        r#"
        INSERT INTO notes (id, user_id, title, content, is_pinned, related_date, source, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
        RETURNING {NOTE_COLUMNS}
        "#
    );

    let row = sqlx::query(&sql)
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&new.title)
        .bind(&new.content)
        .bind(new.is_pinned)
        .bind(new.related_date)
        .bind(new.source.as_str())
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

    note_from_row(&row)
}

/// Write every editable field of `note` back on the locking transaction
pub async fn save_note(conn: &mut PgConnection, note: &Note) -> Result<Note, sqlx::Error> {
    let sql = format!(
        r#"
        UPDATE notes
        SET title = $2, content = $3, is_pinned = $4, related_date = $5, updated_at = $6
        WHERE id = $1
        RETURNING {NOTE_COLUMNS}
        "#
    );

    let row = sqlx::query(&sql)
        .bind(note.id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(note.is_pinned)
        .bind(note.related_date)
        .bind(Utc::now())
        .fetch_one(conn)
        .await?;

    note_from_row(&row)
}

/// Delete a note
pub async fn delete_note(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM notes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
