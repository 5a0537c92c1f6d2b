/**
 * Note Handlers
 *
 * CRUD over the caller's notes and the pin toggle. Ownership rules match
 * the activity handlers: 404 for a missing or malformed ID, 403 for a note
 * owned by another user.
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::error::{ApiJson, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::notes::db;
use crate::shared::note::{CreateNoteRequest, NoteFilters, UpdateNoteRequest};
use crate::shared::{ApiResponse, Note};

fn note_not_found() -> BackendError {
    BackendError::not_found("Note not found")
}

fn parse_id(id: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(id).map_err(|_| note_not_found())
}

fn check_owner(note: Option<Note>, user_id: Uuid) -> Result<Note, BackendError> {
    let note = note.ok_or_else(note_not_found)?;

    if note.user_id != user_id {
        tracing::warn!("User {} denied access to note {}", user_id, note.id);
        return Err(BackendError::forbidden());
    }
    Ok(note)
}

async fn owned_note(pool: &PgPool, user_id: Uuid, id: &str) -> Result<Note, BackendError> {
    let id = parse_id(id)?;
    check_owner(db::get_note(pool, id).await?, user_id)
}

/// Message returned by the pin toggle
pub fn pin_message(is_pinned: bool) -> &'static str {
    if is_pinned {
        "Note pinned"
    } else {
        "Note unpinned"
    }
}

/// `GET /api/notes`
///
/// Filters: `isPinned` (`"true"` selects pinned notes, any other value
/// unpinned ones) and `relatedDate` (YYYY-MM-DD).
pub async fn list_notes(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Query(filters): Query<NoteFilters>,
) -> Result<Json<ApiResponse<Vec<Note>>>, BackendError> {
    let query = filters.validate()?;
    let pool = pool.ok_or_else(BackendError::database_unavailable)?;

    let notes = db::list_notes(&pool, user.user_id, &query).await?;
    Ok(Json(ApiResponse::ok(notes)))
}

/// `POST /api/notes`
pub async fn create_note(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreateNoteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Note>>), BackendError> {
    let new = request.validate()?;
    let pool = pool.ok_or_else(BackendError::database_unavailable)?;

    let note = db::create_note(&pool, user.user_id, &new).await?;
    tracing::info!("Note {} created by {}", note.id, user.user_id);

    Ok((StatusCode::CREATED, Json(ApiResponse::with_message(note, "Note created"))))
}

/// `GET /api/notes/{id}`
pub async fn get_note(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Note>>, BackendError> {
    let pool = pool.ok_or_else(BackendError::database_unavailable)?;
    let note = owned_note(&pool, user.user_id, &id).await?;
    Ok(Json(ApiResponse::ok(note)))
}

/// `PUT /api/notes/{id}`
pub async fn update_note(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateNoteRequest>,
) -> Result<Json<ApiResponse<Note>>, BackendError> {
    let pool = pool.ok_or_else(BackendError::database_unavailable)?;
    let id = parse_id(&id)?;

    let mut tx = pool.begin().await?;
    let mut note = check_owner(db::lock_note(&mut *tx, id).await?, user.user_id)?;
    request.apply_to(&mut note)?;
    let updated = db::save_note(&mut *tx, &note).await?;
    tx.commit().await?;

    Ok(Json(ApiResponse::with_message(updated, "Note updated")))
}

/// `DELETE /api/notes/{id}`
pub async fn delete_note(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, BackendError> {
    let pool = pool.ok_or_else(BackendError::database_unavailable)?;
    let note = owned_note(&pool, user.user_id, &id).await?;

    db::delete_note(&pool, note.id).await?;
    tracing::info!("Note {} deleted", note.id);

    Ok(Json(ApiResponse::with_message((), "Note deleted")))
}

/// `PATCH /api/notes/{id}/pin`
pub async fn toggle_pin(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Note>>, BackendError> {
    let pool = pool.ok_or_else(BackendError::database_unavailable)?;
    let id = parse_id(&id)?;

    let mut tx = pool.begin().await?;
    let mut note = check_owner(db::lock_note(&mut *tx, id).await?, user.user_id)?;
    note.is_pinned = !note.is_pinned;
    let updated = db::save_note(&mut *tx, &note).await?;
    tx.commit().await?;
    let message = pin_message(updated.is_pinned);

    Ok(Json(ApiResponse::with_message(updated, message)))
}
