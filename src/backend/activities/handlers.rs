/**
 * Activity Handlers
 *
 * CRUD over the caller's activities plus the status shortcut used by the
 * checklist view. Every handler runs behind `auth_middleware`; a record that
 * exists but belongs to someone else answers 403, a missing or malformed ID
 * answers 404.
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::activities::db;
use crate::backend::error::{ApiJson, BackendError};
use crate::backend::middleware::AuthUser;
use crate::shared::activity::{
    Activity, ActivityFilters, CreateActivityRequest, UpdateActivityRequest, UpdateStatusRequest,
};
use crate::shared::dates::today_in_reference;
use crate::shared::{ApiResponse, LogAction};

fn activity_not_found() -> BackendError {
    BackendError::not_found("Activity not found")
}

fn parse_id(id: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(id).map_err(|_| activity_not_found())
}

/// Check that `user_id` owns the activity that was found
fn check_owner(activity: Option<Activity>, user_id: Uuid) -> Result<Activity, BackendError> {
    let activity = activity.ok_or_else(activity_not_found)?;

    if activity.user_id != user_id {
        tracing::warn!("User {} denied access to activity {}", user_id, activity.id);
        return Err(BackendError::forbidden());
    }
    Ok(activity)
}

/// Load an activity and check that `user_id` owns it
async fn owned_activity(pool: &PgPool, user_id: Uuid, id: &str) -> Result<Activity, BackendError> {
    let id = parse_id(id)?;
    check_owner(db::get_activity(pool, id).await?, user_id)
}

/// `GET /api/activities`
///
/// Filters: `date` (YYYY-MM-DD), `type`, `status`, `priority`. Unknown enum
/// values are ignored rather than rejected.
pub async fn list_activities(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Query(filters): Query<ActivityFilters>,
) -> Result<Json<ApiResponse<Vec<Activity>>>, BackendError> {
    let query = filters.validate()?;
    let pool = pool.ok_or_else(BackendError::database_unavailable)?;

    let activities = db::list_activities(&pool, user.user_id, &query).await?;
    Ok(Json(ApiResponse::ok(activities)))
}

/// `POST /api/activities`
///
/// # Example Request
///
/// ```json
/// {"title": "Meeting", "type": "schedule", "date": "2025-03-03", "startTime": "09:00"}
/// ```
pub async fn create_activity(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreateActivityRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Activity>>), BackendError> {
    let new = request.validate(today_in_reference(Utc::now()))?;
    let pool = pool.ok_or_else(BackendError::database_unavailable)?;

    let activity = db::create_activity(&pool, user.user_id, &new).await?;
    tracing::info!("Activity {} created by {}", activity.id, user.user_id);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(activity, "Activity created")),
    ))
}

/// `GET /api/activities/{id}`
pub async fn get_activity(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Activity>>, BackendError> {
    let pool = pool.ok_or_else(BackendError::database_unavailable)?;
    let activity = owned_activity(&pool, user.user_id, &id).await?;
    Ok(Json(ApiResponse::ok(activity)))
}

/// `PUT /api/activities/{id}`
///
/// Partial update. Omitted fields are kept; `null` clears a nullable field.
pub async fn update_activity(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateActivityRequest>,
) -> Result<Json<ApiResponse<Activity>>, BackendError> {
    let pool = pool.ok_or_else(BackendError::database_unavailable)?;
    let id = parse_id(&id)?;

    let mut tx = pool.begin().await?;
    let mut activity = check_owner(db::lock_activity(&mut *tx, id).await?, user.user_id)?;
    request.apply_to(&mut activity)?;
    let updated = db::save_activity(&mut *tx, &activity, LogAction::Updated).await?;
    tx.commit().await?;
    tracing::info!("Activity {} updated", updated.id);

    Ok(Json(ApiResponse::with_message(updated, "Activity updated")))
}

/// `DELETE /api/activities/{id}`
pub async fn delete_activity(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, BackendError> {
    let pool = pool.ok_or_else(BackendError::database_unavailable)?;
    let activity = owned_activity(&pool, user.user_id, &id).await?;

    db::delete_activity(&pool, activity.id).await?;
    tracing::info!("Activity {} deleted", activity.id);

    Ok(Json(ApiResponse::with_message((), "Activity deleted")))
}

/// `PATCH /api/activities/{id}/status`
///
/// The status is checked before the activity is looked up, so an invalid
/// value is a 400 even for an unknown ID.
pub async fn update_status(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<Activity>>, BackendError> {
    let status = request.validate()?;
    let pool = pool.ok_or_else(BackendError::database_unavailable)?;
    let id = parse_id(&id)?;

    let mut tx = pool.begin().await?;
    let mut activity = check_owner(db::lock_activity(&mut *tx, id).await?, user.user_id)?;
    activity.status = status;
    let updated = db::save_activity(&mut *tx, &activity, LogAction::for_status(status)).await?;
    tx.commit().await?;
    tracing::info!("Activity {} marked {}", updated.id, status.as_str());

    Ok(Json(ApiResponse::with_message(updated, "Status updated")))
}
