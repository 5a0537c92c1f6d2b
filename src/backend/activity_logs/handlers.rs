/**
 * Activity Log Handlers
 *
 * `GET /api/activity-logs?activityId=<uuid>`
 */

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
};
use sqlx::PgPool;

use crate::backend::activity_logs::db;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::shared::activity_log::ActivityLogFilters;
use crate::shared::{ActivityLogEntry, ApiResponse};

/// List the caller's log entries, newest first
///
/// # Errors
///
/// * `400 VALIDATION_ERROR` - `activityId` is not a UUID
/// * `503 SERVICE_UNAVAILABLE` - database not configured
pub async fn list_logs(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    filters: Result<Query<ActivityLogFilters>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<ActivityLogEntry>>>, BackendError> {
    let Query(filters) = filters.map_err(|e| {
        tracing::warn!("Rejected activity log query: {}", e);
        BackendError::validation("activityId must be a UUID")
    })?;
    let pool = pool.ok_or_else(BackendError::database_unavailable)?;

    let entries = db::list_logs(&pool, user.user_id, filters.activity_id).await?;
    Ok(Json(ApiResponse::ok(entries)))
}
