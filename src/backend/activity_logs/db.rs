//! Database operations for activity logs

use chrono::Utc;
use sqlx::{postgres::PgRow, PgConnection, PgPool, Row};
use uuid::Uuid;

use crate::backend::activities::db::decode_text;
use crate::shared::activity::ActivityType;
use crate::shared::activity_log::ActivitySummary;
use crate::shared::{ActivityLogEntry, LogAction};

/// Append a log entry
///
/// Takes a connection rather than the pool so callers can write the entry
/// inside the transaction that changed the activity.
pub async fn insert_log(
    conn: &mut PgConnection,
    user_id: Uuid,
    activity_id: Uuid,
    action: LogAction,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO activity_logs (id, user_id, activity_id, action, timestamp)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(activity_id)
    .bind(action.as_str())
    .bind(Utc::now())
    .execute(conn)
    .await?;

    Ok(())
}

fn entry_from_row(row: &PgRow) -> Result<ActivityLogEntry, sqlx::Error> {
    Ok(ActivityLogEntry {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        activity_id: row.try_get("activity_id")?,
        action: decode_text(row, "action", LogAction::parse)?,
        timestamp: row.try_get("timestamp")?,
        activity: ActivitySummary {
            id: row.try_get("activity_id")?,
            title: row.try_get("activity_title")?,
            kind: decode_text(row, "activity_type", ActivityType::parse)?,
        },
    })
}

/// List a user's log entries, newest first
pub async fn list_logs(
    pool: &PgPool,
    user_id: Uuid,
    activity_id: Option<Uuid>,
) -> Result<Vec<ActivityLogEntry>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT l.id, l.user_id, l.activity_id, l.action, l.timestamp,
               a.title AS activity_title, a."type" AS activity_type
        FROM activity_logs l
        JOIN activities a ON a.id = l.activity_id
        WHERE l.user_id = $1
          AND ($2::uuid IS NULL OR l.activity_id = $2)
        ORDER BY l.timestamp DESC
        "#,
    )
    .bind(user_id)
    .bind(activity_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(entry_from_row).collect()
}
