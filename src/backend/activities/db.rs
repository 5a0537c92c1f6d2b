//! Database operations for activities
//!
//! Enum fields live in TEXT columns and are parsed back through the shared
//! `parse` functions; an unknown value surfaces as `sqlx::Error::Decode`.
//! Every mutation writes its activity log entry in the same transaction.
//! Updates read the row with [`lock_activity`] inside that transaction, so a
//! concurrent update waits instead of being overwritten by a stale copy.

use chrono::Utc;
use sqlx::{postgres::PgRow, PgConnection, PgPool, Row};
use uuid::Uuid;

use crate::backend::activity_logs::db::insert_log;
use crate::shared::activity::{
    Activity, ActivityQuery, ActivityStatus, ActivityType, NewActivity, Priority, Source,
};
use crate::shared::{LogAction, SharedError};

const ACTIVITY_COLUMNS: &str = r#"id, user_id, title, description, "type", date, start_time, end_time,
    status, priority, link_url, source, created_at, updated_at"#;

/// Read a TEXT column holding one of a fixed set of values
pub(crate) fn decode_text<T>(
    row: &PgRow,
    column: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    parse(&raw).ok_or_else(|| sqlx::Error::Decode(Box::new(SharedError::decode(column, raw))))
}

/// Nullable variant of [`decode_text`]
pub(crate) fn decode_optional_text<T>(
    row: &PgRow,
    column: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, sqlx::Error> {
    let raw: Option<String> = row.try_get(column)?;
    raw.map(|raw| {
        parse(&raw).ok_or_else(|| sqlx::Error::Decode(Box::new(SharedError::decode(column, raw))))
    })
    .transpose()
}

fn activity_from_row(row: &PgRow) -> Result<Activity, sqlx::Error> {
    Ok(Activity {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        kind: decode_text(row, "type", ActivityType::parse)?,
        date: row.try_get("date")?,
        start_time: row.try_get("start_time")?,
        end_time: row.try_get("end_time")?,
        status: decode_text(row, "status", ActivityStatus::parse)?,
        priority: decode_optional_text(row, "priority", Priority::parse)?,
        link_url: row.try_get("link_url")?,
        source: decode_text(row, "source", Source::parse)?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// List a user's activities, ordered by date then start time
pub async fn list_activities(
    pool: &PgPool,
    user_id: Uuid,
    query: &ActivityQuery,
) -> Result<Vec<Activity>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {ACTIVITY_COLUMNS}
        FROM activities
        WHERE user_id = $1
          AND ($2::date IS NULL OR date = $2)
          AND ($3::text IS NULL OR "type" = $3)
          AND ($4::text IS NULL OR status = $4)
          AND ($5::text IS NULL OR priority = $5)
        ORDER BY date ASC, start_time ASC
        "#
    );

    let rows = sqlx::query(&sql)
        .bind(user_id)
        .bind(query.date)
        .bind(query.kind.map(|k| k.as_str()))
        .bind(query.status.map(|s| s.as_str()))
        .bind(query.priority.map(|p| p.as_str()))
        .fetch_all(pool)
        .await?;

    rows.iter().map(activity_from_row).collect()
}

/// Get an activity by ID, regardless of owner
pub async fn get_activity(pool: &PgPool, id: Uuid) -> Result<Option<Activity>, sqlx::Error> {
    let sql = format!("SELECT {ACTIVITY_COLUMNS} FROM activities WHERE id = $1");

    sqlx::query(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .as_ref()
        .map(activity_from_row)
        .transpose()
}

/// Get an activity by ID and hold its row lock until the transaction ends
pub async fn lock_activity(conn: &mut PgConnection, id: Uuid) -> Result<Option<Activity>, sqlx::Error> {
    let sql = format!("SELECT {ACTIVITY_COLUMNS} FROM activities WHERE id = $1 FOR UPDATE");

    sqlx::query(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?
        .as_ref()
        .map(activity_from_row)
        .transpose()
}

/// Insert an activity and log `created`
pub async fn create_activity(
    pool: &PgPool,
    user_id: Uuid,
    new: &NewActivity,
) -> Result<Activity, sqlx::Error> {
    let now = Utc::now();
    let sql = format!(
        r#"
        INSERT INTO activities (id, user_id, title, description, "type", date, start_time, end_time,
                                status, priority, link_url, source, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
        RETURNING {ACTIVITY_COLUMNS}
        "#
    );

    let mut tx = pool.begin().await?;

    let row = sqlx::query(&sql)
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.kind.as_str())
        .bind(new.date)
        .bind(&new.start_time)
        .bind(&new.end_time)
        .bind(new.status.as_str())
        .bind(new.priority.map(|p| p.as_str()))
        .bind(&new.link_url)
        .bind(new.source.as_str())
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;
    let activity = activity_from_row(&row)?;

    insert_log(&mut *tx, user_id, activity.id, LogAction::Created).await?;
    tx.commit().await?;

    Ok(activity)
}

/// Write every editable field of `activity` back and log `action`
///
/// `conn` must be the transaction that locked the row via [`lock_activity`];
/// the caller commits.
pub async fn save_activity(
    conn: &mut PgConnection,
    activity: &Activity,
    action: LogAction,
) -> Result<Activity, sqlx::Error> {
    let sql = format!(
        r#"
        UPDATE activities
        SET title = $2, description = $3, "type" = $4, date = $5, start_time = $6, end_time = $7,
            status = $8, priority = $9, link_url = $10, updated_at = $11
        WHERE id = $1
        RETURNING {ACTIVITY_COLUMNS}
        "#
    );

    let row = sqlx::query(&sql)
        .bind(activity.id)
        .bind(&activity.title)
        .bind(&activity.description)
        .bind(activity.kind.as_str())
        .bind(activity.date)
        .bind(&activity.start_time)
        .bind(&activity.end_time)
        .bind(activity.status.as_str())
        .bind(activity.priority.map(|p| p.as_str()))
        .bind(&activity.link_url)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;
    let updated = activity_from_row(&row)?;

    insert_log(conn, updated.user_id, updated.id, action).await?;

    Ok(updated)
}

/// Delete an activity together with its log entries
pub async fn delete_activity(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM activity_logs WHERE activity_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM activities WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await
}
