use chrono::{DateTime, Utc};
use sqlx::SqliteExecutor;
use uuid::Uuid;

use crate::models::status::{StatusCheck, StatusCheckRequest};

pub async fn latest<'e, E: SqliteExecutor<'e>>(
    executor: E,
    limit: i64,
) -> Result<Vec<StatusCheck>, sqlx::Error> {
    sqlx::query_as::<_, StatusCheck>("SELECT * FROM status_checks ORDER BY timestamp DESC LIMIT ?")
        .bind(limit)
        .fetch_all(executor)
        .await
}

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<StatusCheck>, sqlx::Error> {
    sqlx::query_as::<_, StatusCheck>("SELECT * FROM status_checks WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn insert<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    request: &StatusCheckRequest,
    now: DateTime<Utc>,
) -> Result<StatusCheck, sqlx::Error> {
    sqlx::query_as::<_, StatusCheck>(
        r#"
        INSERT INTO status_checks (id, client_name, message, status, timestamp)
        VALUES (?, ?, ?, 'Active', ?)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(request.client_name.trim())
    .bind(request.message.as_deref().unwrap_or_default())
    .bind(now)
    .fetch_one(executor)
    .await
}

/// Round-trip used by the health probe.
pub async fn ping<'e, E: SqliteExecutor<'e>>(executor: E) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(executor).await?;
    Ok(())
}
