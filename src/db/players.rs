use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor, SqlitePool};
use uuid::Uuid;

use crate::models::common::Page;
use crate::models::player::{Player, PlayerFilter, PlayerRequest, PlayerSummary};

const SUMMARY_SELECT: &str =
    "SELECT p.*, t.name AS team_name FROM players p LEFT JOIN teams t ON t.id = p.team_id";

fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, filter: &PlayerFilter) {
    builder.push(" WHERE 1 = 1");
    if let Some(team_id) = filter.team_id {
        builder.push(" AND p.team_id = ");
        builder.push_bind(team_id);
    }
    if let Some(position) = filter.position.as_deref().filter(|p| !p.trim().is_empty()) {
        builder.push(" AND LOWER(p.position) LIKE ");
        builder.push_bind(format!("%{}%", position.trim().to_lowercase()));
    }
}

pub async fn list(pool: &SqlitePool, filter: &PlayerFilter) -> Result<Page<PlayerSummary>, sqlx::Error> {
    let pagination = filter.pagination();

    let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM players p");
    push_filters(&mut count_query, filter);
    let total: i64 = count_query.build_query_scalar().fetch_one(pool).await?;

    let mut query = QueryBuilder::new(SUMMARY_SELECT);
    push_filters(&mut query, filter);
    query.push(" ORDER BY p.name LIMIT ");
    query.push_bind(pagination.limit());
    query.push(" OFFSET ");
    query.push_bind(pagination.offset());

    let items = query.build_query_as::<PlayerSummary>().fetch_all(pool).await?;
    Ok(Page { items, total })
}

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>("SELECT * FROM players WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn find_summary<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<PlayerSummary>, sqlx::Error> {
    sqlx::query_as::<_, PlayerSummary>(&format!("{} WHERE p.id = ?", SUMMARY_SELECT))
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn exists<'e, E: SqliteExecutor<'e>>(executor: E, id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM players WHERE id = ?)")
        .bind(id)
        .fetch_one(executor)
        .await
}

pub async fn name_exists<'e, E: SqliteExecutor<'e>>(
    executor: E,
    name: &str,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM players WHERE name = ?)")
        .bind(name.trim())
        .fetch_one(executor)
        .await
}

pub async fn list_by_team<'e, E: SqliteExecutor<'e>>(
    executor: E,
    team_id: Uuid,
) -> Result<Vec<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>("SELECT * FROM players WHERE team_id = ? ORDER BY jersey_number, name")
        .bind(team_id)
        .fetch_all(executor)
        .await
}

pub async fn find_many<'e, E: SqliteExecutor<'e>>(
    executor: E,
    ids: &[Uuid],
) -> Result<Vec<Player>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM players WHERE id IN (");
    let mut separated = query.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");
    query.build_query_as::<Player>().fetch_all(executor).await
}

/// Whether another player of `team_id` already wears `jersey_number`.
pub async fn jersey_taken<'e, E: SqliteExecutor<'e>>(
    executor: E,
    team_id: Uuid,
    jersey_number: i32,
    exclude_player: Option<Uuid>,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM players
            WHERE team_id = ? AND jersey_number = ? AND (? IS NULL OR id <> ?)
        )
        "#,
    )
    .bind(team_id)
    .bind(jersey_number)
    .bind(exclude_player)
    .bind(exclude_player)
    .fetch_one(executor)
    .await
}

pub async fn insert<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    request: &PlayerRequest,
    now: DateTime<Utc>,
) -> Result<Player, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"
        INSERT INTO players (
            id, name, position, age, nationality, team_id, height, weight,
            preferred_foot, jersey_number, photo_url, overall_rating, is_subscribed,
            created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(request.name.trim())
    .bind(request.position.trim())
    .bind(request.age)
    .bind(&request.nationality)
    .bind(request.team_id)
    .bind(request.height)
    .bind(request.weight)
    .bind(&request.preferred_foot)
    .bind(request.jersey_number)
    .bind(&request.photo_url)
    .bind(request.overall_rating)
    .bind(request.is_subscribed)
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await
}

pub async fn update<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    request: &PlayerRequest,
    now: DateTime<Utc>,
) -> Result<Option<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"
        UPDATE players SET
            name = ?, position = ?, age = ?, nationality = ?, team_id = ?, height = ?,
            weight = ?, preferred_foot = ?, jersey_number = ?, photo_url = ?,
            overall_rating = ?, is_subscribed = ?, updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(request.name.trim())
    .bind(request.position.trim())
    .bind(request.age)
    .bind(&request.nationality)
    .bind(request.team_id)
    .bind(request.height)
    .bind(request.weight)
    .bind(&request.preferred_foot)
    .bind(request.jersey_number)
    .bind(&request.photo_url)
    .bind(request.overall_rating)
    .bind(request.is_subscribed)
    .bind(now)
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E: SqliteExecutor<'e>>(executor: E, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM players WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}
