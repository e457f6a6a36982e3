use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor, SqlitePool};
use uuid::Uuid;

use crate::models::common::Page;
use crate::models::tournament::{
    Tournament, TournamentFilter, TournamentRequest, TournamentStatus, TournamentSummary,
};

const SUMMARY_SELECT: &str = r#"
    SELECT tr.*,
           (SELECT COUNT(*) FROM tournament_teams tt WHERE tt.tournament_id = tr.id) AS teams_count,
           (SELECT COUNT(*) FROM matches m WHERE m.tournament_id = tr.id) AS matches_count
    FROM tournaments tr
"#;

fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, filter: &TournamentFilter) {
    builder.push(" WHERE 1 = 1");
    if let Some(status) = filter.status {
        builder.push(" AND tr.status = ");
        builder.push_bind(status);
    }
}

pub async fn list(
    pool: &SqlitePool,
    filter: &TournamentFilter,
) -> Result<Page<TournamentSummary>, sqlx::Error> {
    let pagination = filter.pagination();

    let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM tournaments tr");
    push_filters(&mut count_query, filter);
    let total: i64 = count_query.build_query_scalar().fetch_one(pool).await?;

    let mut query = QueryBuilder::new(SUMMARY_SELECT);
    push_filters(&mut query, filter);
    query.push(" ORDER BY tr.start_date DESC LIMIT ");
    query.push_bind(pagination.limit());
    query.push(" OFFSET ");
    query.push_bind(pagination.offset());

    let items = query.build_query_as::<TournamentSummary>().fetch_all(pool).await?;
    Ok(Page { items, total })
}

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<Tournament>, sqlx::Error> {
    sqlx::query_as::<_, Tournament>("SELECT * FROM tournaments WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn exists<'e, E: SqliteExecutor<'e>>(executor: E, id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tournaments WHERE id = ?)")
        .bind(id)
        .fetch_one(executor)
        .await
}

pub async fn insert<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    request: &TournamentRequest,
    now: DateTime<Utc>,
) -> Result<Tournament, sqlx::Error> {
    sqlx::query_as::<_, Tournament>(
        r#"
        INSERT INTO tournaments (
            id, name, description, format, status, start_date, end_date, season,
            max_teams, organizer, logo_url, rules, prize_pool, currency,
            created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(request.name.trim())
    .bind(&request.description)
    .bind(&request.format)
    .bind(request.status)
    .bind(request.start_date)
    .bind(request.end_date)
    .bind(&request.season)
    .bind(request.max_teams)
    .bind(&request.organizer)
    .bind(&request.logo_url)
    .bind(&request.rules)
    .bind(request.prize_pool)
    .bind(&request.currency)
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await
}

pub async fn update<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    request: &TournamentRequest,
    now: DateTime<Utc>,
) -> Result<Option<Tournament>, sqlx::Error> {
    sqlx::query_as::<_, Tournament>(
        r#"
        UPDATE tournaments SET
            name = ?, description = ?, format = ?, status = ?, start_date = ?,
            end_date = ?, season = ?, max_teams = ?, organizer = ?, logo_url = ?,
            rules = ?, prize_pool = ?, currency = ?, updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(request.name.trim())
    .bind(&request.description)
    .bind(&request.format)
    .bind(request.status)
    .bind(request.start_date)
    .bind(request.end_date)
    .bind(&request.season)
    .bind(request.max_teams)
    .bind(&request.organizer)
    .bind(&request.logo_url)
    .bind(&request.rules)
    .bind(request.prize_pool)
    .bind(&request.currency)
    .bind(now)
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn update_status<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    status: TournamentStatus,
    now: DateTime<Utc>,
) -> Result<Option<Tournament>, sqlx::Error> {
    sqlx::query_as::<_, Tournament>(
        "UPDATE tournaments SET status = ?, updated_at = ? WHERE id = ? RETURNING *",
    )
    .bind(status)
    .bind(now)
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Standings rows cascade; matches keep their rows with `tournament_id` cleared.
pub async fn delete<'e, E: SqliteExecutor<'e>>(executor: E, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tournaments WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn team_count<'e, E: SqliteExecutor<'e>>(
    executor: E,
    tournament_id: Uuid,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM tournament_teams WHERE tournament_id = ?")
        .bind(tournament_id)
        .fetch_one(executor)
        .await
}

pub async fn is_member<'e, E: SqliteExecutor<'e>>(
    executor: E,
    tournament_id: Uuid,
    team_id: Uuid,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM tournament_teams WHERE tournament_id = ? AND team_id = ?)",
    )
    .bind(tournament_id)
    .bind(team_id)
    .fetch_one(executor)
    .await
}

/// New members start with an all-zero standings row.
pub async fn add_team<'e, E: SqliteExecutor<'e>>(
    executor: E,
    tournament_id: Uuid,
    team_id: Uuid,
    group_name: &str,
    now: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO tournament_teams (tournament_id, team_id, joined_at, group_name) VALUES (?, ?, ?, ?)",
    )
    .bind(tournament_id)
    .bind(team_id)
    .bind(now)
    .bind(group_name)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn remove_team<'e, E: SqliteExecutor<'e>>(
    executor: E,
    tournament_id: Uuid,
    team_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tournament_teams WHERE tournament_id = ? AND team_id = ?")
        .bind(tournament_id)
        .bind(team_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}
