use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor, SqlitePool};
use uuid::Uuid;

use crate::models::common::Page;
use crate::models::matches::{CreateMatchRequest, Match, MatchFilter, MatchStatus, MatchSummary};

const SUMMARY_SELECT: &str = r#"
    SELECT m.*, ht.name AS home_team_name, awt.name AS away_team_name, tr.name AS tournament_name
    FROM matches m
    JOIN teams ht ON ht.id = m.home_team_id
    JOIN teams awt ON awt.id = m.away_team_id
    LEFT JOIN tournaments tr ON tr.id = m.tournament_id
"#;

fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, filter: &MatchFilter) {
    builder.push(" WHERE 1 = 1");
    if let Some(status) = filter.status {
        builder.push(" AND m.status = ");
        builder.push_bind(status);
    }
    if let Some(tournament_id) = filter.tournament_id {
        builder.push(" AND m.tournament_id = ");
        builder.push_bind(tournament_id);
    }
}

pub async fn list(pool: &SqlitePool, filter: &MatchFilter) -> Result<Page<MatchSummary>, sqlx::Error> {
    let pagination = filter.pagination();

    let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM matches m");
    push_filters(&mut count_query, filter);
    let total: i64 = count_query.build_query_scalar().fetch_one(pool).await?;

    let mut query = QueryBuilder::new(SUMMARY_SELECT);
    push_filters(&mut query, filter);
    query.push(" ORDER BY m.match_date DESC LIMIT ");
    query.push_bind(pagination.limit());
    query.push(" OFFSET ");
    query.push_bind(pagination.offset());

    let items = query.build_query_as::<MatchSummary>().fetch_all(pool).await?;
    Ok(Page { items, total })
}

/// Scheduled matches from `now` on, soonest first.
pub async fn upcoming<'e, E: SqliteExecutor<'e>>(
    executor: E,
    now: DateTime<Utc>,
    limit: i64,
) -> Result<Vec<MatchSummary>, sqlx::Error> {
    sqlx::query_as::<_, MatchSummary>(&format!(
        "{} WHERE m.status = 'Scheduled' AND m.match_date >= ? ORDER BY m.match_date ASC LIMIT ?",
        SUMMARY_SELECT
    ))
    .bind(now)
    .bind(limit)
    .fetch_all(executor)
    .await
}

/// Finished matches, most recent first.
pub async fn recent<'e, E: SqliteExecutor<'e>>(
    executor: E,
    limit: i64,
) -> Result<Vec<MatchSummary>, sqlx::Error> {
    sqlx::query_as::<_, MatchSummary>(&format!(
        "{} WHERE m.status = 'Finished' ORDER BY m.match_date DESC LIMIT ?",
        SUMMARY_SELECT
    ))
    .bind(limit)
    .fetch_all(executor)
    .await
}

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn find_summary<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<MatchSummary>, sqlx::Error> {
    sqlx::query_as::<_, MatchSummary>(&format!("{} WHERE m.id = ?", SUMMARY_SELECT))
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn exists<'e, E: SqliteExecutor<'e>>(executor: E, id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM matches WHERE id = ?)")
        .bind(id)
        .fetch_one(executor)
        .await
}

pub async fn for_tournament<'e, E: SqliteExecutor<'e>>(
    executor: E,
    tournament_id: Uuid,
) -> Result<Vec<MatchSummary>, sqlx::Error> {
    sqlx::query_as::<_, MatchSummary>(&format!(
        "{} WHERE m.tournament_id = ? ORDER BY m.match_date ASC",
        SUMMARY_SELECT
    ))
    .bind(tournament_id)
    .fetch_all(executor)
    .await
}

pub async fn insert<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    request: &CreateMatchRequest,
    now: DateTime<Utc>,
) -> Result<Match, sqlx::Error> {
    sqlx::query_as::<_, Match>(
        r#"
        INSERT INTO matches (
            id, home_team_id, away_team_id, match_date, competition, season,
            home_team_score, away_team_score, status, venue, referee, attendance,
            weather, round, tournament_id, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(request.home_team_id)
    .bind(request.away_team_id)
    .bind(request.match_date)
    .bind(&request.competition)
    .bind(&request.season)
    .bind(request.home_team_score)
    .bind(request.away_team_score)
    .bind(request.status)
    .bind(&request.venue)
    .bind(&request.referee)
    .bind(request.attendance)
    .bind(&request.weather)
    .bind(&request.round)
    .bind(request.tournament_id)
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await
}

pub async fn update_score<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    home_team_score: i32,
    away_team_score: i32,
    status: MatchStatus,
    minutes_played: Option<i32>,
    now: DateTime<Utc>,
) -> Result<Option<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>(
        r#"
        UPDATE matches SET
            home_team_score = ?, away_team_score = ?, status = ?,
            minutes_played = COALESCE(?, minutes_played), updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(home_team_score)
    .bind(away_team_score)
    .bind(status)
    .bind(minutes_played)
    .bind(now)
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn update_status<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    status: MatchStatus,
    now: DateTime<Utc>,
) -> Result<Option<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>("UPDATE matches SET status = ?, updated_at = ? WHERE id = ? RETURNING *")
        .bind(status)
        .bind(now)
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn delete<'e, E: SqliteExecutor<'e>>(executor: E, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM matches WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// `None` when the match has no analysis, otherwise its completion flag.
pub async fn analysis_completion<'e, E: SqliteExecutor<'e>>(
    executor: E,
    match_id: Uuid,
) -> Result<Option<bool>, sqlx::Error> {
    sqlx::query_scalar("SELECT is_completed FROM match_analyses WHERE match_id = ?")
        .bind(match_id)
        .fetch_optional(executor)
        .await
}
