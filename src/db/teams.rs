use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor, SqlitePool};
use uuid::Uuid;

use crate::models::common::Page;
use crate::models::team::{Team, TeamFilter, TeamRequest, TeamSummary, TeamTournamentEntry};

fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, filter: &TeamFilter) {
    builder.push(" WHERE 1 = 1");
    if let Some(league) = filter.league.as_deref().filter(|l| !l.trim().is_empty()) {
        builder.push(" AND LOWER(t.league) LIKE ");
        builder.push_bind(format!("%{}%", league.trim().to_lowercase()));
    }
    if let Some(country) = filter.country.as_deref().filter(|c| !c.trim().is_empty()) {
        builder.push(" AND LOWER(t.country) LIKE ");
        builder.push_bind(format!("%{}%", country.trim().to_lowercase()));
    }
}

pub async fn list(pool: &SqlitePool, filter: &TeamFilter) -> Result<Page<TeamSummary>, sqlx::Error> {
    let pagination = filter.pagination();

    let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM teams t");
    push_filters(&mut count_query, filter);
    let total: i64 = count_query.build_query_scalar().fetch_one(pool).await?;

    let mut query = QueryBuilder::new(
        "SELECT t.*, (SELECT COUNT(*) FROM players p WHERE p.team_id = t.id) AS player_count FROM teams t",
    );
    push_filters(&mut query, filter);
    query.push(" ORDER BY t.name LIMIT ");
    query.push_bind(pagination.limit());
    query.push(" OFFSET ");
    query.push_bind(pagination.offset());

    let items = query.build_query_as::<TeamSummary>().fetch_all(pool).await?;
    Ok(Page { items, total })
}

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn exists<'e, E: SqliteExecutor<'e>>(executor: E, id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM teams WHERE id = ?)")
        .bind(id)
        .fetch_one(executor)
        .await
}

pub async fn insert<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    request: &TeamRequest,
    now: DateTime<Utc>,
) -> Result<Team, sqlx::Error> {
    sqlx::query_as::<_, Team>(
        r#"
        INSERT INTO teams (
            id, name, short_name, city, country, stadium, founded,
            primary_color, secondary_color, manager, league, logo_url,
            created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(request.name.trim())
    .bind(&request.short_name)
    .bind(&request.city)
    .bind(&request.country)
    .bind(&request.stadium)
    .bind(request.founded)
    .bind(&request.primary_color)
    .bind(&request.secondary_color)
    .bind(&request.manager)
    .bind(&request.league)
    .bind(&request.logo_url)
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await
}

pub async fn update<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    request: &TeamRequest,
    now: DateTime<Utc>,
) -> Result<Option<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>(
        r#"
        UPDATE teams SET
            name = ?, short_name = ?, city = ?, country = ?, stadium = ?, founded = ?,
            primary_color = ?, secondary_color = ?, manager = ?, league = ?, logo_url = ?,
            updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(request.name.trim())
    .bind(&request.short_name)
    .bind(&request.city)
    .bind(&request.country)
    .bind(&request.stadium)
    .bind(request.founded)
    .bind(&request.primary_color)
    .bind(&request.secondary_color)
    .bind(&request.manager)
    .bind(&request.league)
    .bind(&request.logo_url)
    .bind(now)
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn tournaments_for_team<'e, E: SqliteExecutor<'e>>(
    executor: E,
    team_id: Uuid,
) -> Result<Vec<TeamTournamentEntry>, sqlx::Error> {
    sqlx::query_as::<_, TeamTournamentEntry>(
        r#"
        SELECT tr.id AS tournament_id, tr.name AS tournament_name, tr.status,
               tt.group_name, tt.points
        FROM tournament_teams tt
        JOIN tournaments tr ON tr.id = tt.tournament_id
        WHERE tt.team_id = ?
        ORDER BY tr.start_date DESC
        "#,
    )
    .bind(team_id)
    .fetch_all(executor)
    .await
}

pub async fn has_matches<'e, E: SqliteExecutor<'e>>(executor: E, team_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM matches WHERE home_team_id = ? OR away_team_id = ?)",
    )
    .bind(team_id)
    .bind(team_id)
    .fetch_one(executor)
    .await
}

/// Players keep their rows with `team_id` cleared and tournament
/// memberships go with the team; referencing matches block the delete.
pub async fn delete<'e, E: SqliteExecutor<'e>>(executor: E, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM teams WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count<'e, E: SqliteExecutor<'e>>(executor: E) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM teams")
        .fetch_one(executor)
        .await
}
