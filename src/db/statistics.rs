use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor, SqlitePool};
use uuid::Uuid;

use crate::models::common::Page;
use crate::models::statistics::{PlayerStatistics, StatisticsFilter, StatisticsRequest};

fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, filter: &StatisticsFilter) {
    builder.push(" WHERE 1 = 1");
    if let Some(player_id) = filter.player_id {
        builder.push(" AND player_id = ");
        builder.push_bind(player_id);
    }
    if let Some(season) = filter.season.as_deref().filter(|s| !s.trim().is_empty()) {
        builder.push(" AND season = ");
        builder.push_bind(season.trim().to_string());
    }
}

pub async fn list(
    pool: &SqlitePool,
    filter: &StatisticsFilter,
) -> Result<Page<PlayerStatistics>, sqlx::Error> {
    let pagination = filter.pagination();

    let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM player_statistics");
    push_filters(&mut count_query, filter);
    let total: i64 = count_query.build_query_scalar().fetch_one(pool).await?;

    let mut query = QueryBuilder::new("SELECT * FROM player_statistics");
    push_filters(&mut query, filter);
    query.push(" ORDER BY season DESC, created_at DESC LIMIT ");
    query.push_bind(pagination.limit());
    query.push(" OFFSET ");
    query.push_bind(pagination.offset());

    let items = query.build_query_as::<PlayerStatistics>().fetch_all(pool).await?;
    Ok(Page { items, total })
}

/// All seasons of one player, newest first.
pub async fn for_player<'e, E: SqliteExecutor<'e>>(
    executor: E,
    player_id: Uuid,
) -> Result<Vec<PlayerStatistics>, sqlx::Error> {
    sqlx::query_as::<_, PlayerStatistics>(
        "SELECT * FROM player_statistics WHERE player_id = ? ORDER BY season DESC",
    )
    .bind(player_id)
    .fetch_all(executor)
    .await
}

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<PlayerStatistics>, sqlx::Error> {
    sqlx::query_as::<_, PlayerStatistics>("SELECT * FROM player_statistics WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn exists_for_season<'e, E: SqliteExecutor<'e>>(
    executor: E,
    player_id: Uuid,
    season: &str,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM player_statistics WHERE player_id = ? AND season = ?)",
    )
    .bind(player_id)
    .bind(season.trim())
    .fetch_one(executor)
    .await
}

pub async fn insert<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    request: &StatisticsRequest,
    now: DateTime<Utc>,
) -> Result<PlayerStatistics, sqlx::Error> {
    sqlx::query_as::<_, PlayerStatistics>(
        r#"
        INSERT INTO player_statistics (
            id, player_id, season, games_played, games_started, minutes_played,
            goals, assists, shots_total, shots_on_target, key_passes,
            big_chances_created, big_chances_missed, tackles, interceptions,
            clearances, blocked_shots, fouls, fouls_drawn, passes_attempted,
            passes_completed, crosses_attempted, crosses_completed, distance_covered,
            sprints_completed, yellow_cards, red_cards, average_rating,
            wins, draws, losses, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(request.player_id)
    .bind(request.season.trim())
    .bind(request.games_played)
    .bind(request.games_started)
    .bind(request.minutes_played)
    .bind(request.goals)
    .bind(request.assists)
    .bind(request.shots_total)
    .bind(request.shots_on_target)
    .bind(request.key_passes)
    .bind(request.big_chances_created)
    .bind(request.big_chances_missed)
    .bind(request.tackles)
    .bind(request.interceptions)
    .bind(request.clearances)
    .bind(request.blocked_shots)
    .bind(request.fouls)
    .bind(request.fouls_drawn)
    .bind(request.passes_attempted)
    .bind(request.passes_completed)
    .bind(request.crosses_attempted)
    .bind(request.crosses_completed)
    .bind(request.distance_covered)
    .bind(request.sprints_completed)
    .bind(request.yellow_cards)
    .bind(request.red_cards)
    .bind(request.average_rating)
    .bind(request.wins)
    .bind(request.draws)
    .bind(request.losses)
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await
}

pub async fn delete<'e, E: SqliteExecutor<'e>>(executor: E, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM player_statistics WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}
