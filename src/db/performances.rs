use chrono::{DateTime, Utc};
use sqlx::SqliteExecutor;
use uuid::Uuid;

use crate::models::performance::{
    MatchPerformance, PerformanceRequest, PerformanceWithMatch, PerformanceWithPlayer,
};

pub async fn for_match<'e, E: SqliteExecutor<'e>>(
    executor: E,
    match_id: Uuid,
) -> Result<Vec<PerformanceWithPlayer>, sqlx::Error> {
    sqlx::query_as::<_, PerformanceWithPlayer>(
        r#"
        SELECT mp.*, p.name AS player_name, p.position, p.team_id
        FROM match_performances mp
        JOIN players p ON p.id = mp.player_id
        WHERE mp.match_id = ?
        ORDER BY mp.started DESC, mp.minutes_played DESC, p.name
        "#,
    )
    .bind(match_id)
    .fetch_all(executor)
    .await
}

pub async fn recent_for_player<'e, E: SqliteExecutor<'e>>(
    executor: E,
    player_id: Uuid,
    limit: i64,
) -> Result<Vec<PerformanceWithMatch>, sqlx::Error> {
    sqlx::query_as::<_, PerformanceWithMatch>(
        r#"
        SELECT mp.*, m.match_date, m.competition,
               ht.name AS home_team_name, awt.name AS away_team_name
        FROM match_performances mp
        JOIN matches m ON m.id = mp.match_id
        JOIN teams ht ON ht.id = m.home_team_id
        JOIN teams awt ON awt.id = m.away_team_id
        WHERE mp.player_id = ?
        ORDER BY m.match_date DESC
        LIMIT ?
        "#,
    )
    .bind(player_id)
    .bind(limit)
    .fetch_all(executor)
    .await
}

pub async fn exists<'e, E: SqliteExecutor<'e>>(
    executor: E,
    match_id: Uuid,
    player_id: Uuid,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM match_performances WHERE match_id = ? AND player_id = ?)",
    )
    .bind(match_id)
    .bind(player_id)
    .fetch_one(executor)
    .await
}

pub async fn insert<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    match_id: Uuid,
    request: &PerformanceRequest,
    now: DateTime<Utc>,
) -> Result<MatchPerformance, sqlx::Error> {
    sqlx::query_as::<_, MatchPerformance>(
        r#"
        INSERT INTO match_performances (
            id, match_id, player_id, minutes_played, started, goals, assists,
            shots, shots_on_target, passes, passes_completed, key_passes,
            tackles, tackles_won, interceptions, clearances, crosses,
            crosses_completed, dribbles, dribbles_completed, fouls, fouls_drawn,
            offsides, yellow_cards, red_cards, goal_minutes, assist_minutes,
            card_minutes, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(match_id)
    .bind(request.player_id)
    .bind(request.minutes_played)
    .bind(request.started)
    .bind(request.goals)
    .bind(request.assists)
    .bind(request.shots)
    .bind(request.shots_on_target)
    .bind(request.passes)
    .bind(request.passes_completed)
    .bind(request.key_passes)
    .bind(request.tackles)
    .bind(request.tackles_won)
    .bind(request.interceptions)
    .bind(request.clearances)
    .bind(request.crosses)
    .bind(request.crosses_completed)
    .bind(request.dribbles)
    .bind(request.dribbles_completed)
    .bind(request.fouls)
    .bind(request.fouls_drawn)
    .bind(request.offsides)
    .bind(request.yellow_cards)
    .bind(request.red_cards)
    .bind(&request.goal_minutes)
    .bind(&request.assist_minutes)
    .bind(&request.card_minutes)
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await
}

pub async fn delete<'e, E: SqliteExecutor<'e>>(
    executor: E,
    match_id: Uuid,
    player_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM match_performances WHERE match_id = ? AND player_id = ?")
        .bind(match_id)
        .bind(player_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}
