use chrono::{DateTime, Utc};
use sqlx::SqliteExecutor;
use uuid::Uuid;

use crate::models::analysis::{AnalysisRequest, AnalysisView, MatchAnalysis, PendingAnalysis};

const VIEW_SELECT: &str = r#"
    SELECT a.*, p.name AS man_of_the_match_name
    FROM match_analyses a
    LEFT JOIN players p ON p.id = a.man_of_the_match_id
"#;

pub async fn find_view_by_match<'e, E: SqliteExecutor<'e>>(
    executor: E,
    match_id: Uuid,
) -> Result<Option<AnalysisView>, sqlx::Error> {
    sqlx::query_as::<_, AnalysisView>(&format!("{} WHERE a.match_id = ?", VIEW_SELECT))
        .bind(match_id)
        .fetch_optional(executor)
        .await
}

pub async fn find_view_by_id<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<AnalysisView>, sqlx::Error> {
    sqlx::query_as::<_, AnalysisView>(&format!("{} WHERE a.id = ?", VIEW_SELECT))
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<MatchAnalysis>, sqlx::Error> {
    sqlx::query_as::<_, MatchAnalysis>("SELECT * FROM match_analyses WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn exists_for_match<'e, E: SqliteExecutor<'e>>(
    executor: E,
    match_id: Uuid,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM match_analyses WHERE match_id = ?)")
        .bind(match_id)
        .fetch_one(executor)
        .await
}

pub async fn insert<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    match_id: Uuid,
    analyzed_by: Uuid,
    request: &AnalysisRequest,
    now: DateTime<Utc>,
) -> Result<MatchAnalysis, sqlx::Error> {
    sqlx::query_as::<_, MatchAnalysis>(
        r#"
        INSERT INTO match_analyses (
            id, match_id, analyzed_by, man_of_the_match_id, man_of_the_match_reason,
            match_summary, key_moments, tactical_analysis, home_team_analysis,
            away_team_analysis, home_team_possession, away_team_possession,
            home_team_shots, away_team_shots, home_team_shots_on_target,
            away_team_shots_on_target, home_team_corners, away_team_corners,
            home_team_fouls, away_team_fouls, home_team_yellow_cards,
            away_team_yellow_cards, home_team_red_cards, away_team_red_cards,
            home_team_offsides, away_team_offsides, match_quality_rating,
            match_quality_comments, is_completed, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(match_id)
    .bind(analyzed_by)
    .bind(request.man_of_the_match_id)
    .bind(&request.man_of_the_match_reason)
    .bind(&request.match_summary)
    .bind(&request.key_moments)
    .bind(&request.tactical_analysis)
    .bind(&request.home_team_analysis)
    .bind(&request.away_team_analysis)
    .bind(request.home_team_possession)
    .bind(request.away_team_possession)
    .bind(request.home_team_shots)
    .bind(request.away_team_shots)
    .bind(request.home_team_shots_on_target)
    .bind(request.away_team_shots_on_target)
    .bind(request.home_team_corners)
    .bind(request.away_team_corners)
    .bind(request.home_team_fouls)
    .bind(request.away_team_fouls)
    .bind(request.home_team_yellow_cards)
    .bind(request.away_team_yellow_cards)
    .bind(request.home_team_red_cards)
    .bind(request.away_team_red_cards)
    .bind(request.home_team_offsides)
    .bind(request.away_team_offsides)
    .bind(request.match_quality_rating)
    .bind(&request.match_quality_comments)
    .bind(request.is_completed)
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await
}

pub async fn update<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    request: &AnalysisRequest,
    now: DateTime<Utc>,
) -> Result<Option<MatchAnalysis>, sqlx::Error> {
    sqlx::query_as::<_, MatchAnalysis>(
        r#"
        UPDATE match_analyses SET
            man_of_the_match_id = ?, man_of_the_match_reason = ?, match_summary = ?,
            key_moments = ?, tactical_analysis = ?, home_team_analysis = ?,
            away_team_analysis = ?, home_team_possession = ?, away_team_possession = ?,
            home_team_shots = ?, away_team_shots = ?, home_team_shots_on_target = ?,
            away_team_shots_on_target = ?, home_team_corners = ?, away_team_corners = ?,
            home_team_fouls = ?, away_team_fouls = ?, home_team_yellow_cards = ?,
            away_team_yellow_cards = ?, home_team_red_cards = ?, away_team_red_cards = ?,
            home_team_offsides = ?, away_team_offsides = ?, match_quality_rating = ?,
            match_quality_comments = ?, is_completed = ?, updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(request.man_of_the_match_id)
    .bind(&request.man_of_the_match_reason)
    .bind(&request.match_summary)
    .bind(&request.key_moments)
    .bind(&request.tactical_analysis)
    .bind(&request.home_team_analysis)
    .bind(&request.away_team_analysis)
    .bind(request.home_team_possession)
    .bind(request.away_team_possession)
    .bind(request.home_team_shots)
    .bind(request.away_team_shots)
    .bind(request.home_team_shots_on_target)
    .bind(request.away_team_shots_on_target)
    .bind(request.home_team_corners)
    .bind(request.away_team_corners)
    .bind(request.home_team_fouls)
    .bind(request.away_team_fouls)
    .bind(request.home_team_yellow_cards)
    .bind(request.away_team_yellow_cards)
    .bind(request.home_team_red_cards)
    .bind(request.away_team_red_cards)
    .bind(request.home_team_offsides)
    .bind(request.away_team_offsides)
    .bind(request.match_quality_rating)
    .bind(&request.match_quality_comments)
    .bind(request.is_completed)
    .bind(now)
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E: SqliteExecutor<'e>>(executor: E, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM match_analyses WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Finished matches with no analysis yet, most recent first.
pub async fn pending<'e, E: SqliteExecutor<'e>>(
    executor: E,
) -> Result<Vec<PendingAnalysis>, sqlx::Error> {
    sqlx::query_as::<_, PendingAnalysis>(
        r#"
        SELECT m.id AS match_id, ht.name AS home_team_name, awt.name AS away_team_name,
               m.home_team_score, m.away_team_score, m.match_date, m.competition, m.venue
        FROM matches m
        JOIN teams ht ON ht.id = m.home_team_id
        JOIN teams awt ON awt.id = m.away_team_id
        LEFT JOIN match_analyses a ON a.match_id = m.id
        WHERE m.status = 'Finished' AND a.id IS NULL
        ORDER BY m.match_date DESC
        "#,
    )
    .fetch_all(executor)
    .await
}
