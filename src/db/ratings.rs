use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqliteExecutor};
use uuid::Uuid;

use crate::models::rating::{
    ManOfTheMatchEntry, PlayerRating, RatingRequest, RatingWithMatch, RatingWithPlayer,
    TopRatedPlayer, UpdateRatingRequest,
};

pub async fn for_match<'e, E: SqliteExecutor<'e>>(
    executor: E,
    match_id: Uuid,
) -> Result<Vec<RatingWithPlayer>, sqlx::Error> {
    sqlx::query_as::<_, RatingWithPlayer>(
        r#"
        SELECT r.*, p.name AS player_name
        FROM player_ratings r
        JOIN players p ON p.id = r.player_id
        WHERE r.match_id = ?
        ORDER BY r.rating DESC, p.name
        "#,
    )
    .bind(match_id)
    .fetch_all(executor)
    .await
}

pub async fn for_player<'e, E: SqliteExecutor<'e>>(
    executor: E,
    player_id: Uuid,
) -> Result<Vec<RatingWithMatch>, sqlx::Error> {
    sqlx::query_as::<_, RatingWithMatch>(
        r#"
        SELECT r.*, p.name AS player_name, m.match_date, m.competition,
               ht.name AS home_team_name, awt.name AS away_team_name
        FROM player_ratings r
        JOIN players p ON p.id = r.player_id
        JOIN matches m ON m.id = r.match_id
        JOIN teams ht ON ht.id = m.home_team_id
        JOIN teams awt ON awt.id = m.away_team_id
        WHERE r.player_id = ?
        ORDER BY m.match_date DESC
        "#,
    )
    .bind(player_id)
    .fetch_all(executor)
    .await
}

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<PlayerRating>, sqlx::Error> {
    sqlx::query_as::<_, PlayerRating>("SELECT * FROM player_ratings WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn find_view_by_id<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<RatingWithPlayer>, sqlx::Error> {
    sqlx::query_as::<_, RatingWithPlayer>(
        r#"
        SELECT r.*, p.name AS player_name
        FROM player_ratings r
        JOIN players p ON p.id = r.player_id
        WHERE r.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn exists_for_rater<'e, E: SqliteExecutor<'e>>(
    executor: E,
    match_id: Uuid,
    player_id: Uuid,
    rated_by: Uuid,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM player_ratings
            WHERE match_id = ? AND player_id = ? AND rated_by = ?
        )
        "#,
    )
    .bind(match_id)
    .bind(player_id)
    .bind(rated_by)
    .fetch_one(executor)
    .await
}

/// Inserted unflagged; the man-of-the-match flag is only ever set by
/// [`assign_man_of_the_match`].
pub async fn insert<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    rated_by: Uuid,
    request: &RatingRequest,
    now: DateTime<Utc>,
) -> Result<PlayerRating, sqlx::Error> {
    sqlx::query_as::<_, PlayerRating>(
        r#"
        INSERT INTO player_ratings (
            id, match_id, player_id, rated_by, rating, attacking_rating,
            defending_rating, passing_rating, physical_rating, mental_rating,
            comments, positive_highlights, areas_for_improvement,
            is_man_of_the_match, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(request.match_id)
    .bind(request.player_id)
    .bind(rated_by)
    .bind(request.rating)
    .bind(request.attacking_rating)
    .bind(request.defending_rating)
    .bind(request.passing_rating)
    .bind(request.physical_rating)
    .bind(request.mental_rating)
    .bind(&request.comments)
    .bind(&request.positive_highlights)
    .bind(&request.areas_for_improvement)
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await
}

pub async fn update<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    request: &UpdateRatingRequest,
    now: DateTime<Utc>,
) -> Result<Option<PlayerRating>, sqlx::Error> {
    sqlx::query_as::<_, PlayerRating>(
        r#"
        UPDATE player_ratings SET
            rating = ?, attacking_rating = ?, defending_rating = ?, passing_rating = ?,
            physical_rating = ?, mental_rating = ?, comments = ?,
            positive_highlights = ?, areas_for_improvement = ?, updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(request.rating)
    .bind(request.attacking_rating)
    .bind(request.defending_rating)
    .bind(request.passing_rating)
    .bind(request.physical_rating)
    .bind(request.mental_rating)
    .bind(&request.comments)
    .bind(&request.positive_highlights)
    .bind(&request.areas_for_improvement)
    .bind(now)
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E: SqliteExecutor<'e>>(executor: E, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM player_ratings WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn top_rated<'e, E: SqliteExecutor<'e>>(
    executor: E,
    limit: i64,
    season: Option<&str>,
) -> Result<Vec<TopRatedPlayer>, sqlx::Error> {
    let mut query = QueryBuilder::<Sqlite>::new(
        r#"
        SELECT p.id AS player_id, p.name AS player_name, p.position,
               ROUND(AVG(r.rating), 2) AS average_rating,
               COUNT(r.id) AS total_ratings,
               SUM(CASE WHEN r.is_man_of_the_match = 1 THEN 1 ELSE 0 END) AS man_of_the_match_count,
               MAX(r.rating) AS highest_rating,
               MIN(r.rating) AS lowest_rating
        FROM player_ratings r
        JOIN players p ON p.id = r.player_id
        JOIN matches m ON m.id = r.match_id
        "#,
    );
    if let Some(season) = season {
        query.push(" WHERE m.season = ");
        query.push_bind(season.to_string());
    }
    query.push(" GROUP BY p.id, p.name, p.position ORDER BY average_rating DESC, total_ratings DESC LIMIT ");
    query.push_bind(limit);

    query.build_query_as::<TopRatedPlayer>().fetch_all(executor).await
}

pub async fn man_of_the_match<'e, E: SqliteExecutor<'e>>(
    executor: E,
    limit: i64,
    season: Option<&str>,
) -> Result<Vec<ManOfTheMatchEntry>, sqlx::Error> {
    let mut query = QueryBuilder::<Sqlite>::new(
        r#"
        SELECT p.id AS player_id, p.name AS player_name, p.position,
               m.id AS match_id, m.match_date, m.competition,
               ht.name AS home_team_name, awt.name AS away_team_name,
               r.rating, COALESCE(a.man_of_the_match_reason, '') AS reason
        FROM player_ratings r
        JOIN players p ON p.id = r.player_id
        JOIN matches m ON m.id = r.match_id
        JOIN teams ht ON ht.id = m.home_team_id
        JOIN teams awt ON awt.id = m.away_team_id
        LEFT JOIN match_analyses a ON a.match_id = m.id
        WHERE r.is_man_of_the_match = 1
        "#,
    );
    if let Some(season) = season {
        query.push(" AND m.season = ");
        query.push_bind(season.to_string());
    }
    query.push(" ORDER BY m.match_date DESC LIMIT ");
    query.push_bind(limit);

    query.build_query_as::<ManOfTheMatchEntry>().fetch_all(executor).await
}

/// Player currently flagged in `match_id`, if any.
pub async fn flagged_player<'e, E: SqliteExecutor<'e>>(
    executor: E,
    match_id: Uuid,
) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT player_id FROM player_ratings WHERE match_id = ? AND is_man_of_the_match = 1",
    )
    .bind(match_id)
    .fetch_optional(executor)
    .await
}

/// Man of the match named by the match's analysis, if any.
pub async fn analysis_pick<'e, E: SqliteExecutor<'e>>(
    executor: E,
    match_id: Uuid,
) -> Result<Option<Uuid>, sqlx::Error> {
    let pick: Option<Option<Uuid>> =
        sqlx::query_scalar("SELECT man_of_the_match_id FROM match_analyses WHERE match_id = ?")
            .bind(match_id)
            .fetch_optional(executor)
            .await?;
    Ok(pick.flatten())
}

async fn clear_flags(conn: &mut SqliteConnection, match_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE player_ratings SET is_man_of_the_match = 0 WHERE match_id = ? AND is_man_of_the_match = 1",
    )
    .bind(match_id)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected())
}

async fn sync_analysis(
    conn: &mut SqliteConnection,
    match_id: Uuid,
    player_id: Option<Uuid>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE match_analyses SET man_of_the_match_id = ? WHERE match_id = ?")
        .bind(player_id)
        .bind(match_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Make `player_id` the single man of the match. Clears every flag in the
/// match, flags the player's earliest rating and points the analysis at
/// the player. Returns whether a rating was flagged; a player without
/// ratings is still recorded on the analysis.
pub async fn assign_man_of_the_match(
    conn: &mut SqliteConnection,
    match_id: Uuid,
    player_id: Uuid,
) -> Result<bool, sqlx::Error> {
    clear_flags(conn, match_id).await?;

    let flagged = sqlx::query(
        r#"
        UPDATE player_ratings SET is_man_of_the_match = 1
        WHERE id = (
            SELECT id FROM player_ratings
            WHERE match_id = ? AND player_id = ?
            ORDER BY created_at ASC, id ASC
            LIMIT 1
        )
        "#,
    )
    .bind(match_id)
    .bind(player_id)
    .execute(&mut *conn)
    .await?
    .rows_affected()
        > 0;

    sync_analysis(conn, match_id, Some(player_id)).await?;
    tracing::info!("Man of the match for {} set to player {}", match_id, player_id);
    Ok(flagged)
}

/// Point the analysis at whoever already holds the flag, if anyone does.
pub async fn mirror_flag_on_analysis(
    conn: &mut SqliteConnection,
    match_id: Uuid,
) -> Result<Option<Uuid>, sqlx::Error> {
    let holder = flagged_player(&mut *conn, match_id).await?;
    if holder.is_some() {
        sync_analysis(conn, match_id, holder).await?;
    }
    Ok(holder)
}

/// Drop every flag in the match and clear the analysis' pick.
pub async fn release_man_of_the_match(
    conn: &mut SqliteConnection,
    match_id: Uuid,
) -> Result<(), sqlx::Error> {
    let cleared = clear_flags(conn, match_id).await?;
    sync_analysis(conn, match_id, None).await?;
    tracing::info!("Man of the match for {} cleared ({} flags)", match_id, cleared);
    Ok(())
}
