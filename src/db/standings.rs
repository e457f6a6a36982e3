use sqlx::{SqliteConnection, SqliteExecutor};
use uuid::Uuid;

use crate::league::standings::{net_change, Score, StandingsDelta};
use crate::models::matches::Match;
use crate::models::tournament::StandingRow;

/// Add `delta` to one team's row. Returns whether a row was touched.
pub async fn apply_delta(
    conn: &mut SqliteConnection,
    tournament_id: Uuid,
    team_id: Uuid,
    delta: StandingsDelta,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE tournament_teams SET
            wins = wins + ?,
            draws = draws + ?,
            losses = losses + ?,
            goals_for = goals_for + ?,
            goals_against = goals_against + ?,
            goal_difference = goal_difference + ?,
            points = points + ?
        WHERE tournament_id = ? AND team_id = ?
        "#,
    )
    .bind(delta.wins)
    .bind(delta.draws)
    .bind(delta.losses)
    .bind(delta.goals_for)
    .bind(delta.goals_against)
    .bind(delta.goal_difference())
    .bind(delta.points)
    .bind(tournament_id)
    .bind(team_id)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected() > 0)
}

async fn members_present(
    conn: &mut SqliteConnection,
    tournament_id: Uuid,
    home_team_id: Uuid,
    away_team_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM tournament_teams WHERE tournament_id = ? AND team_id IN (?, ?)",
    )
    .bind(tournament_id)
    .bind(home_team_id)
    .bind(away_team_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(count == 2)
}

fn counted_score(game: &Match, tournament_id: Uuid) -> Option<Score> {
    (game.counts_toward_standings() && game.tournament_id == Some(tournament_id))
        .then(|| Score::new(game.home_team_score, game.away_team_score))
}

/// Move standings from what `before` contributed to what `after`
/// contributes. `before = None` for a new match, `after = None` for a
/// deleted one. Must run inside the same transaction as the match write.
pub async fn record_result_change(
    conn: &mut SqliteConnection,
    before: Option<&Match>,
    after: Option<&Match>,
) -> Result<(), sqlx::Error> {
    let Some(game) = after.or(before) else {
        return Ok(());
    };

    let mut tournaments: Vec<Uuid> = Vec::new();
    for id in [before, after].into_iter().flatten().filter_map(|m| m.tournament_id) {
        if !tournaments.contains(&id) {
            tournaments.push(id);
        }
    }

    for tournament_id in tournaments {
        let previous = before.and_then(|m| counted_score(m, tournament_id));
        let next = after.and_then(|m| counted_score(m, tournament_id));
        let (home_delta, away_delta) = net_change(previous, next);
        if home_delta.is_zero() && away_delta.is_zero() {
            continue;
        }

        if !members_present(conn, tournament_id, game.home_team_id, game.away_team_id).await? {
            tracing::warn!(
                "Match {} references tournament {} but its teams have no standings rows; skipping",
                game.id,
                tournament_id
            );
            continue;
        }

        apply_delta(conn, tournament_id, game.home_team_id, home_delta).await?;
        apply_delta(conn, tournament_id, game.away_team_id, away_delta).await?;
        tracing::info!(
            "Standings for tournament {} updated from match {}",
            tournament_id,
            game.id
        );
    }
    Ok(())
}

/// Unordered standings rows; callers rank them.
pub async fn table<'e, E: SqliteExecutor<'e>>(
    executor: E,
    tournament_id: Uuid,
) -> Result<Vec<StandingRow>, sqlx::Error> {
    sqlx::query_as::<_, StandingRow>(
        r#"
        SELECT tt.team_id, t.name AS team_name, tt.group_name, tt.joined_at,
               tt.wins + tt.draws + tt.losses AS played,
               tt.wins, tt.draws, tt.losses, tt.goals_for, tt.goals_against,
               tt.goal_difference, tt.points
        FROM tournament_teams tt
        JOIN teams t ON t.id = tt.team_id
        WHERE tt.tournament_id = ?
        "#,
    )
    .bind(tournament_id)
    .fetch_all(executor)
    .await
}
