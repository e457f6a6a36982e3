use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db::helpers::require_record;
use crate::db::{matches, performances, standings, teams, tournaments};
use crate::error::ApiError;
use crate::handlers::{created, ok, paged};
use crate::models::common::LimitQuery;
use crate::models::matches::{
    CreateMatchRequest, MatchDetail, MatchFilter, UpdateMatchStatusRequest, UpdateScoreRequest,
};

const DEFAULT_LISTING_LIMIT: i64 = 10;

#[tracing::instrument(name = "List matches", skip(pool))]
pub async fn list_matches(
    pool: web::Data<SqlitePool>,
    query: web::Query<MatchFilter>,
) -> Result<HttpResponse, ApiError> {
    let page = matches::list(pool.get_ref(), &query).await?;
    Ok(paged(page, "Matches retrieved"))
}

#[tracing::instrument(name = "Upcoming matches", skip(pool))]
pub async fn upcoming_matches(
    pool: web::Data<SqlitePool>,
    query: web::Query<LimitQuery>,
) -> Result<HttpResponse, ApiError> {
    let games =
        matches::upcoming(pool.get_ref(), Utc::now(), query.limit_or(DEFAULT_LISTING_LIMIT)).await?;
    Ok(ok("Upcoming matches retrieved", games))
}

#[tracing::instrument(name = "Recent matches", skip(pool))]
pub async fn recent_matches(
    pool: web::Data<SqlitePool>,
    query: web::Query<LimitQuery>,
) -> Result<HttpResponse, ApiError> {
    let games = matches::recent(pool.get_ref(), query.limit_or(DEFAULT_LISTING_LIMIT)).await?;
    Ok(ok("Recent matches retrieved", games))
}

#[tracing::instrument(name = "Get match", skip(pool))]
pub async fn get_match(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let match_id = path.into_inner();
    let summary = require_record(
        matches::find_summary(pool.get_ref(), match_id).await?,
        "Match not found",
    )?;
    let completion = matches::analysis_completion(pool.get_ref(), match_id).await?;

    let detail = MatchDetail {
        summary,
        performances: performances::for_match(pool.get_ref(), match_id).await?,
        has_analysis: completion.is_some(),
        analysis_completed: completion.unwrap_or(false),
    };
    Ok(ok("Match retrieved", detail))
}

#[tracing::instrument(name = "Create match", skip(pool, body, user), fields(admin = %user.user_id))]
pub async fn create_match(
    pool: web::Data<SqlitePool>,
    body: web::Json<CreateMatchRequest>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_admin()?;
    body.validate()?;

    if body.home_team_id == body.away_team_id {
        return Err(ApiError::bad_request("Home and away teams must be different"));
    }
    let home_exists = teams::exists(pool.get_ref(), body.home_team_id).await?;
    let away_exists = teams::exists(pool.get_ref(), body.away_team_id).await?;
    if !home_exists || !away_exists {
        return Err(ApiError::bad_request("Invalid team(s)"));
    }
    if let Some(tournament_id) = body.tournament_id {
        if !tournaments::exists(pool.get_ref(), tournament_id).await? {
            return Err(ApiError::bad_request("Invalid tournament"));
        }
    }

    let mut tx = pool.begin().await?;
    let game = matches::insert(&mut *tx, Uuid::new_v4(), &body, Utc::now()).await?;
    standings::record_result_change(&mut *tx, None, Some(&game)).await?;
    tx.commit().await?;

    tracing::info!("Match {} created", game.id);
    let summary = require_record(
        matches::find_summary(pool.get_ref(), game.id).await?,
        "Match not found",
    )?;
    Ok(created(format!("/api/matches/{}", game.id), "Match created", summary))
}

#[tracing::instrument(name = "Update match score", skip(pool, body, user), fields(user = %user.user_id))]
pub async fn update_score(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateScoreRequest>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_staff()?;
    body.validate()?;
    let match_id = path.into_inner();

    let mut tx = pool.begin().await?;
    let before = require_record(matches::find_by_id(&mut *tx, match_id).await?, "Match not found")?;
    let after = require_record(
        matches::update_score(
            &mut *tx,
            match_id,
            body.home_team_score,
            body.away_team_score,
            body.status,
            body.minutes_played,
            Utc::now(),
        )
        .await?,
        "Match not found",
    )?;
    standings::record_result_change(&mut *tx, Some(&before), Some(&after)).await?;
    tx.commit().await?;

    tracing::info!(
        "Match {} score set to {}-{} ({})",
        match_id,
        after.home_team_score,
        after.away_team_score,
        after.status
    );
    Ok(ok("Match score updated", after))
}

#[tracing::instrument(name = "Update match status", skip(pool, body, user), fields(user = %user.user_id))]
pub async fn update_status(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateMatchStatusRequest>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_staff()?;
    let match_id = path.into_inner();

    let mut tx = pool.begin().await?;
    let before = require_record(matches::find_by_id(&mut *tx, match_id).await?, "Match not found")?;
    let after = require_record(
        matches::update_status(&mut *tx, match_id, body.status, Utc::now()).await?,
        "Match not found",
    )?;
    standings::record_result_change(&mut *tx, Some(&before), Some(&after)).await?;
    tx.commit().await?;

    Ok(ok("Match status updated", after))
}

#[tracing::instrument(name = "Delete match", skip(pool, user), fields(admin = %user.user_id))]
pub async fn delete_match(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_admin()?;
    let match_id = path.into_inner();

    let mut tx = pool.begin().await?;
    let before = require_record(matches::find_by_id(&mut *tx, match_id).await?, "Match not found")?;
    standings::record_result_change(&mut *tx, Some(&before), None).await?;
    matches::delete(&mut *tx, match_id).await?;
    tx.commit().await?;

    tracing::info!("Match {} deleted", match_id);
    Ok(HttpResponse::NoContent().finish())
}
