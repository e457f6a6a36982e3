use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db::helpers::{conflict_on_constraint, ensure_absent, require_record};
use crate::db::{analyses, matches, performances, players, ratings};
use crate::error::ApiError;
use crate::handlers::{created, ok};
use crate::models::analysis::AnalysisRequest;
use crate::models::matches::MatchStatus;

const DUPLICATE_ANALYSIS: &str = "Analysis already exists for this match";

/// A named man of the match must exist and have played in the match.
async fn check_man_of_the_match(
    pool: &SqlitePool,
    match_id: Uuid,
    player_id: Option<Uuid>,
) -> Result<(), ApiError> {
    let Some(player_id) = player_id else {
        return Ok(());
    };
    if !players::exists(pool, player_id).await? {
        return Err(ApiError::bad_request("Invalid man of the match player"));
    }
    if !performances::exists(pool, match_id, player_id).await? {
        return Err(ApiError::bad_request(
            "Man of the match must have played in this match",
        ));
    }
    Ok(())
}

#[tracing::instrument(name = "Get match analysis", skip(pool))]
pub async fn get_for_match(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let analysis = require_record(
        analyses::find_view_by_match(pool.get_ref(), path.into_inner()).await?,
        "Match analysis not found",
    )?;
    Ok(ok("Match analysis retrieved", analysis))
}

#[tracing::instrument(name = "Pending analyses", skip(pool))]
pub async fn pending(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let rows = analyses::pending(pool.get_ref()).await?;
    Ok(ok("Pending analyses retrieved", rows))
}

#[tracing::instrument(name = "Create match analysis", skip(pool, body, user), fields(analyst = %user.user_id))]
pub async fn create_analysis(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
    body: web::Json<AnalysisRequest>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_staff()?;
    body.validate()?;
    let match_id = path.into_inner();

    let game = require_record(matches::find_by_id(pool.get_ref(), match_id).await?, "Match not found")?;
    if game.status != MatchStatus::Finished {
        return Err(ApiError::bad_request(
            "Analysis can only be created for finished matches",
        ));
    }
    ensure_absent(
        analyses::exists_for_match(pool.get_ref(), match_id).await?,
        DUPLICATE_ANALYSIS,
    )?;
    check_man_of_the_match(pool.get_ref(), match_id, body.man_of_the_match_id).await?;

    let mut tx = pool.begin().await?;
    let analysis = analyses::insert(&mut *tx, Uuid::new_v4(), match_id, user.user_id, &body, Utc::now())
        .await
        .map_err(|e| conflict_on_constraint(e, DUPLICATE_ANALYSIS))?;
    match body.man_of_the_match_id {
        Some(player_id) => {
            ratings::assign_man_of_the_match(&mut *tx, match_id, player_id).await?;
        }
        None => {
            ratings::mirror_flag_on_analysis(&mut *tx, match_id).await?;
        }
    }
    tx.commit().await?;

    tracing::info!("Analysis {} created for match {}", analysis.id, match_id);
    let view = require_record(
        analyses::find_view_by_id(pool.get_ref(), analysis.id).await?,
        "Match analysis not found",
    )?;
    Ok(created(
        format!("/api/matchanalysis/match/{}", match_id),
        "Match analysis created",
        view,
    ))
}

#[tracing::instrument(name = "Update match analysis", skip(pool, body, user), fields(analyst = %user.user_id))]
pub async fn update_analysis(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
    body: web::Json<AnalysisRequest>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_staff()?;
    body.validate()?;
    let analysis_id = path.into_inner();

    let existing = require_record(
        analyses::find_by_id(pool.get_ref(), analysis_id).await?,
        "Match analysis not found",
    )?;
    if existing.analyzed_by != user.user_id && !user.is_admin() {
        return Err(ApiError::forbidden("You can only update your own analyses"));
    }
    check_man_of_the_match(pool.get_ref(), existing.match_id, body.man_of_the_match_id).await?;

    let mut tx = pool.begin().await?;
    analyses::update(&mut *tx, analysis_id, &body, Utc::now()).await?;
    match (existing.man_of_the_match_id, body.man_of_the_match_id) {
        (_, Some(player_id)) => {
            ratings::assign_man_of_the_match(&mut *tx, existing.match_id, player_id).await?;
        }
        (Some(_), None) => {
            ratings::release_man_of_the_match(&mut *tx, existing.match_id).await?;
        }
        (None, None) => {}
    }
    tx.commit().await?;

    let view = require_record(
        analyses::find_view_by_id(pool.get_ref(), analysis_id).await?,
        "Match analysis not found",
    )?;
    Ok(ok("Match analysis updated", view))
}

#[tracing::instrument(name = "Delete match analysis", skip(pool, user), fields(admin = %user.user_id))]
pub async fn delete_analysis(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_admin()?;
    let analysis_id = path.into_inner();
    if !analyses::delete(pool.get_ref(), analysis_id).await? {
        return Err(ApiError::not_found("Match analysis not found"));
    }
    Ok(HttpResponse::NoContent().finish())
}
