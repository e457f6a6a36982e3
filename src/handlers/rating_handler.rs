use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db::helpers::{conflict_on_constraint, ensure_absent, require_record};
use crate::db::{matches, performances, players, ratings};
use crate::error::ApiError;
use crate::handlers::{created, ok};
use crate::models::common::LimitQuery;
use crate::models::matches::MatchStatus;
use crate::models::rating::{RatingRequest, UpdateRatingRequest};

const DEFAULT_LEADERBOARD_LIMIT: i64 = 10;
const DUPLICATE_RATING: &str = "You have already rated this player for this match";

#[tracing::instrument(name = "Ratings for match", skip(pool))]
pub async fn ratings_for_match(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let rows = ratings::for_match(pool.get_ref(), path.into_inner()).await?;
    Ok(ok("Ratings retrieved", rows))
}

#[tracing::instrument(name = "Ratings for player", skip(pool))]
pub async fn ratings_for_player(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let rows = ratings::for_player(pool.get_ref(), path.into_inner()).await?;
    Ok(ok("Ratings retrieved", rows))
}

#[tracing::instrument(name = "Get rating", skip(pool))]
pub async fn get_rating(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let rating = require_record(
        ratings::find_view_by_id(pool.get_ref(), path.into_inner()).await?,
        "Rating not found",
    )?;
    Ok(ok("Rating retrieved", rating))
}

#[tracing::instrument(name = "Top rated players", skip(pool))]
pub async fn top_rated(
    pool: web::Data<SqlitePool>,
    query: web::Query<LimitQuery>,
) -> Result<HttpResponse, ApiError> {
    let rows = ratings::top_rated(
        pool.get_ref(),
        query.limit_or(DEFAULT_LEADERBOARD_LIMIT),
        query.season.as_deref(),
    )
    .await?;
    Ok(ok("Top rated players retrieved", rows))
}

#[tracing::instrument(name = "Man of the match awards", skip(pool))]
pub async fn man_of_the_match(
    pool: web::Data<SqlitePool>,
    query: web::Query<LimitQuery>,
) -> Result<HttpResponse, ApiError> {
    let rows = ratings::man_of_the_match(
        pool.get_ref(),
        query.limit_or(DEFAULT_LEADERBOARD_LIMIT),
        query.season.as_deref(),
    )
    .await?;
    Ok(ok("Man of the match awards retrieved", rows))
}

#[tracing::instrument(
    name = "Create rating",
    skip(pool, body, user),
    fields(match_id = %body.match_id, player = %body.player_id, rater = %user.user_id)
)]
pub async fn create_rating(
    pool: web::Data<SqlitePool>,
    body: web::Json<RatingRequest>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_staff()?;
    body.validate()?;

    let game = require_record(
        matches::find_by_id(pool.get_ref(), body.match_id).await?,
        "Match not found",
    )?;
    if game.status != MatchStatus::Finished {
        return Err(ApiError::bad_request(
            "Ratings can only be submitted for finished matches",
        ));
    }
    if !players::exists(pool.get_ref(), body.player_id).await? {
        return Err(ApiError::not_found("Player not found"));
    }
    if !performances::exists(pool.get_ref(), body.match_id, body.player_id).await? {
        return Err(ApiError::bad_request("Player did not participate in this match"));
    }
    ensure_absent(
        ratings::exists_for_rater(pool.get_ref(), body.match_id, body.player_id, user.user_id)
            .await?,
        DUPLICATE_RATING,
    )?;

    let mut tx = pool.begin().await?;
    let rating = ratings::insert(&mut *tx, Uuid::new_v4(), user.user_id, &body, Utc::now())
        .await
        .map_err(|e| conflict_on_constraint(e, DUPLICATE_RATING))?;

    let flag = match body.is_man_of_the_match {
        Some(flag) => flag,
        // Follow the analyst's pick while nobody is flagged yet.
        None => {
            let pick = ratings::analysis_pick(&mut *tx, body.match_id).await?;
            let holder = ratings::flagged_player(&mut *tx, body.match_id).await?;
            pick == Some(body.player_id) && holder.is_none()
        }
    };
    if flag {
        ratings::assign_man_of_the_match(&mut *tx, body.match_id, body.player_id).await?;
    }
    tx.commit().await?;

    let view = require_record(
        ratings::find_view_by_id(pool.get_ref(), rating.id).await?,
        "Rating not found",
    )?;
    Ok(created(format!("/api/playerratings/{}", rating.id), "Rating created", view))
}

#[tracing::instrument(name = "Update rating", skip(pool, body, user), fields(rater = %user.user_id))]
pub async fn update_rating(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateRatingRequest>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_staff()?;
    body.validate()?;
    let rating_id = path.into_inner();

    let existing = require_record(
        ratings::find_by_id(pool.get_ref(), rating_id).await?,
        "Rating not found",
    )?;
    if existing.rated_by != user.user_id && !user.is_admin() {
        return Err(ApiError::forbidden("You can only update your own ratings"));
    }

    let mut tx = pool.begin().await?;
    ratings::update(&mut *tx, rating_id, &body, Utc::now()).await?;
    match body.is_man_of_the_match {
        Some(true) => {
            ratings::assign_man_of_the_match(&mut *tx, existing.match_id, existing.player_id)
                .await?;
        }
        Some(false) => {
            let holder = ratings::flagged_player(&mut *tx, existing.match_id).await?;
            if holder == Some(existing.player_id) {
                ratings::release_man_of_the_match(&mut *tx, existing.match_id).await?;
            }
        }
        None => {}
    }
    tx.commit().await?;

    let view = require_record(
        ratings::find_view_by_id(pool.get_ref(), rating_id).await?,
        "Rating not found",
    )?;
    Ok(ok("Rating updated", view))
}

#[tracing::instrument(name = "Delete rating", skip(pool, user), fields(admin = %user.user_id))]
pub async fn delete_rating(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_admin()?;
    let rating_id = path.into_inner();

    let mut tx = pool.begin().await?;
    let existing = require_record(ratings::find_by_id(&mut *tx, rating_id).await?, "Rating not found")?;
    ratings::delete(&mut *tx, rating_id).await?;
    // Hand the flag to the player's next rating, if one is left.
    if existing.is_man_of_the_match {
        ratings::assign_man_of_the_match(&mut *tx, existing.match_id, existing.player_id).await?;
    }
    tx.commit().await?;

    Ok(HttpResponse::NoContent().finish())
}
