use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db::helpers::{conflict_on_constraint, ensure_absent};
use crate::db::{matches, performances, players};
use crate::error::ApiError;
use crate::handlers::{created, ok};
use crate::models::performance::PerformanceRequest;

const DUPLICATE_PERFORMANCE: &str = "Performance already recorded for this player in this match";

#[tracing::instrument(name = "List match performances", skip(pool))]
pub async fn list_performances(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let match_id = path.into_inner();
    if !matches::exists(pool.get_ref(), match_id).await? {
        return Err(ApiError::not_found("Match not found"));
    }
    let rows = performances::for_match(pool.get_ref(), match_id).await?;
    Ok(ok("Performances retrieved", rows))
}

#[tracing::instrument(
    name = "Record match performance",
    skip(pool, body, user),
    fields(player = %body.player_id, user = %user.user_id)
)]
pub async fn add_performance(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
    body: web::Json<PerformanceRequest>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_staff()?;
    body.validate()?;
    let match_id = path.into_inner();

    if !matches::exists(pool.get_ref(), match_id).await? {
        return Err(ApiError::not_found("Match not found"));
    }
    if !players::exists(pool.get_ref(), body.player_id).await? {
        return Err(ApiError::not_found("Player not found"));
    }
    ensure_absent(
        performances::exists(pool.get_ref(), match_id, body.player_id).await?,
        DUPLICATE_PERFORMANCE,
    )?;

    let performance =
        performances::insert(pool.get_ref(), Uuid::new_v4(), match_id, &body, Utc::now())
            .await
            .map_err(|e| conflict_on_constraint(e, DUPLICATE_PERFORMANCE))?;
    Ok(created(
        format!("/api/matches/{}/performances", match_id),
        "Performance recorded",
        performance,
    ))
}

#[tracing::instrument(name = "Delete match performance", skip(pool, user), fields(user = %user.user_id))]
pub async fn delete_performance(
    pool: web::Data<SqlitePool>,
    path: web::Path<(Uuid, Uuid)>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_staff()?;
    let (match_id, player_id) = path.into_inner();
    if !performances::delete(pool.get_ref(), match_id, player_id).await? {
        return Err(ApiError::not_found("Performance not found"));
    }
    Ok(HttpResponse::NoContent().finish())
}
