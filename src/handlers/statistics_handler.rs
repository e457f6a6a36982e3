use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db::helpers::{conflict_on_constraint, ensure_absent, require_record};
use crate::db::{players, statistics};
use crate::error::ApiError;
use crate::handlers::{created, ok, paged};
use crate::models::common::Page;
use crate::models::statistics::{StatisticsFilter, StatisticsRequest, StatisticsView};

const DUPLICATE_SEASON: &str = "Statistics for this player and season already exist";

#[tracing::instrument(name = "List statistics", skip(pool))]
pub async fn list_statistics(
    pool: web::Data<SqlitePool>,
    query: web::Query<StatisticsFilter>,
) -> Result<HttpResponse, ApiError> {
    let page = statistics::list(pool.get_ref(), &query).await?;
    let views = Page {
        items: page.items.into_iter().map(StatisticsView::from).collect::<Vec<_>>(),
        total: page.total,
    };
    Ok(paged(views, "Statistics retrieved"))
}

#[tracing::instrument(name = "Get statistics", skip(pool))]
pub async fn get_statistics(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let row = require_record(
        statistics::find_by_id(pool.get_ref(), path.into_inner()).await?,
        "Statistics not found",
    )?;
    Ok(ok("Statistics retrieved", StatisticsView::from(row)))
}

#[tracing::instrument(
    name = "Create statistics",
    skip(pool, body, user),
    fields(player = %body.player_id, season = %body.season, admin = %user.user_id)
)]
pub async fn create_statistics(
    pool: web::Data<SqlitePool>,
    body: web::Json<StatisticsRequest>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_admin()?;
    body.validate()?;

    if !players::exists(pool.get_ref(), body.player_id).await? {
        return Err(ApiError::bad_request("Invalid player ID"));
    }
    ensure_absent(
        statistics::exists_for_season(pool.get_ref(), body.player_id, &body.season).await?,
        DUPLICATE_SEASON,
    )?;

    let row = statistics::insert(pool.get_ref(), Uuid::new_v4(), &body, Utc::now())
        .await
        .map_err(|e| conflict_on_constraint(e, DUPLICATE_SEASON))?;
    Ok(created(
        format!("/api/statistics/{}", row.id),
        "Statistics created",
        StatisticsView::from(row),
    ))
}

#[tracing::instrument(name = "Delete statistics", skip(pool, user), fields(admin = %user.user_id))]
pub async fn delete_statistics(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_admin()?;
    let id = path.into_inner();
    if !statistics::delete(pool.get_ref(), id).await? {
        return Err(ApiError::not_found("Statistics not found"));
    }
    Ok(HttpResponse::NoContent().finish())
}
