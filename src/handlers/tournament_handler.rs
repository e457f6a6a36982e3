use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db::helpers::{conflict_on_constraint, require_record};
use crate::db::{matches, standings, teams, tournaments};
use crate::error::ApiError;
use crate::handlers::{created, ok, paged};
use crate::league::standings::{compare_rows, rank};
use crate::models::tournament::{
    AddTeamRequest, TournamentDetail, TournamentFilter, TournamentRequest,
    UpdateTournamentStatusRequest,
};

#[tracing::instrument(name = "List tournaments", skip(pool))]
pub async fn list_tournaments(
    pool: web::Data<SqlitePool>,
    query: web::Query<TournamentFilter>,
) -> Result<HttpResponse, ApiError> {
    let page = tournaments::list(pool.get_ref(), &query).await?;
    Ok(paged(page, "Tournaments retrieved"))
}

#[tracing::instrument(name = "Get tournament", skip(pool))]
pub async fn get_tournament(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let tournament_id = path.into_inner();
    let tournament = require_record(
        tournaments::find_by_id(pool.get_ref(), tournament_id).await?,
        "Tournament not found",
    )?;

    let mut rows = standings::table(pool.get_ref(), tournament_id).await?;
    rows.sort_by(compare_rows);

    let detail = TournamentDetail {
        tournament,
        teams: rows,
        matches: matches::for_tournament(pool.get_ref(), tournament_id).await?,
    };
    Ok(ok("Tournament retrieved", detail))
}

#[tracing::instrument(name = "Tournament standings", skip(pool))]
pub async fn get_standings(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let tournament_id = path.into_inner();
    if !tournaments::exists(pool.get_ref(), tournament_id).await? {
        return Err(ApiError::not_found("Tournament not found"));
    }
    let table = rank(standings::table(pool.get_ref(), tournament_id).await?);
    Ok(ok("Standings retrieved", table))
}

#[tracing::instrument(
    name = "Create tournament",
    skip(pool, body, user),
    fields(name = %body.name, admin = %user.user_id)
)]
pub async fn create_tournament(
    pool: web::Data<SqlitePool>,
    body: web::Json<TournamentRequest>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_admin()?;
    body.validate()?;

    let tournament =
        tournaments::insert(pool.get_ref(), Uuid::new_v4(), &body, Utc::now()).await?;
    tracing::info!("Tournament {} created", tournament.id);
    Ok(created(
        format!("/api/tournaments/{}", tournament.id),
        "Tournament created",
        tournament,
    ))
}

#[tracing::instrument(name = "Update tournament", skip(pool, body, user), fields(admin = %user.user_id))]
pub async fn update_tournament(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
    body: web::Json<TournamentRequest>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_admin()?;
    body.validate()?;

    let tournament = require_record(
        tournaments::update(pool.get_ref(), path.into_inner(), &body, Utc::now()).await?,
        "Tournament not found",
    )?;
    Ok(ok("Tournament updated", tournament))
}

#[tracing::instrument(name = "Update tournament status", skip(pool, body, user), fields(admin = %user.user_id))]
pub async fn update_tournament_status(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateTournamentStatusRequest>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_admin()?;
    let tournament = require_record(
        tournaments::update_status(pool.get_ref(), path.into_inner(), body.status, Utc::now())
            .await?,
        "Tournament not found",
    )?;
    Ok(ok("Tournament status updated", tournament))
}

#[tracing::instrument(name = "Delete tournament", skip(pool, user), fields(admin = %user.user_id))]
pub async fn delete_tournament(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_admin()?;
    let tournament_id = path.into_inner();
    if !tournaments::delete(pool.get_ref(), tournament_id).await? {
        return Err(ApiError::not_found("Tournament not found"));
    }
    tracing::info!("Tournament {} deleted", tournament_id);
    Ok(HttpResponse::NoContent().finish())
}

#[tracing::instrument(name = "Add team to tournament", skip(pool, body, user), fields(admin = %user.user_id))]
pub async fn add_team(
    pool: web::Data<SqlitePool>,
    path: web::Path<(Uuid, Uuid)>,
    body: Option<web::Json<AddTeamRequest>>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_admin()?;
    let request = body.map(web::Json::into_inner).unwrap_or_default();
    request.validate()?;
    let (tournament_id, team_id) = path.into_inner();

    let tournament = require_record(
        tournaments::find_by_id(pool.get_ref(), tournament_id).await?,
        "Tournament not found",
    )?;
    if !teams::exists(pool.get_ref(), team_id).await? {
        return Err(ApiError::not_found("Team not found"));
    }
    if tournaments::is_member(pool.get_ref(), tournament_id, team_id).await? {
        return Err(ApiError::conflict("Team is already in tournament"));
    }
    if tournaments::team_count(pool.get_ref(), tournament_id).await? >= i64::from(tournament.max_teams) {
        return Err(ApiError::bad_request("Tournament is full"));
    }

    let group = request.group.as_deref().map(str::trim).unwrap_or_default();
    tournaments::add_team(pool.get_ref(), tournament_id, team_id, group, Utc::now())
        .await
        .map_err(|e| conflict_on_constraint(e, "Team is already in tournament"))?;

    tracing::info!("Team {} joined tournament {}", team_id, tournament_id);
    let table = rank(standings::table(pool.get_ref(), tournament_id).await?);
    Ok(created(
        format!("/api/tournaments/{}/standings", tournament_id),
        "Team added to tournament",
        table,
    ))
}

#[tracing::instrument(name = "Remove team from tournament", skip(pool, user), fields(admin = %user.user_id))]
pub async fn remove_team(
    pool: web::Data<SqlitePool>,
    path: web::Path<(Uuid, Uuid)>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_admin()?;
    let (tournament_id, team_id) = path.into_inner();
    if !tournaments::remove_team(pool.get_ref(), tournament_id, team_id).await? {
        return Err(ApiError::not_found("Team is not in this tournament"));
    }
    Ok(HttpResponse::NoContent().finish())
}
