use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db::helpers::{conflict_on_constraint, require_record};
use crate::db::{players, teams};
use crate::error::ApiError;
use crate::handlers::{created, ok, paged};
use crate::models::team::{TeamDetail, TeamFilter, TeamRequest};

#[tracing::instrument(name = "List teams", skip(pool))]
pub async fn list_teams(
    pool: web::Data<SqlitePool>,
    query: web::Query<TeamFilter>,
) -> Result<HttpResponse, ApiError> {
    let page = teams::list(pool.get_ref(), &query).await?;
    Ok(paged(page, "Teams retrieved"))
}

#[tracing::instrument(name = "Get team", skip(pool))]
pub async fn get_team(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let team_id = path.into_inner();
    let team = require_record(teams::find_by_id(pool.get_ref(), team_id).await?, "Team not found")?;
    let detail = TeamDetail {
        players: players::list_by_team(pool.get_ref(), team_id).await?,
        tournaments: teams::tournaments_for_team(pool.get_ref(), team_id).await?,
        team,
    };
    Ok(ok("Team retrieved", detail))
}

#[tracing::instrument(name = "Get team players", skip(pool))]
pub async fn get_team_players(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let team_id = path.into_inner();
    if !teams::exists(pool.get_ref(), team_id).await? {
        return Err(ApiError::not_found("Team not found"));
    }
    let squad = players::list_by_team(pool.get_ref(), team_id).await?;
    Ok(ok("Players retrieved", squad))
}

#[tracing::instrument(
    name = "Create team",
    skip(pool, body, user),
    fields(name = %body.name, admin = %user.user_id)
)]
pub async fn create_team(
    pool: web::Data<SqlitePool>,
    body: web::Json<TeamRequest>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_admin()?;
    body.validate()?;

    let team = teams::insert(pool.get_ref(), Uuid::new_v4(), &body, Utc::now()).await?;
    tracing::info!("Team {} created", team.id);
    Ok(created(format!("/api/teams/{}", team.id), "Team created", team))
}

#[tracing::instrument(name = "Update team", skip(pool, body, user), fields(admin = %user.user_id))]
pub async fn update_team(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
    body: web::Json<TeamRequest>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_admin()?;
    body.validate()?;

    let team = require_record(
        teams::update(pool.get_ref(), path.into_inner(), &body, Utc::now()).await?,
        "Team not found",
    )?;
    Ok(ok("Team updated", team))
}

#[tracing::instrument(name = "Delete team", skip(pool, user), fields(admin = %user.user_id))]
pub async fn delete_team(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_admin()?;
    let team_id = path.into_inner();

    if !teams::exists(pool.get_ref(), team_id).await? {
        return Err(ApiError::not_found("Team not found"));
    }
    if teams::has_matches(pool.get_ref(), team_id).await? {
        return Err(ApiError::conflict(
            "Team cannot be deleted while matches reference it",
        ));
    }

    teams::delete(pool.get_ref(), team_id).await.map_err(|e| {
        conflict_on_constraint(e, "Team cannot be deleted while matches reference it")
    })?;
    tracing::info!("Team {} deleted", team_id);
    Ok(HttpResponse::NoContent().finish())
}
