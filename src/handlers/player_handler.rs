use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db::helpers::{is_unique_violation, require_record};
use crate::db::{performances, players, statistics, teams};
use crate::error::ApiError;
use crate::handlers::{created, ok, paged};
use crate::models::player::{
    ImportSummary, Player, PlayerDetail, PlayerFilter, PlayerRequest, UpdatePlayerRequest,
};
use crate::models::statistics::StatisticsView;

const RECENT_PERFORMANCES: i64 = 5;

fn jersey_conflict(jersey_number: i32) -> ApiError {
    ApiError::conflict(format!(
        "Jersey number {} is already taken in this team",
        jersey_number
    ))
}

/// Team must exist and the jersey must be free in it. `player_id` is the
/// player being updated, so it does not collide with itself.
async fn check_team_assignment(
    pool: &SqlitePool,
    request: &PlayerRequest,
    player_id: Option<Uuid>,
) -> Result<(), ApiError> {
    let Some(team_id) = request.team_id else {
        return Ok(());
    };
    if !teams::exists(pool, team_id).await? {
        return Err(ApiError::bad_request("Invalid team ID"));
    }
    if players::jersey_taken(pool, team_id, request.jersey_number, player_id).await? {
        return Err(jersey_conflict(request.jersey_number));
    }
    Ok(())
}

/// The unique index catches a concurrent writer that passed the pre-check.
fn map_write_error(error: sqlx::Error, request: &PlayerRequest) -> ApiError {
    if is_unique_violation(&error) {
        jersey_conflict(request.jersey_number)
    } else {
        ApiError::Database(error)
    }
}

#[tracing::instrument(name = "List players", skip(pool))]
pub async fn list_players(
    pool: web::Data<SqlitePool>,
    query: web::Query<PlayerFilter>,
) -> Result<HttpResponse, ApiError> {
    let page = players::list(pool.get_ref(), &query).await?;
    Ok(paged(page, "Players retrieved"))
}

#[tracing::instrument(name = "Get player", skip(pool))]
pub async fn get_player(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let player_id = path.into_inner();
    let summary = require_record(
        players::find_summary(pool.get_ref(), player_id).await?,
        "Player not found",
    )?;

    let seasons = statistics::for_player(pool.get_ref(), player_id).await?;
    let recent =
        performances::recent_for_player(pool.get_ref(), player_id, RECENT_PERFORMANCES).await?;

    let detail = PlayerDetail {
        player: summary.player,
        team_name: summary.team_name,
        statistics: seasons.into_iter().map(StatisticsView::from).collect(),
        recent_performances: recent,
    };
    Ok(ok("Player retrieved", detail))
}

#[tracing::instrument(name = "Get player statistics", skip(pool))]
pub async fn get_player_statistics(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let player_id = path.into_inner();
    if !players::exists(pool.get_ref(), player_id).await? {
        return Err(ApiError::not_found("Player not found"));
    }
    let seasons: Vec<StatisticsView> = statistics::for_player(pool.get_ref(), player_id)
        .await?
        .into_iter()
        .map(StatisticsView::from)
        .collect();
    Ok(ok("Statistics retrieved", seasons))
}

#[tracing::instrument(
    name = "Create player",
    skip(pool, body, user),
    fields(name = %body.name, admin = %user.user_id)
)]
pub async fn create_player(
    pool: web::Data<SqlitePool>,
    body: web::Json<PlayerRequest>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_admin()?;
    body.validate()?;
    check_team_assignment(pool.get_ref(), &body, None).await?;

    let player = players::insert(pool.get_ref(), Uuid::new_v4(), &body, Utc::now())
        .await
        .map_err(|e| map_write_error(e, &body))?;
    tracing::info!("Player {} created", player.id);
    Ok(created(format!("/api/players/{}", player.id), "Player created", player))
}

#[tracing::instrument(name = "Update player", skip(pool, body, user), fields(admin = %user.user_id))]
pub async fn update_player(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePlayerRequest>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_admin()?;
    let player_id = path.into_inner();

    let current = require_record(
        players::find_by_id(pool.get_ref(), player_id).await?,
        "Player not found",
    )?;
    let merged = body.into_inner().merge(current);
    merged.validate()?;
    check_team_assignment(pool.get_ref(), &merged, Some(player_id)).await?;

    let player = require_record(
        players::update(pool.get_ref(), player_id, &merged, Utc::now())
            .await
            .map_err(|e| map_write_error(e, &merged))?,
        "Player not found",
    )?;
    Ok(ok("Player updated", player))
}

fn describe_rejection(error: &ApiError) -> String {
    match error {
        ApiError::Validation(errors) => errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(" "),
        other => other.to_string(),
    }
}

async fn import_row(pool: &SqlitePool, request: &PlayerRequest) -> Result<Player, ApiError> {
    request.validate()?;
    check_team_assignment(pool, request, None).await?;
    players::insert(pool, Uuid::new_v4(), request, Utc::now())
        .await
        .map_err(|e| map_write_error(e, request))
}

/// Rows whose name is already on file, or that fail validation, are
/// skipped and reported; the rest are created.
#[tracing::instrument(
    name = "Import players",
    skip(pool, body, user),
    fields(rows = body.len(), admin = %user.user_id)
)]
pub async fn import_players(
    pool: web::Data<SqlitePool>,
    body: web::Json<Vec<PlayerRequest>>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_admin()?;

    let mut errors = Vec::new();
    let mut imported = Vec::new();
    for (index, request) in body.into_inner().into_iter().enumerate() {
        let row = index + 1;
        if players::name_exists(pool.get_ref(), &request.name).await? {
            errors.push(format!(
                "Row {}: Player '{}' already exists",
                row,
                request.name.trim()
            ));
            continue;
        }
        match import_row(pool.get_ref(), &request).await {
            Ok(player) => imported.push(player),
            Err(ApiError::Database(e)) => return Err(ApiError::Database(e)),
            Err(rejected) => errors.push(format!("Row {}: {}", row, describe_rejection(&rejected))),
        }
    }

    tracing::info!("Imported {} players, {} rows rejected", imported.len(), errors.len());
    let summary = ImportSummary {
        created: imported.len(),
        errors,
        players: imported,
    };
    Ok(ok("Players imported", summary))
}

#[tracing::instrument(name = "Delete player", skip(pool, user), fields(admin = %user.user_id))]
pub async fn delete_player(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    user.require_admin()?;
    let player_id = path.into_inner();
    if !players::delete(pool.get_ref(), player_id).await? {
        return Err(ApiError::not_found("Player not found"));
    }
    tracing::info!("Player {} deleted", player_id);
    Ok(HttpResponse::NoContent().finish())
}
