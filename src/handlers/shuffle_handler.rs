use std::collections::HashSet;

use actix_web::{web, HttpResponse};
use chrono::Local;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db::players;
use crate::error::ApiError;
use crate::handlers::ok;
use crate::league::announcement::{render, GameDetails};
use crate::league::shuffle::{classify_position, shuffle_teams};
use crate::models::shuffle::{
    AnnouncementRequest, ShuffleByIdsRequest, ShufflePlayer, ShuffleRequest,
};

#[tracing::instrument(name = "Shuffle teams", skip(body), fields(players = body.players.len()))]
pub async fn shuffle(body: web::Json<ShuffleRequest>) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let result = shuffle_teams(body.into_inner().players, &mut rand::thread_rng())?;
    tracing::info!(
        "Teams shuffled: {} vs {} points",
        result.team1.total_points,
        result.team2.total_points
    );
    Ok(ok("Teams shuffled", result))
}

#[tracing::instrument(name = "Shuffle stored players", skip(pool, body), fields(players = body.player_ids.len()))]
pub async fn shuffle_by_ids(
    pool: web::Data<SqlitePool>,
    body: web::Json<ShuffleByIdsRequest>,
) -> Result<HttpResponse, ApiError> {
    let ids = &body.player_ids;
    let mut seen = HashSet::with_capacity(ids.len());
    let mut repeated: Vec<Uuid> = ids.iter().copied().filter(|id| !seen.insert(*id)).collect();
    if !repeated.is_empty() {
        repeated.sort();
        repeated.dedup();
        let listed: Vec<String> = repeated.iter().map(Uuid::to_string).collect();
        return Err(ApiError::bad_request(format!(
            "Duplicate player IDs: {}",
            listed.join(", ")
        )));
    }

    let found = players::find_many(pool.get_ref(), ids).await?;

    let missing: Vec<String> = ids
        .iter()
        .filter(|id| !found.iter().any(|p| p.id == **id))
        .map(Uuid::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(ApiError::not_found(format!(
            "Players not found: {}",
            missing.join(", ")
        )));
    }

    // Keep the caller's order so the draft only depends on the RNG.
    let pool_players: Vec<ShufflePlayer> = ids
        .iter()
        .filter_map(|id| found.iter().find(|p| p.id == *id))
        .map(|p| ShufflePlayer {
            id: Some(p.id),
            name: p.name.clone(),
            position: classify_position(&p.position),
            points: p.overall_rating,
            is_subscribed: p.is_subscribed,
        })
        .collect();

    let result = shuffle_teams(pool_players, &mut rand::thread_rng())?;
    Ok(ok("Teams shuffled", result))
}

#[tracing::instrument(name = "Render announcement", skip(body))]
pub async fn announcement(body: web::Json<AnnouncementRequest>) -> HttpResponse {
    let request = body.into_inner();
    let details = GameDetails::resolve(
        Local::now().date_naive(),
        request.date,
        request.time,
        request.venue,
        request.price,
    );
    let message = render(&request.teams, &details, &request.subs);
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(message)
}
