use chrono::{Duration, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use super::utils::{expect_data, post, put, TestApp};

pub fn id_of(value: &Value) -> Uuid {
    value["id"].as_str().expect("missing id").parse().expect("bad id")
}

pub async fn create_team(app: &TestApp, token: &str, name: &str) -> Value {
    let response = post(
        app,
        "/teams",
        token,
        json!({
            "name": name,
            "short_name": name.chars().take(3).collect::<String>().to_uppercase(),
            "city": "Madrid",
            "country": "Spain",
            "league": "La Liga",
            "founded": 1902
        }),
    )
    .await;
    expect_data(response, 201).await
}

pub async fn create_player(
    app: &TestApp,
    token: &str,
    team_id: Option<Uuid>,
    name: &str,
    position: &str,
    jersey_number: i32,
) -> Value {
    let response = post(
        app,
        "/players",
        token,
        json!({
            "name": name,
            "position": position,
            "age": 27,
            "nationality": "Spain",
            "team_id": team_id,
            "jersey_number": jersey_number,
            "overall_rating": 80
        }),
    )
    .await;
    expect_data(response, 201).await
}

pub async fn create_tournament(app: &TestApp, token: &str, name: &str, max_teams: i32) -> Value {
    let start = Utc::now();
    let response = post(
        app,
        "/tournaments",
        token,
        json!({
            "name": name,
            "season": "2024-25",
            "start_date": start,
            "end_date": start + Duration::days(60),
            "max_teams": max_teams
        }),
    )
    .await;
    expect_data(response, 201).await
}

pub async fn join_tournament(app: &TestApp, token: &str, tournament_id: Uuid, team_id: Uuid) {
    let response = post(
        app,
        &format!("/tournaments/{}/teams/{}", tournament_id, team_id),
        token,
        json!({}),
    )
    .await;
    expect_data(response, 201).await;
}

pub async fn create_match(
    app: &TestApp,
    token: &str,
    home: Uuid,
    away: Uuid,
    tournament_id: Option<Uuid>,
) -> Value {
    let response = post(
        app,
        "/matches",
        token,
        json!({
            "home_team_id": home,
            "away_team_id": away,
            "match_date": Utc::now() + Duration::days(3),
            "competition": "Friendly",
            "season": "2024-25",
            "venue": "Bernabeu",
            "tournament_id": tournament_id
        }),
    )
    .await;
    expect_data(response, 201).await
}

pub async fn set_score(app: &TestApp, token: &str, match_id: Uuid, home: i32, away: i32) -> Value {
    let response = put(
        app,
        &format!("/matches/{}/score", match_id),
        token,
        json!({ "home_team_score": home, "away_team_score": away }),
    )
    .await;
    expect_data(response, 200).await
}

pub async fn add_performance(app: &TestApp, token: &str, match_id: Uuid, player_id: Uuid) -> Value {
    let response = post(
        app,
        &format!("/matches/{}/performances", match_id),
        token,
        json!({
            "player_id": player_id,
            "minutes_played": 90,
            "started": true,
            "goals": 1,
            "shots": 3,
            "shots_on_target": 2,
            "passes": 40,
            "passes_completed": 35
        }),
    )
    .await;
    expect_data(response, 201).await
}

/// Two teams, one player each, a finished match both players appeared in.
pub struct PlayedMatch {
    pub match_id: Uuid,
    pub home_player: Uuid,
    pub away_player: Uuid,
}

pub async fn played_match(app: &TestApp, token: &str) -> PlayedMatch {
    let home = id_of(&create_team(app, token, "Home FC").await);
    let away = id_of(&create_team(app, token, "Away FC").await);
    let home_player = id_of(&create_player(app, token, Some(home), "Home Striker", "Striker", 9).await);
    let away_player = id_of(&create_player(app, token, Some(away), "Away Keeper", "Goalkeeper", 1).await);
    let match_id = id_of(&create_match(app, token, home, away, None).await);
    add_performance(app, token, match_id, home_player).await;
    add_performance(app, token, match_id, away_player).await;
    set_score(app, token, match_id, 2, 1).await;
    PlayedMatch {
        match_id,
        home_player,
        away_player,
    }
}
