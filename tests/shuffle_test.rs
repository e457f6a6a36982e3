use reqwest::Client;
use serde_json::{json, Value};

mod common;
use common::football_helpers::{create_player, id_of};
use common::utils::{create_admin, expect_data, expect_error, spawn_app};

fn pool(defenders: usize, midfielders: usize, attackers: usize) -> Vec<Value> {
    let mut players = Vec::new();
    for (group, count) in [("DEF", defenders), ("MID", midfielders), ("ATT", attackers)] {
        for index in 0..count {
            players.push(json!({
                "name": format!("{} {}", group, index + 1),
                "position": group,
                "points": 60 + index as i32,
                "is_subscribed": index % 2 == 0
            }));
        }
    }
    players
}

#[tokio::test]
async fn sixteen_players_split_into_two_full_teams() {
    let app = spawn_app().await;
    let response = Client::new()
        .post(app.url("/shuffle"))
        .json(&json!({ "players": pool(5, 6, 5) }))
        .send()
        .await
        .unwrap();
    let result = expect_data(response, 200).await;

    let team1 = result["team1"]["players"].as_array().unwrap();
    let team2 = result["team2"]["players"].as_array().unwrap();
    assert_eq!(team1.len(), 8);
    assert_eq!(team2.len(), 8);

    for team in ["team1", "team2"] {
        let players = result[team]["players"].as_array().unwrap();
        let total: i64 = players.iter().map(|p| p["points"].as_i64().unwrap()).sum();
        assert_eq!(result[team]["total_points"].as_i64().unwrap(), total);
        let defenders = players.iter().filter(|p| p["position"] == "DEF").count();
        assert!(defenders >= 2);
    }
}

#[tokio::test]
async fn pool_composition_is_validated() {
    let app = spawn_app().await;
    let client = Client::new();
    let cases = [
        (pool(5, 6, 4), "Exactly 16 players are required for team shuffle"),
        (pool(3, 8, 5), "At least 4 defenders are required"),
        (pool(6, 7, 3), "At least 4 attackers are required"),
        (pool(7, 1, 8), "At least 2 midfielders are required"),
    ];
    for (players, expected) in cases {
        let response = client
            .post(app.url("/shuffle"))
            .json(&json!({ "players": players }))
            .send()
            .await
            .unwrap();
        assert_eq!(expect_error(response, 400).await, expected);
    }
}

#[tokio::test]
async fn stored_players_must_all_exist() {
    let app = spawn_app().await;
    let token = create_admin(&app).await;
    let known = id_of(&create_player(&app, &token, None, "Known Player", "Midfielder", 0).await);
    let missing = uuid::Uuid::new_v4();

    let response = Client::new()
        .post(app.url("/shuffle/players"))
        .json(&json!({ "player_ids": [known, missing] }))
        .send()
        .await
        .unwrap();
    let message = expect_error(response, 404).await;
    assert_eq!(message, format!("Players not found: {}", missing));
}

#[tokio::test]
async fn out_of_range_points_are_rejected() {
    let app = spawn_app().await;
    let mut players = pool(4, 8, 4);
    players[3]["points"] = json!(i32::MAX);

    let response = Client::new()
        .post(app.url("/shuffle"))
        .json(&json!({ "players": players }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["errors"][0]["field"], "players[3].points");
}

#[tokio::test]
async fn repeated_player_ids_are_rejected() {
    let app = spawn_app().await;
    let token = create_admin(&app).await;
    let mut ids = Vec::new();
    for (position, count) in [("Center Back", 4), ("Striker", 4), ("Central Midfielder", 1)] {
        for index in 0..count {
            let name = format!("{} {}", position, index);
            ids.push(id_of(&create_player(&app, &token, None, &name, position, 0).await));
        }
    }
    let midfielder = ids[8];
    ids.extend(std::iter::repeat(midfielder).take(7));
    assert_eq!(ids.len(), 16);

    let response = Client::new()
        .post(app.url("/shuffle/players"))
        .json(&json!({ "player_ids": ids }))
        .send()
        .await
        .unwrap();
    let message = expect_error(response, 400).await;
    assert_eq!(message, format!("Duplicate player IDs: {}", midfielder));
}

#[tokio::test]
async fn stored_players_are_classified_by_position() {
    let app = spawn_app().await;
    let token = create_admin(&app).await;
    let positions = [
        ("Goalkeeper", 5), ("Center Back", 0), ("Left Back", 0), ("Right Back", 0),
        ("Central Midfielder", 6), ("Striker", 5),
    ];
    let mut ids = Vec::new();
    for (position, extra) in positions {
        for index in 0..(1 + extra) {
            let name = format!("{} {}", position, index);
            ids.push(id_of(&create_player(&app, &token, None, &name, position, 0).await));
        }
    }
    assert_eq!(ids.len(), 22);
    ids.truncate(16);

    // 9 defenders, 7 midfielders and no attackers.
    let response = Client::new()
        .post(app.url("/shuffle/players"))
        .json(&json!({ "player_ids": ids }))
        .send()
        .await
        .unwrap();
    assert_eq!(expect_error(response, 400).await, "At least 4 attackers are required");
}

#[tokio::test]
async fn announcement_is_plain_text() {
    let app = spawn_app().await;
    let client = Client::new();
    let shuffled = expect_data(
        client
            .post(app.url("/shuffle"))
            .json(&json!({ "players": pool(4, 8, 4) }))
            .send()
            .await
            .unwrap(),
        200,
    )
    .await;

    let response = client
        .post(app.url("/shuffle/announcement"))
        .json(&json!({
            "teams": shuffled,
            "date": "31st August, 2025",
            "venue": "City Turf",
            "subs": ["Ravi"]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));

    let text = response.text().await.unwrap();
    assert!(text.starts_with("*⚠ SUNDAY MORNING ⚠*\n31st August, 2025\n"));
    assert!(text.contains("👉 Venue:- City Turf"));
    assert!(text.contains("Team 1: Black/Dark\n1. "));
    assert!(text.contains("Sub:\n1. Ravi\n"));
    assert!(text.ends_with("🔥Game On🔥"));
}
