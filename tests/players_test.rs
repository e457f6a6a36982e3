use futures_util::future::join_all;
use serde_json::json;

mod common;
use common::football_helpers::{create_player, create_team, id_of};
use common::utils::{
    create_admin, create_user_with_role, delete, expect_data, expect_error, get, post, put,
    spawn_app,
};

#[tokio::test]
async fn jersey_numbers_are_unique_within_a_team() {
    let app = spawn_app().await;
    let token = create_admin(&app).await;
    let madrid = id_of(&create_team(&app, &token, "Real Madrid").await);
    let barca = id_of(&create_team(&app, &token, "Barcelona").await);

    create_player(&app, &token, Some(madrid), "Karim Benzema", "Center Forward", 9).await;

    let clash = post(
        &app,
        "/players",
        &token,
        json!({ "name": "Joselu", "position": "Striker", "age": 33, "team_id": madrid, "jersey_number": 9 }),
    )
    .await;
    assert_eq!(
        expect_error(clash, 409).await,
        "Jersey number 9 is already taken in this team"
    );

    // Same number elsewhere is fine.
    create_player(&app, &token, Some(barca), "Robert Lewandowski", "Center Forward", 9).await;
}

#[tokio::test]
async fn updating_a_player_keeps_their_own_jersey() {
    let app = spawn_app().await;
    let token = create_admin(&app).await;
    let team = id_of(&create_team(&app, &token, "Villarreal").await);
    let player_id = id_of(&create_player(&app, &token, Some(team), "Gerard Moreno", "Striker", 7).await);
    create_player(&app, &token, Some(team), "Dani Parejo", "Midfielder", 10).await;

    let updated = expect_data(
        put(
            &app,
            &format!("/players/{}", player_id),
            &token,
            json!({ "name": "Gerard Moreno", "position": "Striker", "age": 32, "team_id": team, "jersey_number": 7 }),
        )
        .await,
        200,
    )
    .await;
    assert_eq!(updated["age"], 32);

    let clash = put(
        &app,
        &format!("/players/{}", player_id),
        &token,
        json!({ "name": "Gerard Moreno", "position": "Striker", "age": 32, "team_id": team, "jersey_number": 10 }),
    )
    .await;
    expect_error(clash, 409).await;
}

#[tokio::test]
async fn concurrent_creates_cannot_share_a_jersey() {
    let app = spawn_app().await;
    let token = create_admin(&app).await;
    let team = id_of(&create_team(&app, &token, "Real Betis").await);

    let attempts = (0..12).map(|index| {
        post(
            &app,
            "/players",
            &token,
            json!({
                "name": format!("Winger {}", index),
                "position": "Right Winger",
                "age": 24,
                "team_id": team,
                "jersey_number": 17
            }),
        )
    });
    let mut statuses: Vec<u16> = join_all(attempts)
        .await
        .iter()
        .map(|r| r.status().as_u16())
        .collect();
    statuses.sort_unstable();

    assert_eq!(statuses[0], 201);
    assert!(statuses[1..].iter().all(|s| *s == 409), "statuses: {:?}", statuses);

    let stored: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM players WHERE team_id = ? AND jersey_number = 17")
            .bind(team)
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(stored, 1);
}

#[tokio::test]
async fn update_only_touches_the_fields_sent() {
    let app = spawn_app().await;
    let token = create_admin(&app).await;
    let team = id_of(&create_team(&app, &token, "Real Madrid").await);
    let player_id = id_of(&create_player(&app, &token, Some(team), "Jude Bellingham", "Midfielder", 10).await);
    let path = format!("/players/{}", player_id);

    let subscribed = expect_data(put(&app, &path, &token, json!({ "isSubscribed": true })).await, 200).await;
    assert_eq!(subscribed["is_subscribed"], true);
    assert_eq!(subscribed["jersey_number"], 10);

    let renamed = expect_data(
        put(&app, &path, &token, json!({ "name": "Jude B.", "position": "Attacking Midfielder", "age": 22 })).await,
        200,
    )
    .await;
    assert_eq!(renamed["name"], "Jude B.");
    assert_eq!(renamed["team_id"], json!(team));
    assert_eq!(renamed["jersey_number"], 10);
    assert_eq!(renamed["overall_rating"], 80);
    assert_eq!(renamed["is_subscribed"], true);

    let bad = put(&app, &path, &token, json!({ "overall_rating": 120 })).await;
    expect_error(bad, 400).await;
}

#[tokio::test]
async fn import_creates_new_players_and_reports_the_rest() {
    let app = spawn_app().await;
    let token = create_admin(&app).await;
    create_player(&app, &token, None, "Pedri", "Midfielder", 8).await;

    let summary = expect_data(
        post(
            &app,
            "/players/import",
            &token,
            json!([
                { "name": "Gavi", "position": "Midfielder", "age": 20 },
                { "name": "Pedri", "position": "Midfielder", "age": 21 },
                { "name": "Lamine Yamal", "position": "Right Winger", "age": 12 },
                { "name": "Gavi", "position": "Midfielder", "age": 20 }
            ]),
        )
        .await,
        200,
    )
    .await;

    assert_eq!(summary["created"], 1);
    assert_eq!(summary["players"][0]["name"], "Gavi");
    let errors: Vec<&str> = summary["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e.as_str().unwrap())
        .collect();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0], "Row 2: Player 'Pedri' already exists");
    assert!(errors[1].starts_with("Row 3: "));
    assert_eq!(errors[2], "Row 4: Player 'Gavi' already exists");

    let response = get(&app, "/players", None).await;
    assert_eq!(response.headers()["x-total-count"], "2");
}

#[tokio::test]
async fn only_admins_import_players() {
    let app = spawn_app().await;
    create_admin(&app).await;
    let (_, referee) = create_user_with_role(&app, "Referee").await;

    let response = post(&app, "/players/import", &referee, json!([])).await;
    expect_error(response, 403).await;
}

#[tokio::test]
async fn unknown_team_and_bad_fields_are_rejected() {
    let app = spawn_app().await;
    let token = create_admin(&app).await;

    let unknown_team = post(
        &app,
        "/players",
        &token,
        json!({ "name": "Nobody", "position": "Midfielder", "age": 20, "team_id": uuid::Uuid::new_v4() }),
    )
    .await;
    assert_eq!(expect_error(unknown_team, 400).await, "Invalid team ID");

    let too_young = post(
        &app,
        "/players",
        &token,
        json!({ "name": "Prodigy", "position": "Midfielder", "age": 12 }),
    )
    .await;
    expect_error(too_young, 400).await;
}

#[tokio::test]
async fn list_filters_by_team_and_position() {
    let app = spawn_app().await;
    let token = create_admin(&app).await;
    let team = id_of(&create_team(&app, &token, "Athletic Club").await);
    create_player(&app, &token, Some(team), "Nico Williams", "Left Winger", 11).await;
    create_player(&app, &token, Some(team), "Unai Simon", "Goalkeeper", 1).await;
    create_player(&app, &token, None, "Free Agent", "Left Winger", 0).await;

    let response = get(&app, &format!("/players?team_id={}", team), None).await;
    assert_eq!(response.headers()["x-total-count"], "2");
    let squad = expect_data(response, 200).await;
    assert!(squad.as_array().unwrap().iter().all(|p| p["team_name"] == "Athletic Club"));

    let wingers = expect_data(get(&app, "/players?position=winger", None).await, 200).await;
    let names: Vec<&str> = wingers
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Free Agent", "Nico Williams"]);
}

#[tokio::test]
async fn player_detail_includes_statistics_and_delete_removes_it() {
    let app = spawn_app().await;
    let token = create_admin(&app).await;
    let player_id = id_of(&create_player(&app, &token, None, "Marcus Rashford", "Left Winger", 10).await);

    expect_data(
        post(
            &app,
            "/statistics",
            &token,
            json!({
                "player_id": player_id,
                "season": "2024-25",
                "games_played": 25,
                "goals": 8,
                "passes_attempted": 200,
                "passes_completed": 150,
                "wins": 15,
                "draws": 5,
                "losses": 5
            }),
        )
        .await,
        201,
    )
    .await;

    let detail = expect_data(get(&app, &format!("/players/{}", player_id), None).await, 200).await;
    assert_eq!(detail["statistics"][0]["season"], "2024-25");
    assert_eq!(detail["statistics"][0]["pass_accuracy"], 75.0);
    assert!(detail["recent_performances"].as_array().unwrap().is_empty());

    let seasons = expect_data(get(&app, &format!("/players/{}/statistics", player_id), None).await, 200).await;
    assert_eq!(seasons.as_array().unwrap().len(), 1);

    assert_eq!(delete(&app, &format!("/players/{}", player_id), &token).await.status().as_u16(), 204);
    expect_error(get(&app, &format!("/players/{}", player_id), None).await, 404).await;
}
