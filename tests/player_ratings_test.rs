use serde_json::{json, Value};
use uuid::Uuid;

mod common;
use common::football_helpers::{create_match, create_player, create_team, id_of, played_match};
use common::utils::{
    create_admin, create_user_with_role, delete, expect_data, expect_error, get, post, put,
    spawn_app, TestApp,
};

async fn rate(app: &TestApp, token: &str, match_id: Uuid, player_id: Uuid, body: Value) -> reqwest::Response {
    let mut payload = json!({ "match_id": match_id, "player_id": player_id, "rating": 7.5 });
    if let (Some(target), Some(extra)) = (payload.as_object_mut(), body.as_object()) {
        for (key, value) in extra {
            target.insert(key.clone(), value.clone());
        }
    }
    post(app, "/playerratings", token, payload).await
}

async fn flagged(app: &TestApp, token: &str, match_id: Uuid) -> Vec<Value> {
    let ratings = expect_data(get(app, &format!("/playerratings/match/{}", match_id), Some(token)).await, 200).await;
    ratings
        .as_array()
        .unwrap()
        .iter()
        .filter(|r| r["is_man_of_the_match"] == true)
        .cloned()
        .collect()
}

#[tokio::test]
async fn viewers_are_kept_out_of_ratings() {
    let app = spawn_app().await;
    let token = create_admin(&app).await;
    let (_, viewer) = create_user_with_role(&app, "Viewer").await;
    let played = played_match(&app, &token).await;

    let response = get(&app, &format!("/playerratings/match/{}", played.match_id), Some(&viewer)).await;
    expect_error(response, 403).await;
    let response = get(&app, &format!("/playerratings/match/{}", played.match_id), None).await;
    expect_error(response, 401).await;
}

#[tokio::test]
async fn ratings_need_a_finished_match_and_an_appearance() {
    let app = spawn_app().await;
    let token = create_admin(&app).await;
    let home = id_of(&create_team(&app, &token, "Lyon").await);
    let away = id_of(&create_team(&app, &token, "Lille").await);
    let player = id_of(&create_player(&app, &token, Some(home), "Alexandre Lacazette", "Striker", 10).await);
    let scheduled = id_of(&create_match(&app, &token, home, away, None).await);

    let early = rate(&app, &token, scheduled, player, json!({})).await;
    assert_eq!(
        expect_error(early, 400).await,
        "Ratings can only be submitted for finished matches"
    );

    let played = played_match(&app, &token).await;
    let bench = rate(&app, &token, played.match_id, player, json!({})).await;
    assert_eq!(expect_error(bench, 400).await, "Player did not participate in this match");

    let out_of_range = rate(&app, &token, played.match_id, played.home_player, json!({ "rating": 11.0 })).await;
    expect_error(out_of_range, 400).await;
}

#[tokio::test]
async fn one_rating_per_rater_and_player() {
    let app = spawn_app().await;
    let token = create_admin(&app).await;
    let (_, referee) = create_user_with_role(&app, "Referee").await;
    let played = played_match(&app, &token).await;

    let first = rate(&app, &token, played.match_id, played.home_player, json!({})).await;
    assert_eq!(first.status().as_u16(), 201);
    assert!(first.headers().get("location").is_some());

    let again = rate(&app, &token, played.match_id, played.home_player, json!({ "rating": 9.0 })).await;
    assert_eq!(
        expect_error(again, 409).await,
        "You have already rated this player for this match"
    );

    // A different rater may still rate the same player.
    let other = rate(&app, &referee, played.match_id, played.home_player, json!({})).await;
    assert_eq!(other.status().as_u16(), 201);
}

#[tokio::test]
async fn man_of_the_match_is_exclusive_per_match() {
    let app = spawn_app().await;
    let token = create_admin(&app).await;
    let played = played_match(&app, &token).await;

    expect_data(
        rate(&app, &token, played.match_id, played.home_player, json!({ "is_man_of_the_match": true })).await,
        201,
    )
    .await;
    let away_rating = expect_data(
        rate(&app, &token, played.match_id, played.away_player, json!({ "rating": 9.0 })).await,
        201,
    )
    .await;

    let holders = flagged(&app, &token, played.match_id).await;
    assert_eq!(holders.len(), 1);
    assert_eq!(holders[0]["player_id"], played.home_player.to_string());

    // Flagging the away player moves the award.
    expect_data(
        put(
            &app,
            &format!("/playerratings/{}", away_rating["id"].as_str().unwrap()),
            &token,
            json!({ "rating": 9.0, "is_man_of_the_match": true }),
        )
        .await,
        200,
    )
    .await;
    let holders = flagged(&app, &token, played.match_id).await;
    assert_eq!(holders.len(), 1);
    assert_eq!(holders[0]["player_id"], played.away_player.to_string());

    let awards = expect_data(get(&app, "/playerratings/man-of-match", Some(&token)).await, 200).await;
    assert_eq!(awards.as_array().unwrap().len(), 1);
    assert_eq!(awards[0]["player_id"], played.away_player.to_string());
}

#[tokio::test]
async fn only_the_rater_or_an_admin_may_edit() {
    let app = spawn_app().await;
    let token = create_admin(&app).await;
    let (_, first_ref) = create_user_with_role(&app, "Referee").await;
    let (_, second_ref) = create_user_with_role(&app, "Referee").await;
    let played = played_match(&app, &token).await;

    let rating = expect_data(rate(&app, &first_ref, played.match_id, played.home_player, json!({})).await, 201).await;
    let path = format!("/playerratings/{}", rating["id"].as_str().unwrap());

    let foreign = put(&app, &path, &second_ref, json!({ "rating": 3.0 })).await;
    assert_eq!(expect_error(foreign, 403).await, "You can only update your own ratings");

    let own = expect_data(put(&app, &path, &first_ref, json!({ "rating": 8.0, "comments": "Sharp" })).await, 200).await;
    assert_eq!(own["rating"], 8.0);
    assert_eq!(own["comments"], "Sharp");

    let by_admin = expect_data(put(&app, &path, &token, json!({ "rating": 8.5 })).await, 200).await;
    assert_eq!(by_admin["rating"], 8.5);

    // Deletes are for admins only.
    expect_error(delete(&app, &path, &first_ref).await, 403).await;
    assert_eq!(delete(&app, &path, &token).await.status().as_u16(), 204);
    expect_error(get(&app, &path, Some(&token)).await, 404).await;
}

#[tokio::test]
async fn top_rated_averages_each_player() {
    let app = spawn_app().await;
    let token = create_admin(&app).await;
    let (_, referee) = create_user_with_role(&app, "Referee").await;
    let played = played_match(&app, &token).await;

    rate(&app, &token, played.match_id, played.home_player, json!({ "rating": 8.0 })).await;
    rate(&app, &referee, played.match_id, played.home_player, json!({ "rating": 9.0 })).await;
    rate(&app, &token, played.match_id, played.away_player, json!({ "rating": 5.0 })).await;

    let top = expect_data(get(&app, "/playerratings/top-rated?limit=1", Some(&token)).await, 200).await;
    assert_eq!(top.as_array().unwrap().len(), 1);
    assert_eq!(top[0]["player_id"], played.home_player.to_string());
    assert_eq!(top[0]["average_rating"], 8.5);
    assert_eq!(top[0]["total_ratings"], 2);
    assert_eq!(top[0]["highest_rating"], 9.0);

    let history = expect_data(
        get(&app, &format!("/playerratings/player/{}", played.away_player), Some(&token)).await,
        200,
    )
    .await;
    assert_eq!(history[0]["home_team_name"], "Home FC");
}
