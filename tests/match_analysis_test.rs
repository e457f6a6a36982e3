use serde_json::json;

mod common;
use common::football_helpers::{create_match, create_team, id_of, played_match};
use common::utils::{
    create_admin, create_user_with_role, delete, expect_data, expect_error, get, post, put,
    spawn_app,
};

#[tokio::test]
async fn analysis_requires_a_finished_match() {
    let app = spawn_app().await;
    let token = create_admin(&app).await;
    let home = id_of(&create_team(&app, &token, "Marseille").await);
    let away = id_of(&create_team(&app, &token, "Nice").await);
    let scheduled = id_of(&create_match(&app, &token, home, away, None).await);

    let response = post(&app, &format!("/matchanalysis/match/{}", scheduled), &token, json!({})).await;
    assert_eq!(
        expect_error(response, 400).await,
        "Analysis can only be created for finished matches"
    );

    let pending = expect_data(get(&app, "/matchanalysis/pending", Some(&token)).await, 200).await;
    assert!(pending.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn naming_a_man_of_the_match_flags_their_rating() {
    let app = spawn_app().await;
    let token = create_admin(&app).await;
    let played = played_match(&app, &token).await;

    let pending = expect_data(get(&app, "/matchanalysis/pending", Some(&token)).await, 200).await;
    assert_eq!(pending[0]["match_id"], played.match_id.to_string());

    expect_data(
        post(
            &app,
            "/playerratings",
            &token,
            json!({ "match_id": played.match_id, "player_id": played.home_player, "rating": 8.0 }),
        )
        .await,
        201,
    )
    .await;

    let created = post(
        &app,
        &format!("/matchanalysis/match/{}", played.match_id),
        &token,
        json!({
            "man_of_the_match_id": played.home_player,
            "man_of_the_match_reason": "Scored the winner",
            "home_team_possession": 58,
            "away_team_possession": 42,
            "is_completed": true
        }),
    )
    .await;
    let analysis = expect_data(created, 201).await;
    assert_eq!(analysis["man_of_the_match_name"], "Home Striker");

    let ratings = expect_data(
        get(&app, &format!("/playerratings/match/{}", played.match_id), Some(&token)).await,
        200,
    )
    .await;
    assert_eq!(ratings[0]["is_man_of_the_match"], true);

    let awards = expect_data(get(&app, "/playerratings/man-of-match", Some(&token)).await, 200).await;
    assert_eq!(awards[0]["reason"], "Scored the winner");

    let detail = expect_data(get(&app, &format!("/matches/{}", played.match_id), None).await, 200).await;
    assert_eq!(detail["has_analysis"], true);
    assert_eq!(detail["analysis_completed"], true);

    let pending = expect_data(get(&app, "/matchanalysis/pending", Some(&token)).await, 200).await;
    assert!(pending.as_array().unwrap().is_empty());

    let duplicate = post(&app, &format!("/matchanalysis/match/{}", played.match_id), &token, json!({})).await;
    assert_eq!(expect_error(duplicate, 409).await, "Analysis already exists for this match");
}

#[tokio::test]
async fn a_later_rating_follows_the_analysts_pick() {
    let app = spawn_app().await;
    let token = create_admin(&app).await;
    let played = played_match(&app, &token).await;

    expect_data(
        post(
            &app,
            &format!("/matchanalysis/match/{}", played.match_id),
            &token,
            json!({ "man_of_the_match_id": played.away_player }),
        )
        .await,
        201,
    )
    .await;

    let rating = expect_data(
        post(
            &app,
            "/playerratings",
            &token,
            json!({ "match_id": played.match_id, "player_id": played.away_player, "rating": 8.0 }),
        )
        .await,
        201,
    )
    .await;
    assert_eq!(rating["is_man_of_the_match"], true);
}

#[tokio::test]
async fn a_new_analysis_adopts_an_existing_flag() {
    let app = spawn_app().await;
    let token = create_admin(&app).await;
    let played = played_match(&app, &token).await;

    expect_data(
        post(
            &app,
            "/playerratings",
            &token,
            json!({
                "match_id": played.match_id,
                "player_id": played.away_player,
                "rating": 9.0,
                "is_man_of_the_match": true
            }),
        )
        .await,
        201,
    )
    .await;

    let analysis = expect_data(
        post(&app, &format!("/matchanalysis/match/{}", played.match_id), &token, json!({})).await,
        201,
    )
    .await;
    assert_eq!(analysis["man_of_the_match_id"], played.away_player.to_string());
    assert_eq!(analysis["man_of_the_match_name"], "Away Keeper");
}

#[tokio::test]
async fn man_of_the_match_must_have_played() {
    let app = spawn_app().await;
    let token = create_admin(&app).await;
    let played = played_match(&app, &token).await;

    let stranger = post(
        &app,
        &format!("/matchanalysis/match/{}", played.match_id),
        &token,
        json!({ "man_of_the_match_id": uuid::Uuid::new_v4() }),
    )
    .await;
    assert_eq!(expect_error(stranger, 400).await, "Invalid man of the match player");

    let bad_possession = post(
        &app,
        &format!("/matchanalysis/match/{}", played.match_id),
        &token,
        json!({ "home_team_possession": 120 }),
    )
    .await;
    expect_error(bad_possession, 400).await;
}

#[tokio::test]
async fn clearing_the_pick_releases_the_flag_and_only_the_author_edits() {
    let app = spawn_app().await;
    let token = create_admin(&app).await;
    let (_, author) = create_user_with_role(&app, "Referee").await;
    let (_, other) = create_user_with_role(&app, "Referee").await;
    let played = played_match(&app, &token).await;

    expect_data(
        post(
            &app,
            "/playerratings",
            &author,
            json!({ "match_id": played.match_id, "player_id": played.home_player, "rating": 8.0 }),
        )
        .await,
        201,
    )
    .await;
    let analysis = expect_data(
        post(
            &app,
            &format!("/matchanalysis/match/{}", played.match_id),
            &author,
            json!({ "man_of_the_match_id": played.home_player }),
        )
        .await,
        201,
    )
    .await;
    let path = format!("/matchanalysis/{}", analysis["id"].as_str().unwrap());

    let foreign = put(&app, &path, &other, json!({ "match_summary": "Not mine" })).await;
    assert_eq!(expect_error(foreign, 403).await, "You can only update your own analyses");

    let updated = expect_data(put(&app, &path, &author, json!({ "match_summary": "Tight game" })).await, 200).await;
    assert!(updated["man_of_the_match_id"].is_null());
    assert_eq!(updated["match_summary"], "Tight game");

    let ratings = expect_data(
        get(&app, &format!("/playerratings/match/{}", played.match_id), Some(&token)).await,
        200,
    )
    .await;
    assert_eq!(ratings[0]["is_man_of_the_match"], false);

    expect_error(delete(&app, &path, &author).await, 403).await;
    assert_eq!(delete(&app, &path, &token).await.status().as_u16(), 204);
    let missing = get(&app, &format!("/matchanalysis/match/{}", played.match_id), Some(&token)).await;
    assert_eq!(expect_error(missing, 404).await, "Match analysis not found");
}
