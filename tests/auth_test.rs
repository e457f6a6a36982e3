use serde_json::{json, Value};
use uuid::Uuid;

mod common;
use common::utils::{
    create_admin, expect_data, expect_error, login, post, register, spawn_app, PASSWORD,
};

#[tokio::test]
async fn register_defaults_to_viewer_and_returns_a_token() {
    let app = spawn_app().await;
    let email = format!("fan{}@example.com", Uuid::new_v4().simple());

    let response = register(&app, json!({ "email": email, "password": PASSWORD }), None).await;
    let data = expect_data(response, 200).await;

    assert!(data["token"].as_str().unwrap().len() > 20);
    assert_eq!(data["user"]["role"], "Viewer");
    assert_eq!(data["user"]["email"], email.as_str());
    assert_eq!(data["user"]["username"], email.split('@').next().unwrap());
    assert!(data["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let app = spawn_app().await;
    let body = json!({ "email": "twice@example.com", "password": PASSWORD });

    expect_data(register(&app, body.clone(), None).await, 200).await;
    let message = expect_error(
        register(&app, json!({ "email": "TWICE@example.com", "password": PASSWORD }), None).await,
        409,
    )
    .await;
    assert_eq!(message, "Email is already registered");
}

#[tokio::test]
async fn invalid_registration_lists_every_field() {
    let app = spawn_app().await;
    let response = register(&app, json!({ "email": "not-an-email", "password": "123" }), None).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email", "password"]);
}

#[tokio::test]
async fn only_admins_can_hand_out_staff_roles() {
    let app = spawn_app().await;
    let admin_token = create_admin(&app).await;

    let refused = register(
        &app,
        json!({ "email": "ref@example.com", "password": PASSWORD, "role": "Referee" }),
        None,
    )
    .await;
    expect_error(refused, 403).await;

    let granted = register(
        &app,
        json!({ "email": "ref@example.com", "password": PASSWORD, "role": "Referee" }),
        Some(&admin_token),
    )
    .await;
    let data = expect_data(granted, 200).await;
    assert_eq!(data["user"]["role"], "Referee");
}

#[tokio::test]
async fn login_checks_the_password() {
    let app = spawn_app().await;
    register(&app, json!({ "email": "keeper@example.com", "password": PASSWORD }), None).await;

    let wrong = common::utils::send_json(
        reqwest::Method::POST,
        app.url("/auth/login"),
        None,
        Some(json!({ "email": "keeper@example.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(expect_error(wrong, 401).await, "Invalid credentials");

    let unknown = common::utils::send_json(
        reqwest::Method::POST,
        app.url("/auth/login"),
        None,
        Some(json!({ "email": "nobody@example.com", "password": PASSWORD })),
    )
    .await;
    assert_eq!(expect_error(unknown, 401).await, "Invalid credentials");

    assert!(!login(&app, "keeper@example.com").await.is_empty());
}

#[tokio::test]
async fn refresh_issues_a_new_token() {
    let app = spawn_app().await;
    let token = create_admin(&app).await;

    let response = post(&app, "/auth/refresh", &token, json!({ "token": token })).await;
    let data = expect_data(response, 200).await;
    assert_eq!(data["user"]["role"], "Admin");

    let response = post(&app, "/auth/refresh", &token, json!({ "token": "garbage" })).await;
    assert_eq!(expect_error(response, 400).await, "Invalid token");
}

#[tokio::test]
async fn writes_without_a_token_are_unauthorized() {
    let app = spawn_app().await;
    let response = common::utils::send_json(
        reqwest::Method::POST,
        app.url("/teams"),
        None,
        Some(json!({ "name": "Nobody FC" })),
    )
    .await;
    expect_error(response, 401).await;
}
