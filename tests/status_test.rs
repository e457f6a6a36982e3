use reqwest::Client;
use serde_json::{json, Value};

mod common;
use common::utils::{expect_data, expect_error, get, spawn_app};

#[tokio::test]
async fn health_reports_a_connected_database() {
    let app = spawn_app().await;
    let response = get(&app, "/status/health", None).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "Healthy");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["service"], "footbally-backend");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn status_checks_are_recorded_and_listed() {
    let app = spawn_app().await;
    let client = Client::new();

    for name in ["first-client", "second-client"] {
        let response = client
            .post(app.url("/status"))
            .json(&json!({ "client_name": name }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 201);
        assert!(response.headers().get("location").is_some());
    }

    let checks = expect_data(get(&app, "/status", None).await, 200).await;
    let checks = checks.as_array().unwrap();
    assert_eq!(checks.len(), 2);
    assert!(checks.iter().all(|c| c["status"] == "Active"));

    let id = checks[0]["id"].as_str().unwrap();
    let check = expect_data(get(&app, &format!("/status/{}", id), None).await, 200).await;
    assert_eq!(check["client_name"], checks[0]["client_name"]);
}

#[tokio::test]
async fn status_check_requires_a_client_name() {
    let app = spawn_app().await;
    let response = Client::new()
        .post(app.url("/status"))
        .json(&json!({ "client_name": "" }))
        .send()
        .await
        .unwrap();
    expect_error(response, 400).await;

    let missing = get(&app, &format!("/status/{}", uuid::Uuid::new_v4()), None).await;
    expect_error(missing, 404).await;
}
