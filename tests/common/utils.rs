use std::net::TcpListener;

use once_cell::sync::Lazy;
use reqwest::{Client, Response};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use uuid::Uuid;

use footbally_backend::config::settings::{get_config, get_jwt_settings};
use footbally_backend::db::helpers::connect_pool;
use footbally_backend::run;
use footbally_backend::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub const PASSWORD: &str = "password123";

pub struct TestApp {
    pub address: String,
    pub db_pool: SqlitePool,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.address, path)
    }
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let configuration = get_config().expect("Failed to read configuration.");
    let connection_pool = configure_db().await;
    let jwt_settings = get_jwt_settings(&configuration);

    let server = run(listener, connection_pool.clone(), jwt_settings, Vec::new())
        .expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        db_pool: connection_pool,
    }
}

/// Fresh database file per test so tests never share state.
pub async fn configure_db() -> SqlitePool {
    let path = std::env::temp_dir().join(format!("footbally-test-{}.db", Uuid::new_v4()));
    let connection_pool = connect_pool(&format!("sqlite://{}", path.display()), 4)
        .await
        .expect("Failed to open the test database.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");
    connection_pool
}

pub async fn register(app: &TestApp, body: Value, token: Option<&str>) -> Response {
    let mut request = Client::new().post(app.url("/auth/register")).json(&body);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }
    request.send().await.expect("Failed to execute request.")
}

pub async fn login(app: &TestApp, email: &str) -> String {
    let response = Client::new()
        .post(app.url("/auth/login"))
        .json(&json!({ "email": email, "password": PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 200, "login failed for {}", email);
    let body: Value = response.json().await.unwrap();
    body["data"]["token"].as_str().unwrap().to_string()
}

/// First account on a fresh app; may claim the Admin role.
pub async fn create_admin(app: &TestApp) -> String {
    let email = format!("admin{}@example.com", Uuid::new_v4().simple());
    let response = register(
        app,
        json!({ "email": email, "password": PASSWORD, "role": "Admin" }),
        None,
    )
    .await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    body["data"]["token"].as_str().unwrap().to_string()
}

/// Register a viewer, promote it in the database and log in again so the
/// token carries the new role.
pub async fn create_user_with_role(app: &TestApp, role: &str) -> (Uuid, String) {
    let email = format!("user{}@example.com", Uuid::new_v4().simple());
    let response = register(app, json!({ "email": email, "password": PASSWORD }), None).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let user_id: Uuid = body["data"]["user"]["id"].as_str().unwrap().parse().unwrap();

    sqlx::query("UPDATE users SET role = ? WHERE id = ?")
        .bind(role)
        .bind(user_id)
        .execute(&app.db_pool)
        .await
        .expect("Failed to promote user");

    (user_id, login(app, &email).await)
}

pub async fn send_json(
    method: reqwest::Method,
    url: String,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut request = Client::new().request(method, url);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }
    if let Some(body) = body {
        request = request.json(&body);
    }
    request.send().await.expect("Failed to execute request.")
}

pub async fn get(app: &TestApp, path: &str, token: Option<&str>) -> Response {
    send_json(reqwest::Method::GET, app.url(path), token, None).await
}

pub async fn post(app: &TestApp, path: &str, token: &str, body: Value) -> Response {
    send_json(reqwest::Method::POST, app.url(path), Some(token), Some(body)).await
}

pub async fn put(app: &TestApp, path: &str, token: &str, body: Value) -> Response {
    send_json(reqwest::Method::PUT, app.url(path), Some(token), Some(body)).await
}

pub async fn delete(app: &TestApp, path: &str, token: &str) -> Response {
    send_json(reqwest::Method::DELETE, app.url(path), Some(token), None).await
}

/// Assert the status and hand back the `data` payload.
pub async fn expect_data(response: Response, status: u16) -> Value {
    let actual = response.status().as_u16();
    let body: Value = response.json().await.unwrap_or(Value::Null);
    assert_eq!(actual, status, "unexpected status, body: {}", body);
    body["data"].clone()
}

/// Assert the status and hand back the error `message`.
pub async fn expect_error(response: Response, status: u16) -> String {
    let actual = response.status().as_u16();
    let body: Value = response.json().await.unwrap_or(Value::Null);
    assert_eq!(actual, status, "unexpected status, body: {}", body);
    assert_eq!(body["success"], json!(false));
    body["message"].as_str().unwrap_or_default().to_string()
}
