use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::error::{PathError, QueryPayloadError};
use actix_web::{http, web, App, HttpRequest, HttpServer};
use sqlx::SqlitePool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod league;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod telemetry;
pub mod utils;

use crate::config::jwt::JwtSettings;
use crate::error::ApiError;
use crate::routes::init_routes;

const TOTAL_COUNT_HEADER_LOWER: &str = "x-total-count";

fn cors(allowed_origins: &[String]) -> Cors {
    // No configured origins means any origin, for local tooling.
    let cors = if allowed_origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };
    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![
            http::header::AUTHORIZATION,
            http::header::ACCEPT,
            http::header::CONTENT_TYPE,
        ])
        .expose_headers(vec![
            http::header::LOCATION,
            http::header::HeaderName::from_static(TOTAL_COUNT_HEADER_LOWER),
        ])
        .max_age(3600)
}

fn bad_input(message: String, _: &HttpRequest) -> actix_web::Error {
    tracing::info!("Rejected request input: {}", message);
    ApiError::bad_request(message).into()
}

pub fn run(
    listener: TcpListener,
    db_pool: SqlitePool,
    jwt_settings: JwtSettings,
    allowed_origins: Vec<String>,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let db_pool = web::Data::new(db_pool);
    let jwt_settings = web::Data::new(jwt_settings);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors(&allowed_origins))
            .app_data(db_pool.clone())
            .app_data(jwt_settings.clone())
            .app_data(
                web::JsonConfig::default()
                    .error_handler(|err, req| bad_input(err.to_string(), req)),
            )
            .app_data(
                web::QueryConfig::default()
                    .error_handler(|err: QueryPayloadError, req| bad_input(err.to_string(), req)),
            )
            .app_data(
                web::PathConfig::default()
                    .error_handler(|err: PathError, req| bad_input(err.to_string(), req)),
            )
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
