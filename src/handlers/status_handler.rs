use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db::{helpers::require_record, status_checks};
use crate::error::ApiError;
use crate::handlers::{created, ok};
use crate::models::status::{HealthReport, StatusCheckRequest};

const STATUS_CHECK_LIMIT: i64 = 100;

#[tracing::instrument(name = "Health check", skip(pool))]
pub async fn health(pool: web::Data<SqlitePool>) -> HttpResponse {
    let database = match status_checks::ping(pool.get_ref()).await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::error!("Database health probe failed: {:?}", e);
            "disconnected"
        }
    };
    let report = HealthReport {
        status: if database == "connected" { "Healthy" } else { "Degraded" }.to_string(),
        timestamp: Utc::now(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    };
    HttpResponse::Ok().json(report)
}

#[tracing::instrument(name = "List status checks", skip(pool))]
pub async fn list_status_checks(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let checks = status_checks::latest(pool.get_ref(), STATUS_CHECK_LIMIT).await?;
    Ok(ok("Status checks retrieved", checks))
}

#[tracing::instrument(
    name = "Create status check",
    skip(pool, body),
    fields(client = %body.client_name)
)]
pub async fn create_status_check(
    pool: web::Data<SqlitePool>,
    body: web::Json<StatusCheckRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let check = status_checks::insert(pool.get_ref(), Uuid::new_v4(), &body, Utc::now()).await?;
    Ok(created(
        format!("/api/status/{}", check.id),
        "Status check recorded",
        check,
    ))
}

#[tracing::instrument(name = "Get status check", skip(pool))]
pub async fn get_status_check(
    pool: web::Data<SqlitePool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let check = require_record(
        status_checks::find_by_id(pool.get_ref(), path.into_inner()).await?,
        "Status check not found",
    )?;
    Ok(ok("Status check retrieved", check))
}
