use actix_web::{post, web, HttpRequest, HttpResponse};
use sqlx::SqlitePool;

use crate::config::jwt::JwtSettings;
use crate::error::ApiError;
use crate::handlers::auth_handler;
use crate::models::auth::{LoginRequest, RefreshRequest, RegisterRequest};

#[post("/register")]
async fn register(
    req: HttpRequest,
    user_form: web::Json<RegisterRequest>,
    pool: web::Data<SqlitePool>,
    jwt_settings: web::Data<JwtSettings>,
) -> Result<HttpResponse, ApiError> {
    auth_handler::register(req, user_form, pool, jwt_settings).await
}

#[post("/login")]
async fn login(
    login_form: web::Json<LoginRequest>,
    pool: web::Data<SqlitePool>,
    jwt_settings: web::Data<JwtSettings>,
) -> Result<HttpResponse, ApiError> {
    auth_handler::login(login_form, pool, jwt_settings).await
}

#[post("/refresh")]
async fn refresh(
    refresh_form: web::Json<RefreshRequest>,
    pool: web::Data<SqlitePool>,
    jwt_settings: web::Data<JwtSettings>,
) -> Result<HttpResponse, ApiError> {
    auth_handler::refresh(refresh_form, pool, jwt_settings).await
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(register)
            .service(login)
            .service(refresh),
    );
}
