use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::jwt::{decode_token_for_refresh, generate_token, validate_jwt_from_request};
use crate::config::jwt::JwtSettings;
use crate::db::{helpers::is_unique_violation, users};
use crate::error::ApiError;
use crate::handlers::ok;
use crate::models::auth::{AuthResponse, LoginRequest, RefreshRequest, RegisterRequest};
use crate::models::user::{User, UserRole};
use crate::utils::password::{hash_password_blocking, verify_password_blocking};

fn issue(user: User, jwt_settings: &JwtSettings) -> Result<AuthResponse, ApiError> {
    let (token, expires_at) = generate_token(&user, jwt_settings).map_err(|e| {
        tracing::error!("Error generating JWT token: {:?}", e);
        ApiError::Internal("token generation failed".into())
    })?;
    Ok(AuthResponse {
        token,
        expires_at,
        user: user.into(),
    })
}

/// Elevated roles are granted to the very first account, or when an
/// admin is making the request.
async fn ensure_role_grantable(
    req: &HttpRequest,
    pool: &SqlitePool,
    role: UserRole,
) -> Result<(), ApiError> {
    if !role.is_staff() {
        return Ok(());
    }
    if users::count(pool).await? == 0 {
        tracing::info!("Bootstrapping first account with role {}", role);
        return Ok(());
    }
    match validate_jwt_from_request(req) {
        Ok(claims) if claims.role == UserRole::Admin => Ok(()),
        _ => Err(ApiError::forbidden(
            "Only administrators can assign the Admin or Referee role",
        )),
    }
}

#[tracing::instrument(
    name = "Register user",
    skip(req, user_form, pool, jwt_settings),
    fields(email = %user_form.email)
)]
pub async fn register(
    req: HttpRequest,
    user_form: web::Json<RegisterRequest>,
    pool: web::Data<SqlitePool>,
    jwt_settings: web::Data<JwtSettings>,
) -> Result<HttpResponse, ApiError> {
    user_form.validate()?;
    let role = user_form.role.unwrap_or_default();
    ensure_role_grantable(&req, &pool, role).await?;

    if users::find_by_email(pool.get_ref(), &user_form.email).await?.is_some() {
        return Err(ApiError::conflict("Email is already registered"));
    }

    let password_hash =
        hash_password_blocking(user_form.password.expose_secret().to_string()).await?;
    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4(),
        email: user_form.email.trim().to_string(),
        username: user_form.resolved_username(),
        password_hash,
        role,
        created_at: now,
        updated_at: now,
    };

    users::insert(pool.get_ref(), &user).await.map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::conflict("Email is already registered")
        } else {
            ApiError::Database(e)
        }
    })?;

    tracing::info!("User {} registered with role {}", user.id, user.role);
    Ok(ok("Registration successful", issue(user, &jwt_settings)?))
}

#[tracing::instrument(
    name = "Login user attempt",
    skip(login_form, pool, jwt_settings),
    fields(email = %login_form.email)
)]
pub async fn login(
    login_form: web::Json<LoginRequest>,
    pool: web::Data<SqlitePool>,
    jwt_settings: web::Data<JwtSettings>,
) -> Result<HttpResponse, ApiError> {
    let invalid = || ApiError::Unauthorized("Invalid credentials".into());

    let Some(user) = users::find_by_email(pool.get_ref(), &login_form.email).await? else {
        tracing::info!("User not found or invalid credentials");
        return Err(invalid());
    };

    let verified = verify_password_blocking(
        login_form.password.expose_secret().to_string(),
        user.password_hash.clone(),
    )
    .await?;
    if !verified {
        tracing::info!("Invalid password");
        return Err(invalid());
    }

    Ok(ok("Login successful", issue(user, &jwt_settings)?))
}

#[tracing::instrument(name = "Refresh token", skip(refresh_form, pool, jwt_settings))]
pub async fn refresh(
    refresh_form: web::Json<RefreshRequest>,
    pool: web::Data<SqlitePool>,
    jwt_settings: web::Data<JwtSettings>,
) -> Result<HttpResponse, ApiError> {
    let claims = decode_token_for_refresh(&refresh_form.token, &jwt_settings).map_err(|e| {
        tracing::info!("Refresh rejected: {:?}", e);
        ApiError::bad_request("Invalid token")
    })?;
    let user_id = claims
        .user_id()
        .ok_or_else(|| ApiError::bad_request("Invalid token"))?;

    let user = users::find_by_id(pool.get_ref(), user_id)
        .await?
        .ok_or_else(|| ApiError::bad_request("User not found"))?;

    Ok(ok("Token refreshed", issue(user, &jwt_settings)?))
}
