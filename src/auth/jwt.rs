use actix_web::{dev::Payload, http::header, web, FromRequest, HttpMessage, HttpRequest};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::config::jwt::JwtSettings;
use crate::error::ApiError;
use crate::models::user::{User, UserRole};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub iss: String,
    pub aud: String,
    pub iat: usize,
    pub exp: usize,
}

impl Claims {
    /// Parse the user ID from the claims subject field.
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

pub fn generate_token(
    user: &User,
    settings: &JwtSettings,
) -> Result<(String, DateTime<Utc>), jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(settings.expiration_hours);

    let claims = Claims {
        sub: user.id.to_string(),
        name: user.username.clone(),
        email: user.email.clone(),
        role: user.role,
        iss: settings.issuer.clone(),
        aud: settings.audience.clone(),
        iat: now.timestamp() as usize,
        exp: expires_at.timestamp() as usize,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(settings.secret.expose_secret().as_bytes()),
    )?;
    Ok((token, expires_at))
}

fn validation(settings: &JwtSettings) -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[settings.issuer.as_str()]);
    validation.set_audience(&[settings.audience.as_str()]);
    validation
}

pub fn decode_token(token: &str, settings: &JwtSettings) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.secret.expose_secret().as_bytes()),
        &validation(settings),
    )?;
    Ok(token_data.claims)
}

/// Signature, issuer and audience are still checked; expiry is not.
pub fn decode_token_for_refresh(
    token: &str,
    settings: &JwtSettings,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = validation(settings);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.secret.expose_secret().as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

/// Validate the bearer token of a request and return its claims.
/// Shared by the role middleware and the `AuthUser` extractor.
pub fn validate_jwt_from_request(req: &HttpRequest) -> Result<Claims, ApiError> {
    let jwt_settings = req
        .app_data::<web::Data<JwtSettings>>()
        .ok_or_else(|| ApiError::Internal("JWT settings not registered".into()))?;

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("No authorization header".into()))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid authorization header".into()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Invalid authorization header format".into()))?;

    decode_token(token, jwt_settings).map_err(|e| {
        tracing::info!("Rejected bearer token: {:?}", e);
        ApiError::Unauthorized("Invalid token".into())
    })
}

/// Caller identity, taken from claims the role middleware already
/// validated or else decoded from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub claims: Claims,
}

impl AuthUser {
    pub fn role(&self) -> UserRole {
        self.claims.role
    }

    pub fn is_admin(&self) -> bool {
        self.claims.role == UserRole::Admin
    }

    pub fn require_role(&self, allowed: &[UserRole]) -> Result<(), ApiError> {
        if allowed.contains(&self.claims.role) {
            Ok(())
        } else {
            tracing::warn!(
                "User {} with role {} denied; requires one of {:?}",
                self.claims.email,
                self.claims.role,
                allowed
            );
            Err(ApiError::forbidden("Insufficient privileges"))
        }
    }

    pub fn require_admin(&self) -> Result<(), ApiError> {
        self.require_role(&[UserRole::Admin])
    }

    pub fn require_staff(&self) -> Result<(), ApiError> {
        self.require_role(&[UserRole::Admin, UserRole::Referee])
    }
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let cached = req.extensions().get::<Claims>().cloned();
        let claims = match cached {
            Some(claims) => Ok(claims),
            None => validate_jwt_from_request(req),
        };

        let result = claims.and_then(|claims| {
            let user_id = claims
                .user_id()
                .ok_or_else(|| ApiError::Unauthorized("Invalid token subject".into()))?;
            Ok(AuthUser { user_id, claims })
        });
        ready(result)
    }
}
