use actix_web::web;
use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::ApiError;

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, DEFAULT_COST)
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    verify(password, hash).unwrap_or(false)
}

/// Hash on the blocking pool; bcrypt is deliberately slow.
pub async fn hash_password_blocking(password: String) -> Result<String, ApiError> {
    web::block(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::Internal(format!("password hashing task failed: {}", e)))?
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {}", e)))
}

pub async fn verify_password_blocking(password: String, hash: String) -> Result<bool, ApiError> {
    web::block(move || verify_password(&password, &hash))
        .await
        .map_err(|e| ApiError::Internal(format!("password verification task failed: {}", e)))
}
