use std::fmt;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::user::{UserDto, UserRole};
use crate::utils::validation::Validator;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    #[serde(deserialize_with = "crate::models::user::deserialize_secret_string")]
    pub password: SecretString,
    pub username: Option<String>,
    pub role: Option<UserRole>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let password_len = self.password.expose_secret().chars().count();
        Validator::new()
            .email("email", &self.email)
            .check(
                (6..=100).contains(&password_len),
                "password",
                "The password must be between 6 and 100 characters.",
            )
            .optional_max_len("username", self.username.as_deref(), 100)
            .finish()
    }

    /// Username falls back to the local part of the email address.
    pub fn resolved_username(&self) -> String {
        match self.username.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self
                .email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string(),
        }
    }
}

impl fmt::Display for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Email: {}, Role: {:?}", self.email, self.role)
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(deserialize_with = "crate::models::user::deserialize_secret_string")]
    pub password: SecretString,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserDto,
}
