use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::ApiError;
use crate::utils::validation::Validator;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct StatusCheck {
    pub id: Uuid,
    pub client_name: String,
    pub message: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StatusCheckRequest {
    #[serde(alias = "clientName")]
    pub client_name: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl StatusCheckRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        Validator::new()
            .required("client_name", &self.client_name, 100)
            .optional_max_len("message", self.message.as_deref(), 500)
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub service: String,
    pub version: String,
    pub database: String,
}
