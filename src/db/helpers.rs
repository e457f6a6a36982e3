//! Helpers that turn common query outcomes into `ApiError`s.
//!
//! ```ignore
//! let team = require_record(teams::find_by_id(pool, id).await?, "Team not found")?;
//! ```

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ApiError;

/// Unwrap an optional row, returning NotFound if it is missing.
pub fn require_record<T>(record: Option<T>, not_found_message: &str) -> Result<T, ApiError> {
    record.ok_or_else(|| ApiError::not_found(not_found_message))
}

/// Fail with Conflict when a lookup found something.
pub fn ensure_absent(found: bool, conflict_message: &str) -> Result<(), ApiError> {
    if found {
        Err(ApiError::conflict(conflict_message))
    } else {
        Ok(())
    }
}

pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .map(|e| e.is_unique_violation())
        .unwrap_or(false)
}

pub fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .map(|e| e.is_foreign_key_violation())
        .unwrap_or(false)
}

/// Classify constraint failures a handler did not pre-check as 409.
pub fn conflict_on_constraint(error: sqlx::Error, message: &str) -> ApiError {
    if is_unique_violation(&error) || is_foreign_key_violation(&error) {
        tracing::info!("Constraint violation mapped to conflict: {}", error);
        ApiError::conflict(message)
    } else {
        ApiError::Database(error)
    }
}

/// Open a pool with foreign keys enforced and WAL journaling.
pub async fn connect_pool(url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}
