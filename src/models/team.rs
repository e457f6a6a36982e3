use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::common::Pagination;
use crate::models::player::Player;
use crate::utils::validation::Validator;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub short_name: String,
    pub city: String,
    pub country: String,
    pub stadium: String,
    pub founded: i32,
    pub primary_color: String,
    pub secondary_color: String,
    pub manager: String,
    pub league: String,
    pub logo_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Team row as listed, with its current squad size.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct TeamSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub team: Team,
    pub player_count: i64,
}

/// A tournament the team takes part in, with its standings row.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct TeamTournamentEntry {
    pub tournament_id: Uuid,
    pub tournament_name: String,
    pub status: String,
    pub group_name: String,
    pub points: i32,
}

#[derive(Debug, Serialize)]
pub struct TeamDetail {
    #[serde(flatten)]
    pub team: Team,
    pub players: Vec<Player>,
    pub tournaments: Vec<TeamTournamentEntry>,
}

/// Body for both create and full update.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct TeamRequest {
    pub name: String,
    pub short_name: String,
    pub city: String,
    pub country: String,
    pub stadium: String,
    pub founded: i32,
    pub primary_color: String,
    pub secondary_color: String,
    pub manager: String,
    pub league: String,
    pub logo_url: String,
}

impl TeamRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        Validator::new()
            .required("name", &self.name, 100)
            .max_len("short_name", &self.short_name, 10)
            .max_len("city", &self.city, 50)
            .max_len("country", &self.country, 50)
            .max_len("stadium", &self.stadium, 100)
            .max_len("primary_color", &self.primary_color, 20)
            .max_len("secondary_color", &self.secondary_color, 20)
            .max_len("manager", &self.manager, 100)
            .max_len("league", &self.league, 50)
            .max_len("logo_url", &self.logo_url, 500)
            .range("founded", self.founded, 0, 2100)
            .finish()
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct TeamFilter {
    pub league: Option<String>,
    pub country: Option<String>,
    pub page: Option<i64>,
    #[serde(alias = "pageSize")]
    pub page_size: Option<i64>,
}

impl TeamFilter {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_required_and_short_name_bounded() {
        let request = TeamRequest {
            short_name: "TOOLONGNAME".into(),
            ..Default::default()
        };
        match request.validate() {
            Err(ApiError::Validation(errors)) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "name");
                assert_eq!(errors[1].field, "short_name");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn minimal_team_is_valid() {
        let request = TeamRequest {
            name: "Real Madrid".into(),
            founded: 1902,
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }
}
