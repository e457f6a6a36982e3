use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::common::Pagination;
use crate::models::matches::MatchSummary;
use crate::utils::validation::Validator;

pub const TOURNAMENT_FORMATS: [&str; 3] = ["League", "Knockout", "Group+Knockout"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum TournamentStatus {
    Upcoming,
    Active,
    Completed,
    Cancelled,
}

impl Default for TournamentStatus {
    fn default() -> Self {
        TournamentStatus::Upcoming
    }
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Tournament {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub format: String,
    pub status: TournamentStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub season: String,
    pub max_teams: i32,
    pub organizer: String,
    pub logo_url: String,
    pub rules: String,
    pub prize_pool: f64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct TournamentSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub tournament: Tournament,
    pub teams_count: i64,
    pub matches_count: i64,
}

/// One team's row in a tournament table.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq)]
pub struct StandingRow {
    pub team_id: Uuid,
    pub team_name: String,
    pub group_name: String,
    pub joined_at: DateTime<Utc>,
    pub played: i32,
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub goal_difference: i32,
    pub points: i32,
}

#[derive(Debug, Serialize)]
pub struct Standing {
    pub position: usize,
    #[serde(flatten)]
    pub row: StandingRow,
}

#[derive(Debug, Serialize)]
pub struct TournamentDetail {
    #[serde(flatten)]
    pub tournament: Tournament,
    pub teams: Vec<StandingRow>,
    pub matches: Vec<MatchSummary>,
}

fn default_format() -> String {
    "League".to_string()
}

fn default_max_teams() -> i32 {
    16
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TournamentRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default)]
    pub status: TournamentStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub season: String,
    #[serde(default = "default_max_teams")]
    pub max_teams: i32,
    #[serde(default)]
    pub organizer: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub rules: String,
    #[serde(default)]
    pub prize_pool: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl TournamentRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        Validator::new()
            .required("name", &self.name, 100)
            .max_len("description", &self.description, 500)
            .check(
                TOURNAMENT_FORMATS.contains(&self.format.as_str()),
                "format",
                "The format field must be League, Knockout or Group+Knockout.",
            )
            .check(
                self.end_date >= self.start_date,
                "end_date",
                "End date must not be before start date.",
            )
            .max_len("season", &self.season, 50)
            .range("max_teams", self.max_teams, 2, 64)
            .max_len("organizer", &self.organizer, 100)
            .max_len("logo_url", &self.logo_url, 500)
            .max_len("rules", &self.rules, 1000)
            .check(self.prize_pool >= 0.0, "prize_pool", "The field prize_pool must not be negative.")
            .max_len("currency", &self.currency, 50)
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpdateTournamentStatusRequest {
    pub status: TournamentStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AddTeamRequest {
    #[serde(default)]
    pub group: Option<String>,
}

impl AddTeamRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        Validator::new()
            .optional_max_len("group", self.group.as_deref(), 20)
            .finish()
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct TournamentFilter {
    pub status: Option<TournamentStatus>,
    pub page: Option<i64>,
    #[serde(alias = "pageSize")]
    pub page_size: Option<i64>,
}

impl TournamentFilter {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.page_size)
    }
}
