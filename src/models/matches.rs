use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::common::Pagination;
use crate::models::performance::PerformanceWithPlayer;
use crate::utils::validation::Validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum MatchStatus {
    Scheduled,
    Live,
    Finished,
    Postponed,
    Cancelled,
}

impl Default for MatchStatus {
    fn default() -> Self {
        MatchStatus::Scheduled
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Match {
    pub id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub match_date: DateTime<Utc>,
    pub competition: String,
    pub season: String,
    pub home_team_score: i32,
    pub away_team_score: i32,
    pub status: MatchStatus,
    pub venue: String,
    pub referee: String,
    pub attendance: i32,
    pub weather: String,
    pub minutes_played: i32,
    pub round: String,
    pub tournament_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    /// Whether this result currently feeds tournament standings.
    pub fn counts_toward_standings(&self) -> bool {
        self.tournament_id.is_some() && self.status == MatchStatus::Finished
    }
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct MatchSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub game: Match,
    pub home_team_name: String,
    pub away_team_name: String,
    pub tournament_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchDetail {
    #[serde(flatten)]
    pub summary: MatchSummary,
    pub performances: Vec<PerformanceWithPlayer>,
    pub has_analysis: bool,
    pub analysis_completed: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateMatchRequest {
    #[serde(alias = "homeTeamId")]
    pub home_team_id: Uuid,
    #[serde(alias = "awayTeamId")]
    pub away_team_id: Uuid,
    pub match_date: DateTime<Utc>,
    #[serde(default)]
    pub competition: String,
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub home_team_score: i32,
    #[serde(default)]
    pub away_team_score: i32,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub referee: String,
    #[serde(default)]
    pub attendance: i32,
    #[serde(default)]
    pub weather: String,
    #[serde(default)]
    pub round: String,
    #[serde(default, alias = "tournamentId")]
    pub tournament_id: Option<Uuid>,
}

impl CreateMatchRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        Validator::new()
            .max_len("competition", &self.competition, 100)
            .max_len("season", &self.season, 50)
            .range("home_team_score", self.home_team_score, 0, 50)
            .range("away_team_score", self.away_team_score, 0, 50)
            .max_len("venue", &self.venue, 100)
            .max_len("referee", &self.referee, 50)
            .check(self.attendance >= 0, "attendance", "The field attendance must not be negative.")
            .max_len("weather", &self.weather, 20)
            .max_len("round", &self.round, 50)
            .finish()
    }
}

fn default_final_status() -> MatchStatus {
    MatchStatus::Finished
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpdateScoreRequest {
    pub home_team_score: i32,
    pub away_team_score: i32,
    #[serde(default = "default_final_status")]
    pub status: MatchStatus,
    pub minutes_played: Option<i32>,
}

impl UpdateScoreRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        Validator::new()
            .range("home_team_score", self.home_team_score, 0, 50)
            .range("away_team_score", self.away_team_score, 0, 50)
            .optional_range("minutes_played", self.minutes_played, 0, 150)
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpdateMatchStatusRequest {
    pub status: MatchStatus,
}

#[derive(Debug, Deserialize, Default)]
pub struct MatchFilter {
    pub status: Option<MatchStatus>,
    #[serde(alias = "tournamentId")]
    pub tournament_id: Option<Uuid>,
    pub page: Option<i64>,
    #[serde(alias = "pageSize")]
    pub page_size: Option<i64>,
}

impl MatchFilter {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.page_size)
    }
}
