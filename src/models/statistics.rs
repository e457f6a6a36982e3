use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::common::Pagination;
use crate::utils::validation::Validator;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct PlayerStatistics {
    pub id: Uuid,
    pub player_id: Uuid,
    pub season: String,
    pub games_played: i32,
    pub games_started: i32,
    pub minutes_played: i32,
    pub goals: i32,
    pub assists: i32,
    pub shots_total: i32,
    pub shots_on_target: i32,
    pub key_passes: i32,
    pub big_chances_created: i32,
    pub big_chances_missed: i32,
    pub tackles: i32,
    pub interceptions: i32,
    pub clearances: i32,
    pub blocked_shots: i32,
    pub fouls: i32,
    pub fouls_drawn: i32,
    pub passes_attempted: i32,
    pub passes_completed: i32,
    pub crosses_attempted: i32,
    pub crosses_completed: i32,
    pub distance_covered: f64,
    pub sprints_completed: i32,
    pub yellow_cards: i32,
    pub red_cards: i32,
    pub average_rating: f64,
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Percentage rounded to one decimal; zero when nothing was attempted.
fn percentage(part: i32, whole: i32) -> f64 {
    if whole <= 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 1000.0).round() / 10.0
}

impl PlayerStatistics {
    pub fn pass_accuracy(&self) -> f64 {
        percentage(self.passes_completed, self.passes_attempted)
    }

    pub fn shot_accuracy(&self) -> f64 {
        percentage(self.shots_on_target, self.shots_total)
    }

    pub fn win_percentage(&self) -> f64 {
        percentage(self.wins, self.wins + self.draws + self.losses)
    }
}

/// Season row as served, with the derived ratios.
#[derive(Debug, Serialize, Clone)]
pub struct StatisticsView {
    #[serde(flatten)]
    pub statistics: PlayerStatistics,
    pub pass_accuracy: f64,
    pub shot_accuracy: f64,
    pub win_percentage: f64,
}

impl From<PlayerStatistics> for StatisticsView {
    fn from(statistics: PlayerStatistics) -> Self {
        Self {
            pass_accuracy: statistics.pass_accuracy(),
            shot_accuracy: statistics.shot_accuracy(),
            win_percentage: statistics.win_percentage(),
            statistics,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct StatisticsRequest {
    #[serde(alias = "playerId")]
    pub player_id: Uuid,
    pub season: String,
    pub games_played: i32,
    pub games_started: i32,
    pub minutes_played: i32,
    pub goals: i32,
    pub assists: i32,
    pub shots_total: i32,
    pub shots_on_target: i32,
    pub key_passes: i32,
    pub big_chances_created: i32,
    pub big_chances_missed: i32,
    pub tackles: i32,
    pub interceptions: i32,
    pub clearances: i32,
    pub blocked_shots: i32,
    pub fouls: i32,
    pub fouls_drawn: i32,
    pub passes_attempted: i32,
    pub passes_completed: i32,
    pub crosses_attempted: i32,
    pub crosses_completed: i32,
    pub distance_covered: f64,
    pub sprints_completed: i32,
    pub yellow_cards: i32,
    pub red_cards: i32,
    pub average_rating: f64,
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
}

impl StatisticsRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let counters = [
            ("games_played", self.games_played),
            ("games_started", self.games_started),
            ("minutes_played", self.minutes_played),
            ("goals", self.goals),
            ("assists", self.assists),
            ("shots_total", self.shots_total),
            ("shots_on_target", self.shots_on_target),
            ("key_passes", self.key_passes),
            ("big_chances_created", self.big_chances_created),
            ("big_chances_missed", self.big_chances_missed),
            ("tackles", self.tackles),
            ("interceptions", self.interceptions),
            ("clearances", self.clearances),
            ("blocked_shots", self.blocked_shots),
            ("fouls", self.fouls),
            ("fouls_drawn", self.fouls_drawn),
            ("passes_attempted", self.passes_attempted),
            ("passes_completed", self.passes_completed),
            ("crosses_attempted", self.crosses_attempted),
            ("crosses_completed", self.crosses_completed),
            ("sprints_completed", self.sprints_completed),
            ("yellow_cards", self.yellow_cards),
            ("red_cards", self.red_cards),
            ("wins", self.wins),
            ("draws", self.draws),
            ("losses", self.losses),
        ];

        let mut validator = Validator::new();
        validator
            .check(!self.player_id.is_nil(), "player_id", "The player_id field is required.")
            .required("season", &self.season, 20);
        for (field, value) in counters {
            validator.check(value >= 0, field, format!("The field {} must not be negative.", field));
        }
        validator
            .check(self.distance_covered >= 0.0, "distance_covered", "The field distance_covered must not be negative.")
            .range("average_rating", self.average_rating, 0.0, 10.0)
            .finish()
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct StatisticsFilter {
    #[serde(alias = "playerId")]
    pub player_id: Option<Uuid>,
    pub season: Option<String>,
    pub page: Option<i64>,
    #[serde(alias = "pageSize")]
    pub page_size: Option<i64>,
}

impl StatisticsFilter {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.page_size)
    }
}
