use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::ApiError;
use crate::utils::validation::Validator;

/// Box score of one player in one match.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct MatchPerformance {
    pub id: Uuid,
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub minutes_played: i32,
    pub started: bool,
    pub goals: i32,
    pub assists: i32,
    pub shots: i32,
    pub shots_on_target: i32,
    pub passes: i32,
    pub passes_completed: i32,
    pub key_passes: i32,
    pub tackles: i32,
    pub tackles_won: i32,
    pub interceptions: i32,
    pub clearances: i32,
    pub crosses: i32,
    pub crosses_completed: i32,
    pub dribbles: i32,
    pub dribbles_completed: i32,
    pub fouls: i32,
    pub fouls_drawn: i32,
    pub offsides: i32,
    pub yellow_cards: i32,
    pub red_cards: i32,
    pub goal_minutes: String,
    pub assist_minutes: String,
    pub card_minutes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct PerformanceWithPlayer {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub performance: MatchPerformance,
    pub player_name: String,
    pub position: String,
    pub team_id: Option<Uuid>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct PerformanceWithMatch {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub performance: MatchPerformance,
    pub match_date: DateTime<Utc>,
    pub home_team_name: String,
    pub away_team_name: String,
    pub competition: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PerformanceRequest {
    #[serde(alias = "playerId")]
    pub player_id: Uuid,
    pub minutes_played: i32,
    pub started: bool,
    pub goals: i32,
    pub assists: i32,
    pub shots: i32,
    pub shots_on_target: i32,
    pub passes: i32,
    pub passes_completed: i32,
    pub key_passes: i32,
    pub tackles: i32,
    pub tackles_won: i32,
    pub interceptions: i32,
    pub clearances: i32,
    pub crosses: i32,
    pub crosses_completed: i32,
    pub dribbles: i32,
    pub dribbles_completed: i32,
    pub fouls: i32,
    pub fouls_drawn: i32,
    pub offsides: i32,
    pub yellow_cards: i32,
    pub red_cards: i32,
    pub goal_minutes: String,
    pub assist_minutes: String,
    pub card_minutes: String,
}

impl PerformanceRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut validator = Validator::new();
        validator
            .check(!self.player_id.is_nil(), "player_id", "The player_id field is required.")
            .range("minutes_played", self.minutes_played, 0, 150)
            .range("yellow_cards", self.yellow_cards, 0, 2)
            .range("red_cards", self.red_cards, 0, 1)
            .check(
                self.shots_on_target <= self.shots,
                "shots_on_target",
                "Shots on target cannot exceed shots.",
            )
            .check(
                self.passes_completed <= self.passes,
                "passes_completed",
                "Completed passes cannot exceed passes.",
            )
            .max_len("goal_minutes", &self.goal_minutes, 500)
            .max_len("assist_minutes", &self.assist_minutes, 500)
            .max_len("card_minutes", &self.card_minutes, 500);

        let counters = [
            ("goals", self.goals),
            ("assists", self.assists),
            ("shots", self.shots),
            ("passes", self.passes),
            ("key_passes", self.key_passes),
            ("tackles", self.tackles),
            ("tackles_won", self.tackles_won),
            ("interceptions", self.interceptions),
            ("clearances", self.clearances),
            ("crosses", self.crosses),
            ("crosses_completed", self.crosses_completed),
            ("dribbles", self.dribbles),
            ("dribbles_completed", self.dribbles_completed),
            ("fouls", self.fouls),
            ("fouls_drawn", self.fouls_drawn),
            ("offsides", self.offsides),
        ];
        for (field, value) in counters {
            validator.check(value >= 0, field, format!("The field {} must not be negative.", field));
        }
        validator.finish()
    }
}
