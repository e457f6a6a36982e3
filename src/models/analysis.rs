use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::ApiError;
use crate::utils::validation::Validator;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct MatchAnalysis {
    pub id: Uuid,
    pub match_id: Uuid,
    pub analyzed_by: Uuid,
    pub man_of_the_match_id: Option<Uuid>,
    pub man_of_the_match_reason: String,
    pub match_summary: String,
    pub key_moments: String,
    pub tactical_analysis: String,
    pub home_team_analysis: String,
    pub away_team_analysis: String,
    pub home_team_possession: i32,
    pub away_team_possession: i32,
    pub home_team_shots: i32,
    pub away_team_shots: i32,
    pub home_team_shots_on_target: i32,
    pub away_team_shots_on_target: i32,
    pub home_team_corners: i32,
    pub away_team_corners: i32,
    pub home_team_fouls: i32,
    pub away_team_fouls: i32,
    pub home_team_yellow_cards: i32,
    pub away_team_yellow_cards: i32,
    pub home_team_red_cards: i32,
    pub away_team_red_cards: i32,
    pub home_team_offsides: i32,
    pub away_team_offsides: i32,
    pub match_quality_rating: f64,
    pub match_quality_comments: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct AnalysisView {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub analysis: MatchAnalysis,
    pub man_of_the_match_name: Option<String>,
}

/// Finished match still waiting for a write-up.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct PendingAnalysis {
    pub match_id: Uuid,
    pub home_team_name: String,
    pub away_team_name: String,
    pub home_team_score: i32,
    pub away_team_score: i32,
    pub match_date: DateTime<Utc>,
    pub competition: String,
    pub venue: String,
}

fn default_possession() -> i32 {
    50
}

fn default_quality() -> f64 {
    6.0
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnalysisRequest {
    #[serde(default, alias = "manOfTheMatchId")]
    pub man_of_the_match_id: Option<Uuid>,
    #[serde(default)]
    pub man_of_the_match_reason: String,
    #[serde(default)]
    pub match_summary: String,
    #[serde(default)]
    pub key_moments: String,
    #[serde(default)]
    pub tactical_analysis: String,
    #[serde(default)]
    pub home_team_analysis: String,
    #[serde(default)]
    pub away_team_analysis: String,
    #[serde(default = "default_possession")]
    pub home_team_possession: i32,
    #[serde(default = "default_possession")]
    pub away_team_possession: i32,
    #[serde(default)]
    pub home_team_shots: i32,
    #[serde(default)]
    pub away_team_shots: i32,
    #[serde(default)]
    pub home_team_shots_on_target: i32,
    #[serde(default)]
    pub away_team_shots_on_target: i32,
    #[serde(default)]
    pub home_team_corners: i32,
    #[serde(default)]
    pub away_team_corners: i32,
    #[serde(default)]
    pub home_team_fouls: i32,
    #[serde(default)]
    pub away_team_fouls: i32,
    #[serde(default)]
    pub home_team_yellow_cards: i32,
    #[serde(default)]
    pub away_team_yellow_cards: i32,
    #[serde(default)]
    pub home_team_red_cards: i32,
    #[serde(default)]
    pub away_team_red_cards: i32,
    #[serde(default)]
    pub home_team_offsides: i32,
    #[serde(default)]
    pub away_team_offsides: i32,
    #[serde(default = "default_quality")]
    pub match_quality_rating: f64,
    #[serde(default)]
    pub match_quality_comments: String,
    #[serde(default)]
    pub is_completed: bool,
}

impl AnalysisRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut validator = Validator::new();
        validator
            .max_len("man_of_the_match_reason", &self.man_of_the_match_reason, 1000)
            .max_len("match_summary", &self.match_summary, 2000)
            .max_len("key_moments", &self.key_moments, 1000)
            .max_len("tactical_analysis", &self.tactical_analysis, 1000)
            .max_len("home_team_analysis", &self.home_team_analysis, 1000)
            .max_len("away_team_analysis", &self.away_team_analysis, 1000)
            .range("home_team_possession", self.home_team_possession, 0, 100)
            .range("away_team_possession", self.away_team_possession, 0, 100)
            .range("match_quality_rating", self.match_quality_rating, 1.0, 10.0)
            .max_len("match_quality_comments", &self.match_quality_comments, 500);

        let counters = [
            ("home_team_shots", self.home_team_shots),
            ("away_team_shots", self.away_team_shots),
            ("home_team_shots_on_target", self.home_team_shots_on_target),
            ("away_team_shots_on_target", self.away_team_shots_on_target),
            ("home_team_corners", self.home_team_corners),
            ("away_team_corners", self.away_team_corners),
            ("home_team_fouls", self.home_team_fouls),
            ("away_team_fouls", self.away_team_fouls),
            ("home_team_yellow_cards", self.home_team_yellow_cards),
            ("away_team_yellow_cards", self.away_team_yellow_cards),
            ("home_team_red_cards", self.home_team_red_cards),
            ("away_team_red_cards", self.away_team_red_cards),
            ("home_team_offsides", self.home_team_offsides),
            ("away_team_offsides", self.away_team_offsides),
        ];
        for (field, value) in counters {
            validator.check(value >= 0, field, format!("The field {} must not be negative.", field));
        }
        validator.finish()
    }
}
