use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::ApiError;
use crate::utils::validation::Validator;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct PlayerRating {
    pub id: Uuid,
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub rated_by: Uuid,
    pub rating: f64,
    pub attacking_rating: f64,
    pub defending_rating: f64,
    pub passing_rating: f64,
    pub physical_rating: f64,
    pub mental_rating: f64,
    pub comments: String,
    pub positive_highlights: String,
    pub areas_for_improvement: String,
    pub is_man_of_the_match: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct RatingWithPlayer {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub rating: PlayerRating,
    pub player_name: String,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct RatingWithMatch {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub rating: PlayerRating,
    pub player_name: String,
    pub match_date: DateTime<Utc>,
    pub home_team_name: String,
    pub away_team_name: String,
    pub competition: String,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct TopRatedPlayer {
    pub player_id: Uuid,
    pub player_name: String,
    pub position: String,
    pub average_rating: f64,
    pub total_ratings: i64,
    pub man_of_the_match_count: i64,
    pub highest_rating: f64,
    pub lowest_rating: f64,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct ManOfTheMatchEntry {
    pub player_id: Uuid,
    pub player_name: String,
    pub position: String,
    pub match_id: Uuid,
    pub match_date: DateTime<Utc>,
    pub home_team_name: String,
    pub away_team_name: String,
    pub competition: String,
    pub rating: f64,
    pub reason: String,
}

fn default_rating() -> f64 {
    6.0
}

/// Shared by create and update; the ids are ignored on update.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RatingRequest {
    #[serde(alias = "matchId")]
    pub match_id: Uuid,
    #[serde(alias = "playerId")]
    pub player_id: Uuid,
    #[serde(default = "default_rating")]
    pub rating: f64,
    #[serde(default = "default_rating")]
    pub attacking_rating: f64,
    #[serde(default = "default_rating")]
    pub defending_rating: f64,
    #[serde(default = "default_rating")]
    pub passing_rating: f64,
    #[serde(default = "default_rating")]
    pub physical_rating: f64,
    #[serde(default = "default_rating")]
    pub mental_rating: f64,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub positive_highlights: String,
    #[serde(default)]
    pub areas_for_improvement: String,
    #[serde(default)]
    pub is_man_of_the_match: Option<bool>,
}

impl RatingRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        Validator::new()
            .range("rating", self.rating, 1.0, 10.0)
            .range("attacking_rating", self.attacking_rating, 1.0, 10.0)
            .range("defending_rating", self.defending_rating, 1.0, 10.0)
            .range("passing_rating", self.passing_rating, 1.0, 10.0)
            .range("physical_rating", self.physical_rating, 1.0, 10.0)
            .range("mental_rating", self.mental_rating, 1.0, 10.0)
            .max_len("comments", &self.comments, 1000)
            .max_len("positive_highlights", &self.positive_highlights, 500)
            .max_len("areas_for_improvement", &self.areas_for_improvement, 500)
            .finish()
    }
}

/// Body of `PUT /playerratings/{id}`; match and player stay fixed.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpdateRatingRequest {
    #[serde(default = "default_rating")]
    pub rating: f64,
    #[serde(default = "default_rating")]
    pub attacking_rating: f64,
    #[serde(default = "default_rating")]
    pub defending_rating: f64,
    #[serde(default = "default_rating")]
    pub passing_rating: f64,
    #[serde(default = "default_rating")]
    pub physical_rating: f64,
    #[serde(default = "default_rating")]
    pub mental_rating: f64,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub positive_highlights: String,
    #[serde(default)]
    pub areas_for_improvement: String,
    #[serde(default)]
    pub is_man_of_the_match: Option<bool>,
}

impl UpdateRatingRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        Validator::new()
            .range("rating", self.rating, 1.0, 10.0)
            .range("attacking_rating", self.attacking_rating, 1.0, 10.0)
            .range("defending_rating", self.defending_rating, 1.0, 10.0)
            .range("passing_rating", self.passing_rating, 1.0, 10.0)
            .range("physical_rating", self.physical_rating, 1.0, 10.0)
            .range("mental_rating", self.mental_rating, 1.0, 10.0)
            .max_len("comments", &self.comments, 1000)
            .max_len("positive_highlights", &self.positive_highlights, 500)
            .max_len("areas_for_improvement", &self.areas_for_improvement, 500)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_ratings_default_to_six() {
        let request: RatingRequest = serde_json::from_value(serde_json::json!({
            "match_id": Uuid::new_v4(),
            "player_id": Uuid::new_v4(),
            "rating": 8.5
        }))
        .unwrap();
        assert_eq!(request.attacking_rating, 6.0);
        assert_eq!(request.mental_rating, 6.0);
        assert!(request.is_man_of_the_match.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn ratings_outside_one_to_ten_fail() {
        let request: UpdateRatingRequest = serde_json::from_value(serde_json::json!({
            "rating": 10.5,
            "passing_rating": 0.5
        }))
        .unwrap();
        match request.validate() {
            Err(ApiError::Validation(errors)) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["rating", "passing_rating"]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
