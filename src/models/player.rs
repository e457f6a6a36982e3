use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::common::Pagination;
use crate::models::performance::PerformanceWithMatch;
use crate::models::statistics::StatisticsView;
use crate::utils::validation::Validator;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub position: String,
    pub age: i32,
    pub nationality: String,
    pub team_id: Option<Uuid>,
    pub height: i32,
    pub weight: i32,
    pub preferred_foot: String,
    pub jersey_number: i32,
    pub photo_url: String,
    pub overall_rating: i32,
    pub is_subscribed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct PlayerSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub player: Player,
    pub team_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlayerDetail {
    #[serde(flatten)]
    pub player: Player,
    pub team_name: Option<String>,
    pub statistics: Vec<StatisticsView>,
    pub recent_performances: Vec<PerformanceWithMatch>,
}

fn default_foot() -> String {
    "Right".to_string()
}

fn default_overall_rating() -> i32 {
    60
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlayerRequest {
    pub name: String,
    pub position: String,
    pub age: i32,
    #[serde(default)]
    pub nationality: String,
    #[serde(default, alias = "teamId")]
    pub team_id: Option<Uuid>,
    #[serde(default)]
    pub height: i32,
    #[serde(default)]
    pub weight: i32,
    #[serde(default = "default_foot")]
    pub preferred_foot: String,
    #[serde(default)]
    pub jersey_number: i32,
    #[serde(default)]
    pub photo_url: String,
    #[serde(default = "default_overall_rating")]
    pub overall_rating: i32,
    #[serde(default, alias = "isSubscribed")]
    pub is_subscribed: bool,
}

impl PlayerRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        Validator::new()
            .required("name", &self.name, 100)
            .required("position", &self.position, 50)
            .range("age", self.age, 16, 50)
            .max_len("nationality", &self.nationality, 50)
            .range("height", self.height, 0, 300)
            .range("weight", self.weight, 0, 150)
            .check(
                matches!(self.preferred_foot.as_str(), "Left" | "Right"),
                "preferred_foot",
                "The preferred_foot field must be Left or Right.",
            )
            .range("jersey_number", self.jersey_number, 0, 100)
            .max_len("photo_url", &self.photo_url, 500)
            .range("overall_rating", self.overall_rating, 1, 99)
            .finish()
    }
}

/// Partial update: only the fields present are changed.
#[derive(Debug, Deserialize, Default)]
pub struct UpdatePlayerRequest {
    pub name: Option<String>,
    pub position: Option<String>,
    pub age: Option<i32>,
    pub nationality: Option<String>,
    #[serde(alias = "teamId")]
    pub team_id: Option<Uuid>,
    pub height: Option<i32>,
    pub weight: Option<i32>,
    pub preferred_foot: Option<String>,
    pub jersey_number: Option<i32>,
    pub photo_url: Option<String>,
    pub overall_rating: Option<i32>,
    #[serde(alias = "isSubscribed")]
    pub is_subscribed: Option<bool>,
}

impl UpdatePlayerRequest {
    /// Lay the sent fields over the stored row.
    pub fn merge(self, current: Player) -> PlayerRequest {
        PlayerRequest {
            name: self.name.unwrap_or(current.name),
            position: self.position.unwrap_or(current.position),
            age: self.age.unwrap_or(current.age),
            nationality: self.nationality.unwrap_or(current.nationality),
            team_id: self.team_id.or(current.team_id),
            height: self.height.unwrap_or(current.height),
            weight: self.weight.unwrap_or(current.weight),
            preferred_foot: self.preferred_foot.unwrap_or(current.preferred_foot),
            jersey_number: self.jersey_number.unwrap_or(current.jersey_number),
            photo_url: self.photo_url.unwrap_or(current.photo_url),
            overall_rating: self.overall_rating.unwrap_or(current.overall_rating),
            is_subscribed: self.is_subscribed.unwrap_or(current.is_subscribed),
        }
    }
}

/// Outcome of a bulk import. Rejected rows are reported, not fatal.
#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub created: usize,
    pub errors: Vec<String>,
    pub players: Vec<Player>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PlayerFilter {
    #[serde(alias = "teamId")]
    pub team_id: Option<Uuid>,
    pub position: Option<String>,
    pub page: Option<i64>,
    #[serde(alias = "pageSize")]
    pub page_size: Option<i64>,
}

impl PlayerFilter {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PlayerRequest {
        serde_json::from_value(serde_json::json!({
            "name": "Sergio Ramos",
            "position": "Center Back",
            "age": 35
        }))
        .unwrap()
    }

    #[test]
    fn defaults_are_applied() {
        let r = request();
        assert_eq!(r.preferred_foot, "Right");
        assert_eq!(r.overall_rating, 60);
        assert!(r.team_id.is_none());
        assert!(r.validate().is_ok());
    }

    #[test]
    fn partial_update_keeps_unsent_fields() {
        let stored = Player {
            id: Uuid::new_v4(),
            name: "Luka Modric".into(),
            position: "Central Midfielder".into(),
            age: 38,
            nationality: "Croatia".into(),
            team_id: Some(Uuid::new_v4()),
            height: 172,
            weight: 66,
            preferred_foot: "Right".into(),
            jersey_number: 10,
            photo_url: String::new(),
            overall_rating: 86,
            is_subscribed: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let update: UpdatePlayerRequest =
            serde_json::from_value(serde_json::json!({ "isSubscribed": true, "age": 39 }))
                .unwrap();

        let merged = update.merge(stored.clone());
        assert!(merged.is_subscribed);
        assert_eq!(merged.age, 39);
        assert_eq!(merged.team_id, stored.team_id);
        assert_eq!(merged.jersey_number, 10);
        assert_eq!(merged.overall_rating, 86);
        assert_eq!(merged.name, "Luka Modric");
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let mut r = request();
        r.age = 51;
        r.jersey_number = 101;
        r.preferred_foot = "Both".into();
        match r.validate() {
            Err(ApiError::Validation(errors)) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["age", "preferred_foot", "jersey_number"]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
