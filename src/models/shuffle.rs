use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::utils::validation::Validator;

pub const MIN_POINTS: i32 = 1;
pub const MAX_POINTS: i32 = 99;

/// Coarse line a player is drafted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionGroup {
    #[serde(rename = "DEF")]
    Defender,
    #[serde(rename = "MID")]
    Midfielder,
    #[serde(rename = "ATT")]
    Attacker,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShufflePlayer {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    pub position: PositionGroup,
    pub points: i32,
    #[serde(default, alias = "isSubscribed")]
    pub is_subscribed: bool,
}

#[derive(Debug, Deserialize)]
pub struct ShuffleRequest {
    pub players: Vec<ShufflePlayer>,
}

impl ShuffleRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut validator = Validator::new();
        for (index, player) in self.players.iter().enumerate() {
            validator
                .required(&format!("players[{}].name", index), &player.name, 100)
                .range(
                    &format!("players[{}].points", index),
                    player.points,
                    MIN_POINTS,
                    MAX_POINTS,
                );
        }
        validator.finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct ShuffleByIdsRequest {
    #[serde(alias = "playerIds")]
    pub player_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShuffledTeam {
    pub players: Vec<ShufflePlayer>,
    pub total_points: i32,
    pub formation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShuffleResult {
    pub team1: ShuffledTeam,
    pub team2: ShuffledTeam,
}

#[derive(Debug, Deserialize)]
pub struct AnnouncementRequest {
    pub teams: ShuffleResult,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub price: Option<String>,
    pub date: Option<String>,
    #[serde(default)]
    pub subs: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_outside_the_rating_scale_are_rejected() {
        let request: ShuffleRequest = serde_json::from_value(serde_json::json!({
            "players": [
                { "name": "Keeper", "position": "DEF", "points": 70 },
                { "name": "Giant", "position": "ATT", "points": i32::MAX },
                { "name": "", "position": "MID", "points": 0 }
            ]
        }))
        .unwrap();

        match request.validate() {
            Err(ApiError::Validation(errors)) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(
                    fields,
                    vec!["players[1].points", "players[2].name", "players[2].points"]
                );
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
