//! Balanced split of a 16-player pool into two 8-a-side teams.
//!
//! Each team is seeded with two defenders, two attackers and one
//! midfielder. The remaining six players go, in random order, to whichever
//! team currently has fewer points (team 1 wins ties) until a team is full.
//! This is a greedy heuristic, not an optimal partition.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::models::shuffle::{PositionGroup, ShufflePlayer, ShuffleResult, ShuffledTeam};

pub const SQUAD_SIZE: usize = 16;
pub const TEAM_SIZE: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShuffleError {
    #[error("Exactly 16 players are required for team shuffle")]
    WrongSquadSize(usize),
    #[error("At least 4 defenders are required")]
    NotEnoughDefenders,
    #[error("At least 4 attackers are required")]
    NotEnoughAttackers,
    #[error("At least 2 midfielders are required")]
    NotEnoughMidfielders,
}

const DEFENDER_TOKENS: [&str; 8] = ["def", "gk", "cb", "lb", "rb", "lwb", "rwb", "sw"];
const ATTACKER_TOKENS: [&str; 6] = ["att", "st", "cf", "lw", "rw", "ss"];

/// Map a free-text roster position onto a shuffle group.
/// Keepers count as defenders; anything unrecognised plays midfield.
pub fn classify_position(position: &str) -> PositionGroup {
    let lowered = position.trim().to_lowercase();
    let is_token = |tokens: &[&str]| {
        lowered
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| tokens.contains(&word))
    };

    if lowered.contains("mid") || is_token(&["mid", "cm", "cdm", "cam", "dm", "am", "lm", "rm"]) {
        PositionGroup::Midfielder
    } else if lowered.contains("keeper")
        || lowered.contains("goal")
        || lowered.contains("back")
        || lowered.contains("defen")
        || is_token(&DEFENDER_TOKENS)
    {
        PositionGroup::Defender
    } else if lowered.contains("forward")
        || lowered.contains("wing")
        || lowered.contains("striker")
        || lowered.contains("attack")
        || is_token(&ATTACKER_TOKENS)
    {
        PositionGroup::Attacker
    } else {
        PositionGroup::Midfielder
    }
}

/// Lines of a team as `D-M-A`.
pub fn formation(players: &[ShufflePlayer]) -> String {
    let count = |group| players.iter().filter(|p| p.position == group).count();
    format!(
        "{}-{}-{}",
        count(PositionGroup::Defender),
        count(PositionGroup::Midfielder),
        count(PositionGroup::Attacker)
    )
}

fn total_points(players: &[ShufflePlayer]) -> i32 {
    players.iter().map(|p| p.points).sum()
}

fn into_team(players: Vec<ShufflePlayer>) -> ShuffledTeam {
    ShuffledTeam {
        total_points: total_points(&players),
        formation: formation(&players),
        players,
    }
}

pub fn shuffle_teams<R: Rng + ?Sized>(
    players: Vec<ShufflePlayer>,
    rng: &mut R,
) -> Result<ShuffleResult, ShuffleError> {
    if players.len() != SQUAD_SIZE {
        return Err(ShuffleError::WrongSquadSize(players.len()));
    }

    let (mut defenders, mut attackers, mut midfielders) =
        players.into_iter().fold((Vec::new(), Vec::new(), Vec::new()), |mut acc, p| {
            match p.position {
                PositionGroup::Defender => acc.0.push(p),
                PositionGroup::Attacker => acc.1.push(p),
                PositionGroup::Midfielder => acc.2.push(p),
            }
            acc
        });

    if defenders.len() < 4 {
        return Err(ShuffleError::NotEnoughDefenders);
    }
    if attackers.len() < 4 {
        return Err(ShuffleError::NotEnoughAttackers);
    }
    if midfielders.len() < 2 {
        return Err(ShuffleError::NotEnoughMidfielders);
    }

    defenders.shuffle(rng);
    attackers.shuffle(rng);
    midfielders.shuffle(rng);

    let mut remaining: Vec<ShufflePlayer> = defenders
        .split_off(4)
        .into_iter()
        .chain(attackers.split_off(4))
        .chain(midfielders.split_off(2))
        .collect();
    remaining.shuffle(rng);

    let mut defenders = defenders.into_iter();
    let mut attackers = attackers.into_iter();
    let mut midfielders = midfielders.into_iter();

    let mut team1: Vec<ShufflePlayer> = Vec::with_capacity(TEAM_SIZE);
    let mut team2: Vec<ShufflePlayer> = Vec::with_capacity(TEAM_SIZE);
    team1.extend(defenders.by_ref().take(2));
    team1.extend(attackers.by_ref().take(2));
    team1.extend(midfielders.by_ref().take(1));
    team2.extend(defenders);
    team2.extend(attackers);
    team2.extend(midfielders);

    let mut team1_points = total_points(&team1);
    let mut team2_points = total_points(&team2);

    for player in remaining {
        let to_team1 = team1.len() < TEAM_SIZE
            && (team2.len() >= TEAM_SIZE || team1_points <= team2_points);
        if to_team1 {
            team1_points += player.points;
            team1.push(player);
        } else {
            team2_points += player.points;
            team2.push(player);
        }
    }

    Ok(ShuffleResult {
        team1: into_team(team1),
        team2: into_team(team2),
    })
}
