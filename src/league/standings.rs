use std::cmp::Ordering;
use std::ops::{Add, Neg, Sub};

use crate::models::tournament::{Standing, StandingRow};

/// Final score of a match, home side first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub home: i32,
    pub away: i32,
}

impl Score {
    pub fn new(home: i32, away: i32) -> Self {
        Self { home, away }
    }
}

/// Change to one team's standings row. Every instance keeps
/// `points == 3 * wins + draws`, so sums and negations of deltas do too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StandingsDelta {
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub points: i32,
}

impl StandingsDelta {
    /// Contribution of a single result to the side that scored `scored`.
    pub fn for_result(scored: i32, conceded: i32) -> Self {
        let (wins, draws, losses) = match scored.cmp(&conceded) {
            Ordering::Greater => (1, 0, 0),
            Ordering::Equal => (0, 1, 0),
            Ordering::Less => (0, 0, 1),
        };
        Self {
            wins,
            draws,
            losses,
            goals_for: scored,
            goals_against: conceded,
            points: 3 * wins + draws,
        }
    }

    pub fn goal_difference(&self) -> i32 {
        self.goals_for - self.goals_against
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl Add for StandingsDelta {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            wins: self.wins + rhs.wins,
            draws: self.draws + rhs.draws,
            losses: self.losses + rhs.losses,
            goals_for: self.goals_for + rhs.goals_for,
            goals_against: self.goals_against + rhs.goals_against,
            points: self.points + rhs.points,
        }
    }
}

impl Neg for StandingsDelta {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            wins: -self.wins,
            draws: -self.draws,
            losses: -self.losses,
            goals_for: -self.goals_for,
            goals_against: -self.goals_against,
            points: -self.points,
        }
    }
}

impl Sub for StandingsDelta {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

/// Home and away deltas produced by one result.
pub fn result_deltas(score: Score) -> (StandingsDelta, StandingsDelta) {
    (
        StandingsDelta::for_result(score.home, score.away),
        StandingsDelta::for_result(score.away, score.home),
    )
}

/// Net change when a match moves from counting `previous` to counting
/// `next`. `None` means the match does not count toward standings.
/// Moving between equal states yields zero deltas, which makes
/// re-finishing a match with the same score a no-op.
pub fn net_change(previous: Option<Score>, next: Option<Score>) -> (StandingsDelta, StandingsDelta) {
    let (old_home, old_away) = previous.map(result_deltas).unwrap_or_default();
    let (new_home, new_away) = next.map(result_deltas).unwrap_or_default();
    (new_home - old_home, new_away - old_away)
}

/// Table order: points, goal difference, goals scored, then name.
pub fn compare_rows(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then(b.goal_difference.cmp(&a.goal_difference))
        .then(b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.team_name.cmp(&b.team_name))
}

pub fn rank(mut rows: Vec<StandingRow>) -> Vec<Standing> {
    rows.sort_by(compare_rows);
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| Standing { position: index + 1, row })
        .collect()
}
