use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::models::shuffle::{ShufflePlayer, ShuffleResult};

pub const DEFAULT_TIME: &str = "7:00 - 8:30 AM";
pub const DEFAULT_VENUE: &str = "Savvy Swaraj";
pub const DEFAULT_PRICE: &str = "220₹pp";

const SUBSCRIBED_MARK: &str = "✅️";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDetails {
    pub date: String,
    pub time: String,
    pub venue: String,
    pub price: String,
}

impl GameDetails {
    /// Fill gaps with the usual Sunday-morning slot relative to `today`.
    pub fn resolve(
        today: NaiveDate,
        date: Option<String>,
        time: Option<String>,
        venue: Option<String>,
        price: Option<String>,
    ) -> Self {
        Self {
            date: date.unwrap_or_else(|| format_match_day(upcoming_sunday(today))),
            time: time.unwrap_or_else(|| DEFAULT_TIME.to_string()),
            venue: venue.unwrap_or_else(|| DEFAULT_VENUE.to_string()),
            price: price.unwrap_or_else(|| DEFAULT_PRICE.to_string()),
        }
    }
}

/// Next Sunday strictly after `today`.
pub fn upcoming_sunday(today: NaiveDate) -> NaiveDate {
    let days_from_sunday = today.weekday().num_days_from_sunday() as i64;
    let ahead = if days_from_sunday == 0 { 7 } else { 7 - days_from_sunday };
    today + Duration::days(ahead)
}

pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 100, n % 10) {
        (11..=13, _) => "th",
        (_, 1) => "st",
        (_, 2) => "nd",
        (_, 3) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// `31st August, 2025`
pub fn format_match_day(date: NaiveDate) -> String {
    format!("{} {}", ordinal(date.day()), date.format("%B, %Y"))
}

fn push_roster(message: &mut String, players: &[ShufflePlayer]) {
    for (index, player) in players.iter().enumerate() {
        let mark = if player.is_subscribed { SUBSCRIBED_MARK } else { "" };
        message.push_str(&format!("{}. {}{}\n", index + 1, player.name, mark));
    }
}

/// Plain-text line-up message ready to paste into a group chat.
pub fn render(teams: &ShuffleResult, details: &GameDetails, subs: &[String]) -> String {
    let mut message = String::new();
    message.push_str("*⚠ SUNDAY MORNING ⚠*\n");
    message.push_str(&format!("{}\n", details.date));
    message.push_str(&format!("👉 Time:- {}\n", details.time));
    message.push_str(&format!("👉 Venue:- {}\n", details.venue));
    message.push_str(&format!("{}\n\n", details.price));

    message.push_str("Team 1: Black/Dark\n");
    push_roster(&mut message, &teams.team1.players);
    message.push_str("\nSub:\n");
    if subs.is_empty() {
        message.push_str("1. TBD\n");
    } else {
        for (index, name) in subs.iter().enumerate() {
            message.push_str(&format!("{}. {}\n", index + 1, name));
        }
    }

    message.push_str("\nTeam 2: White/Light\n");
    push_roster(&mut message, &teams.team2.players);
    message.push_str("\nSub:\n1. TBD\n\n");
    message.push_str("🔥Game On🔥");
    message
}
