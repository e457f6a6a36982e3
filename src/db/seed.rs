use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db::{players, statistics, teams};
use crate::models::player::PlayerRequest;
use crate::models::statistics::StatisticsRequest;
use crate::models::team::TeamRequest;

struct SampleTeam {
    name: &'static str,
    short_name: &'static str,
    city: &'static str,
    country: &'static str,
    stadium: &'static str,
    founded: i32,
    primary_color: &'static str,
    secondary_color: &'static str,
    manager: &'static str,
    league: &'static str,
}

const SAMPLE_TEAMS: [SampleTeam; 3] = [
    SampleTeam {
        name: "Manchester United",
        short_name: "MUN",
        city: "Manchester",
        country: "England",
        stadium: "Old Trafford",
        founded: 1878,
        primary_color: "#DA020E",
        secondary_color: "#FFFFFF",
        manager: "Erik ten Hag",
        league: "Premier League",
    },
    SampleTeam {
        name: "Real Madrid CF",
        short_name: "RMA",
        city: "Madrid",
        country: "Spain",
        stadium: "Santiago Bernabéu",
        founded: 1902,
        primary_color: "#FFFFFF",
        secondary_color: "#FEBE10",
        manager: "Carlo Ancelotti",
        league: "La Liga",
    },
    SampleTeam {
        name: "FC Barcelona",
        short_name: "BAR",
        city: "Barcelona",
        country: "Spain",
        stadium: "Camp Nou",
        founded: 1899,
        primary_color: "#A50044",
        secondary_color: "#004D98",
        manager: "Xavi Hernández",
        league: "La Liga",
    },
];

// (name, position, age, nationality, height, weight, jersey)
const SAMPLE_PLAYERS: [(&str, &str, i32, &str, i32, i32, i32); 3] = [
    ("Marcus Rashford", "Left Winger", 27, "England", 180, 70, 10),
    ("Karim Benzema", "Center Forward", 36, "France", 185, 81, 9),
    ("Robert Lewandowski", "Center Forward", 35, "Poland", 185, 81, 9),
];

fn sample_statistics(player_id: Uuid, index: usize) -> Option<StatisticsRequest> {
    let base = StatisticsRequest {
        player_id,
        season: "2024-25".to_string(),
        ..Default::default()
    };
    match index {
        0 => Some(StatisticsRequest {
            games_played: 25,
            games_started: 22,
            minutes_played: 2100,
            goals: 12,
            assists: 8,
            yellow_cards: 3,
            tackles: 45,
            interceptions: 25,
            shots_total: 85,
            shots_on_target: 42,
            passes_attempted: 1200,
            passes_completed: 980,
            key_passes: 65,
            average_rating: 7.5,
            wins: 15,
            draws: 6,
            losses: 4,
            ..base
        }),
        1 => Some(StatisticsRequest {
            games_played: 28,
            games_started: 26,
            minutes_played: 2400,
            goals: 18,
            assists: 12,
            yellow_cards: 2,
            tackles: 25,
            interceptions: 15,
            shots_total: 95,
            shots_on_target: 58,
            passes_attempted: 1400,
            passes_completed: 1150,
            key_passes: 78,
            average_rating: 8.2,
            wins: 20,
            draws: 5,
            losses: 3,
            ..base
        }),
        _ => None,
    }
}

/// Insert three clubs, one player each and two season rows when the
/// database has no teams yet. Returns whether anything was written.
pub async fn seed_sample_data(pool: &SqlitePool) -> Result<bool, sqlx::Error> {
    if teams::count(pool).await? > 0 {
        return Ok(false);
    }

    let now = Utc::now();
    let mut tx = pool.begin().await?;

    for (index, (sample, player)) in SAMPLE_TEAMS.iter().zip(SAMPLE_PLAYERS).enumerate() {
        let team_request = TeamRequest {
            name: sample.name.to_string(),
            short_name: sample.short_name.to_string(),
            city: sample.city.to_string(),
            country: sample.country.to_string(),
            stadium: sample.stadium.to_string(),
            founded: sample.founded,
            primary_color: sample.primary_color.to_string(),
            secondary_color: sample.secondary_color.to_string(),
            manager: sample.manager.to_string(),
            league: sample.league.to_string(),
            logo_url: String::new(),
        };
        let team = teams::insert(&mut *tx, Uuid::new_v4(), &team_request, now).await?;

        let (name, position, age, nationality, height, weight, jersey_number) = player;
        let player_request = PlayerRequest {
            name: name.to_string(),
            position: position.to_string(),
            age,
            nationality: nationality.to_string(),
            team_id: Some(team.id),
            height,
            weight,
            preferred_foot: "Right".to_string(),
            jersey_number,
            photo_url: String::new(),
            overall_rating: 60,
            is_subscribed: false,
        };
        let player = players::insert(&mut *tx, Uuid::new_v4(), &player_request, now).await?;

        if let Some(stats) = sample_statistics(player.id, index) {
            statistics::insert(&mut *tx, Uuid::new_v4(), &stats, now).await?;
        }
    }

    tx.commit().await?;
    tracing::info!("Seeded sample teams, players and statistics");
    Ok(true)
}
