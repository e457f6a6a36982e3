pub mod analyses;
pub mod helpers;
pub mod matches;
pub mod performances;
pub mod players;
pub mod ratings;
pub mod seed;
pub mod standings;
pub mod statistics;
pub mod status_checks;
pub mod teams;
pub mod tournaments;
pub mod users;
