pub mod analysis;
pub mod auth;
pub mod common;
pub mod matches;
pub mod performance;
pub mod player;
pub mod rating;
pub mod shuffle;
pub mod statistics;
pub mod status;
pub mod team;
pub mod tournament;
pub mod user;
