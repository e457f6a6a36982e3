pub mod announcement;
pub mod shuffle;
pub mod standings;
