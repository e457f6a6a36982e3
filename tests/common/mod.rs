#![allow(dead_code)]

pub mod football_helpers;
pub mod utils;
