#![warn(clippy::pedantic, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

pub mod attendance;
pub mod game;
pub mod inning;
pub mod league;
pub mod log5;
pub mod outcome;
pub mod pitcher;
pub mod plate_appearance;
pub mod pythag;
pub mod rating;
pub mod season;
pub mod stats;
pub mod team;
pub mod util;
