//! Pythagorean win expectancy from offense/defense ratings.

use crate::league;
use crate::team::TeamOffenseDefense;
use crate::util::clamp;

/// Bill James' original exponent.
pub const EXPONENT: f64 = 2.0;
pub const MIN_WIN_PROBABILITY: f64 = 0.25;
pub const MAX_WIN_PROBABILITY: f64 = 0.75;
pub const HOME_FIELD_ADVANTAGE: f64 = 0.04;
pub const MAX_HOME_WIN_PROBABILITY: f64 = 0.95;

fn multiplier(rating: f64) -> f64 {
    0.7 + rating / 100.0
}

/// Runs per game `batting` should score against `fielding`.
pub fn expected_runs(batting: &TeamOffenseDefense, fielding: &TeamOffenseDefense) -> f64 {
    league::RUNS_PER_GAME * multiplier(batting.offense) / multiplier(fielding.defense).sqrt()
}

/// Unclamped Pythagorean probability that `team` beats `opponent`.
pub fn raw_win_probability(team: &TeamOffenseDefense, opponent: &TeamOffenseDefense) -> f64 {
    let scored = expected_runs(team, opponent).powf(EXPONENT);
    let allowed = expected_runs(opponent, team).powf(EXPONENT);
    scored / (scored + allowed)
}

pub fn win_probability(team: &TeamOffenseDefense, opponent: &TeamOffenseDefense) -> f64 {
    clamp(
        raw_win_probability(team, opponent),
        MIN_WIN_PROBABILITY,
        MAX_WIN_PROBABILITY,
    )
}

/// Single-game probability for the home side, with home field thrown in.
pub fn home_win_probability(home: &TeamOffenseDefense, away: &TeamOffenseDefense) -> f64 {
    (win_probability(home, away) + HOME_FIELD_ADVANTAGE).min(MAX_HOME_WIN_PROBABILITY)
}
