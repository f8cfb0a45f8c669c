//! League-average baselines every model is calibrated against.
//!
//! Batter-side rates are per plate appearance. Pitcher-side rates are quoted
//! per nine innings and converted with [`PA_PER_NINE`], so a rating-50 pitcher
//! and a rating-50 batter land exactly on these numbers.

pub const BATTING_AVERAGE: f64 = 0.250;
pub const STRIKEOUT_RATE: f64 = 0.220;
pub const WALK_RATE: f64 = 0.085;
pub const HIT_BY_PITCH_RATE: f64 = 0.010;
pub const HOME_RUN_RATE: f64 = 0.030;
pub const TRIPLE_RATE: f64 = 0.005;
pub const DOUBLE_RATE: f64 = 0.045;

/// Hits per plate appearance implied by the batting average once walks and
/// hit-by-pitches (which are not at-bats) are taken out.
pub const HIT_RATE: f64 = BATTING_AVERAGE * (1.0 - WALK_RATE - HIT_BY_PITCH_RATE);

pub const PA_PER_NINE: f64 = 38.0;
pub const STRIKEOUTS_PER_NINE: f64 = STRIKEOUT_RATE * PA_PER_NINE;
pub const WALKS_PER_NINE: f64 = WALK_RATE * PA_PER_NINE;
pub const HOME_RUNS_PER_NINE: f64 = HOME_RUN_RATE * PA_PER_NINE;
pub const ERA: f64 = 4.20;

pub const RUNS_PER_GAME: f64 = 4.5;

pub fn per_nine_to_rate(per_nine: f64) -> f64 {
    per_nine / PA_PER_NINE
}

/// Converts a batting average against into hits per plate appearance.
pub fn average_to_hit_rate(average: f64) -> f64 {
    average * (1.0 - WALK_RATE - HIT_BY_PITCH_RATE)
}
