use crate::league;
use crate::outcome::OutcomeDistribution;
use crate::pitcher::PitcherEffectiveness;
use crate::util::clamp;

/// Strikeout rates never scale past this, however overpowering the matchup.
pub const STRIKEOUT_CEILING: f64 = 0.40;
const EPSILON: f64 = 1e-6;

fn odds(p: f64) -> f64 {
    let p = clamp(p, EPSILON, 1.0 - EPSILON);
    p / (1.0 - p)
}

/// Bill James' Log5: the chance of an event when a batter who does it at
/// `batter` meets a pitcher who allows it at `pitcher`, in a league where it
/// happens at `league`.
pub fn log5(batter: f64, pitcher: f64, league: f64) -> f64 {
    let combined = odds(batter) * odds(pitcher) / odds(league);
    combined / (1.0 + combined)
}

/// Adjusts a batter's raw distribution for the pitcher they're facing.
///
/// Hits move together: the overall hit rate goes through Log5 against the
/// pitcher's average against and the non-homer hit categories are rescaled by
/// the same ratio. Home runs and walks get their own Log5 pass. Strikeouts
/// scale with the pitcher's K rate. Everything else passes through.
pub fn matchup(batter: &OutcomeDistribution, pitcher: &PitcherEffectiveness) -> OutcomeDistribution {
    let raw_hit = batter.hit();
    let hit = log5(raw_hit, pitcher.hit_rate(), league::HIT_RATE);
    let hit_ratio = if raw_hit > 0.0 { hit / raw_hit } else { 1.0 };

    let strikeout_ratio = pitcher.strikeouts_per9 / league::STRIKEOUTS_PER_NINE;

    OutcomeDistribution {
        home_run: log5(batter.home_run, pitcher.home_run_rate(), league::HOME_RUN_RATE),
        triple: batter.triple * hit_ratio,
        double: batter.double * hit_ratio,
        single: batter.single * hit_ratio,
        walk: log5(batter.walk, pitcher.walk_rate(), league::WALK_RATE),
        hit_by_pitch: batter.hit_by_pitch,
        strikeout: (batter.strikeout * strikeout_ratio).min(STRIKEOUT_CEILING),
        ground_out: batter.ground_out,
        fly_out: batter.fly_out,
    }
    .floored()
}
