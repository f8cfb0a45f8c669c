use crate::league;
use crate::rating::PitcherProfile;
use crate::util::clamp;
use serde::Serialize;

/// What the league hits against a pitcher, derived from stuff/control/movement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PitcherEffectiveness {
    pub opp_batting_avg: f64,
    pub opp_on_base_pct: f64,
    pub strikeouts_per9: f64,
    pub walks_per9: f64,
    pub home_runs_per9: f64,
    pub era: f64,
}

impl PitcherEffectiveness {
    pub fn from_profile(profile: &PitcherProfile) -> PitcherEffectiveness {
        let n = profile.normalized();
        let stuff = n.stuff - 0.5;
        let control = n.control - 0.5;
        let movement = n.movement - 0.5;

        // Stuff and movement keep the ball off the barrel; control matters a
        // little because hitters sit on fewer mistakes.
        let opp_batting_avg = clamp(
            league::BATTING_AVERAGE * (1.0 - 0.5 * stuff - 0.35 * movement - 0.1 * control),
            0.150,
            0.350,
        );
        let strikeouts_per9 = clamp(
            league::STRIKEOUTS_PER_NINE * (1.0 + 1.2 * stuff + 0.4 * movement),
            3.0,
            14.0,
        );
        let walks_per9 = clamp(league::WALKS_PER_NINE * (1.0 - 1.2 * control), 1.0, 6.5);
        let home_runs_per9 = clamp(
            league::HOME_RUNS_PER_NINE * (1.0 - 0.9 * movement - 0.5 * stuff),
            0.3,
            2.2,
        );

        let walk_rate = league::per_nine_to_rate(walks_per9);
        let opp_on_base_pct = clamp(
            opp_batting_avg * (1.0 - walk_rate - league::HIT_BY_PITCH_RATE)
                + walk_rate
                + league::HIT_BY_PITCH_RATE,
            0.200,
            0.450,
        );

        let era = clamp(
            league::ERA
                * (0.5 * opp_batting_avg / league::BATTING_AVERAGE
                    + 0.3 * walks_per9 / league::WALKS_PER_NINE
                    + 0.2 * (2.0 - strikeouts_per9 / league::STRIKEOUTS_PER_NINE)),
            1.5,
            7.0,
        );

        PitcherEffectiveness {
            opp_batting_avg,
            opp_on_base_pct,
            strikeouts_per9,
            walks_per9,
            home_runs_per9,
            era,
        }
    }

    pub fn hit_rate(&self) -> f64 {
        league::average_to_hit_rate(self.opp_batting_avg)
    }

    pub fn walk_rate(&self) -> f64 {
        league::per_nine_to_rate(self.walks_per9)
    }

    pub fn home_run_rate(&self) -> f64 {
        league::per_nine_to_rate(self.home_runs_per9)
    }
}
