use crate::log5::matchup;
use crate::outcome::{Outcome, OutcomeDistribution};
use crate::pitcher::PitcherEffectiveness;
use crate::rating::BatterProfile;
use rand::Rng;
use serde::Serialize;
use tracing::trace;

/// Game context at the moment of a plate appearance. The base model logs it
/// but does not let it shape the draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Situation {
    pub runners: [bool; 3],
    pub outs: u8,
    pub inning: u8,
    /// Batting team's runs minus fielding team's runs.
    pub score_differential: i32,
}

/// Where a plate appearance's distribution comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlateAppearanceModel {
    /// The batter's ratings, Log5-adjusted against the pitcher.
    Matchup,
    /// The same distribution for every plate appearance, whoever is up.
    Fixed(OutcomeDistribution),
}

impl Default for PlateAppearanceModel {
    fn default() -> PlateAppearanceModel {
        PlateAppearanceModel::Matchup
    }
}

impl PlateAppearanceModel {
    pub fn distribution(
        &self,
        batter: &BatterProfile,
        pitcher: &PitcherEffectiveness,
        rng: &mut impl Rng,
    ) -> OutcomeDistribution {
        match self {
            PlateAppearanceModel::Matchup => {
                matchup(&OutcomeDistribution::for_batter(batter, rng), pitcher)
            }
            PlateAppearanceModel::Fixed(dist) => *dist,
        }
    }
}

impl Outcome {
    /// Draws one outcome by walking the cumulative thresholds in
    /// [`Outcome::SAMPLING_ORDER`]. Fly out catches anything left over.
    pub fn sample(
        dist: &OutcomeDistribution,
        situation: Option<&Situation>,
        rng: &mut impl Rng,
    ) -> Outcome {
        let r: f64 = rng.gen();
        let outcome = Outcome::from_draw(dist, r);
        trace!(?outcome, %r, ?situation);
        outcome
    }

    /// Resolves a uniform draw in [0, 1) against the distribution.
    pub fn from_draw(dist: &OutcomeDistribution, r: f64) -> Outcome {
        let mut threshold = 0.0;
        for outcome in &Outcome::SAMPLING_ORDER {
            threshold += dist.get(*outcome);
            if r < threshold {
                return *outcome;
            }
        }
        Outcome::FlyOut
    }
}
