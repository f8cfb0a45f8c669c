use crate::game::Batter;
use crate::outcome::{Outcome, PlateAppearanceOutcome};
use crate::pitcher::PitcherEffectiveness;
use crate::plate_appearance::{PlateAppearanceModel, Situation};
use crate::stats::{BoxScoreBuilder, PitcherGameStats};
use rand::Rng;
use serde::Serialize;
use std::convert::TryFrom;
use tracing::{debug, instrument, trace};
use uuid::Uuid;

/// Safety valve against a distribution that never records three outs.
pub const MAX_PLATE_APPEARANCES: u32 = 50;
pub const MIN_PITCHES_PER_PA: u32 = 3;
pub const MAX_PITCHES_PER_PA: u32 = 6;

/// Outs and runners for the half-inning in progress. Runners are tracked by
/// player so runs can be credited to whoever crossed the plate.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct State {
    pub outs: u8,
    pub bases: [Option<Uuid>; 3],
}

impl State {
    pub fn runners(&self) -> [bool; 3] {
        [
            self.bases[0].is_some(),
            self.bases[1].is_some(),
            self.bases[2].is_some(),
        ]
    }

    pub fn runners_on(&self) -> u32 {
        u32::try_from(self.bases.iter().filter(|b| b.is_some()).count()).unwrap_or(u32::MAX)
    }

    /// Applies a plate appearance and returns the runners who scored.
    pub fn apply(&mut self, batter: Uuid, outcome: PlateAppearanceOutcome) -> Vec<Uuid> {
        if outcome.is_out {
            self.outs += 1;
            Vec::new()
        } else if outcome.is_hit {
            self.advance(batter, outcome.bases_advanced)
        } else {
            self.walk(batter).into_iter().collect()
        }
    }

    /// Only forced runners move.
    pub fn walk(&mut self, batter: Uuid) -> Option<Uuid> {
        let mut swap = Some(batter);
        for base in &mut self.bases {
            swap = std::mem::replace(base, swap);
            if swap.is_none() {
                break;
            }
        }
        if let Some(player) = swap {
            trace!(player_scored = %player);
        }
        swap
    }

    /// Moves runners on a hit worth `bases` bases. Third always scores, second
    /// scores on a double or better, first scores on a triple or better and
    /// goes first-to-third on a double.
    pub fn advance(&mut self, batter: Uuid, bases: u8) -> Vec<Uuid> {
        let [first, second, third] = self.bases;
        self.bases = [None; 3];
        let mut scored = Vec::new();

        if let Some(runner) = third {
            scored.push(runner);
        }
        if let Some(runner) = second {
            if bases >= 2 {
                scored.push(runner);
            } else {
                self.bases[2] = Some(runner);
            }
        }
        if let Some(runner) = first {
            match bases {
                0 | 1 => self.bases[1] = Some(runner),
                2 => self.bases[2] = Some(runner),
                _ => scored.push(runner),
            }
        }
        match bases {
            0 | 1 => self.bases[0] = Some(batter),
            2 => self.bases[1] = Some(batter),
            3 => self.bases[2] = Some(batter),
            _ => scored.push(batter),
        }

        for player in &scored {
            trace!(player_scored = %player);
        }
        scored
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HalfInningResult {
    pub runs: u32,
    pub left_on_base: u32,
    pub plate_appearances: u32,
    pub outs: u8,
    pub walked_off: bool,
}

/// One team batting against one pitcher until three outs.
pub struct HalfInning<'a> {
    pub inning: u8,
    pub lineup: &'a [Batter],
    pub pitcher: Uuid,
    pub effectiveness: &'a PitcherEffectiveness,
    /// Batting team's runs minus fielding team's runs at the start.
    pub score_differential: i32,
    /// In a potential walk-off, the runs that put the home team ahead.
    pub walk_off_target: Option<u32>,
    pub model: &'a PlateAppearanceModel,
}

impl HalfInning<'_> {
    fn pitcher_line<'b>(&self, defense: &'b mut BoxScoreBuilder) -> &'b mut PitcherGameStats {
        defense.pitcher(self.pitcher, self.inning, -self.score_differential)
    }

    /// Plays the half-inning. `position` is the batting team's place in the
    /// order and carries over to their next time up.
    #[instrument(
        name = "HalfInning::simulate",
        skip(self, position, offense, defense, rng),
        fields(inning = self.inning, pitcher = %self.pitcher)
    )]
    pub fn simulate(
        &self,
        position: &mut usize,
        offense: &mut BoxScoreBuilder,
        defense: &mut BoxScoreBuilder,
        rng: &mut impl Rng,
    ) -> HalfInningResult {
        let mut state = State::default();
        let mut result = HalfInningResult::default();

        while state.outs < 3 && !self.lineup.is_empty() {
            if result.plate_appearances >= MAX_PLATE_APPEARANCES {
                debug!(plate_appearances = result.plate_appearances, "half-inning cap reached");
                state.outs = 3;
                break;
            }

            let batter = &self.lineup[*position % self.lineup.len()];
            let situation = Situation {
                runners: state.runners(),
                outs: state.outs,
                inning: self.inning,
                score_differential: self.score_differential
                    + i32::try_from(result.runs).unwrap_or(i32::MAX),
            };

            let dist = self
                .model
                .distribution(&batter.profile, self.effectiveness, rng);
            let outcome = Outcome::sample(&dist, Some(&situation), rng).result();
            let pitches = rng.gen_range(MIN_PITCHES_PER_PA, MAX_PITCHES_PER_PA + 1);

            trace!(
                outcome = ?outcome.kind,
                outs = state.outs,
                bases = ?state.runners(),
                batter = %batter.id,
            );

            offense.batter(batter.id).record(outcome.kind);
            self.pitcher_line(defense).record(outcome.kind, pitches);

            let scored = state.apply(batter.id, outcome);
            let runs = u32::try_from(scored.len()).unwrap_or(u32::MAX);
            for runner in scored {
                offense.batter(runner).runs += 1;
            }
            if outcome.rbi_potential {
                offense.batter(batter.id).rbi += runs;
            }
            self.pitcher_line(defense).allow_runs(runs);

            result.runs += runs;
            result.plate_appearances += 1;
            *position = (*position + 1) % self.lineup.len();

            if let Some(target) = self.walk_off_target {
                if result.runs >= target {
                    result.walked_off = true;
                    break;
                }
            }
        }

        self.pitcher_line(defense).innings_pitched += 1;
        result.outs = state.outs;
        result.left_on_base = state.runners_on();
        debug!(
            runs = result.runs,
            left_on_base = result.left_on_base,
            walked_off = result.walked_off,
            "half-inning over"
        );
        result
    }
}
