use crate::league;
use crate::rating::BatterProfile;
use crate::util::fix;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// No outcome category is ever allowed to fall to zero.
pub const MIN_PROBABILITY: f64 = 0.001;
/// Singles never drop below this, however much extra-base power eats into the hit budget.
pub const SINGLE_FLOOR: f64 = 0.08;
const HIT_BY_PITCH_JITTER: f64 = 0.002;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    HomeRun,
    Triple,
    Double,
    Single,
    Walk,
    HitByPitch,
    Strikeout,
    GroundOut,
    FlyOut,
}

impl Outcome {
    /// The order the sampler walks the cumulative thresholds in.
    pub const SAMPLING_ORDER: [Outcome; 9] = [
        Outcome::HomeRun,
        Outcome::Triple,
        Outcome::Double,
        Outcome::Single,
        Outcome::Walk,
        Outcome::HitByPitch,
        Outcome::Strikeout,
        Outcome::GroundOut,
        Outcome::FlyOut,
    ];

    pub fn is_hit(self) -> bool {
        matches!(
            self,
            Outcome::HomeRun | Outcome::Triple | Outcome::Double | Outcome::Single
        )
    }

    pub fn is_out(self) -> bool {
        matches!(
            self,
            Outcome::Strikeout | Outcome::GroundOut | Outcome::FlyOut
        )
    }

    /// Walks and hit-by-pitches don't count as at-bats.
    pub fn is_at_bat(self) -> bool {
        !matches!(self, Outcome::Walk | Outcome::HitByPitch)
    }

    pub fn bases_advanced(self) -> u8 {
        match self {
            Outcome::HomeRun => 4,
            Outcome::Triple => 3,
            Outcome::Double => 2,
            Outcome::Single | Outcome::Walk | Outcome::HitByPitch => 1,
            Outcome::Strikeout | Outcome::GroundOut | Outcome::FlyOut => 0,
        }
    }

    pub fn result(self) -> PlateAppearanceOutcome {
        PlateAppearanceOutcome {
            kind: self,
            bases_advanced: self.bases_advanced(),
            is_hit: self.is_hit(),
            is_out: self.is_out(),
            rbi_potential: !self.is_out(),
        }
    }
}

/// The resolved result of one plate appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlateAppearanceOutcome {
    pub kind: Outcome,
    pub bases_advanced: u8,
    pub is_hit: bool,
    pub is_out: bool,
    pub rbi_potential: bool,
}

/// Per-category probabilities for one plate appearance.
///
/// Categories are built additively and never renormalized; whatever residual
/// mass is left over (or overshot) is absorbed by the sampler's fly-out fallback.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct OutcomeDistribution {
    pub home_run: f64,
    pub triple: f64,
    pub double: f64,
    pub single: f64,
    pub walk: f64,
    pub hit_by_pitch: f64,
    pub strikeout: f64,
    pub ground_out: f64,
    pub fly_out: f64,
}

impl OutcomeDistribution {
    /// The league-average plate appearance, with no hit-by-pitch jitter.
    pub fn league_average() -> OutcomeDistribution {
        let single = league::HIT_RATE
            - league::HOME_RUN_RATE
            - league::TRIPLE_RATE
            - league::DOUBLE_RATE;
        let in_play = 1.0
            - league::HIT_RATE
            - league::WALK_RATE
            - league::HIT_BY_PITCH_RATE
            - league::STRIKEOUT_RATE;
        OutcomeDistribution {
            home_run: league::HOME_RUN_RATE,
            triple: league::TRIPLE_RATE,
            double: league::DOUBLE_RATE,
            single,
            walk: league::WALK_RATE,
            hit_by_pitch: league::HIT_BY_PITCH_RATE,
            strikeout: league::STRIKEOUT_RATE,
            ground_out: in_play * 0.5,
            fly_out: in_play * 0.5,
        }
    }

    /// Derives a batter's raw plate-appearance distribution from their ratings.
    ///
    /// Everything except hit-by-pitch is a pure function of the ratings; HBP
    /// gets a small per-call jitter.
    pub fn for_batter(profile: &BatterProfile, rng: &mut impl Rng) -> OutcomeDistribution {
        // Centered on league average: -0.5 at a 20, +0.5 at an 80.
        let n = profile.normalized();
        let contact = n.contact - 0.5;
        let power = n.power - 0.5;
        let speed = n.speed - 0.5;
        let discipline = n.discipline - 0.5;

        // Contact drives hits, with a little help from power.
        let hit = league::HIT_RATE * (1.0 + 0.6 * contact + 0.15 * power);

        // Raw power only turns into home runs if the bat finds the ball.
        let home_run = league::HOME_RUN_RATE
            * fix(n.power, 0.2, 1.8)
            * fix(n.contact, 0.75, 1.25);
        let triple = league::TRIPLE_RATE * fix(n.speed, 0.3, 1.7);
        let double = league::DOUBLE_RATE * (1.0 + 0.5 * power + 0.3 * speed);
        let single = (hit - home_run - triple - double).max(SINGLE_FLOOR);

        // Pitchers work around power hitters.
        let walk = league::WALK_RATE * (1.0 + 0.8 * discipline + 0.3 * power);
        let hit_by_pitch = league::HIT_BY_PITCH_RATE
            + rng.gen_range(-HIT_BY_PITCH_JITTER, HIT_BY_PITCH_JITTER);

        // Swinging for the fences costs some contact.
        let strikeout = league::STRIKEOUT_RATE * (1.0 - 0.9 * contact + 0.15 * power);

        let in_play =
            1.0 - (home_run + triple + double + single + walk + hit_by_pitch + strikeout);
        let fly_share = fix(n.power, 0.35, 0.65);

        OutcomeDistribution {
            home_run,
            triple,
            double,
            single,
            walk,
            hit_by_pitch,
            strikeout,
            ground_out: in_play * (1.0 - fly_share),
            fly_out: in_play * fly_share,
        }
        .floored()
    }

    pub fn floored(self) -> OutcomeDistribution {
        OutcomeDistribution {
            home_run: self.home_run.max(MIN_PROBABILITY),
            triple: self.triple.max(MIN_PROBABILITY),
            double: self.double.max(MIN_PROBABILITY),
            single: self.single.max(MIN_PROBABILITY),
            walk: self.walk.max(MIN_PROBABILITY),
            hit_by_pitch: self.hit_by_pitch.max(MIN_PROBABILITY),
            strikeout: self.strikeout.max(MIN_PROBABILITY),
            ground_out: self.ground_out.max(MIN_PROBABILITY),
            fly_out: self.fly_out.max(MIN_PROBABILITY),
        }
    }

    pub fn get(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::HomeRun => self.home_run,
            Outcome::Triple => self.triple,
            Outcome::Double => self.double,
            Outcome::Single => self.single,
            Outcome::Walk => self.walk,
            Outcome::HitByPitch => self.hit_by_pitch,
            Outcome::Strikeout => self.strikeout,
            Outcome::GroundOut => self.ground_out,
            Outcome::FlyOut => self.fly_out,
        }
    }

    pub fn hit(&self) -> f64 {
        self.home_run + self.triple + self.double + self.single
    }

    pub fn on_base(&self) -> f64 {
        self.hit() + self.walk + self.hit_by_pitch
    }

    pub fn total(&self) -> f64 {
        Outcome::SAMPLING_ORDER.iter().map(|o| self.get(*o)).sum()
    }
}
