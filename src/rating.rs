use crate::util::{normalize, RATING_MAX, RATING_MIN};
use serde::{Deserialize, Serialize};

pub const AVERAGE_RATING: i32 = 50;

fn default_rating() -> i32 {
    AVERAGE_RATING
}

/// Hitting ratings on the 20-80 scouting scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct BatterProfile {
    pub contact: i32,
    pub power: i32,
    pub speed: i32,
    /// Plate discipline. Rosters that never scouted it get league average.
    #[serde(default = "default_rating")]
    pub discipline: i32,
}

/// Pitching ratings on the 20-80 scouting scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PitcherProfile {
    pub stuff: i32,
    pub control: i32,
    pub movement: i32,
}

/// A batter profile with every rating mapped onto [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedBatter {
    pub contact: f64,
    pub power: f64,
    pub speed: f64,
    pub discipline: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPitcher {
    pub stuff: f64,
    pub control: f64,
    pub movement: f64,
}

pub fn clamp_rating(rating: i32) -> i32 {
    rating.max(RATING_MIN).min(RATING_MAX)
}

impl BatterProfile {
    pub const AVERAGE: BatterProfile = BatterProfile::uniform(AVERAGE_RATING);

    pub const fn uniform(rating: i32) -> BatterProfile {
        BatterProfile {
            contact: rating,
            power: rating,
            speed: rating,
            discipline: rating,
        }
    }

    pub fn clamped(self) -> BatterProfile {
        BatterProfile {
            contact: clamp_rating(self.contact),
            power: clamp_rating(self.power),
            speed: clamp_rating(self.speed),
            discipline: clamp_rating(self.discipline),
        }
    }

    pub fn normalized(&self) -> NormalizedBatter {
        NormalizedBatter {
            contact: normalize(self.contact),
            power: normalize(self.power),
            speed: normalize(self.speed),
            discipline: normalize(self.discipline),
        }
    }

    /// Single-number hitting grade used by team strength.
    pub fn overall(&self) -> f64 {
        let p = self.clamped();
        f64::from(p.contact + p.power + p.speed + p.discipline) / 4.0
    }
}

impl PitcherProfile {
    pub const AVERAGE: PitcherProfile = PitcherProfile::uniform(AVERAGE_RATING);

    pub const fn uniform(rating: i32) -> PitcherProfile {
        PitcherProfile {
            stuff: rating,
            control: rating,
            movement: rating,
        }
    }

    pub fn clamped(self) -> PitcherProfile {
        PitcherProfile {
            stuff: clamp_rating(self.stuff),
            control: clamp_rating(self.control),
            movement: clamp_rating(self.movement),
        }
    }

    pub fn normalized(&self) -> NormalizedPitcher {
        NormalizedPitcher {
            stuff: normalize(self.stuff),
            control: normalize(self.control),
            movement: normalize(self.movement),
        }
    }

    pub fn overall(&self) -> f64 {
        let p = self.clamped();
        f64::from(p.stuff + p.control + p.movement) / 3.0
    }
}
