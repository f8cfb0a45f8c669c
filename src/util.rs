use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const RATING_MIN: i32 = 20;
pub const RATING_MAX: i32 = 80;

/// Folds the low half of a UUID into a `u64`, for deriving per-entity RNG seeds.
pub fn halfuuid(uuid: Uuid) -> u64 {
    let mut b = [0; 8];
    b.copy_from_slice(&uuid.as_u128().to_be_bytes()[8..16]);
    u64::from_be_bytes(b)
}

/// Maps a 20-80 rating onto [0, 1]. Out-of-range ratings are clamped first.
pub fn normalize(rating: i32) -> f64 {
    f64::from(rating.max(RATING_MIN).min(RATING_MAX) - RATING_MIN)
        / f64::from(RATING_MAX - RATING_MIN)
}

/// Scales `x` (expected in [0, 1]) into [min, max], clamping to that band.
pub fn fix(x: f64, min: f64, max: f64) -> f64 {
    debug_assert!(min < max);
    clamp(x * (max - min) + min, min, max)
}

pub fn clamp(x: f64, min: f64, max: f64) -> f64 {
    debug_assert!(min <= max);
    x.max(min).min(max)
}

pub fn ratio(num: u32, den: u32) -> f64 {
    if den == 0 {
        0.0
    } else {
        f64::from(num) / f64::from(den)
    }
}

#[cfg(test)]
mod tests {
    use super::{clamp, fix, halfuuid, normalize, ratio};
    use assert_approx_eq::assert_approx_eq;
    use uuid::Uuid;

    #[test]
    fn test_fix() {
        assert_approx_eq!(fix(0.0, 0.1, 0.9), 0.1);
        assert_approx_eq!(fix(0.5, 0.1, 0.9), 0.5);
        assert_approx_eq!(fix(1.1, 0.1, 0.9), 0.9);
        assert_approx_eq!(fix(0.5, 0.1, 0.5), 0.3);
        assert_approx_eq!(fix(0.5, 0.2, 1.8), 1.0);
    }

    #[test]
    fn test_normalize() {
        assert_approx_eq!(normalize(20), 0.0);
        assert_approx_eq!(normalize(50), 0.5);
        assert_approx_eq!(normalize(80), 1.0);
        assert_approx_eq!(normalize(-7), 0.0);
        assert_approx_eq!(normalize(110), 1.0);
    }

    #[test]
    fn test_clamp_and_ratio() {
        assert_approx_eq!(clamp(1.5, 0.0, 1.0), 1.0);
        assert_approx_eq!(clamp(-0.5, 0.0, 1.0), 0.0);
        assert_approx_eq!(ratio(1, 4), 0.25);
        assert_approx_eq!(ratio(3, 0), 0.0);
    }

    #[test]
    fn test_halfuuid() {
        let id = Uuid::from_u128(0x4f7d7490_7281_4f8f_b62e_37e99a7c46a0);
        assert_eq!(halfuuid(id), 0xb62e_37e9_9a7c_46a0);
    }
}

// =^..^=   =^..^=   =^..^=   =^..^=   =^..^=   =^..^=   =^..^=   =^..^=   =^..^=   =^..^=   =^..^=

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct AwayHome<T> {
    pub away: T,
    pub home: T,
}

impl<T> AwayHome<T> {
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Away => &self.away,
            Side::Home => &self.home,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Away => &mut self.away,
            Side::Home => &mut self.home,
        }
    }

    /// Borrows both halves at once, `side` first.
    pub fn split_mut(&mut self, side: Side) -> (&mut T, &mut T) {
        match side {
            Side::Away => (&mut self.away, &mut self.home),
            Side::Home => (&mut self.home, &mut self.away),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Away,
    Home,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Away => Side::Home,
            Side::Home => Side::Away,
        }
    }
}
