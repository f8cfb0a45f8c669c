use crate::util::clamp;
use rand::Rng;
use serde::{Deserialize, Serialize};

fn default_multiplier() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceInputs {
    pub capacity: u32,
    pub win_pct: f64,
    /// 0-100
    pub city_pride: f64,
    /// Percent, 0-100.
    pub unemployment: f64,
    /// 0-100
    pub stadium_quality: f64,
    /// Promotions, rivalries, anything else the caller wants to fold in.
    #[serde(default = "default_multiplier")]
    pub external_multiplier: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub avg_attendance: u32,
    pub total_attendance: u64,
}

impl AttendanceInputs {
    /// Expected crowd before the per-game wobble, not yet capped.
    pub fn expected(&self) -> f64 {
        let win_pct = clamp(self.win_pct, 0.0, 1.0);
        let pride = clamp(self.city_pride, 0.0, 100.0);
        let unemployment = clamp(self.unemployment, 0.0, 100.0);
        let quality = clamp(self.stadium_quality, 0.0, 100.0);

        f64::from(self.capacity)
            * 0.4
            * (win_pct / 0.5).powf(1.5)
            * (0.7 + pride / 100.0 * 0.8)
            * (1.0 - unemployment / 100.0 * 0.5)
            * (0.8 + quality / 100.0 * 0.4)
            * self.external_multiplier.max(0.0)
    }

    /// One home game's crowd, never more than the building holds.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn single_game(&self, rng: &mut impl Rng) -> u32 {
        let crowd = self.expected() * rng.gen_range(0.9, 1.1);
        clamp(crowd, 0.0, f64::from(self.capacity)).round() as u32
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn season(&self, home_games: u32, rng: &mut impl Rng) -> Attendance {
        let total_attendance: u64 = (0..home_games)
            .map(|_| u64::from(self.single_game(rng)))
            .sum();
        let avg_attendance = if home_games == 0 {
            0
        } else {
            (total_attendance / u64::from(home_games)) as u32
        };
        Attendance {
            avg_attendance,
            total_attendance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AttendanceInputs;
    use assert_approx_eq::assert_approx_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn inputs() -> AttendanceInputs {
        AttendanceInputs {
            capacity: 40_000,
            win_pct: 0.5,
            city_pride: 50.0,
            unemployment: 6.0,
            stadium_quality: 50.0,
            external_multiplier: 1.0,
        }
    }

    #[test]
    fn test_expected_crowd() {
        // 40000 * 0.4 * 1 * 1.1 * 0.97 * 1.0
        assert_approx_eq!(inputs().expected(), 17_072.0, 1e-6);
        let winner = AttendanceInputs {
            win_pct: 0.6,
            ..inputs()
        };
        assert!(winner.expected() > inputs().expected());
    }

    #[test]
    fn test_attendance_capped_and_non_negative() {
        let mut rng = StdRng::seed_from_u64(60);
        let grid = [-50.0, 0.0, 50.0, 100.0, 500.0];
        for win_pct in &[-1.0, 0.0, 0.3, 0.5, 0.8, 1.0, 3.0] {
            for value in &grid {
                for multiplier in &[-2.0, 0.0, 1.0, 5.0] {
                    let input = AttendanceInputs {
                        win_pct: *win_pct,
                        city_pride: *value,
                        unemployment: *value,
                        stadium_quality: *value,
                        external_multiplier: *multiplier,
                        ..inputs()
                    };
                    let crowd = input.single_game(&mut rng);
                    assert!(crowd <= input.capacity);
                }
            }
        }

        let packed = AttendanceInputs {
            win_pct: 1.0,
            external_multiplier: 5.0,
            ..inputs()
        };
        assert_eq!(packed.single_game(&mut rng), packed.capacity);
    }

    #[test]
    fn test_season_totals() {
        let mut rng = StdRng::seed_from_u64(61);
        let season = inputs().season(81, &mut rng);
        assert!(season.total_attendance <= 81 * 40_000);
        assert_eq!(season.avg_attendance, (season.total_attendance / 81) as u32);
        assert!(season.avg_attendance > 15_000 && season.avg_attendance < 19_000);
        assert_eq!(inputs().season(0, &mut rng).avg_attendance, 0);
    }
}
