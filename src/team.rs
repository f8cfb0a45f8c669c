use crate::rating::{BatterProfile, PitcherProfile, AVERAGE_RATING};
use crate::util::clamp;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const HUMAN_MIN: f64 = 20.0;
pub const HUMAN_MAX: f64 = 80.0;
pub const AI_MIN: f64 = 25.0;
pub const AI_MAX: f64 = 75.0;
/// How far an AI lineup's offense or defense can drift from its base strength.
pub const AI_SPLIT: f64 = 5.0;
/// Fraction of a rating added per unit of `(coach - 50) / 30`.
pub const COACH_WEIGHT: f64 = 0.05;
/// Fraction of a rating added per unit of `(morale - 50) / 50`.
pub const MORALE_WEIGHT: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Hitter,
    Pitcher,
}

fn active_default() -> bool {
    true
}

fn morale_default() -> f64 {
    50.0
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RosterPlayer {
    pub id: Uuid,
    pub role: Role,
    pub rating: f64,
    #[serde(default)]
    pub injured: bool,
    /// On the active roster (as opposed to reserves or the minors).
    #[serde(default = "active_default")]
    pub active: bool,
    #[serde(default = "morale_default")]
    pub morale: f64,
}

impl RosterPlayer {
    pub fn hitter(id: Uuid, profile: &BatterProfile, morale: f64) -> RosterPlayer {
        RosterPlayer {
            id,
            role: Role::Hitter,
            rating: profile.overall(),
            injured: false,
            active: true,
            morale,
        }
    }

    pub fn pitcher(id: Uuid, profile: &PitcherProfile, morale: f64) -> RosterPlayer {
        RosterPlayer {
            id,
            role: Role::Pitcher,
            rating: profile.overall(),
            injured: false,
            active: true,
            morale,
        }
    }

    pub fn available(&self) -> bool {
        self.active && !self.injured
    }
}

/// Coaching staff skill, 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coaching {
    pub hitting: f64,
    pub pitching: f64,
}

impl Default for Coaching {
    fn default() -> Coaching {
        Coaching {
            hitting: 50.0,
            pitching: 50.0,
        }
    }
}

/// A team boiled down to two numbers on the 20-80 scale.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct TeamOffenseDefense {
    pub offense: f64,
    pub defense: f64,
}

impl TeamOffenseDefense {
    pub const LEAGUE_AVERAGE: TeamOffenseDefense = TeamOffenseDefense {
        offense: 50.0,
        defense: 50.0,
    };

    /// Aggregates the player's own roster. Injured and inactive players
    /// don't count; an empty unit plays at league average.
    pub fn from_roster(players: &[RosterPlayer], coaching: &Coaching) -> TeamOffenseDefense {
        let available = || players.iter().filter(|p| p.available());
        let morale = average(available().map(|p| p.morale)).unwrap_or(50.0);
        let unit = |role: Role, coach: f64| {
            let base = average(available().filter(|p| p.role == role).map(|p| p.rating))
                .unwrap_or_else(|| f64::from(AVERAGE_RATING));
            let bonus = COACH_WEIGHT * (coach - 50.0) / 30.0 + MORALE_WEIGHT * (morale - 50.0) / 50.0;
            clamp(base * (1.0 + bonus), HUMAN_MIN, HUMAN_MAX)
        };

        TeamOffenseDefense {
            offense: unit(Role::Hitter, coaching.hitting),
            defense: unit(Role::Pitcher, coaching.pitching),
        }
    }

    /// An AI club: a base strength with independent offense/defense wobble
    /// for however its lineup happened to come together.
    pub fn ai(base: f64, rng: &mut impl Rng) -> TeamOffenseDefense {
        TeamOffenseDefense {
            offense: clamp(base + rng.gen_range(-AI_SPLIT, AI_SPLIT), AI_MIN, AI_MAX),
            defense: clamp(base + rng.gen_range(-AI_SPLIT, AI_SPLIT), AI_MIN, AI_MAX),
        }
    }

    pub fn strength(&self) -> f64 {
        (self.offense + self.defense) / 2.0
    }
}

#[allow(clippy::cast_precision_loss)]
fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0_usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::{Coaching, Role, RosterPlayer, TeamOffenseDefense, AI_MAX, AI_MIN};
    use crate::rating::{BatterProfile, PitcherProfile};
    use assert_approx_eq::assert_approx_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use uuid::Uuid;

    fn player(n: u128, role: Role, rating: f64, morale: f64) -> RosterPlayer {
        RosterPlayer {
            id: Uuid::from_u128(n),
            role,
            rating,
            injured: false,
            active: true,
            morale,
        }
    }

    #[test]
    fn test_average_roster_is_average() {
        let roster = vec![
            player(1, Role::Hitter, 40.0, 50.0),
            player(2, Role::Hitter, 60.0, 50.0),
            player(3, Role::Pitcher, 55.0, 50.0),
        ];
        let team = TeamOffenseDefense::from_roster(&roster, &Coaching::default());
        assert_approx_eq!(team.offense, 50.0);
        assert_approx_eq!(team.defense, 55.0);
        assert_approx_eq!(team.strength(), 52.5);
    }

    #[test]
    fn test_injured_and_inactive_players_sit() {
        let mut hurt = player(2, Role::Hitter, 80.0, 50.0);
        hurt.injured = true;
        let mut demoted = player(3, Role::Hitter, 20.0, 50.0);
        demoted.active = false;
        let roster = vec![player(1, Role::Hitter, 45.0, 50.0), hurt, demoted];
        let team = TeamOffenseDefense::from_roster(&roster, &Coaching::default());
        assert_approx_eq!(team.offense, 45.0);
        // No pitchers at all: league average.
        assert_approx_eq!(team.defense, 50.0);
    }

    #[test]
    fn test_coaching_and_morale_bonuses() {
        let roster = vec![
            player(1, Role::Hitter, 60.0, 100.0),
            player(2, Role::Pitcher, 60.0, 100.0),
        ];
        let coaching = Coaching {
            hitting: 80.0,
            pitching: 50.0,
        };
        let team = TeamOffenseDefense::from_roster(&roster, &coaching);
        assert_approx_eq!(team.offense, 60.0 * 1.10);
        assert_approx_eq!(team.defense, 60.0 * 1.05);
    }

    #[test]
    fn test_human_team_clamped() {
        let roster = vec![
            player(1, Role::Hitter, 80.0, 100.0),
            player(2, Role::Pitcher, 20.0, 0.0),
        ];
        let coaching = Coaching {
            hitting: 100.0,
            pitching: 0.0,
        };
        let team = TeamOffenseDefense::from_roster(&roster, &coaching);
        assert_approx_eq!(team.offense, 80.0);
        assert_approx_eq!(team.defense, 20.0);
    }

    #[test]
    fn test_roster_players_from_profiles() {
        let hitter = RosterPlayer::hitter(Uuid::from_u128(1), &BatterProfile::uniform(65), 50.0);
        let pitcher = RosterPlayer::pitcher(Uuid::from_u128(2), &PitcherProfile::uniform(35), 50.0);
        let team = TeamOffenseDefense::from_roster(&[hitter, pitcher], &Coaching::default());
        assert_approx_eq!(team.offense, 65.0);
        assert_approx_eq!(team.defense, 35.0);
    }

    #[test]
    fn test_ai_teams_stay_in_band() {
        let mut rng = StdRng::seed_from_u64(30);
        for base in &[0.0, 25.0, 50.0, 75.0, 100.0] {
            for _ in 0..100 {
                let team = TeamOffenseDefense::ai(*base, &mut rng);
                assert!(team.offense >= AI_MIN && team.offense <= AI_MAX);
                assert!(team.defense >= AI_MIN && team.defense <= AI_MAX);
                if *base == 50.0 {
                    assert!((team.offense - 50.0).abs() <= 5.0);
                }
            }
        }
    }
}
