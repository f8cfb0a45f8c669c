use crate::inning::{HalfInning, HalfInningResult};
use crate::pitcher::PitcherEffectiveness;
use crate::plate_appearance::PlateAppearanceModel;
use crate::rating::{BatterProfile, PitcherProfile};
use crate::stats::{BatterGameStats, BoxScoreBuilder, PitcherGameStats};
use crate::util::{AwayHome, Side};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use tracing::{debug, instrument};
use uuid::Uuid;

pub const REGULATION_INNINGS: u8 = 9;
/// Games still tied after this many innings end tied.
pub const MAX_INNINGS: u8 = 15;
pub const STARTER_PITCH_LIMIT: u32 = 100;
pub const MIN_RELIEF_INNINGS: u32 = 1;
pub const MAX_RELIEF_INNINGS: u32 = 2;
pub const WIN_MIN_INNINGS: u32 = 5;
pub const QUALITY_START_INNINGS: u32 = 6;
pub const QUALITY_START_MAX_EARNED_RUNS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Batter {
    pub id: Uuid,
    pub name: String,
    pub profile: BatterProfile,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Pitcher {
    pub id: Uuid,
    pub name: String,
    pub profile: PitcherProfile,
}

/// Who one team sends out for a game: the batting order, the starting
/// pitcher, and relievers in the order they'll be used.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TeamSheet {
    pub name: String,
    pub lineup: Vec<Batter>,
    pub starter: Pitcher,
    #[serde(default)]
    pub bullpen: Vec<Pitcher>,
}

#[derive(Clone, Deserialize)]
pub struct Game {
    pub away: TeamSheet,
    pub home: TeamSheet,
    #[serde(skip)]
    pub model: PlateAppearanceModel,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("away_team", &self.away.name)
            .field("home_team", &self.home.name)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxScore {
    pub innings: u8,
    pub score: AwayHome<u32>,
    pub linescore: AwayHome<Vec<u32>>,
    pub batting: AwayHome<Vec<BatterGameStats>>,
    pub pitching: AwayHome<Vec<PitcherGameStats>>,
    /// `None` when the game hit the inning cap still tied.
    pub winner: Option<Side>,
    pub walk_off: bool,
}

/// A team's pitching staff over the course of one game.
struct Staff<'a> {
    pitchers: Vec<(&'a Pitcher, PitcherEffectiveness)>,
    current: usize,
    stint: u32,
    stint_innings: u32,
}

impl<'a> Staff<'a> {
    fn new(team: &'a TeamSheet) -> Staff<'a> {
        let pitchers = std::iter::once(&team.starter)
            .chain(&team.bullpen)
            .map(|p| (p, PitcherEffectiveness::from_profile(&p.profile)))
            .collect();
        Staff {
            pitchers,
            current: 0,
            stint: 0,
            stint_innings: 0,
        }
    }

    fn on_mound(&self) -> (&'a Pitcher, &PitcherEffectiveness) {
        let (pitcher, effectiveness) = &self.pitchers[self.current];
        (*pitcher, effectiveness)
    }

    /// The starter goes until he's over the pitch limit; relievers get one
    /// or two innings each. The last arm in the bullpen finishes the game.
    fn check_fatigue(&mut self, line: Option<&PitcherGameStats>, rng: &mut impl Rng) {
        if self.current + 1 >= self.pitchers.len() {
            return;
        }
        let tired = if self.current == 0 {
            line.map_or(0, |l| l.pitches) > STARTER_PITCH_LIMIT
        } else {
            self.stint_innings >= self.stint
        };
        if tired {
            self.current += 1;
            self.stint = rng.gen_range(MIN_RELIEF_INNINGS, MAX_RELIEF_INNINGS + 1);
            self.stint_innings = 0;
            debug!(pitcher = %self.pitchers[self.current].0.id, stint = self.stint, "pitching change");
        }
    }
}

struct State<'a> {
    inning: u8,
    runs: AwayHome<u32>,
    linescore: AwayHome<Vec<u32>>,
    position: AwayHome<usize>,
    boxes: AwayHome<BoxScoreBuilder>,
    staff: AwayHome<Staff<'a>>,
    walk_off: bool,
}

impl Game {
    pub fn new(away: TeamSheet, home: TeamSheet) -> Game {
        Game {
            away,
            home,
            model: PlateAppearanceModel::Matchup,
        }
    }

    /// Plays the game out to a box score. Returns `None` if either side has
    /// nobody in its lineup.
    #[instrument(
        name = "Game::simulate",
        skip(self, rng),
        fields(away = %self.away.name, home = %self.home.name)
    )]
    pub fn simulate(&self, rng: &mut impl Rng) -> Option<BoxScore> {
        if self.away.lineup.is_empty() || self.home.lineup.is_empty() {
            return None;
        }

        let mut state = State {
            inning: 1,
            runs: AwayHome::default(),
            linescore: AwayHome::default(),
            position: AwayHome::default(),
            boxes: AwayHome::default(),
            staff: AwayHome {
                away: Staff::new(&self.away),
                home: Staff::new(&self.home),
            },
            walk_off: false,
        };

        loop {
            state.play_half(Side::Away, &self.away.lineup, &self.model, rng);
            // Home team already winning doesn't need its last at-bats.
            if state.inning >= REGULATION_INNINGS && state.runs.home > state.runs.away {
                break;
            }
            state.play_half(Side::Home, &self.home.lineup, &self.model, rng);
            if state.is_complete() {
                break;
            }
            state.inning += 1;
        }

        Some(state.finish())
    }
}

impl<'a> State<'a> {
    fn play_half(
        &mut self,
        batting: Side,
        lineup: &[Batter],
        model: &PlateAppearanceModel,
        rng: &mut impl Rng,
    ) -> HalfInningResult {
        let fielding = batting.other();
        let walk_off_target = if batting == Side::Home && self.inning >= REGULATION_INNINGS {
            Some(self.runs.away.saturating_sub(self.runs.home) + 1)
        } else {
            None
        };
        let score_differential = self.differential(batting);

        let staff = self.staff.get_mut(fielding);
        let current = staff.on_mound().0.id;
        staff.check_fatigue(self.boxes.get(fielding).pitcher_line(current), rng);
        let (pitcher, effectiveness) = staff.on_mound();

        let (offense, defense) = self.boxes.split_mut(batting);
        let result = HalfInning {
            inning: self.inning,
            lineup,
            pitcher: pitcher.id,
            effectiveness,
            score_differential,
            walk_off_target,
            model,
        }
        .simulate(self.position.get_mut(batting), offense, defense, rng);
        staff.stint_innings += 1;

        *self.runs.get_mut(batting) += result.runs;
        self.linescore.get_mut(batting).push(result.runs);
        self.walk_off |= result.walked_off;
        result
    }

    #[allow(clippy::cast_possible_wrap)]
    fn differential(&self, batting: Side) -> i32 {
        *self.runs.get(batting) as i32 - *self.runs.get(batting.other()) as i32
    }

    fn is_complete(&self) -> bool {
        if self.inning >= MAX_INNINGS {
            true
        } else {
            self.inning >= REGULATION_INNINGS && self.runs.away != self.runs.home
        }
    }

    fn winner(&self) -> Option<Side> {
        if self.runs.away > self.runs.home {
            Some(Side::Away)
        } else if self.runs.home > self.runs.away {
            Some(Side::Home)
        } else {
            None
        }
    }

    fn finish(self) -> BoxScore {
        let winner = self.winner();
        let State {
            inning,
            runs,
            linescore,
            boxes,
            walk_off,
            ..
        } = self;
        let AwayHome { away, home } = boxes;
        let (away_batting, away_pitching) = away.finish();
        let (home_batting, home_pitching) = home.finish();
        let mut pitching = AwayHome {
            away: away_pitching,
            home: home_pitching,
        };
        assign_decisions(&mut pitching, winner, walk_off);

        debug!(
            innings = inning,
            away = runs.away,
            home = runs.home,
            ?winner,
            walk_off,
            "game over"
        );
        BoxScore {
            innings: inning,
            score: runs,
            linescore,
            batting: AwayHome {
                away: away_batting,
                home: home_batting,
            },
            pitching,
            winner,
            walk_off,
        }
    }
}

/// The pitcher who worked the most innings counts as the starter. Ties go to
/// whoever pitched first.
fn starter_index(lines: &[PitcherGameStats]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, line) in lines.iter().enumerate() {
        if best.map_or(true, |b| line.innings_pitched > lines[b].innings_pitched) {
            best = Some(i);
        }
    }
    best
}

/// Saves and holds only go to relievers who came in with a lead. A save also
/// needs the lead never to have been surrendered, so a walk-off never has one.
fn assign_decisions(
    pitching: &mut AwayHome<Vec<PitcherGameStats>>,
    winner: Option<Side>,
    walk_off: bool,
) {
    for side in &[Side::Away, Side::Home] {
        let lines = pitching.get_mut(*side);
        if let Some(i) = starter_index(lines) {
            let starter = &mut lines[i];
            starter.quality_start = starter.innings_pitched >= QUALITY_START_INNINGS
                && starter.earned_runs <= QUALITY_START_MAX_EARNED_RUNS;
        }
    }

    let winner = match winner {
        Some(winner) => winner,
        None => return,
    };
    let (winning, losing) = pitching.split_mut(winner);

    if let Some(i) = starter_index(losing) {
        losing[i].loss = true;
    }

    // No reliever wins: a short start means nobody gets the W.
    let starter = match starter_index(winning) {
        Some(i) => i,
        None => return,
    };
    winning[starter].win = winning[starter].innings_pitched >= WIN_MIN_INNINGS;

    let last = winning.len() - 1;
    for (i, line) in winning.iter_mut().enumerate() {
        if i == starter {
            continue;
        }
        let had_lead = line.lead_on_entry > 0;
        if i == last {
            line.save = had_lead
                && !walk_off
                && line.entered_inning >= REGULATION_INNINGS
                && line.runs_allowed <= 1
                && i32::try_from(line.runs_allowed).map_or(false, |r| r < line.lead_on_entry);
        } else {
            line.hold = had_lead && line.runs_allowed == 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        assign_decisions, Batter, BoxScore, Game, Pitcher, TeamSheet, MAX_INNINGS,
        STARTER_PITCH_LIMIT,
    };
    use crate::outcome::OutcomeDistribution;
    use crate::plate_appearance::PlateAppearanceModel;
    use crate::rating::{BatterProfile, PitcherProfile};
    use crate::stats::PitcherGameStats;
    use crate::util::{AwayHome, Side};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::convert::TryFrom;
    use uuid::Uuid;

    fn team(base: u128, name: &str, batting: i32, pitching: i32, relievers: usize) -> TeamSheet {
        TeamSheet {
            name: name.to_string(),
            lineup: (0..9)
                .map(|i| Batter {
                    id: Uuid::from_u128(base + i),
                    name: format!("{} batter {}", name, i),
                    profile: BatterProfile::uniform(batting),
                })
                .collect(),
            starter: Pitcher {
                id: Uuid::from_u128(base + 100),
                name: format!("{} starter", name),
                profile: PitcherProfile::uniform(pitching),
            },
            bullpen: (0..relievers as u128)
                .map(|i| Pitcher {
                    id: Uuid::from_u128(base + 101 + i),
                    name: format!("{} reliever {}", name, i),
                    profile: PitcherProfile::uniform(pitching),
                })
                .collect(),
        }
    }

    fn average_game() -> Game {
        Game::new(team(1_000, "Away", 50, 50, 6), team(2_000, "Home", 50, 50, 6))
    }

    fn check_invariants(score: &BoxScore) {
        assert!(score.innings >= 9 && score.innings <= MAX_INNINGS);
        for side in &[Side::Away, Side::Home] {
            let runs: u32 = score.batting.get(*side).iter().map(|b| b.runs).sum();
            let rbi: u32 = score.batting.get(*side).iter().map(|b| b.rbi).sum();
            let line: u32 = score.linescore.get(*side).iter().sum();
            let allowed: u32 = score
                .pitching
                .get(side.other())
                .iter()
                .map(|p| p.runs_allowed)
                .sum();
            assert_eq!(runs, *score.score.get(*side));
            assert_eq!(rbi, runs);
            assert_eq!(line, runs);
            assert_eq!(allowed, runs);
        }
        assert_eq!(usize::from(score.innings), score.linescore.away.len());
    }

    #[test]
    fn test_games_are_well_formed() {
        let game = average_game();
        let mut rng = StdRng::seed_from_u64(20);
        for _ in 0..300 {
            let score = game.simulate(&mut rng).unwrap();
            check_invariants(&score);

            match score.winner {
                Some(winner) => {
                    assert!(score.score.get(winner) > score.score.get(winner.other()));
                    let losses = score.pitching.get(winner.other()).iter().filter(|p| p.loss);
                    assert_eq!(losses.count(), 1);
                    let wins = score.pitching.get(winner).iter().filter(|p| p.win);
                    assert!(wins.count() <= 1);
                    assert!(score
                        .pitching
                        .get(winner.other())
                        .iter()
                        .all(|p| !p.win && !p.save && !p.hold));
                }
                None => {
                    assert_eq!(score.innings, MAX_INNINGS);
                    assert_eq!(score.score.away, score.score.home);
                    for side in &[Side::Away, Side::Home] {
                        assert!(score.pitching.get(*side).iter().all(|p| !p.win && !p.loss));
                    }
                }
            }

            // The home team only skips its half when it's already ahead.
            if score.linescore.home.len() < score.linescore.away.len() {
                assert_eq!(score.winner, Some(Side::Home));
                assert!(!score.walk_off);
            }
            if score.walk_off {
                assert_eq!(score.winner, Some(Side::Home));
            }
        }
    }

    #[test]
    fn test_starter_leaves_only_after_pitch_limit() {
        let game = average_game();
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..100 {
            let score = game.simulate(&mut rng).unwrap();
            for side in &[Side::Away, Side::Home] {
                let pitchers = score.pitching.get(*side);
                assert_eq!(pitchers[0].entered_inning, 1);
                if pitchers.len() > 1 {
                    assert!(pitchers[0].pitches > STARTER_PITCH_LIMIT);
                }
                for pair in pitchers.windows(2) {
                    assert!(pair[0].entered_inning < pair[1].entered_inning);
                }
            }
        }
    }

    #[test]
    fn test_no_bullpen_means_complete_game() {
        let game = Game::new(team(1_000, "Away", 50, 50, 0), team(2_000, "Home", 50, 50, 0));
        let mut rng = StdRng::seed_from_u64(22);
        let score = game.simulate(&mut rng).unwrap();
        assert_eq!(score.pitching.away.len(), 1);
        assert_eq!(score.pitching.home.len(), 1);
        check_invariants(&score);
    }

    fn only(home_run: f64, strikeout: f64) -> PlateAppearanceModel {
        PlateAppearanceModel::Fixed(OutcomeDistribution {
            home_run,
            triple: 0.0,
            double: 0.0,
            single: 0.0,
            walk: 0.0,
            hit_by_pitch: 0.0,
            strikeout,
            ground_out: 0.0,
            fly_out: 0.0,
        })
    }

    #[test]
    fn test_all_strikeouts_ends_tied_at_cap() {
        let mut game = average_game();
        game.model = only(0.0, 1.0);
        let mut rng = StdRng::seed_from_u64(23);
        let score = game.simulate(&mut rng).unwrap();
        assert_eq!(score.innings, MAX_INNINGS);
        assert_eq!(score.winner, None);
        assert_eq!(score.score, AwayHome { away: 0, home: 0 });
    }

    #[test]
    fn test_all_home_runs_still_terminates() {
        // Every half-inning runs into the plate-appearance cap, so the home
        // team can only ever pull even and the game goes the distance.
        let mut game = average_game();
        game.model = only(1.0, 0.0);
        let mut rng = StdRng::seed_from_u64(24);
        let score = game.simulate(&mut rng).unwrap();
        assert_eq!(score.innings, MAX_INNINGS);
        assert_eq!(score.winner, None);
        assert!(!score.walk_off);
        let per_half = crate::inning::MAX_PLATE_APPEARANCES;
        assert_eq!(score.score.away, per_half * u32::from(MAX_INNINGS));
        check_invariants(&score);
    }

    #[test]
    fn test_empty_lineup_is_not_a_game() {
        let mut away = team(1_000, "Away", 50, 50, 2);
        away.lineup.clear();
        let game = Game::new(away, team(2_000, "Home", 50, 50, 2));
        let mut rng = StdRng::seed_from_u64(25);
        assert!(game.simulate(&mut rng).is_none());
    }

    #[test]
    fn test_better_team_wins_more() {
        let game = Game::new(team(1_000, "Away", 70, 70, 6), team(2_000, "Home", 30, 30, 6));
        let mut rng = StdRng::seed_from_u64(26);
        let away_wins = (0..200)
            .filter_map(|_| game.simulate(&mut rng))
            .filter(|s| s.winner == Some(Side::Away))
            .count();
        assert!(away_wins > 130, "{}", away_wins);
    }

    fn line(innings_pitched: u32, entered_inning: u8, lead: i32, runs: u32) -> PitcherGameStats {
        let mut line = PitcherGameStats::new(Uuid::from_u128(u128::from(entered_inning)), entered_inning);
        line.lead_on_entry = lead;
        line.innings_pitched = innings_pitched;
        line.allow_runs(runs);
        line
    }

    #[test]
    fn test_decisions() {
        let mut pitching = AwayHome {
            away: vec![line(6, 1, 0, 2), line(2, 7, 1, 0), line(1, 9, 2, 1)],
            home: vec![line(7, 1, 0, 4), line(2, 8, -1, 0)],
        };
        assign_decisions(&mut pitching, Some(Side::Away), false);
        let away = &pitching.away;
        assert!(away[0].win && away[0].quality_start);
        assert!(away[1].hold && !away[1].save);
        assert!(away[2].save && !away[2].hold);
        let home = &pitching.home;
        assert!(home[0].loss && !home[0].quality_start);
        assert!(!home[1].loss && !home[1].hold);
    }

    #[test]
    fn test_no_save_or_hold_without_a_lead() {
        // Came in tied, or with a one-run lead and gave it up.
        for closer in &[line(1, 9, 0, 0), line(1, 9, 1, 1), line(1, 9, -1, 0)] {
            let mut pitching = AwayHome {
                away: vec![line(7, 1, 0, 3), line(1, 8, 0, 0), closer.clone()],
                home: vec![line(9, 1, 0, 3)],
            };
            assign_decisions(&mut pitching, Some(Side::Away), false);
            assert!(!pitching.away[1].hold);
            assert!(!pitching.away[2].save);
        }

        let mut pitching = AwayHome {
            away: vec![line(9, 1, 0, 4)],
            home: vec![line(8, 1, 0, 4), line(1, 9, 1, 0)],
        };
        assign_decisions(&mut pitching, Some(Side::Home), true);
        assert!(!pitching.home[1].save);
    }

    #[test]
    fn test_played_games_only_save_leads() {
        let game = average_game();
        let mut rng = StdRng::seed_from_u64(5);
        let mut walk_offs = 0;
        for _ in 0..2000 {
            let score = game.simulate(&mut rng).unwrap();
            for side in &[Side::Away, Side::Home] {
                for line in score.pitching.get(*side) {
                    if line.save || line.hold {
                        assert!(line.lead_on_entry > 0, "{:?}", line);
                    }
                    if line.save {
                        assert!(i32::try_from(line.runs_allowed).unwrap() < line.lead_on_entry);
                    }
                }
            }
            if score.walk_off {
                walk_offs += 1;
                assert!(score.pitching.home.iter().all(|p| !p.save));
            }
        }
        assert!(walk_offs > 0);
    }

    #[test]
    fn test_short_start_gets_no_win() {
        let mut pitching = AwayHome {
            away: vec![line(4, 1, 0, 5), line(3, 5, 2, 1), line(2, 8, 1, 2)],
            home: vec![line(4, 1, 0, 6), line(5, 5, -2, 3)],
        };
        assign_decisions(&mut pitching, Some(Side::Home), false);
        // The long man worked the most innings, so he's charged like a starter.
        assert!(pitching.home[1].win);
        assert!(!pitching.home[0].win && !pitching.home[0].hold);
        assert!(pitching.away[0].loss);
        assert!(!pitching.away[1].loss);

        let mut pitching = AwayHome {
            away: vec![
                line(4, 1, 0, 2),
                line(2, 5, 2, 0),
                line(2, 7, 3, 0),
                line(1, 9, 3, 2),
            ],
            home: vec![line(9, 1, 0, 4)],
        };
        assign_decisions(&mut pitching, Some(Side::Away), false);
        assert!(pitching.away.iter().all(|p| !p.win));
        assert!(pitching.away[1].hold && pitching.away[2].hold);
        assert!(!pitching.away[3].save);
        assert!(pitching.home[0].loss && !pitching.home[0].quality_start);
    }
}
