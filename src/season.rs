use crate::pythag::win_probability;
use crate::team::TeamOffenseDefense;
use crate::util::{clamp, halfuuid, ratio};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, instrument};
use uuid::Uuid;

pub const GAME_JITTER_SD: f64 = 0.03;
pub const MAX_GAME_JITTER: f64 = 0.08;
pub const MIN_GAME_PROBABILITY: f64 = 0.15;
pub const MAX_GAME_PROBABILITY: f64 = 0.85;
/// Half-width of the uniform luck term in a playoff game.
pub const PLAYOFF_LUCK: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonRecord {
    pub wins: u32,
    pub losses: u32,
    pub win_pct: f64,
}

/// Plays out `games` games one at a time, each at `win_probability` plus a
/// little bounded Gaussian noise.
pub fn simulate_record(win_probability: f64, games: u32, rng: &mut impl Rng) -> SeasonRecord {
    let mut wins = 0;
    for _ in 0..games {
        let z: f64 = rng.sample(StandardNormal);
        let jitter = clamp(z * GAME_JITTER_SD, -MAX_GAME_JITTER, MAX_GAME_JITTER);
        let p = clamp(
            win_probability + jitter,
            MIN_GAME_PROBABILITY,
            MAX_GAME_PROBABILITY,
        );
        if rng.gen_bool(p) {
            wins += 1;
        }
    }
    SeasonRecord {
        wins,
        losses: games - wins,
        win_pct: ratio(wins, games),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonConfig {
    pub games: u32,
    pub playoff_teams: usize,
    /// Only the top tier plays for the top title after its championship.
    pub title_round: bool,
    /// Strength of whoever the champion meets for the top title.
    pub title_opponent_strength: f64,
}

impl Default for SeasonConfig {
    fn default() -> SeasonConfig {
        SeasonConfig {
            games: 162,
            playoff_teams: 4,
            title_round: true,
            title_opponent_strength: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LeagueTeam {
    pub id: Uuid,
    pub name: String,
    pub strength: TeamOffenseDefense,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    pub team_id: Uuid,
    pub wins: u32,
    pub losses: u32,
    pub win_pct: f64,
    pub strength: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EliminationRound {
    MissedPlayoffs,
    Divisional,
    Championship,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayoffResult {
    pub won_championship: bool,
    pub won_top_title: bool,
    /// `None` if the team won everything there was to win.
    pub elimination_round: Option<EliminationRound>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayoffBracket {
    /// Qualifiers, best seed first.
    pub seeds: Vec<Uuid>,
    /// Who lost in which round.
    pub eliminated: Vec<(Uuid, EliminationRound)>,
    pub champion: Option<Uuid>,
    pub won_top_title: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonSummary {
    pub standings: Vec<TeamStanding>,
    pub playoffs: PlayoffBracket,
}

/// One playoff game: strength plus a little luck on both sides.
pub fn playoff_game(strength: f64, opponent: f64, rng: &mut impl Rng) -> bool {
    strength + rng.gen_range(-PLAYOFF_LUCK, PLAYOFF_LUCK)
        > opponent + rng.gen_range(-PLAYOFF_LUCK, PLAYOFF_LUCK)
}

/// Simulates every team's record against a league-average opponent and
/// ranks them. Each team gets its own generator, seeded from `seed` and the
/// team id, so the result doesn't depend on how the work is split up.
#[instrument(skip(teams, config), fields(count = teams.len()))]
pub fn simulate_standings(teams: &[LeagueTeam], config: &SeasonConfig, seed: u64) -> Vec<TeamStanding> {
    let mut standings: Vec<TeamStanding> = teams
        .par_iter()
        .map(|team| {
            let mut rng = StdRng::seed_from_u64(seed ^ halfuuid(team.id));
            let p = win_probability(&team.strength, &TeamOffenseDefense::LEAGUE_AVERAGE);
            let record = simulate_record(p, config.games, &mut rng);
            debug!(team = %team.name, wins = record.wins, losses = record.losses, "season record");
            TeamStanding {
                team_id: team.id,
                wins: record.wins,
                losses: record.losses,
                win_pct: record.win_pct,
                strength: team.strength.strength(),
            }
        })
        .collect();
    rank(&mut standings);
    standings
}

/// Best win percentage first; strength breaks ties.
pub fn rank(standings: &mut [TeamStanding]) {
    standings.sort_by(|a, b| {
        b.win_pct
            .partial_cmp(&a.win_pct)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.strength.partial_cmp(&a.strength).unwrap_or(Ordering::Equal))
    });
}

/// Runs the bracket over the top `config.playoff_teams` of `standings`
/// (already ranked). Each round matches best remaining seed against worst.
pub fn simulate_playoffs(
    standings: &[TeamStanding],
    config: &SeasonConfig,
    rng: &mut impl Rng,
) -> PlayoffBracket {
    let qualifiers: Vec<&TeamStanding> = standings.iter().take(config.playoff_teams).collect();
    let mut bracket = PlayoffBracket {
        seeds: qualifiers.iter().map(|s| s.team_id).collect(),
        eliminated: Vec::new(),
        champion: None,
        won_top_title: false,
    };

    let mut alive = qualifiers;
    while alive.len() > 1 {
        let round = if alive.len() == 2 {
            EliminationRound::Championship
        } else {
            EliminationRound::Divisional
        };
        // Odd field: the top remaining seed gets a bye.
        let (byes, field) = alive.split_at(alive.len() % 2);
        let mut next = byes.to_vec();
        for i in 0..field.len() / 2 {
            let (a, b) = (field[i], field[field.len() - 1 - i]);
            let (winner, loser) = if playoff_game(a.strength, b.strength, rng) {
                (a, b)
            } else {
                (b, a)
            };
            debug!(winner = %winner.team_id, loser = %loser.team_id, ?round, "playoff game");
            bracket.eliminated.push((loser.team_id, round));
            next.push(winner);
        }
        alive = next;
    }

    if let Some(champion) = alive.first() {
        bracket.champion = Some(champion.team_id);
        if config.title_round {
            bracket.won_top_title =
                playoff_game(champion.strength, config.title_opponent_strength, rng);
            debug!(champion = %champion.team_id, won = bracket.won_top_title, "title round");
        }
    }
    bracket
}

impl PlayoffBracket {
    pub fn result_for(&self, team_id: Uuid, config: &SeasonConfig) -> PlayoffResult {
        if !self.seeds.contains(&team_id) {
            return PlayoffResult {
                won_championship: false,
                won_top_title: false,
                elimination_round: Some(EliminationRound::MissedPlayoffs),
            };
        }
        if let Some((_, round)) = self.eliminated.iter().find(|(id, _)| *id == team_id) {
            return PlayoffResult {
                won_championship: false,
                won_top_title: false,
                elimination_round: Some(*round),
            };
        }
        let lost_title = config.title_round && !self.won_top_title;
        PlayoffResult {
            won_championship: true,
            won_top_title: self.won_top_title,
            elimination_round: if lost_title {
                Some(EliminationRound::Title)
            } else {
                None
            },
        }
    }
}

/// A full season: standings, then playoffs.
pub fn simulate_season(teams: &[LeagueTeam], config: &SeasonConfig, seed: u64) -> SeasonSummary {
    let standings = simulate_standings(teams, config, seed);
    let mut rng = StdRng::seed_from_u64(!seed);
    let playoffs = simulate_playoffs(&standings, config, &mut rng);
    SeasonSummary {
        standings,
        playoffs,
    }
}
