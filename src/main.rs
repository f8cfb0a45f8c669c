#![warn(clippy::pedantic, rust_2018_idioms)]

use anyhow::{Context, Result};
use diamond_sim::attendance::{Attendance, AttendanceInputs};
use diamond_sim::game::{BoxScore, Game};
use diamond_sim::season::{simulate_season, LeagueTeam, PlayoffResult, SeasonConfig, SeasonSummary};
use diamond_sim::team::{Coaching, RosterPlayer, TeamOffenseDefense};
use flate2::read::GzDecoder;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeagueFile {
    seed: u64,
    #[serde(default)]
    season: SeasonConfig,
    franchise: Franchise,
    ai_teams: Vec<AiTeam>,
    #[serde(default)]
    game: Option<Game>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Franchise {
    id: Uuid,
    name: String,
    roster: Vec<RosterPlayer>,
    #[serde(default)]
    coaching: Coaching,
    stadium: Stadium,
    home_games: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Stadium {
    capacity: u32,
    quality: f64,
    city_pride: f64,
    unemployment: f64,
    #[serde(default = "one")]
    external_multiplier: f64,
}

fn one() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
struct AiTeam {
    id: Uuid,
    name: String,
    strength: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    franchise: TeamOffenseDefense,
    season: SeasonSummary,
    playoff_result: PlayoffResult,
    attendance: Attendance,
    game: Option<BoxScore>,
}

fn open(path: &Path) -> Result<Box<dyn Read>> {
    let file = BufReader::new(
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
    );
    if path.extension().map_or(false, |ext| ext == "gz") {
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "league.json".into());
    let league: LeagueFile = serde_json::from_reader(open(Path::new(&path))?)
        .with_context(|| format!("failed to parse {}", path))?;
    let mut rng = StdRng::seed_from_u64(league.seed);

    let franchise = &league.franchise;
    let strength = TeamOffenseDefense::from_roster(&franchise.roster, &franchise.coaching);
    let teams: Vec<LeagueTeam> = std::iter::once(LeagueTeam {
        id: franchise.id,
        name: franchise.name.clone(),
        strength,
    })
    .chain(league.ai_teams.iter().map(|team| LeagueTeam {
        id: team.id,
        name: team.name.clone(),
        strength: TeamOffenseDefense::ai(team.strength, &mut rng),
    }))
    .collect();

    let season = simulate_season(&teams, &league.season, league.seed);
    let playoff_result = season.playoffs.result_for(franchise.id, &league.season);
    let win_pct = season
        .standings
        .iter()
        .find(|s| s.team_id == franchise.id)
        .map_or(0.5, |s| s.win_pct);
    info!(team = %franchise.name, win_pct, ?playoff_result, "season complete");

    let attendance = AttendanceInputs {
        capacity: franchise.stadium.capacity,
        win_pct,
        city_pride: franchise.stadium.city_pride,
        unemployment: franchise.stadium.unemployment,
        stadium_quality: franchise.stadium.quality,
        external_multiplier: franchise.stadium.external_multiplier,
    }
    .season(franchise.home_games, &mut rng);

    let game = league.game.as_ref().and_then(|game| game.simulate(&mut rng));

    let report = Report {
        franchise: strength,
        season,
        playoff_result,
        attendance,
        game,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
