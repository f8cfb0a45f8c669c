use crate::outcome::Outcome;
use crate::util::ratio;
use rustc_hash::FxHashMap;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatterGameStats {
    pub player_id: Uuid,
    pub plate_appearances: u32,
    pub at_bats: u32,
    pub hits: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub runs: u32,
    pub rbi: u32,
    pub walks: u32,
    pub hit_by_pitch: u32,
    pub strikeouts: u32,
    /// Filled in when the box score is finished.
    pub rates: BattingRates,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BattingRates {
    pub avg: f64,
    pub obp: f64,
    pub slg: f64,
}

impl BatterGameStats {
    pub fn new(player_id: Uuid) -> BatterGameStats {
        BatterGameStats {
            player_id,
            ..BatterGameStats::default()
        }
    }

    pub fn record(&mut self, outcome: Outcome) {
        self.plate_appearances += 1;
        if outcome.is_at_bat() {
            self.at_bats += 1;
        }
        if outcome.is_hit() {
            self.hits += 1;
        }
        match outcome {
            Outcome::HomeRun => self.home_runs += 1,
            Outcome::Triple => self.triples += 1,
            Outcome::Double => self.doubles += 1,
            Outcome::Walk => self.walks += 1,
            Outcome::HitByPitch => self.hit_by_pitch += 1,
            Outcome::Strikeout => self.strikeouts += 1,
            Outcome::Single | Outcome::GroundOut | Outcome::FlyOut => {}
        }
    }

    pub fn singles(&self) -> u32 {
        self.hits - self.doubles - self.triples - self.home_runs
    }

    pub fn total_bases(&self) -> u32 {
        self.singles() + 2 * self.doubles + 3 * self.triples + 4 * self.home_runs
    }

    pub fn batting_average(&self) -> f64 {
        ratio(self.hits, self.at_bats)
    }

    pub fn on_base_pct(&self) -> f64 {
        ratio(
            self.hits + self.walks + self.hit_by_pitch,
            self.at_bats + self.walks + self.hit_by_pitch,
        )
    }

    pub fn slugging(&self) -> f64 {
        ratio(self.total_bases(), self.at_bats)
    }

    pub fn rate_line(&self) -> BattingRates {
        BattingRates {
            avg: self.batting_average(),
            obp: self.on_base_pct(),
            slg: self.slugging(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PitcherGameStats {
    pub player_id: Uuid,
    /// The inning this pitcher took the mound in.
    pub entered_inning: u8,
    /// Fielding team's runs minus the batting team's when this pitcher took
    /// the mound.
    pub lead_on_entry: i32,
    pub innings_pitched: u32,
    pub batters_faced: u32,
    pub pitches: u32,
    pub hits_allowed: u32,
    pub runs_allowed: u32,
    pub earned_runs: u32,
    pub walks: u32,
    pub hit_by_pitch: u32,
    pub strikeouts: u32,
    pub home_runs_allowed: u32,
    pub win: bool,
    pub loss: bool,
    pub save: bool,
    pub hold: bool,
    pub quality_start: bool,
    /// Filled in when the box score is finished.
    pub rates: PitchingRates,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchingRates {
    pub era: f64,
    pub whip: f64,
    /// Box-score style, e.g. `"6.0"`.
    pub innings_pitched: String,
}

impl PitcherGameStats {
    pub fn new(player_id: Uuid, entered_inning: u8) -> PitcherGameStats {
        PitcherGameStats {
            player_id,
            entered_inning,
            ..PitcherGameStats::default()
        }
    }

    pub fn record(&mut self, outcome: Outcome, pitches: u32) {
        self.batters_faced += 1;
        self.pitches += pitches;
        if outcome.is_hit() {
            self.hits_allowed += 1;
        }
        match outcome {
            Outcome::HomeRun => self.home_runs_allowed += 1,
            Outcome::Walk => self.walks += 1,
            Outcome::HitByPitch => self.hit_by_pitch += 1,
            Outcome::Strikeout => self.strikeouts += 1,
            _ => {}
        }
    }

    /// Every run is charged as earned; errors aren't modeled.
    pub fn allow_runs(&mut self, runs: u32) {
        self.runs_allowed += runs;
        self.earned_runs += runs;
    }

    pub fn era(&self) -> f64 {
        9.0 * ratio(self.earned_runs, self.innings_pitched)
    }

    pub fn whip(&self) -> f64 {
        ratio(self.walks + self.hits_allowed, self.innings_pitched)
    }

    /// Only whole innings are ever credited, so the outs digit is always zero.
    pub fn innings_pitched_display(&self) -> String {
        format!("{}.0", self.innings_pitched)
    }

    pub fn rate_line(&self) -> PitchingRates {
        PitchingRates {
            era: self.era(),
            whip: self.whip(),
            innings_pitched: self.innings_pitched_display(),
        }
    }
}

/// Mutable box-score accumulators for one side of one game.
///
/// Lines are kept in the order players first appear; `finish` hands back the
/// finished lines and consumes the builder.
#[derive(Debug, Default)]
pub struct BoxScoreBuilder {
    batters: Vec<BatterGameStats>,
    batter_index: FxHashMap<Uuid, usize>,
    pitchers: Vec<PitcherGameStats>,
    pitcher_index: FxHashMap<Uuid, usize>,
}

impl BoxScoreBuilder {
    pub fn new() -> BoxScoreBuilder {
        BoxScoreBuilder::default()
    }

    pub fn batter(&mut self, id: Uuid) -> &mut BatterGameStats {
        let batters = &mut self.batters;
        let index = *self.batter_index.entry(id).or_insert_with(|| {
            batters.push(BatterGameStats::new(id));
            batters.len() - 1
        });
        &mut self.batters[index]
    }

    /// Returns the pitcher's line, opening one that starts in `inning` with
    /// the fielding team up by `lead` if this is their first appearance.
    pub fn pitcher(&mut self, id: Uuid, inning: u8, lead: i32) -> &mut PitcherGameStats {
        let pitchers = &mut self.pitchers;
        let index = *self.pitcher_index.entry(id).or_insert_with(|| {
            pitchers.push(PitcherGameStats {
                lead_on_entry: lead,
                ..PitcherGameStats::new(id, inning)
            });
            pitchers.len() - 1
        });
        &mut self.pitchers[index]
    }

    pub fn pitcher_line(&self, id: Uuid) -> Option<&PitcherGameStats> {
        self.pitcher_index.get(&id).map(|i| &self.pitchers[*i])
    }

    /// Stamps rate stats onto every line and hands them back.
    pub fn finish(mut self) -> (Vec<BatterGameStats>, Vec<PitcherGameStats>) {
        for line in &mut self.batters {
            line.rates = line.rate_line();
        }
        for line in &mut self.pitchers {
            line.rates = line.rate_line();
        }
        (self.batters, self.pitchers)
    }
}
