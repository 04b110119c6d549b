// Typed row collections for the Lahman tables.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// Statistic code → numeric value. A code that is absent means the value is
/// missing for that row; callers never see a sentinel number for it.
pub type StatLine = HashMap<String, f64>;

// ---------------------------------------------------------------------------
// People
// ---------------------------------------------------------------------------

/// Biographical reference row from People.csv.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    pub player_id: String,
    pub name_first: Option<String>,
    pub name_last: Option<String>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub bats: Option<String>,
    pub throws: Option<String>,
    pub debut: Option<NaiveDate>,
    pub final_game: Option<NaiveDate>,
}

impl Person {
    /// "First Last", or whichever half is known.
    pub fn full_name(&self) -> String {
        match (&self.name_first, &self.name_last) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(only), None) | (None, Some(only)) => only.clone(),
            (None, None) => self.player_id.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Season rows
// ---------------------------------------------------------------------------

/// A Batting/Pitching/Fielding row as ingested, before the biography join.
/// `year` is optional because the source can carry malformed rows; those are
/// dropped by the merge.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSeasonRow {
    pub player_id: String,
    pub year: Option<i32>,
    pub stint: Option<u32>,
    pub team_id: Option<String>,
    pub league: Option<String>,
    pub stats: StatLine,
}

/// One player's season in one statistic family, joined with the player's
/// biography (absent when People has no matching row).
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonRecord {
    pub player_id: String,
    pub year: i32,
    pub stint: Option<u32>,
    pub team_id: Option<String>,
    pub league: Option<String>,
    pub stats: StatLine,
    pub person: Option<Person>,
}

impl SeasonRecord {
    /// Value of a statistic column, `None` when missing.
    pub fn stat(&self, code: &str) -> Option<f64> {
        self.stats.get(code).copied()
    }
}

// ---------------------------------------------------------------------------
// Teams and franchises
// ---------------------------------------------------------------------------

/// One team's season from Teams.csv. After the repository build the
/// `attendance` column is expressed in hundreds of thousands.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamSeasonRecord {
    pub team_id: String,
    pub year: i32,
    pub league: Option<String>,
    pub franchise_id: Option<String>,
    pub name: Option<String>,
    pub world_series_win: bool,
    pub stats: StatLine,
}

impl TeamSeasonRecord {
    pub fn stat(&self, code: &str) -> Option<f64> {
        self.stats.get(code).copied()
    }
}

/// Franchise row from TeamsFranchises.csv.
#[derive(Debug, Clone, PartialEq)]
pub struct FranchiseRecord {
    pub franchise_id: String,
    pub name: Option<String>,
    pub active: bool,
}

// ---------------------------------------------------------------------------
// Awards and honors
// ---------------------------------------------------------------------------

/// The four awards that annotate a season. Every other award type is
/// dropped at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AwardCategory {
    MostValuablePlayer,
    SilverSlugger,
    CyYoung,
    GoldGlove,
}

impl AwardCategory {
    /// Map an `awardID` from AwardsPlayers.csv. Returns `None` for awards
    /// that do not annotate seasons.
    pub fn from_award_id(award_id: &str) -> Option<Self> {
        match award_id.trim() {
            "Most Valuable Player" => Some(AwardCategory::MostValuablePlayer),
            "Silver Slugger" => Some(AwardCategory::SilverSlugger),
            "Cy Young Award" => Some(AwardCategory::CyYoung),
            "Gold Glove" => Some(AwardCategory::GoldGlove),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AwardCategory::MostValuablePlayer => "MVP",
            AwardCategory::SilverSlugger => "Silver Slugger",
            AwardCategory::CyYoung => "Cy Young",
            AwardCategory::GoldGlove => "Gold Glove",
        }
    }
}

/// An AwardsPlayers.csv row as ingested (any award type).
#[derive(Debug, Clone, PartialEq)]
pub struct RawAwardRow {
    pub player_id: String,
    pub award_id: String,
    pub year: i32,
    pub league: Option<String>,
}

/// A recognized award won by a player in a season.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AwardRecord {
    pub player_id: String,
    pub year: i32,
    pub category: AwardCategory,
}

/// One All-Star Game appearance (AllstarFull.csv row).
#[derive(Debug, Clone, PartialEq)]
pub struct AllStarRecord {
    pub player_id: String,
    pub year: i32,
    pub team_id: Option<String>,
}

/// One Hall of Fame ballot row (HallOfFame.csv).
#[derive(Debug, Clone, PartialEq)]
pub struct HallOfFameRecord {
    pub player_id: String,
    pub year: i32,
    pub inducted: bool,
}

// ---------------------------------------------------------------------------
// Raw table bundle
// ---------------------------------------------------------------------------

/// Everything ingestion hands to the repository build.
#[derive(Debug, Clone, Default)]
pub struct RawTables {
    pub people: Vec<Person>,
    pub batting: Vec<RawSeasonRow>,
    pub pitching: Vec<RawSeasonRow>,
    pub fielding: Vec<RawSeasonRow>,
    pub teams: Vec<TeamSeasonRecord>,
    pub franchises: Vec<FranchiseRecord>,
    pub awards: Vec<RawAwardRow>,
    pub all_stars: Vec<AllStarRecord>,
    pub hall_of_fame: Vec<HallOfFameRecord>,
}
