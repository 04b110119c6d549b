// Statistic codes: closed enumerations per family, validated at the query
// boundary.

use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Caller misuse of the query surface. Data conditions (unknown players,
/// missing seasons, zero denominators) never produce one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("unknown {scope} statistic code `{code}`")]
    UnknownStatistic { scope: &'static str, code: String },

    #[error("unknown statistic family `{0}` (expected batting, pitching or fielding)")]
    UnknownFamily(String),

    #[error("unknown team statistic group `{0}` (expected batting, pitching, fielding or overview)")]
    UnknownGroup(String),

    #[error("unknown league selector `{0}` (expected AL, NL or Both)")]
    UnknownLeague(String),

    #[error("invalid year range {start}..={end}: start is after end")]
    InvalidYearRange { start: i32, end: i32 },
}

// ---------------------------------------------------------------------------
// Statistic family
// ---------------------------------------------------------------------------

/// Which per-player table a statistic comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatFamily {
    Batting,
    Pitching,
    Fielding,
}

impl StatFamily {
    pub const ALL: [StatFamily; 3] = [StatFamily::Batting, StatFamily::Pitching, StatFamily::Fielding];

    /// Parse a family name ("batting", "pitching", "fielding"), case-insensitive.
    pub fn from_str_family(s: &str) -> Result<Self, QueryError> {
        match s.trim().to_lowercase().as_str() {
            "batting" | "bat" => Ok(StatFamily::Batting),
            "pitching" | "pitch" => Ok(StatFamily::Pitching),
            "fielding" | "field" => Ok(StatFamily::Fielding),
            _ => Err(QueryError::UnknownFamily(s.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StatFamily::Batting => "batting",
            StatFamily::Pitching => "pitching",
            StatFamily::Fielding => "fielding",
        }
    }
}

impl fmt::Display for StatFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Per-player statistic codes
// ---------------------------------------------------------------------------

/// Individual batting statistics offered for charting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BattingStat {
    Runs,
    Doubles,
    Triples,
    HomeRuns,
    RunsBattedIn,
    StolenBases,
    BattingAverage,
    CaughtStealing,
    Walks,
    StrikeOuts,
    IntentionalWalks,
    HitByPitch,
    GroundedIntoDoublePlay,
    SacrificeHits,
    SacrificeFlies,
}

impl BattingStat {
    pub const ALL: [BattingStat; 15] = [
        BattingStat::Runs,
        BattingStat::Doubles,
        BattingStat::Triples,
        BattingStat::HomeRuns,
        BattingStat::RunsBattedIn,
        BattingStat::StolenBases,
        BattingStat::BattingAverage,
        BattingStat::CaughtStealing,
        BattingStat::Walks,
        BattingStat::StrikeOuts,
        BattingStat::IntentionalWalks,
        BattingStat::HitByPitch,
        BattingStat::GroundedIntoDoublePlay,
        BattingStat::SacrificeHits,
        BattingStat::SacrificeFlies,
    ];

    /// Column code in Batting.csv (or the derived `BA` column).
    pub fn code(&self) -> &'static str {
        match self {
            BattingStat::Runs => "R",
            BattingStat::Doubles => "2B",
            BattingStat::Triples => "3B",
            BattingStat::HomeRuns => "HR",
            BattingStat::RunsBattedIn => "RBI",
            BattingStat::StolenBases => "SB",
            BattingStat::BattingAverage => "BA",
            BattingStat::CaughtStealing => "CS",
            BattingStat::Walks => "BB",
            BattingStat::StrikeOuts => "SO",
            BattingStat::IntentionalWalks => "IBB",
            BattingStat::HitByPitch => "HBP",
            BattingStat::GroundedIntoDoublePlay => "GIDP",
            BattingStat::SacrificeHits => "SH",
            BattingStat::SacrificeFlies => "SF",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BattingStat::Runs => "Runs",
            BattingStat::Doubles => "Doubles",
            BattingStat::Triples => "Triples",
            BattingStat::HomeRuns => "Homeruns",
            BattingStat::RunsBattedIn => "RBIs",
            BattingStat::StolenBases => "Stolen Bases",
            BattingStat::BattingAverage => "Batting Average",
            BattingStat::CaughtStealing => "Caught Stealing",
            BattingStat::Walks => "Walks",
            BattingStat::StrikeOuts => "Strike Outs",
            BattingStat::IntentionalWalks => "Intentional Walks",
            BattingStat::HitByPitch => "Hit By Pitch",
            BattingStat::GroundedIntoDoublePlay => "Grounded in to Double Play",
            BattingStat::SacrificeHits => "Sacrifice Hits",
            BattingStat::SacrificeFlies => "Sacrifice Flies",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code().eq_ignore_ascii_case(code.trim()))
    }
}

/// Individual pitching statistics offered for charting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PitchingStat {
    Wins,
    Losses,
    Games,
    GamesStarted,
    CompleteGames,
    Shutouts,
    Saves,
    EarnedRuns,
    HomeRunsAllowed,
    StrikeOuts,
    Walks,
    OpponentBattingAverage,
    EarnedRunAverage,
    RunsAllowed,
    Balks,
}

impl PitchingStat {
    pub const ALL: [PitchingStat; 15] = [
        PitchingStat::Wins,
        PitchingStat::Losses,
        PitchingStat::Games,
        PitchingStat::GamesStarted,
        PitchingStat::CompleteGames,
        PitchingStat::Shutouts,
        PitchingStat::Saves,
        PitchingStat::EarnedRuns,
        PitchingStat::HomeRunsAllowed,
        PitchingStat::StrikeOuts,
        PitchingStat::Walks,
        PitchingStat::OpponentBattingAverage,
        PitchingStat::EarnedRunAverage,
        PitchingStat::RunsAllowed,
        PitchingStat::Balks,
    ];

    /// Column code in Pitching.csv.
    pub fn code(&self) -> &'static str {
        match self {
            PitchingStat::Wins => "W",
            PitchingStat::Losses => "L",
            PitchingStat::Games => "G",
            PitchingStat::GamesStarted => "GS",
            PitchingStat::CompleteGames => "CG",
            PitchingStat::Shutouts => "SHO",
            PitchingStat::Saves => "SV",
            PitchingStat::EarnedRuns => "ER",
            PitchingStat::HomeRunsAllowed => "HR",
            PitchingStat::StrikeOuts => "SO",
            PitchingStat::Walks => "BB",
            PitchingStat::OpponentBattingAverage => "BAOpp",
            PitchingStat::EarnedRunAverage => "ERA",
            PitchingStat::RunsAllowed => "R",
            PitchingStat::Balks => "BK",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PitchingStat::Wins => "Wins",
            PitchingStat::Losses => "Losses",
            PitchingStat::Games => "Games",
            PitchingStat::GamesStarted => "Games Started",
            PitchingStat::CompleteGames => "Complete Games",
            PitchingStat::Shutouts => "Shutouts",
            PitchingStat::Saves => "Saves",
            PitchingStat::EarnedRuns => "Earned Runs",
            PitchingStat::HomeRunsAllowed => "Home Runs Allowed",
            PitchingStat::StrikeOuts => "Strike Outs",
            PitchingStat::Walks => "Walks",
            PitchingStat::OpponentBattingAverage => "Opponent Batting Average",
            PitchingStat::EarnedRunAverage => "Earned Run Average",
            PitchingStat::RunsAllowed => "Runs Allowed",
            PitchingStat::Balks => "Balks",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code().eq_ignore_ascii_case(code.trim()))
    }
}

/// Individual fielding statistics offered for charting. The last four only
/// carry values for catchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldingStat {
    Putouts,
    Assists,
    DoublePlays,
    Errors,
    PassedBalls,
    WildPitches,
    OpponentsCaughtStealing,
    OpponentStolenBases,
}

impl FieldingStat {
    pub const ALL: [FieldingStat; 8] = [
        FieldingStat::Putouts,
        FieldingStat::Assists,
        FieldingStat::DoublePlays,
        FieldingStat::Errors,
        FieldingStat::PassedBalls,
        FieldingStat::WildPitches,
        FieldingStat::OpponentsCaughtStealing,
        FieldingStat::OpponentStolenBases,
    ];

    /// Column code in Fielding.csv.
    pub fn code(&self) -> &'static str {
        match self {
            FieldingStat::Putouts => "PO",
            FieldingStat::Assists => "A",
            FieldingStat::DoublePlays => "DP",
            FieldingStat::Errors => "E",
            FieldingStat::PassedBalls => "PB",
            FieldingStat::WildPitches => "WP",
            FieldingStat::OpponentsCaughtStealing => "CS",
            FieldingStat::OpponentStolenBases => "SB",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldingStat::Putouts => "Putouts",
            FieldingStat::Assists => "Assists",
            FieldingStat::DoublePlays => "Double Plays",
            FieldingStat::Errors => "Errors",
            FieldingStat::PassedBalls => "Passed Balls (for catchers)",
            FieldingStat::WildPitches => "Wild Pitches (for catchers)",
            FieldingStat::OpponentsCaughtStealing => "Opponents Caught Stealing (for catchers)",
            FieldingStat::OpponentStolenBases => "Opponent Stolen Bases (for catchers)",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code().eq_ignore_ascii_case(code.trim()))
    }
}

/// A per-player statistic, tagged with the family whose table holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlayerStat {
    Batting(BattingStat),
    Pitching(PitchingStat),
    Fielding(FieldingStat),
}

impl PlayerStat {
    /// Validate `code` against the statistic list of `family`.
    ///
    /// The same code can mean different things in different families (`HR`
    /// is home runs hit for batters and allowed for pitchers), so a code is
    /// only ever resolved together with its family.
    pub fn parse(family: StatFamily, code: &str) -> Result<Self, QueryError> {
        let parsed = match family {
            StatFamily::Batting => BattingStat::from_code(code).map(PlayerStat::Batting),
            StatFamily::Pitching => PitchingStat::from_code(code).map(PlayerStat::Pitching),
            StatFamily::Fielding => FieldingStat::from_code(code).map(PlayerStat::Fielding),
        };
        parsed.ok_or_else(|| QueryError::UnknownStatistic {
            scope: family.name(),
            code: code.to_string(),
        })
    }

    pub fn family(&self) -> StatFamily {
        match self {
            PlayerStat::Batting(_) => StatFamily::Batting,
            PlayerStat::Pitching(_) => StatFamily::Pitching,
            PlayerStat::Fielding(_) => StatFamily::Fielding,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            PlayerStat::Batting(s) => s.code(),
            PlayerStat::Pitching(s) => s.code(),
            PlayerStat::Fielding(s) => s.code(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlayerStat::Batting(s) => s.label(),
            PlayerStat::Pitching(s) => s.label(),
            PlayerStat::Fielding(s) => s.label(),
        }
    }

    /// Every statistic offered for `family`, in menu order.
    pub fn all_for(family: StatFamily) -> Vec<PlayerStat> {
        match family {
            StatFamily::Batting => BattingStat::ALL.into_iter().map(PlayerStat::Batting).collect(),
            StatFamily::Pitching => PitchingStat::ALL.into_iter().map(PlayerStat::Pitching).collect(),
            StatFamily::Fielding => FieldingStat::ALL.into_iter().map(PlayerStat::Fielding).collect(),
        }
    }
}

impl fmt::Display for PlayerStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for PlayerStat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// Team statistic codes
// ---------------------------------------------------------------------------

/// How a team statistic is combined across the teams of one league-season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    Sum,
    Mean,
}

/// Numeric Teams.csv columns recognized by the pivot and team queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TeamStat {
    Runs,
    Doubles,
    Triples,
    HomeRuns,
    Hits,
    StolenBases,
    AtBats,
    CaughtStealing,
    Walks,
    StrikeOuts,
    HitByPitch,
    SacrificeFlies,
    Wins,
    Losses,
    CompleteGames,
    Shutouts,
    Saves,
    EarnedRuns,
    HomeRunsAllowed,
    StrikeOutsAllowed,
    WalksAllowed,
    RunsAllowed,
    EarnedRunAverage,
    HitsAllowed,
    Errors,
    DoublePlays,
    Attendance,
}

impl TeamStat {
    pub const ALL: [TeamStat; 27] = [
        TeamStat::Runs,
        TeamStat::Doubles,
        TeamStat::Triples,
        TeamStat::HomeRuns,
        TeamStat::Hits,
        TeamStat::StolenBases,
        TeamStat::AtBats,
        TeamStat::CaughtStealing,
        TeamStat::Walks,
        TeamStat::StrikeOuts,
        TeamStat::HitByPitch,
        TeamStat::SacrificeFlies,
        TeamStat::Wins,
        TeamStat::Losses,
        TeamStat::CompleteGames,
        TeamStat::Shutouts,
        TeamStat::Saves,
        TeamStat::EarnedRuns,
        TeamStat::HomeRunsAllowed,
        TeamStat::StrikeOutsAllowed,
        TeamStat::WalksAllowed,
        TeamStat::RunsAllowed,
        TeamStat::EarnedRunAverage,
        TeamStat::HitsAllowed,
        TeamStat::Errors,
        TeamStat::DoublePlays,
        TeamStat::Attendance,
    ];

    /// Column code in Teams.csv.
    pub fn code(&self) -> &'static str {
        match self {
            TeamStat::Runs => "R",
            TeamStat::Doubles => "2B",
            TeamStat::Triples => "3B",
            TeamStat::HomeRuns => "HR",
            TeamStat::Hits => "H",
            TeamStat::StolenBases => "SB",
            TeamStat::AtBats => "AB",
            TeamStat::CaughtStealing => "CS",
            TeamStat::Walks => "BB",
            TeamStat::StrikeOuts => "SO",
            TeamStat::HitByPitch => "HBP",
            TeamStat::SacrificeFlies => "SF",
            TeamStat::Wins => "W",
            TeamStat::Losses => "L",
            TeamStat::CompleteGames => "CG",
            TeamStat::Shutouts => "SHO",
            TeamStat::Saves => "SV",
            TeamStat::EarnedRuns => "ER",
            TeamStat::HomeRunsAllowed => "HRA",
            TeamStat::StrikeOutsAllowed => "SOA",
            TeamStat::WalksAllowed => "BBA",
            TeamStat::RunsAllowed => "RA",
            TeamStat::EarnedRunAverage => "ERA",
            TeamStat::HitsAllowed => "HA",
            TeamStat::Errors => "E",
            TeamStat::DoublePlays => "DP",
            TeamStat::Attendance => "attendance",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TeamStat::Runs => "Runs",
            TeamStat::Doubles => "Doubles",
            TeamStat::Triples => "Triples",
            TeamStat::HomeRuns => "Homeruns",
            TeamStat::Hits => "Hits",
            TeamStat::StolenBases => "Stolen Bases",
            TeamStat::AtBats => "At Bats",
            TeamStat::CaughtStealing => "Caught Stealing",
            TeamStat::Walks => "Walks",
            TeamStat::StrikeOuts => "Strike Outs",
            TeamStat::HitByPitch => "Hit By Pitch",
            TeamStat::SacrificeFlies => "Sacrifice Flies",
            TeamStat::Wins => "Team Wins",
            TeamStat::Losses => "Team Losses",
            TeamStat::CompleteGames => "Complete Games",
            TeamStat::Shutouts => "Shutouts",
            TeamStat::Saves => "Saves",
            TeamStat::EarnedRuns => "Earned Runs",
            TeamStat::HomeRunsAllowed => "Home Runs Allowed",
            TeamStat::StrikeOutsAllowed => "Strike Outs",
            TeamStat::WalksAllowed => "Walks",
            TeamStat::RunsAllowed => "Runs Allowed",
            TeamStat::EarnedRunAverage => "Earned Run Average",
            TeamStat::HitsAllowed => "Hits Allowed",
            TeamStat::Errors => "Errors",
            TeamStat::DoublePlays => "Double Play",
            TeamStat::Attendance => "Attendance (in Hundreds of Thousands)",
        }
    }

    /// ERA is a rate, so league-seasons average it; everything else adds up.
    pub fn aggregation(&self) -> Aggregation {
        match self {
            TeamStat::EarnedRunAverage => Aggregation::Mean,
            _ => Aggregation::Sum,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Validate `code` against the statistic list of `group`.
    pub fn parse(group: TeamStatGroup, code: &str) -> Result<Self, QueryError> {
        Self::from_code(code)
            .filter(|stat| group.stats().contains(stat))
            .ok_or_else(|| QueryError::UnknownStatistic {
                scope: group.name(),
                code: code.to_string(),
            })
    }
}

impl fmt::Display for TeamStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for TeamStat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Menu groupings of team statistics. `Overview` is the second statistic a
/// team chart is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeamStatGroup {
    Batting,
    Pitching,
    Fielding,
    Overview,
}

const TEAM_BATTING: &[TeamStat] = &[
    TeamStat::Runs,
    TeamStat::Doubles,
    TeamStat::Triples,
    TeamStat::HomeRuns,
    TeamStat::Hits,
    TeamStat::StolenBases,
    TeamStat::AtBats,
    TeamStat::CaughtStealing,
    TeamStat::Walks,
    TeamStat::StrikeOuts,
    TeamStat::HitByPitch,
    TeamStat::SacrificeFlies,
    TeamStat::Wins,
];

const TEAM_PITCHING: &[TeamStat] = &[
    TeamStat::CompleteGames,
    TeamStat::Shutouts,
    TeamStat::Saves,
    TeamStat::EarnedRuns,
    TeamStat::HomeRunsAllowed,
    TeamStat::StrikeOutsAllowed,
    TeamStat::WalksAllowed,
    TeamStat::RunsAllowed,
    TeamStat::EarnedRunAverage,
    TeamStat::HitsAllowed,
    TeamStat::Wins,
];

const TEAM_FIELDING: &[TeamStat] = &[TeamStat::Errors, TeamStat::DoublePlays, TeamStat::Wins];

const TEAM_OVERVIEW: &[TeamStat] = &[TeamStat::Wins, TeamStat::Attendance];

impl TeamStatGroup {
    pub fn from_str_group(s: &str) -> Result<Self, QueryError> {
        match s.trim().to_lowercase().as_str() {
            "batting" | "bat" => Ok(TeamStatGroup::Batting),
            "pitching" | "pitch" => Ok(TeamStatGroup::Pitching),
            "fielding" | "field" => Ok(TeamStatGroup::Fielding),
            "overview" | "team" => Ok(TeamStatGroup::Overview),
            _ => Err(QueryError::UnknownGroup(s.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TeamStatGroup::Batting => "team batting",
            TeamStatGroup::Pitching => "team pitching",
            TeamStatGroup::Fielding => "team fielding",
            TeamStatGroup::Overview => "team overview",
        }
    }

    pub fn stats(&self) -> &'static [TeamStat] {
        match self {
            TeamStatGroup::Batting => TEAM_BATTING,
            TeamStatGroup::Pitching => TEAM_PITCHING,
            TeamStatGroup::Fielding => TEAM_FIELDING,
            TeamStatGroup::Overview => TEAM_OVERVIEW,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
