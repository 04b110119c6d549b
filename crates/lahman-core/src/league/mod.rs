// League-level aggregation: (year, league) pivot and range/selection queries.

pub mod pivot;
pub mod query;

use crate::stats::QueryError;
use serde::{Serialize, Serializer};
use std::fmt;

/// The two leagues the pivot covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum League {
    American,
    National,
}

impl League {
    pub const ALL: [League; 2] = [League::American, League::National];

    /// Parse an `lgID` value. Historical leagues (NA, AA, UA, PL, FL) and
    /// blanks yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "AL" => Some(League::American),
            "NL" => Some(League::National),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            League::American => "AL",
            League::National => "NL",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            League::American => "American League",
            League::National => "National League",
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for League {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Which league(s) a league chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeagueSelector {
    Only(League),
    Both,
}

impl LeagueSelector {
    /// Parse "AL", "NL" or "Both" (case-insensitive).
    pub fn from_str_selector(s: &str) -> Result<Self, QueryError> {
        if s.trim().eq_ignore_ascii_case("both") {
            return Ok(LeagueSelector::Both);
        }
        League::from_code(s)
            .map(LeagueSelector::Only)
            .ok_or_else(|| QueryError::UnknownLeague(s.to_string()))
    }

    /// Leagues covered, in display order.
    pub fn leagues(&self) -> Vec<League> {
        match self {
            LeagueSelector::Only(league) => vec![*league],
            LeagueSelector::Both => League::ALL.to_vec(),
        }
    }
}
