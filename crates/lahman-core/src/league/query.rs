// Range/selection queries over the league pivot and the team-season table.

use crate::data::records::{FranchiseRecord, TeamSeasonRecord};
use crate::league::pivot::PivotTable;
use crate::league::{League, LeagueSelector};
use crate::stats::{QueryError, TeamStat};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

// ---------------------------------------------------------------------------
// Year range
// ---------------------------------------------------------------------------

/// Inclusive `[start, end]` year range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self, QueryError> {
        if start > end {
            return Err(QueryError::InvalidYearRange { start, end });
        }
        Ok(YearRange { start, end })
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

// ---------------------------------------------------------------------------
// League series
// ---------------------------------------------------------------------------

/// One league's values, ascending by year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueLine {
    pub league: League,
    pub points: Vec<(i32, f64)>,
}

/// Result of a league query: one line per selected league, AL first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueSeries {
    pub stat: TeamStat,
    pub range: YearRange,
    pub lines: Vec<LeagueLine>,
}

impl LeagueSeries {
    pub fn line(&self, league: League) -> Option<&LeagueLine> {
        self.lines.iter().find(|l| l.league == league)
    }
}

/// Slice the pivot for `stat` over `range`.
///
/// `Both` yields two lines, a single league yields one. Years without a pivot
/// row, or whose row lacks the statistic, are absent rather than zero.
pub fn query_series(pivot: &PivotTable, stat: TeamStat, selector: LeagueSelector, range: YearRange) -> LeagueSeries {
    let lines: Vec<LeagueLine> = selector
        .leagues()
        .into_iter()
        .map(|league| LeagueLine {
            league,
            points: pivot.column(league, stat, move |year| range.contains(year)).collect(),
        })
        .collect();

    debug!(
        "league query {} {}..={}: {}",
        stat,
        range.start,
        range.end,
        lines
            .iter()
            .map(|l| format!("{}={}", l.league, l.points.len()))
            .collect::<Vec<_>>()
            .join(", ")
    );

    LeagueSeries { stat, range, lines }
}

// ---------------------------------------------------------------------------
// Team series
// ---------------------------------------------------------------------------

/// Championship count and active-franchise flag of one team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TeamMark {
    pub active: bool,
    pub championships: usize,
}

/// Two statistics of one team, one entry per team-season in range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSeries {
    pub team_id: String,
    pub primary: TeamStat,
    pub secondary: TeamStat,
    pub primary_points: Vec<(i32, Option<f64>)>,
    pub secondary_points: Vec<(i32, Option<f64>)>,
    pub mark: TeamMark,
}

/// Per-year values of `primary` and `secondary` for `team_id`, ascending.
///
/// Seasons are not gap-filled. `range` of `None` covers the team's whole
/// history. An unknown team gives empty sequences.
pub fn query_team_series(
    teams: &[TeamSeasonRecord],
    franchises: &[FranchiseRecord],
    team_id: &str,
    primary: TeamStat,
    secondary: TeamStat,
    range: Option<YearRange>,
) -> TeamSeries {
    let mut seasons: Vec<&TeamSeasonRecord> = teams
        .iter()
        .filter(|t| t.team_id == team_id)
        .filter(|t| range.map_or(true, |r| r.contains(t.year)))
        .collect();
    seasons.sort_by_key(|t| t.year);

    let points = |stat: TeamStat| -> Vec<(i32, Option<f64>)> {
        seasons.iter().map(|t| (t.year, t.stat(stat.code()))).collect()
    };

    TeamSeries {
        team_id: team_id.to_string(),
        primary,
        secondary,
        primary_points: points(primary),
        secondary_points: points(secondary),
        mark: query_league_active_mark(teams, franchises, team_id),
    }
}

/// World-series wins over the team's whole history, and whether the team's
/// franchise is still active.
pub fn query_league_active_mark(teams: &[TeamSeasonRecord], franchises: &[FranchiseRecord], team_id: &str) -> TeamMark {
    let active_franchises: HashSet<&str> = franchises
        .iter()
        .filter(|f| f.active)
        .map(|f| f.franchise_id.as_str())
        .collect();

    teams
        .iter()
        .filter(|t| t.team_id == team_id)
        .fold(TeamMark::default(), |mut mark, t| {
            if t.world_series_win {
                mark.championships += 1;
            }
            if t.franchise_id.as_deref().is_some_and(|f| active_franchises.contains(f)) {
                mark.active = true;
            }
            mark
        })
}
