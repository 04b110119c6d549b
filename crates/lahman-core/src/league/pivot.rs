// (year, league) pivot of team-season rows.
//
// Every team statistic is summed across the league's teams except ERA, which
// is averaged. Only AL/NL rows from the standardized era are kept.

use crate::data::records::TeamSeasonRecord;
use crate::league::League;
use crate::stats::{Aggregation, TeamStat};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// First season of the two-league era; earlier rows are left out.
pub const STANDARDIZED_SINCE: i32 = 1901;

/// Aggregated team statistics per (year, league). Keys are unique and
/// iterate in (year, league) order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PivotTable {
    cells: BTreeMap<(i32, League), BTreeMap<TeamStat, f64>>,
}

impl PivotTable {
    /// Aggregated value, or `None` when the (year, league) row is absent or
    /// none of its teams reported the statistic.
    pub fn get(&self, year: i32, league: League, stat: TeamStat) -> Option<f64> {
        self.cells.get(&(year, league))?.get(&stat).copied()
    }

    pub fn row(&self, year: i32, league: League) -> Option<&BTreeMap<TeamStat, f64>> {
        self.cells.get(&(year, league))
    }

    pub fn contains(&self, year: i32, league: League) -> bool {
        self.cells.contains_key(&(year, league))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Distinct years present, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.cells.keys().map(|(year, _)| *year).collect();
        years.dedup();
        years
    }

    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let first = self.cells.keys().next()?.0;
        let last = self.cells.keys().next_back()?.0;
        Some((first, last))
    }

    /// `(year, value)` for one league and statistic, ascending, over rows
    /// whose year satisfies `keep`. Rows without the statistic are skipped.
    pub(crate) fn column<'a>(
        &'a self,
        league: League,
        stat: TeamStat,
        keep: impl Fn(i32) -> bool + 'a,
    ) -> impl Iterator<Item = (i32, f64)> + 'a {
        self.cells
            .iter()
            .filter(move |((year, lg), _)| *lg == league && keep(*year))
            .filter_map(move |((year, _), row)| row.get(&stat).map(|v| (*year, *v)))
    }
}

#[derive(Default)]
struct Accumulator {
    total: f64,
    count: usize,
}

/// Group team-season rows by (year, league) and aggregate every team
/// statistic.
///
/// Rows outside AL/NL or before 1901 are excluded. Missing values are skipped
/// by both the sum and the mean; a cell with no reported values is absent.
pub fn build_pivot(teams: &[TeamSeasonRecord]) -> PivotTable {
    let mut groups: BTreeMap<(i32, League), BTreeMap<TeamStat, Accumulator>> = BTreeMap::new();
    let mut excluded = 0usize;

    for team in teams {
        let league = team.league.as_deref().and_then(League::from_code);
        let Some(league) = league.filter(|_| team.year >= STANDARDIZED_SINCE) else {
            excluded += 1;
            continue;
        };
        let group = groups.entry((team.year, league)).or_default();
        for stat in TeamStat::ALL {
            if let Some(value) = team.stat(stat.code()) {
                let acc = group.entry(stat).or_default();
                acc.total += value;
                acc.count += 1;
            }
        }
    }

    let cells: BTreeMap<(i32, League), BTreeMap<TeamStat, f64>> = groups
        .into_iter()
        .map(|(key, stats)| {
            let row = stats
                .into_iter()
                .map(|(stat, acc)| {
                    let value = match stat.aggregation() {
                        Aggregation::Sum => acc.total,
                        Aggregation::Mean => acc.total / acc.count as f64,
                    };
                    (stat, value)
                })
                .collect();
            (key, row)
        })
        .collect();

    debug!("pivot excluded {} team rows outside AL/NL since {}", excluded, STANDARDIZED_SINCE);
    info!("Pivot built: {} (year, league) rows", cells.len());

    PivotTable { cells }
}
