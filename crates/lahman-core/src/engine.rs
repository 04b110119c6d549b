// Query engine: the surface a renderer talks to.
//
// Holds the repository by reference and the pivot table built once at
// construction. Statistic codes and selectors arrive as strings and are
// validated here before any lookup.

use crate::annotate::{self, PlayerAnnotation, SelectionOption, TeamAnnotation};
use crate::data::repository::Repository;
use crate::league::pivot::{build_pivot, PivotTable, STANDARDIZED_SINCE};
use crate::league::query::{query_series, query_team_series, LeagueSeries, TeamSeries, YearRange};
use crate::league::LeagueSelector;
use crate::series::season::{build_series, SeasonSeries};
use crate::stats::{PlayerStat, QueryError, StatFamily, TeamStat, TeamStatGroup};
use tracing::debug;

pub struct Engine<'a> {
    repo: &'a Repository,
    pivot: PivotTable,
}

impl<'a> Engine<'a> {
    pub fn new(repo: &'a Repository) -> Self {
        let pivot = build_pivot(repo.teams());
        Engine { repo, pivot }
    }

    pub fn repository(&self) -> &'a Repository {
        self.repo
    }

    pub fn pivot(&self) -> &PivotTable {
        &self.pivot
    }

    /// Gap-filled, award-tagged series of `code` for one player.
    pub fn player_series(&self, family: StatFamily, player_id: &str, code: &str) -> Result<SeasonSeries, QueryError> {
        let stat = PlayerStat::parse(family, code)?;
        Ok(build_series(player_id, stat, self.repo.seasons(family), self.repo.awards()))
    }

    /// Two statistics of one team: `code` from `group` against the overview
    /// statistic `versus` (wins or attendance).
    pub fn team_series(
        &self,
        group: TeamStatGroup,
        team_id: &str,
        code: &str,
        versus: &str,
        range: Option<(i32, i32)>,
    ) -> Result<TeamSeries, QueryError> {
        let primary = TeamStat::parse(group, code)?;
        let secondary = TeamStat::parse(TeamStatGroup::Overview, versus)?;
        let range = range.map(|(start, end)| YearRange::new(start, end)).transpose()?;
        Ok(query_team_series(
            self.repo.teams(),
            self.repo.franchises(),
            team_id,
            primary,
            secondary,
            range,
        ))
    }

    /// League totals of `code` for the selected league(s). Without a range
    /// the pivot's whole year span is used.
    pub fn league_series(
        &self,
        group: TeamStatGroup,
        code: &str,
        league: &str,
        range: Option<(i32, i32)>,
    ) -> Result<LeagueSeries, QueryError> {
        let stat = TeamStat::parse(group, code)?;
        let selector = LeagueSelector::from_str_selector(league)?;
        let (start, end) = range
            .or_else(|| self.pivot.year_bounds())
            .unwrap_or((STANDARDIZED_SINCE, STANDARDIZED_SINCE));
        let range = YearRange::new(start, end)?;
        debug!("league series {} {:?} {}..={}", stat, selector, start, end);
        Ok(query_series(&self.pivot, stat, selector, range))
    }

    pub fn player_annotation(&self, player_id: &str) -> PlayerAnnotation {
        PlayerAnnotation::for_player(self.repo, player_id)
    }

    pub fn team_annotation(&self, team_id: &str) -> TeamAnnotation {
        TeamAnnotation::for_team(self.repo, team_id)
    }

    pub fn player_options(&self, family: StatFamily) -> Vec<SelectionOption> {
        annotate::player_options(self.repo.seasons(family))
    }

    pub fn team_options(&self) -> Vec<SelectionOption> {
        annotate::team_options(self.repo.teams())
    }
}
