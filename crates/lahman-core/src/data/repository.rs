// The immutable data repository: merged, deduplicated Lahman tables built
// once at startup and shared by reference with every query.

use crate::data::records::{
    AllStarRecord, AwardCategory, AwardRecord, FranchiseRecord, HallOfFameRecord, Person, RawAwardRow,
    RawSeasonRow, RawTables, SeasonRecord, TeamSeasonRecord,
};
use crate::series::metrics::apply_batting_average;
use crate::stats::{StatFamily, TeamStat};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use tracing::{debug, info, warn};

/// Raw attendance is divided by this to express it in hundreds of thousands.
pub const ATTENDANCE_SCALE: f64 = 100_000.0;

// ---------------------------------------------------------------------------
// Row transforms
// ---------------------------------------------------------------------------

/// Left-join season rows to People by player id.
///
/// Every season row with a year survives; its `person` is `None` when People
/// has no match. Rows without a year are skipped.
pub fn merge_with_biography(rows: Vec<RawSeasonRow>, people: &HashMap<String, Person>) -> Vec<SeasonRecord> {
    let mut skipped = 0usize;
    let merged: Vec<SeasonRecord> = rows
        .into_iter()
        .filter_map(|row| {
            let Some(year) = row.year else {
                skipped += 1;
                return None;
            };
            let person = people.get(&row.player_id).cloned();
            Some(SeasonRecord {
                player_id: row.player_id,
                year,
                stint: row.stint,
                team_id: row.team_id,
                league: row.league,
                stats: row.stats,
                person,
            })
        })
        .collect();
    if skipped > 0 {
        warn!("skipped {} season rows without a year", skipped);
    }
    merged
}

/// Keep the first row for each key, in input order; later rows sharing a
/// key are dropped whole.
///
/// Keyed on (player id, year) this keeps only a player's first stint of a
/// split season. The later stints are not summed in.
pub fn deduplicate<T, K, F>(rows: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    rows.into_iter().filter(|row| seen.insert(key(row))).collect()
}

/// Keep only MVP, Silver Slugger, Cy Young and Gold Glove awards.
pub fn filter_awards(rows: Vec<RawAwardRow>) -> Vec<AwardRecord> {
    rows.into_iter()
        .filter_map(|row| {
            let category = AwardCategory::from_award_id(&row.award_id)?;
            Some(AwardRecord {
                player_id: row.player_id,
                year: row.year,
                category,
            })
        })
        .collect()
}

/// Express attendance in hundreds of thousands.
pub fn scale_attendance(rows: Vec<TeamSeasonRecord>) -> Vec<TeamSeasonRecord> {
    let code = TeamStat::Attendance.code();
    rows.into_iter()
        .map(|mut row| {
            if let Some(raw) = row.stats.get_mut(code) {
                *raw /= ATTENDANCE_SCALE;
            }
            row
        })
        .collect()
}

fn season_key(row: &SeasonRecord) -> (String, i32) {
    (row.player_id.clone(), row.year)
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// Read-only snapshot of every table the queries need.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    people: HashMap<String, Person>,
    batting: Vec<SeasonRecord>,
    pitching: Vec<SeasonRecord>,
    fielding: Vec<SeasonRecord>,
    teams: Vec<TeamSeasonRecord>,
    franchises: Vec<FranchiseRecord>,
    awards: Vec<AwardRecord>,
    all_stars: Vec<AllStarRecord>,
    hall_of_fame: Vec<HallOfFameRecord>,
}

impl Repository {
    /// Run every load-time transform once and freeze the result.
    pub fn build(raw: RawTables) -> Self {
        let mut people = HashMap::with_capacity(raw.people.len());
        for person in raw.people {
            if people.contains_key(&person.player_id) {
                warn!("duplicate person '{}', keeping first", person.player_id);
                continue;
            }
            people.insert(person.player_id.clone(), person);
        }

        let mut batting = Self::season_table(StatFamily::Batting, raw.batting, &people);
        for row in &mut batting {
            apply_batting_average(&mut row.stats);
        }
        let pitching = Self::season_table(StatFamily::Pitching, raw.pitching, &people);
        let fielding = Self::season_table(StatFamily::Fielding, raw.fielding, &people);

        let award_rows = raw.awards.len();
        let awards = filter_awards(raw.awards);
        debug!("kept {} of {} award rows", awards.len(), award_rows);

        let teams = scale_attendance(raw.teams);

        info!(
            "Repository built: {} people, {} batting, {} pitching, {} fielding, {} teams, {} awards",
            people.len(),
            batting.len(),
            pitching.len(),
            fielding.len(),
            teams.len(),
            awards.len()
        );

        Repository {
            people,
            batting,
            pitching,
            fielding,
            teams,
            franchises: raw.franchises,
            awards,
            all_stars: raw.all_stars,
            hall_of_fame: raw.hall_of_fame,
        }
    }

    fn season_table(
        family: StatFamily,
        rows: Vec<RawSeasonRow>,
        people: &HashMap<String, Person>,
    ) -> Vec<SeasonRecord> {
        let merged = merge_with_biography(rows, people);
        let before = merged.len();
        let deduped = deduplicate(merged, season_key);
        if deduped.len() < before {
            debug!(
                "{}: dropped {} later-stint rows sharing (player, year)",
                family,
                before - deduped.len()
            );
        }
        deduped
    }

    /// Season table of one family.
    pub fn seasons(&self, family: StatFamily) -> &[SeasonRecord] {
        match family {
            StatFamily::Batting => &self.batting,
            StatFamily::Pitching => &self.pitching,
            StatFamily::Fielding => &self.fielding,
        }
    }

    /// One player's seasons in one family, in table order.
    pub fn player_seasons<'a>(
        &'a self,
        family: StatFamily,
        player_id: &'a str,
    ) -> impl Iterator<Item = &'a SeasonRecord> + 'a {
        self.seasons(family).iter().filter(move |s| s.player_id == player_id)
    }

    pub fn person(&self, player_id: &str) -> Option<&Person> {
        self.people.get(player_id)
    }

    pub fn awards(&self) -> &[AwardRecord] {
        &self.awards
    }

    pub fn teams(&self) -> &[TeamSeasonRecord] {
        &self.teams
    }

    pub fn franchises(&self) -> &[FranchiseRecord] {
        &self.franchises
    }

    pub fn all_stars(&self) -> &[AllStarRecord] {
        &self.all_stars
    }

    pub fn hall_of_fame(&self) -> &[HallOfFameRecord] {
        &self.hall_of_fame
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::records::StatLine;

    fn person(id: &str, first: &str, last: &str) -> Person {
        Person {
            player_id: id.into(),
            name_first: Some(first.into()),
            name_last: Some(last.into()),
            weight: None,
            height: None,
            bats: None,
            throws: None,
            debut: None,
            final_game: None,
        }
    }

    fn raw_row(id: &str, year: Option<i32>, stint: u32, stats: &[(&str, f64)]) -> RawSeasonRow {
        RawSeasonRow {
            player_id: id.into(),
            year,
            stint: Some(stint),
            team_id: Some("MIN".into()),
            league: Some("AL".into()),
            stats: stats.iter().map(|(k, v)| (k.to_string(), *v)).collect::<StatLine>(),
        }
    }

    fn raw_award(id: &str, award: &str, year: i32) -> RawAwardRow {
        RawAwardRow {
            player_id: id.into(),
            award_id: award.into(),
            year,
            league: Some("AL".into()),
        }
    }

    #[test]
    fn merge_is_a_left_join_on_season_rows() {
        let mut people = HashMap::new();
        people.insert("p1".to_string(), person("p1", "Joe", "Mauer"));

        let rows = vec![
            raw_row("p1", Some(2009), 1, &[("HR", 28.0)]),
            raw_row("unknown", Some(2009), 1, &[("HR", 1.0)]),
        ];
        let merged = merge_with_biography(rows, &people);

        assert_eq!(merged.len(), 2);
        assert_eq!(
            merged[0].person.as_ref().and_then(|p| p.name_last.as_deref()),
            Some("Mauer")
        );
        assert!(merged[1].person.is_none());
    }

    #[test]
    fn merge_skips_rows_without_year() {
        let rows = vec![raw_row("p1", None, 1, &[]), raw_row("p1", Some(2001), 1, &[])];
        let merged = merge_with_biography(rows, &HashMap::new());
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].year, 2001);
    }

    #[test]
    fn deduplicate_keeps_first_stint() {
        let rows = vec![
            raw_row("p1", Some(2001), 1, &[("HR", 4.0)]),
            raw_row("p1", Some(2001), 2, &[("HR", 7.0)]),
            raw_row("p1", Some(2002), 1, &[("HR", 9.0)]),
        ];
        let merged = merge_with_biography(rows, &HashMap::new());
        let deduped = deduplicate(merged, season_key);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].stint, Some(1));
        // The second stint's home runs are discarded, not added.
        assert_eq!(deduped[0].stat("HR"), Some(4.0));
        assert_eq!(deduped[1].year, 2002);
    }

    #[test]
    fn deduplicate_preserves_order() {
        let rows = vec![3, 1, 3, 2, 1];
        assert_eq!(deduplicate(rows, |n| *n), vec![3, 1, 2]);
    }

    #[test]
    fn filter_awards_keeps_four_categories() {
        let rows = vec![
            raw_award("p1", "Most Valuable Player", 2009),
            raw_award("p1", "Silver Slugger", 2009),
            raw_award("p1", "Gold Glove", 2008),
            raw_award("p2", "Cy Young Award", 1986),
            raw_award("p1", "Rookie of the Year", 2004),
            raw_award("p1", "TSN All-Star", 2009),
        ];
        let awards = filter_awards(rows);
        assert_eq!(awards.len(), 4);
        assert!(awards.iter().all(|a| a.player_id != "p1" || a.year != 2004));
    }

    #[test]
    fn attendance_scaled_to_hundreds_of_thousands() {
        let mut stats = StatLine::new();
        stats.insert("attendance".into(), 2_482_428.0);
        stats.insert("W".into(), 90.0);
        let rows = vec![TeamSeasonRecord {
            team_id: "MIN".into(),
            year: 1992,
            league: Some("AL".into()),
            franchise_id: Some("MIN".into()),
            name: None,
            world_series_win: false,
            stats,
        }];
        let scaled = scale_attendance(rows);
        assert!((scaled[0].stat("attendance").unwrap() - 24.82428).abs() < 1e-9);
        assert_eq!(scaled[0].stat("W"), Some(90.0));
    }

    #[test]
    fn build_derives_batting_average_and_filters() {
        let raw = RawTables {
            people: vec![person("p1", "Joe", "Mauer")],
            batting: vec![
                raw_row("p1", Some(2009), 1, &[("H", 191.0), ("AB", 523.0)]),
                raw_row("p1", Some(2010), 1, &[("H", 0.0), ("AB", 0.0)]),
                raw_row("p1", Some(2010), 2, &[("H", 100.0), ("AB", 300.0)]),
            ],
            awards: vec![
                raw_award("p1", "Most Valuable Player", 2009),
                raw_award("p1", "Comeback Player of the Year", 2010),
            ],
            ..RawTables::default()
        };
        let repo = Repository::build(raw);

        let seasons: Vec<&SeasonRecord> = repo.player_seasons(StatFamily::Batting, "p1").collect();
        assert_eq!(seasons.len(), 2);
        assert!((seasons[0].stat("BA").unwrap() - 365.2).abs() < 1e-9);
        // First stint of 2010 kept; it had no at-bats, so BA is missing.
        assert_eq!(seasons[1].stat("BA"), None);
        assert_eq!(repo.awards().len(), 1);
        assert!(repo.person("p1").is_some());
        assert!(repo.seasons(StatFamily::Pitching).is_empty());
    }

    #[test]
    fn build_keeps_first_duplicate_person() {
        let raw = RawTables {
            people: vec![person("p1", "Joe", "Mauer"), person("p1", "Other", "Name")],
            ..RawTables::default()
        };
        let repo = Repository::build(raw);
        assert_eq!(repo.person("p1").and_then(|p| p.name_first.as_deref()), Some("Joe"));
    }
}
