// Chart title annotations and selection option lists.

use crate::data::records::{SeasonRecord, TeamSeasonRecord};
use crate::data::repository::Repository;
use crate::league::query::{query_league_active_mark, TeamMark};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Player annotation
// ---------------------------------------------------------------------------

/// Name, all-star appearances and Hall of Fame status of one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerAnnotation {
    pub player_id: String,
    pub name: String,
    pub all_star_appearances: usize,
    pub hall_of_fame: bool,
}

impl PlayerAnnotation {
    pub fn for_player(repo: &Repository, player_id: &str) -> Self {
        let name = repo
            .person(player_id)
            .map(|p| p.full_name())
            .unwrap_or_else(|| player_id.to_string());
        let all_star_appearances = repo.all_stars().iter().filter(|a| a.player_id == player_id).count();
        let hall_of_fame = repo
            .hall_of_fame()
            .iter()
            .any(|h| h.inducted && h.player_id == player_id);
        PlayerAnnotation {
            player_id: player_id.to_string(),
            name,
            all_star_appearances,
            hall_of_fame,
        }
    }
}

/// "Joe Mauer (6)", with `*` after the name for inductees.
impl fmt::Display for PlayerAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.hall_of_fame { "*" } else { "" };
        write!(f, "{}{} ({})", self.name, mark, self.all_star_appearances)
    }
}

// ---------------------------------------------------------------------------
// Team annotation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamAnnotation {
    pub team_id: String,
    #[serde(flatten)]
    pub mark: TeamMark,
}

impl TeamAnnotation {
    pub fn for_team(repo: &Repository, team_id: &str) -> Self {
        TeamAnnotation {
            team_id: team_id.to_string(),
            mark: query_league_active_mark(repo.teams(), repo.franchises(), team_id),
        }
    }
}

/// "MIN* (3)": `*` marks an active franchise, the count is world-series wins.
impl fmt::Display for TeamAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.mark.active { "*" } else { "" };
        write!(f, "{}{} ({})", self.team_id, mark, self.mark.championships)
    }
}

// ---------------------------------------------------------------------------
// Selection lists
// ---------------------------------------------------------------------------

/// One entry of a selection list: display label and the id it selects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SelectionOption {
    pub label: String,
    pub value: String,
}

/// One "Last,First(TEAM)" option per season row with a team and both names.
/// Repeated options are dropped; first-seen order is kept.
pub fn player_options(seasons: &[SeasonRecord]) -> Vec<SelectionOption> {
    let mut seen = HashSet::new();
    seasons
        .iter()
        .filter_map(|s| {
            let team = s.team_id.as_deref()?;
            let person = s.person.as_ref()?;
            let first = person.name_first.as_deref()?;
            let last = person.name_last.as_deref()?;
            Some(SelectionOption {
                label: format!("{last},{first}({team})"),
                value: s.player_id.clone(),
            })
        })
        .filter(|opt| seen.insert(opt.clone()))
        .collect()
}

/// One option per distinct (team id, team name) pair, in table order.
pub fn team_options(teams: &[TeamSeasonRecord]) -> Vec<SelectionOption> {
    let mut seen = HashSet::new();
    teams
        .iter()
        .filter_map(|t| {
            let name = t.name.as_deref()?;
            Some(SelectionOption {
                label: name.to_string(),
                value: t.team_id.clone(),
            })
        })
        .filter(|opt| seen.insert(opt.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::records::{AllStarRecord, FranchiseRecord, HallOfFameRecord, Person, RawTables, StatLine};

    fn person(id: &str, first: Option<&str>, last: &str) -> Person {
        Person {
            player_id: id.into(),
            name_first: first.map(String::from),
            name_last: Some(last.into()),
            weight: None,
            height: None,
            bats: None,
            throws: None,
            debut: None,
            final_game: None,
        }
    }

    fn season(id: &str, year: i32, team: Option<&str>, person: Option<Person>) -> SeasonRecord {
        SeasonRecord {
            player_id: id.into(),
            year,
            stint: Some(1),
            team_id: team.map(String::from),
            league: Some("AL".into()),
            stats: StatLine::new(),
            person,
        }
    }

    fn team(id: &str, year: i32, name: Option<&str>, ws: bool) -> TeamSeasonRecord {
        TeamSeasonRecord {
            team_id: id.into(),
            year,
            league: Some("AL".into()),
            franchise_id: Some(id.into()),
            name: name.map(String::from),
            world_series_win: ws,
            stats: StatLine::new(),
        }
    }

    #[test]
    fn player_title_marks_inductee() {
        let raw = RawTables {
            people: vec![person("puckeki01", Some("Kirby"), "Puckett")],
            all_stars: (1986..=1995)
                .map(|year| AllStarRecord {
                    player_id: "puckeki01".into(),
                    year,
                    team_id: Some("MIN".into()),
                })
                .collect(),
            hall_of_fame: vec![
                HallOfFameRecord {
                    player_id: "puckeki01".into(),
                    year: 2001,
                    inducted: true,
                },
                HallOfFameRecord {
                    player_id: "someone01".into(),
                    year: 2001,
                    inducted: false,
                },
            ],
            ..RawTables::default()
        };
        let repo = Repository::build(raw);
        let annotation = PlayerAnnotation::for_player(&repo, "puckeki01");
        assert_eq!(annotation.all_star_appearances, 10);
        assert!(annotation.hall_of_fame);
        assert_eq!(annotation.to_string(), "Kirby Puckett* (10)");

        let unknown = PlayerAnnotation::for_player(&repo, "nobody01");
        assert_eq!(unknown.to_string(), "nobody01 (0)");
    }

    #[test]
    fn team_title_marks_active_franchise() {
        let raw = RawTables {
            teams: vec![
                team("MIN", 1987, Some("Minnesota Twins"), true),
                team("MIN", 1991, Some("Minnesota Twins"), true),
                team("MIN", 1992, Some("Minnesota Twins"), false),
            ],
            franchises: vec![FranchiseRecord {
                franchise_id: "MIN".into(),
                name: Some("Minnesota Twins".into()),
                active: true,
            }],
            ..RawTables::default()
        };
        let repo = Repository::build(raw);
        assert_eq!(TeamAnnotation::for_team(&repo, "MIN").to_string(), "MIN* (2)");
        assert_eq!(TeamAnnotation::for_team(&repo, "WS1").to_string(), "WS1 (0)");
    }

    #[test]
    fn player_options_need_team_and_names() {
        let mauer = person("mauerjo01", Some("Joe"), "Mauer");
        let seasons = vec![
            season("mauerjo01", 2004, Some("MIN"), Some(mauer.clone())),
            season("mauerjo01", 2005, Some("MIN"), Some(mauer.clone())),
            season("mauerjo01", 2006, None, Some(mauer)),
            season("ichiro01", 2001, Some("SEA"), Some(person("ichiro01", None, "Suzuki"))),
            season("ghost01", 2001, Some("SEA"), None),
        ];
        let options = player_options(&seasons);
        assert_eq!(
            options,
            vec![SelectionOption {
                label: "Mauer,Joe(MIN)".into(),
                value: "mauerjo01".into(),
            }]
        );
    }

    #[test]
    fn player_options_keep_first_seen_order() {
        let a = person("a01", Some("Al"), "Able");
        let b = person("b01", Some("Bo"), "Baker");
        let seasons = vec![
            season("b01", 2000, Some("NYA"), Some(b.clone())),
            season("a01", 2000, Some("MIN"), Some(a)),
            season("b01", 2001, Some("BOS"), Some(b.clone())),
            season("b01", 2002, Some("NYA"), Some(b)),
        ];
        let labels: Vec<String> = player_options(&seasons).into_iter().map(|o| o.label).collect();
        assert_eq!(labels, vec!["Baker,Bo(NYA)", "Able,Al(MIN)", "Baker,Bo(BOS)"]);
    }

    #[test]
    fn team_options_distinct_pairs() {
        let teams = vec![
            team("WS1", 1901, Some("Washington Senators"), false),
            team("WS1", 1902, Some("Washington Senators"), false),
            team("MIN", 1961, Some("Minnesota Twins"), false),
            team("XXX", 1961, None, false),
        ];
        let options = team_options(&teams);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].value, "WS1");
        assert_eq!(options[1].label, "Minnesota Twins");
    }
}
