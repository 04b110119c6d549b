// CSV ingestion for the Lahman baseball databank tables.
//
// Fixed-schema tables (People, AwardsPlayers, AllstarFull, HallOfFame,
// TeamsFranchises) go through serde structs. The wide statistic tables
// (Batting, Pitching, Fielding, Teams) are read by header so that every
// numeric column lands in the row's stat line without listing them all.

use crate::config::DataPaths;
use crate::data::records::{
    AllStarRecord, FranchiseRecord, HallOfFameRecord, Person, RawAwardRow, RawSeasonRow, RawTables,
    StatLine, TeamSeasonRecord,
};
use chrono::NaiveDate;
use csv::StringRecord;
use serde::Deserialize;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw CSV serde structs (private)
// ---------------------------------------------------------------------------

/// People.csv row. Only the biography columns are read; the rest are ignored.
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawPerson {
    playerID: String,
    nameFirst: Option<String>,
    nameLast: Option<String>,
    weight: Option<f64>,
    height: Option<f64>,
    bats: Option<String>,
    throws: Option<String>,
    debut: Option<String>,
    finalGame: Option<String>,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawAward {
    playerID: String,
    awardID: String,
    yearID: i32,
    lgID: Option<String>,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawAllStar {
    playerID: String,
    yearID: i32,
    teamID: Option<String>,
}

/// HallOfFame.csv spells its year column `yearid`.
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawHallOfFame {
    playerID: String,
    #[serde(alias = "yearID")]
    yearid: i32,
    inducted: Option<String>,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawFranchise {
    franchID: String,
    franchName: Option<String>,
    active: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Key columns of the per-player season tables; never treated as statistics.
const SEASON_KEY_COLUMNS: &[&str] = &["playerID", "yearID", "stint", "teamID", "lgID", "POS"];

/// Identifier and flag columns of Teams.csv; never treated as statistics.
const TEAM_KEY_COLUMNS: &[&str] = &[
    "yearID",
    "lgID",
    "teamID",
    "franchID",
    "divID",
    "Rank",
    "DivWin",
    "WCWin",
    "LgWin",
    "WSWin",
    "name",
    "park",
    "teamIDBR",
    "teamIDlahman45",
    "teamIDretro",
];

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

fn require_column(headers: &StringRecord, name: &str) -> Result<usize, csv::Error> {
    find_column(headers, name).ok_or_else(|| {
        csv::Error::from(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("missing required column `{name}`"),
        ))
    })
}

/// Trimmed, non-empty cell text.
fn cell(record: &StringRecord, index: Option<usize>) -> Option<&str> {
    index
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Collect every non-key column whose cell parses as a finite number.
fn numeric_columns(headers: &StringRecord, record: &StringRecord, keys: &[&str]) -> StatLine {
    headers
        .iter()
        .zip(record.iter())
        .filter(|(name, _)| !keys.contains(&name.trim()))
        .filter_map(|(name, value)| {
            let parsed = value.trim().parse::<f64>().ok()?;
            parsed.is_finite().then(|| (name.trim().to_string(), parsed))
        })
        .collect()
}

fn parse_date(raw: Option<String>) -> Option<NaiveDate> {
    let text = raw?;
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            debug!("ignoring unparseable date '{}': {}", text, e);
            None
        }
    }
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn is_yes(raw: Option<&str>) -> bool {
    raw.is_some_and(|s| s.trim().eq_ignore_ascii_case("Y"))
}

// ---------------------------------------------------------------------------
// Reader-based loaders (testable without temp files)
// ---------------------------------------------------------------------------

pub(crate) fn load_people_from_reader<R: Read>(rdr: R) -> Result<Vec<Person>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut people = Vec::new();
    for result in reader.deserialize::<RawPerson>() {
        match result {
            Ok(raw) => {
                let player_id = raw.playerID.trim().to_string();
                if player_id.is_empty() {
                    warn!("skipping person row with empty playerID");
                    continue;
                }
                people.push(Person {
                    player_id,
                    name_first: non_empty(raw.nameFirst),
                    name_last: non_empty(raw.nameLast),
                    weight: raw.weight.filter(|w| w.is_finite()),
                    height: raw.height.filter(|h| h.is_finite()),
                    bats: non_empty(raw.bats),
                    throws: non_empty(raw.throws),
                    debut: parse_date(raw.debut),
                    final_game: parse_date(raw.finalGame),
                });
            }
            Err(e) => {
                warn!("skipping malformed person row: {}", e);
            }
        }
    }
    Ok(people)
}

/// Batting.csv, Pitching.csv and Fielding.csv share one layout: key columns
/// followed by statistic columns.
pub(crate) fn load_season_rows_from_reader<R: Read>(rdr: R) -> Result<Vec<RawSeasonRow>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let headers = reader.headers()?.clone();
    let player_col = require_column(&headers, "playerID")?;
    let year_col = require_column(&headers, "yearID")?;
    let stint_col = find_column(&headers, "stint");
    let team_col = find_column(&headers, "teamID");
    let league_col = find_column(&headers, "lgID");

    let mut rows = Vec::new();
    for (row_num, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping malformed season row {}: {}", row_num + 1, e);
                continue;
            }
        };
        let Some(player_id) = cell(&record, Some(player_col)) else {
            warn!("skipping season row {}: empty playerID", row_num + 1);
            continue;
        };
        rows.push(RawSeasonRow {
            player_id: player_id.to_string(),
            year: cell(&record, Some(year_col)).and_then(|s| s.parse().ok()),
            stint: cell(&record, stint_col).and_then(|s| s.parse().ok()),
            team_id: cell(&record, team_col).map(str::to_string),
            league: cell(&record, league_col).map(str::to_string),
            stats: numeric_columns(&headers, &record, SEASON_KEY_COLUMNS),
        });
    }
    Ok(rows)
}

/// Teams.csv. Attendance is kept raw here; the repository scales it.
pub(crate) fn load_teams_from_reader<R: Read>(rdr: R) -> Result<Vec<TeamSeasonRecord>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let headers = reader.headers()?.clone();
    let team_col = require_column(&headers, "teamID")?;
    let year_col = require_column(&headers, "yearID")?;
    let league_col = find_column(&headers, "lgID");
    let franchise_col = find_column(&headers, "franchID");
    let name_col = find_column(&headers, "name");
    let ws_col = find_column(&headers, "WSWin");

    let mut teams = Vec::new();
    for (row_num, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping malformed team row {}: {}", row_num + 1, e);
                continue;
            }
        };
        let (Some(team_id), Some(year)) = (
            cell(&record, Some(team_col)),
            cell(&record, Some(year_col)).and_then(|s| s.parse::<i32>().ok()),
        ) else {
            warn!("skipping team row {}: missing teamID or yearID", row_num + 1);
            continue;
        };
        teams.push(TeamSeasonRecord {
            team_id: team_id.to_string(),
            year,
            league: cell(&record, league_col).map(str::to_string),
            franchise_id: cell(&record, franchise_col).map(str::to_string),
            name: cell(&record, name_col).map(str::to_string),
            world_series_win: is_yes(cell(&record, ws_col)),
            stats: numeric_columns(&headers, &record, TEAM_KEY_COLUMNS),
        });
    }
    Ok(teams)
}

pub(crate) fn load_franchises_from_reader<R: Read>(rdr: R) -> Result<Vec<FranchiseRecord>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut franchises = Vec::new();
    for result in reader.deserialize::<RawFranchise>() {
        match result {
            Ok(raw) => franchises.push(FranchiseRecord {
                franchise_id: raw.franchID.trim().to_string(),
                name: non_empty(raw.franchName),
                active: is_yes(raw.active.as_deref()),
            }),
            Err(e) => {
                warn!("skipping malformed franchise row: {}", e);
            }
        }
    }
    Ok(franchises)
}

pub(crate) fn load_awards_from_reader<R: Read>(rdr: R) -> Result<Vec<RawAwardRow>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut awards = Vec::new();
    for result in reader.deserialize::<RawAward>() {
        match result {
            Ok(raw) => awards.push(RawAwardRow {
                player_id: raw.playerID.trim().to_string(),
                award_id: raw.awardID.trim().to_string(),
                year: raw.yearID,
                league: non_empty(raw.lgID),
            }),
            Err(e) => {
                warn!("skipping malformed award row: {}", e);
            }
        }
    }
    Ok(awards)
}

pub(crate) fn load_all_stars_from_reader<R: Read>(rdr: R) -> Result<Vec<AllStarRecord>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut rows = Vec::new();
    for result in reader.deserialize::<RawAllStar>() {
        match result {
            Ok(raw) => rows.push(AllStarRecord {
                player_id: raw.playerID.trim().to_string(),
                year: raw.yearID,
                team_id: non_empty(raw.teamID),
            }),
            Err(e) => {
                warn!("skipping malformed all-star row: {}", e);
            }
        }
    }
    Ok(rows)
}

pub(crate) fn load_hall_of_fame_from_reader<R: Read>(rdr: R) -> Result<Vec<HallOfFameRecord>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut rows = Vec::new();
    for result in reader.deserialize::<RawHallOfFame>() {
        match result {
            Ok(raw) => rows.push(HallOfFameRecord {
                player_id: raw.playerID.trim().to_string(),
                year: raw.yearid,
                inducted: is_yes(raw.inducted.as_deref()),
            }),
            Err(e) => {
                warn!("skipping malformed hall of fame row: {}", e);
            }
        }
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

fn load_path<T>(
    path: &Path,
    load: impl FnOnce(std::fs::File) -> Result<T, csv::Error>,
) -> Result<T, IngestError> {
    let file = std::fs::File::open(path).map_err(|e| IngestError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load(file).map_err(|e| IngestError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load People.csv.
pub fn load_people(path: &Path) -> Result<Vec<Person>, IngestError> {
    load_path(path, load_people_from_reader)
}

/// Load Batting.csv, Pitching.csv or Fielding.csv.
pub fn load_season_rows(path: &Path) -> Result<Vec<RawSeasonRow>, IngestError> {
    load_path(path, load_season_rows_from_reader)
}

/// Load Teams.csv.
pub fn load_teams(path: &Path) -> Result<Vec<TeamSeasonRecord>, IngestError> {
    load_path(path, load_teams_from_reader)
}

/// Load TeamsFranchises.csv.
pub fn load_franchises(path: &Path) -> Result<Vec<FranchiseRecord>, IngestError> {
    load_path(path, load_franchises_from_reader)
}

/// Load AwardsPlayers.csv (all award types; filtering happens in the repository).
pub fn load_awards(path: &Path) -> Result<Vec<RawAwardRow>, IngestError> {
    load_path(path, load_awards_from_reader)
}

/// Load AllstarFull.csv.
pub fn load_all_stars(path: &Path) -> Result<Vec<AllStarRecord>, IngestError> {
    load_path(path, load_all_stars_from_reader)
}

/// Load HallOfFame.csv.
pub fn load_hall_of_fame(path: &Path) -> Result<Vec<HallOfFameRecord>, IngestError> {
    load_path(path, load_hall_of_fame_from_reader)
}

/// Load all nine tables from the configured paths.
pub fn load_tables(paths: &DataPaths) -> Result<RawTables, IngestError> {
    let tables = RawTables {
        people: load_people(Path::new(&paths.people))?,
        batting: load_season_rows(Path::new(&paths.batting))?,
        pitching: load_season_rows(Path::new(&paths.pitching))?,
        fielding: load_season_rows(Path::new(&paths.fielding))?,
        teams: load_teams(Path::new(&paths.teams))?,
        franchises: load_franchises(Path::new(&paths.franchises))?,
        awards: load_awards(Path::new(&paths.awards))?,
        all_stars: load_all_stars(Path::new(&paths.all_stars))?,
        hall_of_fame: load_hall_of_fame(Path::new(&paths.hall_of_fame))?,
    };

    if tables.people.is_empty() {
        return Err(IngestError::Validation("people CSV produced zero valid rows".into()));
    }
    if tables.teams.is_empty() {
        return Err(IngestError::Validation("teams CSV produced zero valid rows".into()));
    }

    info!(
        "Ingested {} people, {} batting, {} pitching, {} fielding, {} team rows",
        tables.people.len(),
        tables.batting.len(),
        tables.pitching.len(),
        tables.fielding.len(),
        tables.teams.len()
    );
    Ok(tables)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn people_biography_columns() {
        let csv_data = "\
playerID,birthYear,nameFirst,nameLast,weight,height,bats,throws,debut,finalGame,retroID
mauerjo01,1983,Joe,Mauer,225,77,L,R,2004-04-05,2018-09-30,mauej001
ghostpl01,1900,,,,,,,,,";

        let people = load_people_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(people.len(), 2);

        let joe = &people[0];
        assert_eq!(joe.player_id, "mauerjo01");
        assert_eq!(joe.name_first.as_deref(), Some("Joe"));
        assert_eq!(joe.name_last.as_deref(), Some("Mauer"));
        assert_eq!(joe.weight, Some(225.0));
        assert_eq!(joe.height, Some(77.0));
        assert_eq!(joe.bats.as_deref(), Some("L"));
        assert_eq!(joe.debut, NaiveDate::from_ymd_opt(2004, 4, 5));
        assert_eq!(joe.final_game, NaiveDate::from_ymd_opt(2018, 9, 30));

        let ghost = &people[1];
        assert!(ghost.name_first.is_none());
        assert!(ghost.weight.is_none());
        assert!(ghost.debut.is_none());
    }

    #[test]
    fn season_rows_keep_numeric_columns() {
        let csv_data = "\
playerID,yearID,stint,teamID,lgID,G,AB,R,H,2B,3B,HR,RBI,SB,CS,BB,SO,IBB,HBP,SH,SF,GIDP
mauerjo01,2009,1,MIN,AL,138,523,94,191,30,1,28,96,4,1,76,63,14,2,0,5,13";

        let rows = load_season_rows_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.player_id, "mauerjo01");
        assert_eq!(row.year, Some(2009));
        assert_eq!(row.stint, Some(1));
        assert_eq!(row.team_id.as_deref(), Some("MIN"));
        assert_eq!(row.league.as_deref(), Some("AL"));
        assert_eq!(row.stats.get("HR"), Some(&28.0));
        assert_eq!(row.stats.get("2B"), Some(&30.0));
        assert_eq!(row.stats.get("AB"), Some(&523.0));
        // Key columns never leak into the stat line.
        assert!(!row.stats.contains_key("yearID"));
        assert!(!row.stats.contains_key("stint"));
    }

    #[test]
    fn blank_stat_cells_are_absent_not_zero() {
        let csv_data = "\
playerID,yearID,stint,teamID,lgID,G,AB,H,HR,IBB,SF
oldtime01,1880,1,BSN,NL,80,300,90,2,,";

        let rows = load_season_rows_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(rows[0].stats.get("HR"), Some(&2.0));
        assert!(!rows[0].stats.contains_key("IBB"));
        assert!(!rows[0].stats.contains_key("SF"));
    }

    #[test]
    fn season_row_without_year_is_kept_for_merge_to_drop() {
        let csv_data = "\
playerID,yearID,stint,teamID,lgID,HR
mauerjo01,,1,MIN,AL,3
,2009,1,MIN,AL,3";

        let rows = load_season_rows_from_reader(csv_data.as_bytes()).unwrap();
        // Empty playerID is dropped here; missing year is left to the merge.
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].year, None);
    }

    #[test]
    fn fielding_position_column_is_not_a_stat() {
        let csv_data = "\
playerID,yearID,stint,teamID,lgID,POS,G,GS,InnOuts,PO,A,E,DP,PB,WP,SB,CS,ZR
mauerjo01,2009,1,MIN,AL,C,109,108,2838,699,41,3,5,4,,54,21,";

        let rows = load_season_rows_from_reader(csv_data.as_bytes()).unwrap();
        assert!(!rows[0].stats.contains_key("POS"));
        assert_eq!(rows[0].stats.get("E"), Some(&3.0));
        assert_eq!(rows[0].stats.get("PB"), Some(&4.0));
        assert!(!rows[0].stats.contains_key("WP"));
    }

    #[test]
    fn missing_player_column_is_an_error() {
        let csv_data = "\
yearID,HR
2009,28";
        assert!(load_season_rows_from_reader(csv_data.as_bytes()).is_err());
    }

    #[test]
    fn teams_rows_parse_flags_and_stats() {
        let csv_data = "\
yearID,lgID,teamID,franchID,divID,Rank,G,W,L,DivWin,WCWin,LgWin,WSWin,R,ERA,name,park,attendance
1991,AL,MIN,MIN,W,1,162,95,67,Y,,Y,Y,776,3.69,Minnesota Twins,Hubert H. Humphrey Metrodome,2293842
1992,AL,MIN,MIN,W,2,162,90,72,N,,N,N,747,3.70,Minnesota Twins,Hubert H. Humphrey Metrodome,2482428";

        let teams = load_teams_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(teams.len(), 2);
        assert!(teams[0].world_series_win);
        assert!(!teams[1].world_series_win);
        assert_eq!(teams[0].franchise_id.as_deref(), Some("MIN"));
        assert_eq!(teams[0].name.as_deref(), Some("Minnesota Twins"));
        assert_eq!(teams[0].stat("W"), Some(95.0));
        assert_eq!(teams[0].stat("attendance"), Some(2293842.0));
        assert!((teams[0].stat("ERA").unwrap() - 3.69).abs() < 1e-9);
        assert!(teams[0].stat("Rank").is_none());
    }

    #[test]
    fn team_row_without_year_skipped() {
        let csv_data = "\
yearID,lgID,teamID,W
,AL,MIN,95
1992,AL,MIN,90";

        let teams = load_teams_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].year, 1992);
    }

    #[test]
    fn franchises_active_flag() {
        let csv_data = "\
franchID,franchName,active,NAassoc
MIN,Minnesota Twins,Y,
WOR,Worcester Ruby Legs,N,
ALT,Altoona Mountain City,,";

        let franchises = load_franchises_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(franchises.len(), 3);
        assert!(franchises[0].active);
        assert!(!franchises[1].active);
        assert!(!franchises[2].active);
    }

    #[test]
    fn awards_keep_every_type_at_ingest() {
        let csv_data = "\
playerID,awardID,yearID,lgID,tie,notes
mauerjo01,Most Valuable Player,2009,AL,,
mauerjo01,Silver Slugger,2009,AL,,C
mauerjo01,TSN All-Star,2009,AL,,C";

        let awards = load_awards_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(awards.len(), 3);
        assert_eq!(awards[2].award_id, "TSN All-Star");
        assert_eq!(awards[0].league.as_deref(), Some("AL"));
    }

    #[test]
    fn hall_of_fame_lowercase_year_column() {
        let csv_data = "\
playerID,yearid,votedBy,ballots,needed,votes,inducted,category,needed_note
ruthba01,1936,BBWAA,226,170,215,Y,Player,
someguy01,1936,BBWAA,226,170,3,N,Player,";

        let rows = load_hall_of_fame_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].year, 1936);
        assert!(rows[0].inducted);
        assert!(!rows[1].inducted);
    }

    #[test]
    fn all_star_rows() {
        let csv_data = "\
playerID,yearID,gameNum,gameID,teamID,lgID,GP,startingPos
mauerjo01,2006,0,ALS200607110,MIN,AL,1,
mauerjo01,2008,0,NLS200807150,MIN,AL,1,2
badrow,notayear,0,,MIN,AL,1,";

        let rows = load_all_stars_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].year, 2008);
        assert_eq!(rows[1].team_id.as_deref(), Some("MIN"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_people(Path::new("/definitely/not/here/People.csv")).unwrap_err();
        match err {
            IngestError::Io { path, .. } => assert!(path.ends_with("People.csv")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
