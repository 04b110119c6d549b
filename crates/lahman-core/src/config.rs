// Configuration loading and parsing (lahman.toml).

use crate::league::LeagueSelector;
use crate::stats::{PlayerStat, StatFamily, TeamStat, TeamStatGroup};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// File name looked up under `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "lahman.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data_paths: DataPaths,
    pub defaults: Defaults,
}

/// Location of each Lahman table.
#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub people: String,
    pub batting: String,
    pub pitching: String,
    pub fielding: String,
    pub teams: String,
    pub franchises: String,
    pub awards: String,
    pub all_stars: String,
    pub hall_of_fame: String,
}

impl DataPaths {
    /// Standard databank file names under one directory.
    pub fn in_dir(dir: &Path) -> Self {
        let path = |name: &str| dir.join(name).display().to_string();
        DataPaths {
            people: path("People.csv"),
            batting: path("Batting.csv"),
            pitching: path("Pitching.csv"),
            fielding: path("Fielding.csv"),
            teams: path("Teams.csv"),
            franchises: path("TeamsFranchises.csv"),
            awards: path("AwardsPlayers.csv"),
            all_stars: path("AllstarFull.csv"),
            hall_of_fame: path("HallOfFame.csv"),
        }
    }
}

/// Initial selections handed to the renderer before the user picks anything.
#[derive(Debug, Clone, Deserialize)]
pub struct Defaults {
    pub batter: String,
    pub pitcher: String,
    pub team: String,
    pub batting_stat: String,
    pub pitching_stat: String,
    pub fielding_stat: String,
    pub team_stat: String,
    pub league: String,
}

impl Defaults {
    /// Default player statistic code for a family.
    pub fn stat_for(&self, family: StatFamily) -> &str {
        match family {
            StatFamily::Batting => &self.batting_stat,
            StatFamily::Pitching => &self.pitching_stat,
            StatFamily::Fielding => &self.fielding_stat,
        }
    }

    /// Default player for a family. Fielding charts reuse the batter.
    pub fn player_for(&self, family: StatFamily) -> &str {
        match family {
            StatFamily::Pitching => &self.pitcher,
            StatFamily::Batting | StatFamily::Fielding => &self.batter,
        }
    }

    /// Default statistic for a team chart group. The team-stat menus reuse
    /// the player defaults where the code exists in the group, else Wins.
    pub fn team_stat_for(&self, group: TeamStatGroup) -> TeamStat {
        let code = match group {
            TeamStatGroup::Batting => &self.batting_stat,
            TeamStatGroup::Pitching => &self.pitching_stat,
            TeamStatGroup::Fielding => &self.fielding_stat,
            TeamStatGroup::Overview => &self.team_stat,
        };
        TeamStat::parse(group, code).unwrap_or(TeamStat::Wins)
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/lahman.toml` relative to `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    load_config_file(&base_dir.join("config").join(CONFIG_FILE))
}

/// Load and validate an explicit config file.
pub fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let text = read_file(path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Seed `config/lahman.toml` from `defaults/lahman.toml` when it is missing.
///
/// Returns the path written, or `None` when a config file was already in
/// place. An existing `config/lahman.toml` is never overwritten.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.is_file() {
        return Ok(None);
    }

    let source = base_dir.join("defaults").join(CONFIG_FILE);
    if !source.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no config/{CONFIG_FILE} or defaults/{CONFIG_FILE} under {}; \
                 run from the lahman-core crate root or pass --config",
                base_dir.display()
            ),
        });
    }

    if let Some(config_dir) = target.parent() {
        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", config_dir.display()),
        })?;
    }
    std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
    })?;
    info!("created {} from {}", target.display(), source.display());

    Ok(Some(target))
}

/// Load `config/lahman.toml` under the working directory, seeding it from
/// `defaults/` on first run.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_file(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let p = &config.data_paths;
    let path_fields: &[(&str, &str)] = &[
        ("data_paths.people", p.people.as_str()),
        ("data_paths.batting", p.batting.as_str()),
        ("data_paths.pitching", p.pitching.as_str()),
        ("data_paths.fielding", p.fielding.as_str()),
        ("data_paths.teams", p.teams.as_str()),
        ("data_paths.franchises", p.franchises.as_str()),
        ("data_paths.awards", p.awards.as_str()),
        ("data_paths.all_stars", p.all_stars.as_str()),
        ("data_paths.hall_of_fame", p.hall_of_fame.as_str()),
    ];
    for (name, val) in path_fields {
        if val.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    let d = &config.defaults;
    let id_fields: &[(&str, &str)] = &[
        ("defaults.batter", d.batter.as_str()),
        ("defaults.pitcher", d.pitcher.as_str()),
        ("defaults.team", d.team.as_str()),
    ];
    for (name, val) in id_fields {
        if val.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    let stat_fields: &[(&str, StatFamily)] = &[
        ("defaults.batting_stat", StatFamily::Batting),
        ("defaults.pitching_stat", StatFamily::Pitching),
        ("defaults.fielding_stat", StatFamily::Fielding),
    ];
    for (name, family) in stat_fields {
        PlayerStat::parse(*family, d.stat_for(*family)).map_err(|e| ConfigError::ValidationError {
            field: name.to_string(),
            message: e.to_string(),
        })?;
    }

    TeamStat::parse(TeamStatGroup::Overview, &d.team_stat).map_err(|e| {
        ConfigError::ValidationError {
            field: "defaults.team_stat".into(),
            message: e.to_string(),
        }
    })?;

    LeagueSelector::from_str_selector(&d.league).map_err(|e| ConfigError::ValidationError {
        field: "defaults.league".into(),
        message: e.to_string(),
    })?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Returns the lahman-core crate root, which holds `defaults/`.
    fn project_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    }

    /// Fresh temp base dir with `config/lahman.toml` holding `contents`.
    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config").join(CONFIG_FILE), contents).unwrap();
        tmp
    }

    fn default_text() -> String {
        fs::read_to_string(project_root().join("defaults").join(CONFIG_FILE)).unwrap()
    }

    #[test]
    fn default_config_is_valid() {
        let tmp = temp_config("lahman_config_defaults", &default_text());
        let config = load_config_from(&tmp).expect("should load default config");

        assert_eq!(config.data_paths.people, "data/core/People.csv");
        assert_eq!(config.data_paths.hall_of_fame, "data/core/HallOfFame.csv");
        assert_eq!(config.defaults.batter, "mauerjo01");
        assert_eq!(config.defaults.pitcher, "clemero02");
        assert_eq!(config.defaults.team, "MIN");
        assert_eq!(config.defaults.batting_stat, "HR");
        assert_eq!(config.defaults.pitching_stat, "ERA");
        assert_eq!(config.defaults.fielding_stat, "E");
        assert_eq!(config.defaults.league, "Both");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn seeds_config_from_defaults_once() {
        let tmp = std::env::temp_dir().join("lahman_config_seed");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::write(tmp.join("defaults").join(CONFIG_FILE), default_text()).unwrap();

        let written = ensure_config_file(&tmp).unwrap();
        assert_eq!(written, Some(tmp.join("config").join(CONFIG_FILE)));
        assert!(load_config_from(&tmp).is_ok());

        // A user-edited config survives the next run.
        fs::write(tmp.join("config").join(CONFIG_FILE), "edited").unwrap();
        assert_eq!(ensure_config_file(&tmp).unwrap(), None);
        assert_eq!(fs::read_to_string(tmp.join("config").join(CONFIG_FILE)).unwrap(), "edited");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn existing_config_needs_no_defaults() {
        let tmp = temp_config("lahman_config_no_defaults", &default_text());
        assert_eq!(ensure_config_file(&tmp).unwrap(), None);
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_defaults_and_config_is_an_error() {
        let tmp = std::env::temp_dir().join("lahman_config_nothing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = ensure_config_file(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::DefaultsCopyError { .. }));
        assert!(!tmp.join("config").exists());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let tmp = std::env::temp_dir().join("lahman_config_missing_file");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let tmp = temp_config("lahman_config_parse", "[data_paths\npeople = ");
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_stat_from_wrong_family() {
        let text = default_text().replace("batting_stat = \"HR\"", "batting_stat = \"ERA\"");
        let tmp = temp_config("lahman_config_bad_stat", &text);

        let err = load_config_from(&tmp).unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "defaults.batting_stat"),
            other => panic!("expected ValidationError, got {other:?}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_unknown_league() {
        let text = default_text().replace("league = \"Both\"", "league = \"FL\"");
        let tmp = temp_config("lahman_config_bad_league", &text);

        let err = load_config_from(&tmp).unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "defaults.league"),
            other => panic!("expected ValidationError, got {other:?}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_data_path() {
        let text = default_text().replace(
            "teams = \"data/core/Teams.csv\"",
            "teams = \"\"",
        );
        let tmp = temp_config("lahman_config_empty_path", &text);

        let err = load_config_from(&tmp).unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "data_paths.teams"),
            other => panic!("expected ValidationError, got {other:?}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn team_stat_defaults_fall_back_to_wins() {
        let tmp = temp_config("lahman_config_team_defaults", &default_text());
        let config = load_config_from(&tmp).unwrap();

        // HR is a team batting stat; ERA a team pitching stat; E a fielding stat.
        assert_eq!(config.defaults.team_stat_for(TeamStatGroup::Batting), TeamStat::HomeRuns);
        assert_eq!(
            config.defaults.team_stat_for(TeamStatGroup::Pitching),
            TeamStat::EarnedRunAverage
        );
        assert_eq!(config.defaults.team_stat_for(TeamStatGroup::Fielding), TeamStat::Errors);
        assert_eq!(config.defaults.team_stat_for(TeamStatGroup::Overview), TeamStat::Wins);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn data_paths_in_dir_uses_databank_names() {
        let paths = DataPaths::in_dir(Path::new("/data/core"));
        assert!(paths.batting.ends_with("Batting.csv"));
        assert!(paths.franchises.ends_with("TeamsFranchises.csv"));
        assert!(paths.all_stars.ends_with("AllstarFull.csv"));
    }
}
