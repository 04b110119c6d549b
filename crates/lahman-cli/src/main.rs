// Lahman series CLI.
//
// Startup sequence:
// 1. Initialize tracing (stderr; stdout carries JSON)
// 2. Load config
// 3. Load the nine databank tables, build the repository
// 4. Build the query engine (pivot computed once)
// 5. Run the subcommand and print its result as JSON

use lahman_core::config::{self, Config, DataPaths};
use lahman_core::data::ingest;
use lahman_core::data::repository::Repository;
use lahman_core::engine::Engine;
use lahman_core::stats::{StatFamily, TeamStatGroup};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "lahman")]
#[command(about = "Season series, team and league aggregates from the Lahman databank", long_about = None)]
struct Cli {
    /// Config file path (default: config/lahman.toml, created from defaults/)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read the standard databank file names from this directory instead of
    /// the configured paths
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Gap-filled, award-tagged series for one player
    Player {
        /// batting, pitching or fielding
        #[arg(long, default_value = "batting")]
        family: String,
        /// Player id (default from config)
        #[arg(long)]
        id: Option<String>,
        /// Statistic code (default from config)
        #[arg(long)]
        stat: Option<String>,
    },
    /// Two statistics of one team by year
    Team {
        #[arg(long)]
        id: Option<String>,
        /// batting, pitching or fielding
        #[arg(long, default_value = "batting")]
        group: String,
        #[arg(long)]
        stat: Option<String>,
        /// Second statistic: W or attendance
        #[arg(long)]
        versus: Option<String>,
        #[arg(long, requires = "to")]
        from: Option<i32>,
        #[arg(long, requires = "from")]
        to: Option<i32>,
    },
    /// League totals by year for AL, NL or both
    League {
        #[arg(long, default_value = "batting")]
        group: String,
        #[arg(long)]
        stat: Option<String>,
        /// AL, NL or Both
        #[arg(long)]
        league: Option<String>,
        #[arg(long, requires = "to")]
        from: Option<i32>,
        #[arg(long, requires = "from")]
        to: Option<i32>,
    },
    /// Player selection list for one family
    Players {
        #[arg(long, default_value = "batting")]
        family: String,
    },
    /// Team selection list
    Teams,
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => config::load_config().context("failed to load configuration")?,
    };
    if let Some(dir) = &cli.data_dir {
        config.data_paths = DataPaths::in_dir(dir);
    }

    let tables = ingest::load_tables(&config.data_paths).context("failed to load databank tables")?;
    let repo = Repository::build(tables);
    let engine = Engine::new(&repo);
    info!("Engine ready: {} pivot rows", engine.pivot().len());

    run(&engine, &config, cli.command)
}

fn run(engine: &Engine<'_>, config: &Config, command: Commands) -> anyhow::Result<()> {
    let defaults = &config.defaults;
    match command {
        Commands::Player { family, id, stat } => {
            let family = StatFamily::from_str_family(&family)?;
            let id = id.as_deref().unwrap_or(defaults.player_for(family));
            let stat = stat.as_deref().unwrap_or(defaults.stat_for(family));
            let series = engine.player_series(family, id, stat)?;

            #[derive(Serialize)]
            struct PlayerOutput<'a> {
                title: String,
                annotation: lahman_core::annotate::PlayerAnnotation,
                buckets: lahman_core::series::season::SeriesBuckets,
                series: &'a lahman_core::series::season::SeasonSeries,
            }
            let annotation = engine.player_annotation(id);
            print_json(&PlayerOutput {
                title: format!("{annotation} {}", series.stat.label()),
                buckets: series.buckets(),
                annotation,
                series: &series,
            })
        }
        Commands::Team {
            id,
            group,
            stat,
            versus,
            from,
            to,
        } => {
            let group = TeamStatGroup::from_str_group(&group)?;
            let id = id.as_deref().unwrap_or(&defaults.team);
            let stat = stat.unwrap_or_else(|| defaults.team_stat_for(group).code().to_string());
            let versus = versus.as_deref().unwrap_or(&defaults.team_stat);
            let series = engine.team_series(group, id, &stat, versus, from.zip(to))?;

            #[derive(Serialize)]
            struct TeamOutput<'a> {
                title: String,
                series: &'a lahman_core::league::query::TeamSeries,
            }
            let annotation = engine.team_annotation(id);
            print_json(&TeamOutput {
                title: format!("{annotation} {} vs {}", series.primary.label(), series.secondary.label()),
                series: &series,
            })
        }
        Commands::League {
            group,
            stat,
            league,
            from,
            to,
        } => {
            let group = TeamStatGroup::from_str_group(&group)?;
            let stat = stat.unwrap_or_else(|| defaults.team_stat_for(group).code().to_string());
            let league = league.as_deref().unwrap_or(&defaults.league);
            let series = engine.league_series(group, &stat, league, from.zip(to))?;
            print_json(&series)
        }
        Commands::Players { family } => {
            let family = StatFamily::from_str_family(&family)?;
            print_json(&engine.player_options(family))
        }
        Commands::Teams => print_json(&engine.team_options()),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{text}");
    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lahman=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("failed to set tracing subscriber")?;

    Ok(())
}
