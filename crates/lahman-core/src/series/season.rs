// Gap-filled, award-annotated season series for one player and statistic.

use crate::data::records::{AwardRecord, SeasonRecord};
use crate::series::awards::{AwardClassifier, AwardTags};
use crate::stats::PlayerStat;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// One year of a player's series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonPoint {
    pub year: i32,
    /// `None` when the season exists but the statistic is missing for it.
    pub value: Option<f64>,
    pub awards: AwardTags,
    /// False for gap years with no season row (value 0, never tagged).
    pub played: bool,
}

/// A `(year, value)` pair as drawn in one bar group.
pub type YearValue = (i32, Option<f64>);

/// The three bar groups a player chart draws.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesBuckets {
    pub ordinary: Vec<YearValue>,
    pub mvp: Vec<YearValue>,
    pub specialty: Vec<YearValue>,
}

/// Every year from the player's first to last season in one family, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonSeries {
    pub player_id: String,
    pub stat: PlayerStat,
    pub points: Vec<SeasonPoint>,
}

impl SeasonSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// First and last year covered, if any.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        Some((self.points.first()?.year, self.points.last()?.year))
    }

    /// Seasons carrying no award, gap years included.
    pub fn ordinary(&self) -> Vec<YearValue> {
        self.select(|tags| tags.is_ordinary())
    }

    /// Seasons in which the player won MVP.
    pub fn mvp(&self) -> Vec<YearValue> {
        self.select(|tags| tags.mvp)
    }

    /// Seasons in which the player won the family's specialty award.
    pub fn specialty(&self) -> Vec<YearValue> {
        self.select(|tags| tags.specialty)
    }

    pub fn buckets(&self) -> SeriesBuckets {
        SeriesBuckets {
            ordinary: self.ordinary(),
            mvp: self.mvp(),
            specialty: self.specialty(),
        }
    }

    fn select(&self, keep: impl Fn(&AwardTags) -> bool) -> Vec<YearValue> {
        self.points
            .iter()
            .filter(|p| keep(&p.awards))
            .map(|p| (p.year, p.value))
            .collect()
    }
}

/// Build the series for `player_id` and `stat` from one family's season table.
///
/// `seasons` must be the table of `stat.family()`; the caller picks it. An
/// unknown player yields an empty series. Years between the first and last
/// season without a row are filled with 0 and left untagged.
pub fn build_series(
    player_id: &str,
    stat: PlayerStat,
    seasons: &[SeasonRecord],
    awards: &[AwardRecord],
) -> SeasonSeries {
    let mut by_year: HashMap<i32, &SeasonRecord> = HashMap::new();
    for season in seasons.iter().filter(|s| s.player_id == player_id) {
        by_year.entry(season.year).or_insert(season);
    }

    let (Some(&year_min), Some(&year_max)) = (by_year.keys().min(), by_year.keys().max()) else {
        debug!("no {} seasons for player '{}'", stat.family(), player_id);
        return SeasonSeries {
            player_id: player_id.to_string(),
            stat,
            points: Vec::new(),
        };
    };

    let classifier = AwardClassifier::for_family(stat.family());
    let player_awards: Vec<&AwardRecord> = awards.iter().filter(|a| a.player_id == player_id).collect();

    let points: Vec<SeasonPoint> = (year_min..=year_max)
        .map(|year| match by_year.get(&year) {
            None => SeasonPoint {
                year,
                value: Some(0.0),
                awards: AwardTags::default(),
                played: false,
            },
            Some(season) => SeasonPoint {
                year,
                value: season.stat(stat.code()),
                awards: classifier.classify(player_awards.iter().copied(), player_id, year),
                played: true,
            },
        })
        .collect();

    debug!(
        "built {} series for '{}': {}..={} ({} points)",
        stat,
        player_id,
        year_min,
        year_max,
        points.len()
    );

    SeasonSeries {
        player_id: player_id.to_string(),
        stat,
        points,
    }
}
