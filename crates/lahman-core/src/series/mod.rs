// Per-player series: derived metrics, award tags, gap-filled seasons.

pub mod awards;
pub mod metrics;
pub mod season;
