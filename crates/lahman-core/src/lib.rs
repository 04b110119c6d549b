// Library root: re-exports all modules so the CLI and integration tests can
// reach the crate's public API.

pub mod annotate;
pub mod config;
pub mod data;
pub mod engine;
pub mod league;
pub mod series;
pub mod stats;
