// Lahman tables: typed records, CSV ingestion, and the immutable repository.

pub mod ingest;
pub mod records;
pub mod repository;
