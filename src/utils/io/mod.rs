//! IO utilities for file operations

pub mod parquet;

pub use parquet::{ArtifactRow, read_events_table, write_events_table};
