//! Error handling for the notifier pipeline.
//!
//! Each stage has its own error type. Whole-run failures are wrapped in
//! [`NotifierError`]; per-record problems never become errors and are recorded
//! as [`crate::models::ParseSkip`] entries instead.

use std::io;
use std::path::PathBuf;

use crate::calendar::HebrewMonth;

/// The raw genealogy text could not be brought into a parseable shape
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// Input had no non-blank lines at all
    #[error("input is empty")]
    Empty,

    /// Every line was either unrepairable or not part of a top-level record
    #[error("no valid top-level records found ({skipped} lines skipped)")]
    NoRecords {
        /// Lines dropped during normalization
        skipped: usize,
    },
}

/// A date triplet that cannot be mapped onto the Hebrew calendar
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateConversionError {
    /// The calendar escape was present but no date followed it
    #[error("empty date value")]
    Empty,

    /// No known month name was found
    #[error("unknown Hebrew month in '{0}'")]
    UnknownMonth(String),

    /// Day token could not be read as a number or Hebrew numeral
    #[error("unreadable day '{0}'")]
    UnreadableDay(String),

    /// Day does not exist in the month
    #[error("day {day} is out of range for {month}")]
    DayOutOfRange {
        /// Requested day
        day: u8,
        /// Month the day was given for
        month: HebrewMonth,
    },

    /// Adar II only exists in leap years
    #[error("{month} does not exist in year {year}")]
    MonthNotInYear {
        /// Requested month
        month: HebrewMonth,
        /// Hebrew year
        year: i32,
    },

    /// Year outside the range the arithmetic supports
    #[error("year {0} is out of range")]
    YearOutOfRange(i32),
}

/// Why no path could be produced between two individuals
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnreachableError {
    /// Both individuals exist but live in different components
    #[error("no path between {source_id} and {target_id}")]
    Disconnected {
        /// Reference individual
        source_id: String,
        /// Individual the path was requested for
        target_id: String,
    },

    /// One of the identifiers is not a node of the graph
    #[error("individual {0} is not part of the relationship graph")]
    UnknownIndividual(String),
}

/// Invalid or missing configuration; aborts the run
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required setting was not supplied
    #[error("missing required setting: {0}")]
    Missing(&'static str),

    /// Identifier does not have the `@token@` shape
    #[error("invalid individual identifier '{0}', expected the form @I1@")]
    InvalidIdentifier(String),

    /// A numeric setting could not be read
    #[error("{name} must be a non-negative integer, got '{value}'")]
    NotAnInteger {
        /// Setting name
        name: &'static str,
        /// Value as supplied
        value: String,
    },

    /// A setting has a value outside its allowed set
    #[error("unsupported value '{value}' for {name}")]
    Unsupported {
        /// Setting name
        name: &'static str,
        /// Value as supplied
        value: String,
    },

    /// The reference individual is well-formed but absent from the tree
    #[error("reference individual {0} not found in the family tree")]
    UnknownReference(String),
}

/// Failure of the storage-retrieval collaborator
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    /// The source does not exist
    #[error("source not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The source exists but may not be read
    #[error("permission denied reading {}", .0.display())]
    PermissionDenied(PathBuf),

    /// Any other I/O failure
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Source location
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

/// Failure of the result-publishing collaborator
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Output target could not be written
    #[error("failed to write output to {}: {source}", path.display())]
    Io {
        /// Output target
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Writing to standard output failed
    #[error("failed to write to stdout: {0}")]
    Stdout(#[source] io::Error),
}

/// Failure while writing or reading the tabular artifact
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// Arrow schema or batch error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet encoding error
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Row conversion error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_arrow::Error),

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Errors that abort a run
#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    /// Input could not be normalized
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Source could not be retrieved
    #[error("retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    /// Results could not be published
    #[error("publish error: {0}")]
    Publish(#[from] PublishError),

    /// Tabular artifact could not be written
    #[error("artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    /// JSON rendering failed
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error outside a collaborator boundary
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for notifier operations
pub type Result<T> = std::result::Result<T, NotifierError>;
