//! Upcoming Hebrew-calendar birthdays, yahrzeits and wedding anniversaries
//! from a GEDCOM family tree, with each subject's genealogical distance from a
//! reference individual.
//!
//! The pipeline normalizes the raw file, parses it into typed records, matches
//! recurring events against a window of upcoming Hebrew dates, measures
//! distances over the relationship graph and assembles a report.

pub mod adapters;
pub mod algorithm;
pub mod calendar;
pub mod collections;
pub mod common;
pub mod config;
pub mod error;
pub mod gedcom;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod utils;

// Configuration and errors
pub use config::{NotifierConfig, OutputFormat, RawSettings};
pub use error::{NotifierError, Result};

// Pipeline
pub use pipeline::{CoreOutput, Notifier, RunSummary, build_report, render};

// Core types
pub use algorithm::kinship::{DistanceEngine, DistanceResult, RelationshipGraph, shortest_path};
pub use algorithm::matching::{HebrewDateMatcher, LeapMonthPolicy, MatchedEvent};
pub use calendar::{HebrewDate, HebrewMonth, MonthTable, UpcomingDate, UpcomingWindow};
pub use collections::FamilyTree;
pub use gedcom::{GedcomParser, ParsedTree, normalize};
pub use models::{EventKind, Family, FamilyEvent, Individual, ParseSkip, SkipLog};
pub use report::{Locale, Report};
