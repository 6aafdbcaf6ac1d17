//! Interfaces of the storage, date and publishing collaborators

use std::fmt::Debug;

use chrono::NaiveDate;

use crate::calendar::UpcomingWindow;
use crate::error::{PublishError, RetrievalError};

/// Source of the raw genealogy file
pub trait SourceRetriever: Debug {
    /// Fetch the raw bytes of the file
    ///
    /// # Returns
    /// The file content, undecoded
    ///
    /// # Errors
    /// Any failure is fatal for the run and reported as a single `RetrievalError`
    fn retrieve(&self) -> Result<Vec<u8>, RetrievalError>;

    /// Human-readable location for log lines
    fn describe(&self) -> String;
}

/// Lookup of the Hebrew dates in an upcoming window
pub trait UpcomingDates: Debug {
    /// Dates from `start` for `days` consecutive days
    ///
    /// # Arguments
    /// * `start` - First Gregorian day of the window
    /// * `days` - Number of days covered
    fn upcoming(&self, start: NaiveDate, days: usize) -> UpcomingWindow;
}

/// Destination of the rendered report
pub trait ResultPublisher: Debug {
    /// Publish a report
    ///
    /// # Arguments
    /// * `title` - Title of the tracked record
    /// * `body` - Rendered report
    /// * `has_relevant_dates` - Whether any event fell in the window
    ///
    /// # Errors
    /// Returns an error if the destination cannot be written; the run is then incomplete
    fn publish(&self, title: &str, body: &str, has_relevant_dates: bool)
    -> Result<(), PublishError>;
}
