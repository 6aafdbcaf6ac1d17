//! Lookahead windows of upcoming Hebrew dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::date::HebrewDate;

/// One day of a lookahead window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingDate {
    /// Hebrew date of the day
    pub hebrew: HebrewDate,
    /// Gregorian date of the day
    pub gregorian: NaiveDate,
}

impl UpcomingDate {
    /// Pair a Gregorian day with its Hebrew date
    #[must_use]
    pub fn from_gregorian(gregorian: NaiveDate) -> Self {
        Self {
            hebrew: HebrewDate::from_gregorian(gregorian),
            gregorian,
        }
    }
}

/// The days an upcoming-dates source returned, in calendar order,
/// plus the weekly metadata it may carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingWindow {
    /// Days in ascending Gregorian order
    pub dates: Vec<UpcomingDate>,
    /// Torah portion read during the window, when known
    pub torah_portion: Option<String>,
}

impl UpcomingWindow {
    /// Create a window from days in any order
    #[must_use]
    pub fn new(mut dates: Vec<UpcomingDate>) -> Self {
        dates.sort_by_key(|d| d.gregorian);
        dates.dedup_by_key(|d| d.gregorian);
        Self {
            dates,
            torah_portion: None,
        }
    }

    /// Attach the weekly Torah portion
    #[must_use]
    pub fn with_torah_portion(mut self, portion: impl Into<String>) -> Self {
        self.torah_portion = Some(portion.into());
        self
    }

    /// First Gregorian day covered
    #[must_use]
    pub fn start(&self) -> Option<NaiveDate> {
        self.dates.first().map(|d| d.gregorian)
    }

    /// Last Gregorian day covered
    #[must_use]
    pub fn end(&self) -> Option<NaiveDate> {
        self.dates.last().map(|d| d.gregorian)
    }

    /// Number of days
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the window covers no days
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::HebrewMonth;

    #[test]
    fn test_window_is_sorted_and_deduplicated() {
        let a = NaiveDate::from_ymd_opt(2024, 12, 17).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 12, 16).unwrap();
        let window = UpcomingWindow::new(vec![
            UpcomingDate::from_gregorian(a),
            UpcomingDate::from_gregorian(b),
            UpcomingDate::from_gregorian(a),
        ]);
        assert_eq!(window.len(), 2);
        assert_eq!(window.start(), Some(b));
        assert_eq!(window.end(), Some(a));
        assert_eq!(window.dates[0].hebrew.month, HebrewMonth::Kislev);
        assert_eq!(window.dates[0].hebrew.day, 15);
    }
}
