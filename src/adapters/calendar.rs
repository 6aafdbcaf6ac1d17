//! Offline upcoming-dates source

use chrono::NaiveDate;

use crate::calendar::{UpcomingDate, UpcomingWindow};
use crate::common::traits::UpcomingDates;

/// Computes upcoming Hebrew dates locally.
///
/// Carries no weekly metadata, so the Torah portion is always absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarSource;

impl CalendarSource {
    /// Create a source
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl UpcomingDates for CalendarSource {
    fn upcoming(&self, start: NaiveDate, days: usize) -> UpcomingWindow {
        let dates = start
            .iter_days()
            .take(days)
            .map(|day| {
                let date = UpcomingDate::from_gregorian(day);
                log::debug!("{} is {}", date.gregorian, date.hebrew);
                date
            })
            .collect();
        UpcomingWindow::new(dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::HebrewMonth;

    #[test]
    fn test_week_of_kislev() {
        let start = NaiveDate::from_ymd_opt(2024, 12, 16).unwrap();
        let window = CalendarSource::new().upcoming(start, 7);
        assert_eq!(window.len(), 7);
        assert_eq!(window.start(), Some(start));
        assert_eq!(window.end(), NaiveDate::from_ymd_opt(2024, 12, 22));
        let first = window.dates[0].hebrew;
        assert_eq!((first.month, first.day, first.year), (HebrewMonth::Kislev, 15, 5785));
        assert!(window.torah_portion.is_none());
    }

    #[test]
    fn test_zero_days_is_empty() {
        let start = NaiveDate::from_ymd_opt(2024, 12, 16).unwrap();
        assert!(CalendarSource::new().upcoming(start, 0).is_empty());
    }
}
