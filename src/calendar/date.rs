//! Hebrew dates and their mapping to Gregorian dates.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::arithmetic::{days_in_month, from_day_count, is_leap_year, month_exists, to_day_count};
use super::month::HebrewMonth;
use super::numerals::to_hebrew_numeral;
use crate::error::DateConversionError;

/// Smallest year the conversion supports
pub const MIN_YEAR: i32 = 1;
/// Largest year the conversion supports
pub const MAX_YEAR: i32 = 9999;

/// A complete, valid Hebrew calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HebrewDate {
    /// Hebrew year (anno mundi)
    pub year: i32,
    /// Month
    pub month: HebrewMonth,
    /// Day of month, 1-based
    pub day: u8,
}

impl HebrewDate {
    /// Create a validated date
    ///
    /// # Errors
    /// Returns an error if the year is out of range, the month does not occur
    /// in the year, or the day exceeds the month length
    pub fn new(year: i32, month: HebrewMonth, day: u8) -> Result<Self, DateConversionError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(DateConversionError::YearOutOfRange(year));
        }
        if !month_exists(year, month) {
            return Err(DateConversionError::MonthNotInYear { month, year });
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(DateConversionError::DayOutOfRange { day, month });
        }
        Ok(Self { year, month, day })
    }

    /// Hebrew date falling on a Gregorian day
    #[must_use]
    pub fn from_gregorian(date: NaiveDate) -> Self {
        let (year, month, day) = from_day_count(i64::from(date.num_days_from_ce()));
        Self { year, month, day }
    }

    /// Gregorian day of this date
    ///
    /// # Errors
    /// Returns an error if the date lies outside the range `chrono` can represent
    pub fn to_gregorian(self) -> Result<NaiveDate, DateConversionError> {
        let count = to_day_count(self.year, self.month, self.day);
        i32::try_from(count)
            .ok()
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .ok_or(DateConversionError::YearOutOfRange(self.year))
    }

    /// Whether the date's year has two Adars
    #[must_use]
    pub fn in_leap_year(self) -> bool {
        is_leap_year(self.year)
    }

    /// Day and month written in Hebrew, e.g. "טו בכסלו"
    #[must_use]
    pub fn hebrew_display(self) -> String {
        format!(
            "{} ב{}",
            to_hebrew_numeral(u32::from(self.day)),
            self.month.hebrew_name(self.in_leap_year())
        )
    }

    /// Day and month in transliteration, e.g. "15 Kislev"
    #[must_use]
    pub fn english_display(self) -> String {
        format!("{} {}", self.day, self.month.english_name(self.in_leap_year()))
    }
}

impl fmt::Display for HebrewDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.day,
            self.month.english_name(self.in_leap_year()),
            self.year
        )
    }
}

/// Recurring anchor of an event: the month and day it is observed on,
/// plus the year it originated in when the source recorded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnchorDate {
    /// Month of the original event
    pub month: HebrewMonth,
    /// Day of the original event
    pub day: u8,
    /// Hebrew year of the original event
    pub year: Option<i32>,
    /// Whether the original year was a leap year (affects how plain Adar reads)
    pub leap_origin: bool,
}

impl AnchorDate {
    /// Anchor with no known year
    #[must_use]
    pub const fn new(month: HebrewMonth, day: u8) -> Self {
        Self {
            month,
            day,
            year: None,
            leap_origin: false,
        }
    }

    /// Anchor of a full date
    #[must_use]
    pub fn from_date(date: HebrewDate) -> Self {
        Self {
            month: date.month,
            day: date.day,
            year: Some(date.year),
            leap_origin: date.in_leap_year(),
        }
    }
}

impl From<HebrewDate> for AnchorDate {
    fn from(date: HebrewDate) -> Self {
        Self::from_date(date)
    }
}
