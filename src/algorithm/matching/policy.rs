//! Observance of anchors whose day does not exist in a given year

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calendar::arithmetic::{from_day_count, to_day_count};
use crate::calendar::{AnchorDate, HebrewDate, HebrewMonth, days_in_month, is_leap_year};
use crate::error::ConfigError;

/// What to do when an anchor's month or day is missing from the occurrence year
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeapMonthPolicy {
    /// Adar II falls back to Adar; a missing 30th moves to the next day
    #[default]
    ShiftToAdjacent,
    /// The anchor is not observed that year
    Skip,
}

impl LeapMonthPolicy {
    /// The day `anchor` is observed on in Hebrew year `year`, if any.
    ///
    /// Plain Adar is always observed in the first Adar of a leap year.
    #[must_use]
    pub fn observed_in(self, anchor: &AnchorDate, year: i32) -> Option<HebrewDate> {
        let month = match anchor.month {
            HebrewMonth::AdarII if !is_leap_year(year) => match self {
                Self::ShiftToAdjacent => HebrewMonth::Adar,
                Self::Skip => return None,
            },
            month => month,
        };

        let length = days_in_month(year, month);
        if anchor.day <= length {
            return HebrewDate::new(year, month, anchor.day).ok();
        }
        match self {
            Self::ShiftToAdjacent => {
                let (year, month, day) = from_day_count(to_day_count(year, month, length) + 1);
                Some(HebrewDate { year, month, day })
            }
            Self::Skip => None,
        }
    }

    /// Name accepted on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShiftToAdjacent => "shift-to-adjacent",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for LeapMonthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeapMonthPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "shift-to-adjacent" | "shift" => Ok(Self::ShiftToAdjacent),
            "skip" => Ok(Self::Skip),
            _ => Err(ConfigError::Unsupported {
                name: "leap month policy",
                value: s.to_string(),
            }),
        }
    }
}
